//! Generate a magic square of order n, or a random order-4 pandiagonal one.
//!
//! Usage: cargo run --example generate -- <n> [seed] [--pandiagonal]
//!
//! Example:
//!   cargo run --example generate -- 7
//!   RUST_LOG=debug cargo run --example generate -- 4 42 --pandiagonal

use magic_squares::{MagicSquare, PanDiagonalMagicSquare};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let pandiagonal = args.iter().any(|s| s == "--pandiagonal");

    let n: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
        eprintln!("Usage: {} <n> [seed] [--pandiagonal]", args[0]);
        std::process::exit(1);
    });

    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);

    let result = if pandiagonal {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        PanDiagonalMagicSquare::new(n, &mut rng).map(PanDiagonalMagicSquare::into_magic_square)
    } else {
        MagicSquare::new(n)
    };

    let sq = match result {
        Ok(sq) => sq,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    println!("{}", sq);
    println!("magic number = {}", sq.magic_number());
    println!("magic = {}", sq.check_magic());
}
