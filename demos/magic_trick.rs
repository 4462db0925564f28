//! Print an order-4 pandiagonal square prepared for the "any number" trick.
//!
//! Ask for a number n (22 or more), then read the square out with n
//! substituted: the rows and columns add up to n.
//!
//! Usage: cargo run --example magic_trick -- [seed]

use magic_squares::{PANDIAGONAL_ORDER, PanDiagonalMagicSquare};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::env;

fn main() {
    let seed: u64 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut sq = PanDiagonalMagicSquare::new(PANDIAGONAL_ORDER, &mut rng)
        .expect("order 4 is always supported");
    sq.shuffle(&mut rng);

    println!("{}", sq.magic_trick_representation());
}
