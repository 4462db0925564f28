//! Count how many distinct order-4 pandiagonal squares the sampler reaches.
//!
//! There are 384 pandiagonal magic squares of order 4 (rotations and
//! reflections counted separately).
//!
//! Usage: cargo run --release --example coverage -- [max_samples] [--oneshot]

use magic_squares::{PANDIAGONAL_ORDER, Sampler, SamplerParams, sample};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::env;
use std::time::Instant;

const KNOWN_TOTAL: usize = 384;

fn main() {
    let args: Vec<String> = env::args().collect();

    let max_samples: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(10_000);
    let oneshot_mode = args.iter().any(|s| s == "--oneshot");

    let sampling_mode = if oneshot_mode { "oneshot" } else { "iterator" };
    println!("=== Pandiagonal Square Coverage ===");
    println!("n = {}, sampling = {}", PANDIAGONAL_ORDER, sampling_mode);
    println!("Known total: {}", KNOWN_TOTAL);
    println!("max_samples = {}", max_samples);
    println!();

    let params = SamplerParams::default();
    let mut unique_squares: HashSet<Vec<u32>> = HashSet::new();
    let start = Instant::now();
    let mut last_new_at = 0;

    let mut record = |sample_num: usize, cells: Vec<u32>| -> bool {
        if unique_squares.insert(cells) {
            last_new_at = sample_num;
        }
        if sample_num % 1000 == 0 || unique_squares.len() == KNOWN_TOTAL {
            println!(
                "[{:6}] unique: {:4} / {} ({:.1}%) | {:.2}s",
                sample_num,
                unique_squares.len(),
                KNOWN_TOTAL,
                100.0 * unique_squares.len() as f64 / KNOWN_TOTAL as f64,
                start.elapsed().as_secs_f64()
            );
        }
        unique_squares.len() == KNOWN_TOTAL
    };

    if oneshot_mode {
        for i in 0..max_samples {
            let mut rng = ChaCha20Rng::seed_from_u64(i as u64);
            let sq = sample(PANDIAGONAL_ORDER, &mut rng, &params)
                .expect("order 4 is always supported");
            if record(i + 1, sq.cells().to_vec()) {
                break;
            }
        }
    } else {
        let rng = ChaCha20Rng::seed_from_u64(0);
        let sampler = Sampler::new(PANDIAGONAL_ORDER, rng, params)
            .expect("order 4 is always supported");
        for (i, sq) in sampler.take(max_samples).enumerate() {
            if record(i + 1, sq.cells().to_vec()) {
                break;
            }
        }
    }

    println!();
    println!("Last new square found at sample {}", last_new_at);
}
