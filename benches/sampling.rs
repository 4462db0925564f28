//! Benchmarks for magic square construction and sampling.
//!
//! - `MagicSquare::new`: closed-form constructions for odd and doubly-even n
//! - `check_magic`: verification cost for a large square
//! - `Sampler` subsequent `next()`: reseed coin plus thinning shuffles

#![feature(test)]

extern crate test;

use magic_squares::{MagicSquare, PANDIAGONAL_ORDER, Sampler, SamplerParams, sample};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use test::Bencher;

#[bench]
fn bench_new_odd_n101(b: &mut Bencher) {
    b.iter(|| {
        let sq = MagicSquare::new(test::black_box(101)).unwrap();
        test::black_box(sq)
    });
}

#[bench]
fn bench_new_doubly_even_n100(b: &mut Bencher) {
    b.iter(|| {
        let sq = MagicSquare::new(test::black_box(100)).unwrap();
        test::black_box(sq)
    });
}

#[bench]
fn bench_check_magic_n100(b: &mut Bencher) {
    let sq = MagicSquare::new(100).unwrap();

    b.iter(|| test::black_box(&sq).check_magic());
}

#[bench]
fn bench_sample_pandiagonal(b: &mut Bencher) {
    let params = SamplerParams::default();
    let mut rng = ChaCha20Rng::seed_from_u64(42);

    b.iter(|| {
        let sq = sample(PANDIAGONAL_ORDER, &mut rng, &params).unwrap();
        test::black_box(sq)
    });
}

#[bench]
fn bench_sampler_subsequent(b: &mut Bencher) {
    let params = SamplerParams::default();
    let rng = ChaCha20Rng::seed_from_u64(42);
    let mut sampler = Sampler::new(PANDIAGONAL_ORDER, rng, params).unwrap();

    // Consume the unshuffled first sample outside the benchmark loop
    let _ = sampler.next();

    b.iter(|| {
        let sq = sampler.next().unwrap();
        test::black_box(sq)
    });
}
