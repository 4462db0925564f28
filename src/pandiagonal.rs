//! Order-4 pandiagonal magic squares.
//!
//! Every cell of the template is `a` plus a distinct subset sum of the seed
//! values `b, c, d, e`. With `a = 1` and `{b, c, d, e} = {1, 2, 4, 8}` the
//! subset sums cover `0..=15`, so any ordering of the seed yields a
//! permutation of `1..=16`. Each row, column and broken diagonal (in both
//! directions) contains every seed symbol exactly twice, so all of them sum to
//! `4a + 2(b + c + d + e) = 34`.
//!
//! Reference: <https://en.wikipedia.org/wiki/Pandiagonal_magic_square>

use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, trace};

use crate::MagicSquare;
use crate::error::{MagicSquareError, Result};
use crate::square::{sum, write_grid};

/// The only order with a pandiagonal construction.
pub const PANDIAGONAL_ORDER: usize = 4;

const BASE: u32 = 1;
const SEED_VALUES: [u32; 4] = [1, 2, 4, 8];

/// A pandiagonal magic square of order 4.
///
/// Besides the ordinary magic property, every broken diagonal sums to the
/// magic number. Cyclic rolls and the complement preserve this, which is what
/// [`shuffle`](Self::shuffle) relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanDiagonalMagicSquare {
    square: MagicSquare,
}

impl PanDiagonalMagicSquare {
    /// Creates a pandiagonal magic square from a randomly ordered seed.
    ///
    /// # Errors
    /// Returns [`MagicSquareError::NotImplemented`] unless `n == 4`.
    pub fn new<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        if n != PANDIAGONAL_ORDER {
            return Err(MagicSquareError::NotImplemented {
                family: "pandiagonal",
                order: n,
            });
        }
        Ok(Self::with_seed(random_seed(rng)))
    }

    /// Creates the square for a fixed seed ordering `[b, c, d, e]`.
    ///
    /// # Errors
    /// Returns [`MagicSquareError::InvalidSeed`] if `seed` is not a
    /// permutation of `[1, 2, 4, 8]`.
    pub fn from_seed_values(seed: [u32; 4]) -> Result<Self> {
        let mut sorted = seed;
        sorted.sort_unstable();
        if sorted != SEED_VALUES {
            return Err(MagicSquareError::InvalidSeed { seed });
        }
        Ok(Self::with_seed(seed))
    }

    fn with_seed(seed: [u32; 4]) -> Self {
        Self {
            square: MagicSquare::from_cells_unchecked(PANDIAGONAL_ORDER, template(seed)),
        }
    }

    /// Replaces the square in place with one built from a fresh random seed
    /// ordering.
    pub fn reseed<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::with_seed(random_seed(rng));
    }

    /// Rolls horizontally and then vertically by independent amounts drawn
    /// from `1..=3`.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let horizontal = rng.random_range(1..PANDIAGONAL_ORDER);
        let vertical = rng.random_range(1..PANDIAGONAL_ORDER);
        trace!(horizontal, vertical, "shuffling pandiagonal square");
        self.square.roll_horizontal(horizontal);
        self.square.roll_vertical(vertical);
    }

    /// Returns true if the square is magic and every broken diagonal sums to
    /// the magic number.
    pub fn check_pan_magic(&self) -> bool {
        self.square.check_magic() && self.check_pan_diagonals()
    }

    /// Checks the broken diagonals in both directions.
    ///
    /// For each offset `k` in `1..n`, the diagonal at `k` joined with its
    /// wraparound part at `k - n` must sum to the magic number.
    pub fn check_pan_diagonals(&self) -> bool {
        let n = self.order() as isize;
        let broken_sum = |indices: Vec<(usize, usize)>| {
            sum(indices.into_iter().map(|(r, c)| self.square.get(r, c)))
        };
        (1..n).all(|k| {
            broken_sum(self.kth_diag_indices(k)) + broken_sum(self.kth_diag_indices(k - n))
                == self.magic_number()
                && broken_sum(self.kth_anti_diag_indices(k))
                    + broken_sum(self.kth_anti_diag_indices(k - n))
                    == self.magic_number()
        })
    }

    /// Returns the `(row, col)` pairs of the diagonal at signed offset `k`.
    ///
    /// `k = 0` is the main diagonal, positive offsets lie above it (starting
    /// at `(0, k)`), negative offsets below it (starting at `(-k, 0)`).
    /// Offsets with `|k| >= n` give an empty list.
    pub fn kth_diag_indices(&self, k: isize) -> Vec<(usize, usize)> {
        let shift = k.unsigned_abs();
        let len = self.order().saturating_sub(shift);
        if k >= 0 {
            (0..len).map(|i| (i, i + shift)).collect()
        } else {
            (0..len).map(|i| (i + shift, i)).collect()
        }
    }

    /// Like [`kth_diag_indices`](Self::kth_diag_indices), on the left-right
    /// mirrored grid. `k = 0` is the anti-diagonal.
    pub fn kth_anti_diag_indices(&self, k: isize) -> Vec<(usize, usize)> {
        let last = self.order() - 1;
        self.kth_diag_indices(k)
            .into_iter()
            .map(|(r, c)| (r, last - c))
            .collect()
    }

    /// Renders the grid with 13, 14, 15 and 16 written relative to an
    /// arbitrary target total `n`.
    ///
    /// Those four values become `n - 21`, `n - 20`, `n - 19` and `n - 18`,
    /// so a performer can announce the square for any number `n` the
    /// audience picks.
    pub fn magic_trick_representation(&self) -> String {
        let cells: Vec<String> = self
            .square
            .cells()
            .iter()
            .map(|&v| match v {
                13 => "n - 21".to_string(),
                14 => "n - 20".to_string(),
                15 => "n - 19".to_string(),
                16 => "n - 18".to_string(),
                v => v.to_string(),
            })
            .map(|s| format!("{:>6}", s))
            .collect();
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_grid(&mut out, self.order(), &cells);
        out
    }

    pub fn as_magic_square(&self) -> &MagicSquare {
        &self.square
    }

    pub fn into_magic_square(self) -> MagicSquare {
        self.square
    }

    pub fn order(&self) -> usize {
        self.square.order()
    }

    pub fn magic_number(&self) -> u64 {
        self.square.magic_number()
    }

    /// # Panics
    /// Panics if `r >= n` or `c >= n`.
    pub fn get(&self, r: usize, c: usize) -> u32 {
        self.square.get(r, c)
    }

    pub fn cells(&self) -> &[u32] {
        self.square.cells()
    }

    pub fn check_magic(&self) -> bool {
        self.square.check_magic()
    }

    pub fn check_magic_rows(&self) -> bool {
        self.square.check_magic_rows()
    }

    pub fn check_magic_cols(&self) -> bool {
        self.square.check_magic_cols()
    }

    pub fn check_magic_diag(&self) -> bool {
        self.square.check_magic_diag()
    }

    pub fn check_magic_anti_diag(&self) -> bool {
        self.square.check_magic_anti_diag()
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        self.square.swap_rows(r1, r2);
    }

    pub fn swap_cols(&mut self, c1: usize, c2: usize) {
        self.square.swap_cols(c1, c2);
    }

    pub fn roll_vertical(&mut self, k: usize) {
        self.square.roll_vertical(k);
    }

    pub fn roll_horizontal(&mut self, k: usize) {
        self.square.roll_horizontal(k);
    }

    pub fn complement(&mut self) {
        self.square.complement();
    }
}

fn random_seed<R: Rng + ?Sized>(rng: &mut R) -> [u32; 4] {
    let mut seed = SEED_VALUES;
    seed.shuffle(rng);
    seed
}

/// Fills the order-4 template from `a = 1` and the seed `[b, c, d, e]`.
#[rustfmt::skip]
fn template(seed: [u32; 4]) -> Vec<u32> {
    let a = BASE;
    let [b, c, d, e] = seed;
    debug!(?seed, "generated pandiagonal magic square");
    vec![
        a,             a + b + c + e, a + c + d,             a + b + d + e,
        a + b + c + d, a + d + e,     a + b,                 a + c + e,
        a + b + e,     a + c,         a + b + c + d + e,     a + d,
        a + c + d + e, a + b + d,     a + e,                 a + b + c,
    ]
}

impl fmt::Display for PanDiagonalMagicSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.square, f)
    }
}

#[cfg(test)]
mod tests {
    use super::{PanDiagonalMagicSquare, SEED_VALUES};
    use crate::{MagicSquare, MagicSquareError};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn all_seed_orderings() -> Vec<[u32; 4]> {
        let mut out = Vec::new();
        for &b in &SEED_VALUES {
            for &c in &SEED_VALUES {
                for &d in &SEED_VALUES {
                    for &e in &SEED_VALUES {
                        let seed = [b, c, d, e];
                        let mut sorted = seed;
                        sorted.sort_unstable();
                        if sorted == SEED_VALUES {
                            out.push(seed);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn every_seed_ordering_is_pandiagonal() {
        let seeds = all_seed_orderings();
        assert_eq!(seeds.len(), 24);
        for seed in seeds {
            let sq = PanDiagonalMagicSquare::from_seed_values(seed).unwrap();
            assert_eq!(sq.magic_number(), 34);
            assert!(
                sq.as_magic_square().is_permutation(),
                "seed {:?} should give a permutation",
                seed
            );
            assert!(sq.check_pan_magic(), "seed {:?} should be pandiagonal", seed);
        }
    }

    #[test]
    fn fixed_seed_layout() {
        let sq = PanDiagonalMagicSquare::from_seed_values([1, 2, 4, 8]).unwrap();
        assert_eq!(
            sq.cells(),
            &[1, 12, 7, 14, 8, 13, 2, 11, 10, 3, 16, 5, 15, 6, 9, 4]
        );
    }

    #[test]
    fn random_seeds_are_pandiagonal() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for _ in 0..100 {
            let sq = PanDiagonalMagicSquare::new(4, &mut rng).unwrap();
            assert!(sq.as_magic_square().is_permutation());
            assert!(sq.check_pan_magic());
        }
    }

    #[test]
    fn random_seeds_reach_several_squares() {
        use std::collections::HashSet;

        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let distinct: HashSet<Vec<u32>> = (0..200)
            .map(|_| PanDiagonalMagicSquare::new(4, &mut rng).unwrap().cells().to_vec())
            .collect();
        assert!(
            distinct.len() > 10,
            "expected many seed orderings, got {}",
            distinct.len()
        );
    }

    #[test]
    fn other_orders_are_not_implemented() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        for n in [0, 1, 3, 5, 8] {
            assert_eq!(
                PanDiagonalMagicSquare::new(n, &mut rng),
                Err(MagicSquareError::NotImplemented {
                    family: "pandiagonal",
                    order: n,
                })
            );
        }
    }

    #[test]
    fn invalid_seed_is_rejected() {
        for seed in [[1, 2, 4, 4], [1, 2, 3, 8], [0, 1, 2, 4]] {
            assert_eq!(
                PanDiagonalMagicSquare::from_seed_values(seed),
                Err(MagicSquareError::InvalidSeed { seed })
            );
        }
    }

    #[test]
    fn diag_indices() {
        let sq = PanDiagonalMagicSquare::from_seed_values([1, 2, 4, 8]).unwrap();
        assert_eq!(sq.kth_diag_indices(0), vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(sq.kth_diag_indices(1), vec![(0, 1), (1, 2), (2, 3)]);
        assert_eq!(sq.kth_diag_indices(-3), vec![(3, 0)]);
        assert_eq!(sq.kth_diag_indices(-1), vec![(1, 0), (2, 1), (3, 2)]);
        assert!(sq.kth_diag_indices(4).is_empty());
        assert!(sq.kth_diag_indices(-5).is_empty());

        assert_eq!(
            sq.kth_anti_diag_indices(0),
            vec![(0, 3), (1, 2), (2, 1), (3, 0)]
        );
        assert_eq!(sq.kth_anti_diag_indices(2), vec![(0, 1), (1, 0)]);
        assert_eq!(sq.kth_anti_diag_indices(-2), vec![(2, 3), (3, 2)]);
    }

    #[test]
    fn ordinary_magic_square_is_not_pandiagonal() {
        // The doubly-even order-4 square is magic but its broken diagonals
        // are not, e.g. 2 + 10 + 12 + 4 = 28.
        let sq = PanDiagonalMagicSquare {
            square: MagicSquare::new(4).unwrap(),
        };
        assert!(sq.check_magic());
        assert!(!sq.check_pan_diagonals());
        assert!(!sq.check_pan_magic());
    }

    #[test]
    fn broken_square_is_not_pan_magic() {
        let mut sq = PanDiagonalMagicSquare::from_seed_values([8, 4, 2, 1]).unwrap();
        sq.swap_rows(0, 1);
        assert!(!sq.check_magic());
        assert!(!sq.check_pan_magic());

        let mut sq = PanDiagonalMagicSquare::from_seed_values([8, 4, 2, 1]).unwrap();
        sq.square.set_unchecked(0, 0, 2);
        assert!(!sq.check_magic());
        assert!(!sq.check_pan_diagonals());
        assert!(!sq.check_pan_magic());
    }

    #[test]
    fn complement_preserves_pandiagonal() {
        for seed in all_seed_orderings() {
            let mut sq = PanDiagonalMagicSquare::from_seed_values(seed).unwrap();
            sq.complement();
            assert!(sq.check_pan_magic(), "complement of {:?} should be pandiagonal", seed);
        }
    }

    #[test]
    fn complement_is_a_half_turn_roll() {
        // v -> 17 - v swaps each seed subset with its complement, which sits
        // two rows down and two columns across in the template.
        for seed in all_seed_orderings() {
            let mut complemented = PanDiagonalMagicSquare::from_seed_values(seed).unwrap();
            complemented.complement();
            let mut rolled = PanDiagonalMagicSquare::from_seed_values(seed).unwrap();
            rolled.roll_horizontal(2);
            rolled.roll_vertical(2);
            assert_eq!(complemented, rolled, "seed {:?}", seed);
        }
    }

    #[test]
    fn reseed_matches_new() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let mut sq = PanDiagonalMagicSquare::from_seed_values([1, 2, 4, 8]).unwrap();
        sq.reseed(&mut rng);

        let mut rng = ChaCha20Rng::seed_from_u64(11);
        assert_eq!(sq, PanDiagonalMagicSquare::new(4, &mut rng).unwrap());
        assert!(sq.check_pan_magic());
    }

    #[test]
    fn magic_trick_tokens() {
        let sq = PanDiagonalMagicSquare::from_seed_values([1, 2, 4, 8]).unwrap();
        let text = sq.magic_trick_representation();
        for token in ["n - 21", "n - 20", "n - 19", "n - 18"] {
            assert_eq!(text.matches(token).count(), 1, "token {:?} in {}", token, text);
        }
        assert!(!text.contains("13"));
        assert!(!text.contains("16"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.starts_with("[[     1, "));
    }

    #[test]
    fn display_delegates_to_square() {
        let sq = PanDiagonalMagicSquare::from_seed_values([1, 2, 4, 8]).unwrap();
        assert_eq!(sq.to_string(), sq.as_magic_square().to_string());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn shuffle_preserves_pandiagonal(seed in any::<u64>(), rounds in 1usize..20) {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let mut sq = PanDiagonalMagicSquare::new(4, &mut rng).unwrap();
            for _ in 0..rounds {
                sq.shuffle(&mut rng);
                prop_assert!(sq.as_magic_square().is_permutation());
                prop_assert!(sq.check_pan_magic());
            }
        }

        #[test]
        fn any_roll_preserves_pandiagonal(h in 0usize..8, v in 0usize..8, complement in any::<bool>()) {
            let mut sq = PanDiagonalMagicSquare::from_seed_values([2, 8, 1, 4]).unwrap();
            sq.roll_horizontal(h);
            sq.roll_vertical(v);
            if complement {
                sq.complement();
            }
            prop_assert!(sq.check_pan_magic());
        }
    }
}
