use std::fmt;

use tracing::debug;

use crate::construction;
use crate::error::{MagicSquareError, Result};

/// Largest supported order. Cells are `u32`, so `n² + 1` must fit.
pub const MAX_ORDER: usize = 65_535;

/// A magic square of order `n`.
///
/// An `n x n` array holding each of `1..=n²` exactly once, such that every
/// row, column and both main diagonals sum to the magic number
/// `n·(n² + 1) / 2`.
///
/// The transforms below rearrange or complement cells in place and never
/// break the permutation property, but most of them do not preserve the
/// magic property. Use the `check_*` methods to verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicSquare {
    n: usize,
    magic_number: u64,
    cells: Vec<u32>,
}

impl MagicSquare {
    /// Creates a magic square of order `n`.
    ///
    /// Odd orders use the De la Loubère closed form, orders divisible by four
    /// use the block-diagonal complement construction.
    ///
    /// # Errors
    /// - [`MagicSquareError::InvalidOrder`] if `n == 0` or `n > MAX_ORDER`.
    /// - [`MagicSquareError::NotImplemented`] for singly-even orders.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 || n > MAX_ORDER {
            return Err(MagicSquareError::InvalidOrder { order: n });
        }
        let cells = if n % 4 == 0 {
            construction::doubly_even(n)
        } else if n % 2 == 0 {
            return Err(MagicSquareError::NotImplemented {
                family: "singly-even",
                order: n,
            });
        } else {
            construction::odd(n)
        };
        let square = Self::from_cells_unchecked(n, cells);
        debug!(
            order = n,
            magic_number = square.magic_number,
            "generated magic square"
        );
        Ok(square)
    }

    /// Wraps row-major cells without checking any property.
    pub(crate) fn from_cells_unchecked(n: usize, cells: Vec<u32>) -> Self {
        debug_assert_eq!(cells.len(), n * n, "cell count must be n²");
        Self {
            n,
            magic_number: magic_number(n),
            cells,
        }
    }

    /// Returns the order of the square.
    pub fn order(&self) -> usize {
        self.n
    }

    /// Returns the magic number `n·(n² + 1) / 2`.
    pub fn magic_number(&self) -> u64 {
        self.magic_number
    }

    /// Returns the value at position `(r, c)`.
    ///
    /// # Panics
    /// Panics if `r >= n` or `c >= n`.
    pub fn get(&self, r: usize, c: usize) -> u32 {
        assert!(r < self.n && c < self.n, "index out of bounds");
        self.cells[r * self.n + c]
    }

    /// Sets the value at position `(r, c)` without checking any property.
    #[cfg(test)]
    pub(crate) fn set_unchecked(&mut self, r: usize, c: usize, v: u32) {
        self.cells[r * self.n + c] = v;
    }

    /// Returns the cells as a flat slice in row-major order.
    ///
    /// The cell at position (r, c) is at index `r * n + c`.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Iterates over the rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        self.cells.chunks(self.n)
    }

    /// Returns true if the cells are exactly `1..=n²` in some order.
    pub fn is_permutation(&self) -> bool {
        let mut seen = vec![false; self.cells.len()];
        for &v in &self.cells {
            let Some(slot) = (v as usize).checked_sub(1).and_then(|i| seen.get_mut(i)) else {
                return false;
            };
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }

    /// Exchanges rows `r1` and `r2`.
    ///
    /// # Panics
    /// Panics if either index is `>= n`.
    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        assert!(r1 < self.n && r2 < self.n, "row index out of bounds");
        for c in 0..self.n {
            self.cells.swap(r1 * self.n + c, r2 * self.n + c);
        }
    }

    /// Exchanges columns `c1` and `c2`.
    ///
    /// # Panics
    /// Panics if either index is `>= n`.
    pub fn swap_cols(&mut self, c1: usize, c2: usize) {
        assert!(c1 < self.n && c2 < self.n, "column index out of bounds");
        for row in self.cells.chunks_mut(self.n) {
            row.swap(c1, c2);
        }
    }

    /// Cyclically shifts all rows upward by `k` positions.
    ///
    /// Row `i` of the result is row `(i + k) mod n` of the input.
    pub fn roll_vertical(&mut self, k: usize) {
        let shift = k % self.n;
        self.cells.rotate_left(shift * self.n);
    }

    /// Cyclically shifts all columns leftward by `k` positions.
    ///
    /// Column `j` of the result is column `(j + k) mod n` of the input.
    pub fn roll_horizontal(&mut self, k: usize) {
        let shift = k % self.n;
        for row in self.cells.chunks_mut(self.n) {
            row.rotate_left(shift);
        }
    }

    /// Shorthand for `roll_vertical(1)`.
    pub fn roll_up(&mut self) {
        self.roll_vertical(1);
    }

    /// Shorthand for `roll_horizontal(1)`.
    pub fn roll_left(&mut self) {
        self.roll_horizontal(1);
    }

    /// Replaces every value `v` with `n² + 1 - v`.
    pub fn complement(&mut self) {
        let top = (self.n * self.n) as u32 + 1;
        for v in &mut self.cells {
            *v = top - *v;
        }
    }

    /// Returns true if rows, columns and both diagonals all sum to the magic
    /// number.
    pub fn check_magic(&self) -> bool {
        self.check_magic_rows()
            && self.check_magic_cols()
            && self.check_magic_diag()
            && self.check_magic_anti_diag()
    }

    pub fn check_magic_rows(&self) -> bool {
        self.rows().all(|row| sum(row.iter().copied()) == self.magic_number)
    }

    pub fn check_magic_cols(&self) -> bool {
        (0..self.n).all(|c| sum((0..self.n).map(|r| self.get(r, c))) == self.magic_number)
    }

    /// Top-left to bottom-right.
    pub fn check_magic_diag(&self) -> bool {
        sum((0..self.n).map(|i| self.get(i, i))) == self.magic_number
    }

    /// Top-right to bottom-left.
    pub fn check_magic_anti_diag(&self) -> bool {
        sum((0..self.n).map(|i| self.get(i, self.n - 1 - i))) == self.magic_number
    }
}

/// `n·(n² + 1) / 2`. One of `n` and `n² + 1` is even, so the halving is exact.
fn magic_number(n: usize) -> u64 {
    let n = n as u64;
    n * (n * n + 1) / 2
}

pub(crate) fn sum(values: impl Iterator<Item = u32>) -> u64 {
    values.map(u64::from).sum()
}

impl fmt::Display for MagicSquare {
    /// Renders an array literal such as `[[8, 1, 6],\n [3, 5, 7],\n [4, 9, 2]]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = (self.n * self.n).to_string().len();
        let cells: Vec<String> = self
            .cells
            .iter()
            .map(|v| format!("{:>width$}", v, width = width))
            .collect();
        write_grid(f, self.n, &cells)
    }
}

/// Writes pre-formatted cells as a nested array literal.
pub(crate) fn write_grid(f: &mut impl fmt::Write, n: usize, cells: &[String]) -> fmt::Result {
    write!(f, "[")?;
    for (r, row) in cells.chunks(n).enumerate() {
        if r > 0 {
            write!(f, ",\n ")?;
        }
        write!(f, "[{}]", row.join(", "))?;
    }
    write!(f, "]")
}
