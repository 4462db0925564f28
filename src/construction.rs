//! Closed-form magic square constructions.
//!
//! Both builders return the cells in row-major order and work with 1-based
//! indices `I = r + 1`, `J = c + 1`, matching the usual statement of the
//! formulas.
//!
//! Reference: C. Moler, "Magic Squares, Part 2: Algorithms", Cleve's Corner
//! (2012).

/// Doubly-even order (`n % 4 == 0`).
///
/// Start from `1..=n²` laid out row-major. In every 4x4 block the cells on
/// the two block diagonals, i.e. those with `(I mod 4) / 2 == (J mod 4) / 2`,
/// are replaced by their complement `n² + 1 - v`.
pub(crate) fn doubly_even(n: usize) -> Vec<u32> {
    debug_assert!(n % 4 == 0, "doubly-even construction needs n % 4 == 0");
    let n2 = (n * n) as u32;
    (0..n)
        .flat_map(|r| {
            (0..n).map(move |c| {
                let v = (r * n + c) as u32 + 1;
                if ((r + 1) % 4) / 2 == ((c + 1) % 4) / 2 {
                    n2 + 1 - v
                } else {
                    v
                }
            })
        })
        .collect()
}

/// Odd order.
///
/// `A = (I + J + (n - 3) / 2) mod n`, `B = (I + 2J - 2) mod n` and the cell
/// value is `n·A + B + 1`. The offset `(n - 3) / 2` is negative for `n = 1`,
/// hence the signed arithmetic.
pub(crate) fn odd(n: usize) -> Vec<u32> {
    debug_assert!(n % 2 == 1, "odd construction needs an odd n");
    let m = n as i64;
    let offset = (m - 3) / 2;
    (1..=m)
        .flat_map(|i| {
            (1..=m).map(move |j| {
                let a = (i + j + offset).rem_euclid(m);
                let b = (i + 2 * j - 2).rem_euclid(m);
                (m * a + b + 1) as u32
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_permutation(cells: &[u32]) -> bool {
        let mut sorted = cells.to_vec();
        sorted.sort_unstable();
        sorted.iter().copied().eq(1..=cells.len() as u32)
    }

    #[test]
    fn doubly_even_order_4() {
        assert_eq!(
            doubly_even(4),
            vec![16, 2, 3, 13, 5, 11, 10, 8, 9, 7, 6, 12, 4, 14, 15, 1]
        );
    }

    #[test]
    fn odd_order_3() {
        assert_eq!(odd(3), vec![8, 1, 6, 3, 5, 7, 4, 9, 2]);
    }

    #[test]
    fn odd_order_1() {
        assert_eq!(odd(1), vec![1]);
    }

    #[test]
    fn builders_produce_permutations() {
        for n in [4, 8, 12, 16, 20] {
            assert!(
                is_permutation(&doubly_even(n)),
                "doubly-even cells should be a permutation for n={}",
                n
            );
        }
        for n in [1, 3, 5, 7, 9, 11, 21] {
            assert!(
                is_permutation(&odd(n)),
                "odd cells should be a permutation for n={}",
                n
            );
        }
    }
}
