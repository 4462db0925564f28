use thiserror::Error;

/// Errors returned when a square cannot be constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MagicSquareError {
    /// The order is zero or too large for `u32` cells.
    #[error("order must be in range 1..={max}, got {order}", max = crate::MAX_ORDER)]
    InvalidOrder { order: usize },

    /// No construction exists in this crate for the requested order.
    #[error("{family} construction is not implemented for order {order}")]
    NotImplemented { family: &'static str, order: usize },

    /// Seed values for the order-4 pandiagonal template must be a
    /// permutation of `{1, 2, 4, 8}`.
    #[error("seed values must be a permutation of [1, 2, 4, 8], got {seed:?}")]
    InvalidSeed { seed: [u32; 4] },
}

/// Result type for square construction.
pub type Result<T> = std::result::Result<T, MagicSquareError>;
