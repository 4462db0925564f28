#![doc = include_str!("../README.md")]

mod construction;
mod error;
mod pandiagonal;
mod sampler;
mod square;
#[cfg(feature = "wasm")]
mod wasm;

pub use error::{MagicSquareError, Result};
pub use pandiagonal::{PANDIAGONAL_ORDER, PanDiagonalMagicSquare};
pub use sampler::{Sampler, SamplerParams, sample};
pub use square::{MAX_ORDER, MagicSquare};
