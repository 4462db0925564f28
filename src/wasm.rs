use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::prelude::*;

use crate::{MagicSquare, PANDIAGONAL_ORDER, PanDiagonalMagicSquare, Sampler, SamplerParams};

/// Convert a MagicSquare to a JsValue (2D array of u32).
fn magic_square_to_js(sq: &MagicSquare) -> Result<JsValue, JsError> {
    let rows: Vec<Vec<u32>> = sq.rows().map(<[u32]>::to_vec).collect();
    serde_wasm_bindgen::to_value(&rows).map_err(|e| JsError::new(&e.to_string()))
}

/// Generate the magic square of order n.
/// Returns a 2D array directly usable in JavaScript.
#[wasm_bindgen]
pub fn generate(n: u32) -> Result<JsValue, JsError> {
    let sq = MagicSquare::new(n as usize).map_err(|e| JsError::new(&e.to_string()))?;
    magic_square_to_js(&sq)
}

/// Generate an order-4 pandiagonal magic square with the given seed.
#[wasm_bindgen]
pub fn generate_pandiagonal(seed: u64) -> Result<JsValue, JsError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let sq = PanDiagonalMagicSquare::new(PANDIAGONAL_ORDER, &mut rng)
        .map_err(|e| JsError::new(&e.to_string()))?;
    magic_square_to_js(sq.as_magic_square())
}

/// A stateful sampler that produces order-4 pandiagonal magic squares.
///
/// The first call to `next()` returns the seeded square; later calls
/// shuffle it (and occasionally reseed) before returning.
#[wasm_bindgen]
pub struct WasmSampler {
    sampler: Sampler<ChaCha20Rng>,
}

#[wasm_bindgen]
impl WasmSampler {
    /// Create a new sampler. The `seed` determines the random sequence.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<WasmSampler, JsError> {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        let params = SamplerParams::default();
        let sampler = Sampler::new(PANDIAGONAL_ORDER, rng, params)
            .map_err(|e| JsError::new(&e.to_string()))?;
        Ok(WasmSampler { sampler })
    }

    /// Get the next pandiagonal square as a 2D array of u32.
    pub fn next(&mut self) -> Result<JsValue, JsError> {
        let sq = self
            .sampler
            .next()
            .ok_or_else(|| JsError::new("sampler is exhausted"))?;
        magic_square_to_js(sq.as_magic_square())
    }
}
