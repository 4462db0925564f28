use crate::PanDiagonalMagicSquare;
use crate::error::Result;
use rand::Rng;
use tracing::trace;

/// Parameters for drawing pandiagonal squares.
#[derive(Debug, Clone)]
pub struct SamplerParams {
    /// Number of shuffles applied between successive samples.
    ///
    /// If `None`, uses `n - 1`. Shuffling alone only reaches the 16 rolls of
    /// one seed ordering.
    pub thinning: Option<u64>,
    /// Probability of drawing a fresh seed ordering before shuffling.
    ///
    /// Only used by the iterator; [`sample`] always starts from a fresh seed.
    pub p_reseed: f64,
}

impl Default for SamplerParams {
    fn default() -> Self {
        Self {
            thinning: None, // auto: n - 1
            p_reseed: 0.25,
        }
    }
}

/// Draws one pandiagonal magic square of order `n`.
///
/// A random seed ordering is shuffled `thinning` times. The output is
/// deterministic given the same seed and parameters.
///
/// # Errors
/// Returns [`MagicSquareError::NotImplemented`](crate::MagicSquareError::NotImplemented)
/// unless `n == 4`.
pub fn sample<R: Rng + ?Sized>(
    n: usize,
    rng: &mut R,
    params: &SamplerParams,
) -> Result<PanDiagonalMagicSquare> {
    let mut square = PanDiagonalMagicSquare::new(n, rng)?;
    shuffle(&mut square, rng, params);
    Ok(square)
}

/// An iterator that produces pandiagonal magic squares.
///
/// Created by [`Sampler::new`]. The first call to `next()` returns the freshly
/// seeded square. Each later call reseeds with probability `p_reseed` and then
/// shuffles the running square `thinning` times.
///
/// # Example
///
/// ```
/// use magic_squares::{Sampler, SamplerParams};
/// use rand_chacha::ChaCha20Rng;
/// use rand::SeedableRng;
///
/// let rng = ChaCha20Rng::seed_from_u64(0);
/// let params = SamplerParams::default();
/// let sampler = Sampler::new(4, rng, params).unwrap();
///
/// for sq in sampler.take(10) {
///     assert!(sq.check_pan_magic());
/// }
/// ```
pub struct Sampler<R> {
    square: PanDiagonalMagicSquare,
    rng: R,
    params: SamplerParams,
    started: bool,
}

impl<R: Rng> Sampler<R> {
    /// Create a new sampler for pandiagonal squares of order `n`.
    ///
    /// # Errors
    /// Returns [`MagicSquareError::NotImplemented`](crate::MagicSquareError::NotImplemented)
    /// unless `n == 4`.
    ///
    /// # Panics
    /// Panics if `p_reseed` is not in `[0.0, 1.0]`.
    pub fn new(n: usize, mut rng: R, params: SamplerParams) -> Result<Self> {
        assert!(
            (0.0..=1.0).contains(&params.p_reseed),
            "p_reseed must be in [0.0, 1.0]"
        );

        let square = PanDiagonalMagicSquare::new(n, &mut rng)?;
        Ok(Self {
            square,
            rng,
            params,
            started: false,
        })
    }
}

impl<R: Rng> Iterator for Sampler<R> {
    type Item = PanDiagonalMagicSquare;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
        } else {
            let reseed = self.rng.random::<f64>() < self.params.p_reseed;
            if reseed {
                self.square.reseed(&mut self.rng);
            }
            trace!(reseed, "sampler step");
            shuffle(&mut self.square, &mut self.rng, &self.params);
        }
        Some(self.square.clone())
    }
}

/// Applies `thinning` shuffles.
fn shuffle<R: Rng + ?Sized>(
    square: &mut PanDiagonalMagicSquare,
    rng: &mut R,
    params: &SamplerParams,
) {
    let thinning = params.thinning.unwrap_or((square.order() - 1) as u64);
    for _ in 0..thinning {
        square.shuffle(rng);
    }
}
