//! Random number generation module, based on the "rand" crate that is the
//! Rust standard for RNGs.
//!
//! The generation algorithm draws many sequential random values per event and
//! is not reentrant-safe, so every batch of events owns a private clone of
//! the source (see the scheduling module).

use crate::numeric::Float;

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};

/// Random number generation engine in use
type Engine = rand_xoshiro::Xoshiro256Plus;

/// Default seed, kept from the original generator for easy comparisons
pub const DEFAULT_SEED: u64 = 234612947;

/// Source of the uniform and exponential draws used during sampling
#[derive(Clone)]
pub struct RandomSource {
    rng: Engine,
}
//
impl RandomSource {
    /// Set up a source with the default seed
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    /// Set up a source with an arbitrary seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Engine::seed_from_u64(seed),
        }
    }

    /// Draw a number uniformly distributed in [lo, hi)
    ///
    /// An empty range can legitimately occur once a momentum budget is fully
    /// consumed, in which case the only possible draw is the bound itself.
    ///
    pub fn uniform(&mut self, lo: Float, hi: Float) -> Float {
        if lo >= hi {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    /// Draw from an exponential distribution with the given scale (mean)
    ///
    /// A non-positive scale collapses the distribution onto zero, which is
    /// how stable particles end up with a vanishing proper time.
    ///
    pub fn exponential(&mut self, scale: Float) -> Float {
        if scale <= 0. {
            return 0.;
        }
        Exp::new(1. / scale)
            .expect("Rate should be finite and positive")
            .sample(&mut self.rng)
    }

    /// Draw a sign, +1 or -1 with equal probability
    pub fn sign(&mut self) -> Float {
        let draw: Float = self.uniform(-1., 1.);
        if draw < 0. {
            -1.
        } else {
            1.
        }
    }

    /// Jump far ahead in the random stream
    ///
    /// Used by the scheduling layer to give each event batch a stream of its
    /// own, so that sequential and multi-threaded runs agree.
    ///
    pub fn long_jump(&mut self) {
        self.rng.long_jump();
    }
}
//
impl Default for RandomSource {
    fn default() -> Self {
        Self::new()
    }
}
