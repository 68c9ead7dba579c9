//! This module implements some domain-specific 4-momentum handling logic.

use crate::numeric::Float;
use nalgebra::SVector;

use prefix_num_ops::real::*;

/// 4-momentum dimension
pub const MOMENTUM_DIM: usize = 4;

/// Relativistic 4-momentum
pub type Momentum = SVector<Float, MOMENTUM_DIM>;

/// Convenience const for accessing the X coordinate of a 4-vector
pub const X: usize = 0;

/// Convenience const for accessing the Y coordinate of a 4-vector
pub const Y: usize = 1;

/// Convenience const for accessing the Z coordinate of a 4-vector
pub const Z: usize = 2;

/// Convenience const for accessing the E coordinate of a 4-vector
pub const E: usize = 3;

/// Build the 4-momentum of a particle at rest
pub fn at_rest(mass: Float) -> Momentum {
    Momentum::from([0., 0., 0., mass])
}

/// Build an on-shell 4-momentum from a rest mass and a 3-momentum
pub fn on_shell(mass: Float, px: Float, py: Float, pz: Float) -> Momentum {
    let energy = sqrt(mass * mass + px * px + py * py + pz * pz);
    Momentum::from([px, py, pz, energy])
}

/// Squared norm of the spatial part of a 4-momentum
pub fn momentum_norm_squared(p: &Momentum) -> Float {
    p.fixed_rows::<3>(X).norm_squared()
}

/// Norm of the spatial part of a 4-momentum
pub fn momentum_norm(p: &Momentum) -> Float {
    sqrt(momentum_norm_squared(p))
}

/// Invariant mass of a 4-momentum, i.e. its Minkowski magnitude
///
/// The remainder daughter of a partitioned decay can end up slightly
/// off-shell, making the radicand E² - |p|² negative. Those radicands are
/// clamped to zero with a logged warning rather than propagated as NaN.
///
pub fn invariant_mass(p: &Momentum) -> Float {
    clamped_sqrt(p[E] * p[E] - momentum_norm_squared(p), "invariant mass")
}

/// Square root with the negative-radicand policy applied
///
/// Negative inputs are clamped to zero and reported at warn level, tagged
/// with the name of the quantity being computed.
///
pub fn clamped_sqrt(radicand: Float, what: &str) -> Float {
    if radicand < 0. {
        log::warn!("Clamping negative {what} radicand {radicand} to zero");
        0.
    } else {
        sqrt(radicand)
    }
}
