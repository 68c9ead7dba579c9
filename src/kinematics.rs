//! Derived kinematic observables of a single 4-momentum
//!
//! Angular quantities keep the original generator's conventions: plain atan
//! ratios (not atan2), and the literal sentinel value -9999 wherever the
//! quantity is undefined. Downstream consumers test for that exact value, so
//! it is part of the output contract.

use crate::{
    momentum::{self, Momentum, E, X, Y, Z},
    numeric::Float,
};

use prefix_num_ops::real::*;

/// Sentinel marking an undefined angular quantity
pub const UNDEFINED: Float = -9999.;

/// Transverse momentum, sqrt(px² + py²)
pub fn transverse_momentum(p: &Momentum) -> Float {
    sqrt(p[X] * p[X] + p[Y] * p[Y])
}

/// Polar angle, atan(pt / pz), or the sentinel when pz vanishes
pub fn polar_angle(p: &Momentum) -> Float {
    if p[Z] != 0. {
        atan(transverse_momentum(p) / p[Z])
    } else {
        UNDEFINED
    }
}

/// Azimuthal angle, atan(px / py), or the sentinel when py vanishes
pub fn azimuthal_angle(p: &Momentum) -> Float {
    if p[Y] != 0. {
        atan(p[X] / p[Y])
    } else {
        UNDEFINED
    }
}

/// Pseudorapidity, -ln(tan(|theta| / 2))
///
/// Undefined whenever theta is, and whenever the tangent degenerates to zero
/// (a particle flying exactly along the beam axis).
///
pub fn pseudorapidity(theta: Float) -> Float {
    if theta == UNDEFINED {
        return UNDEFINED;
    }
    let tangent = tan(abs(theta) / 2.);
    if tangent <= 0. {
        UNDEFINED
    } else {
        -ln(tangent)
    }
}

/// Full set of derived observables for one particle's 4-momentum
pub struct Kinematics {
    /// Momentum along x
    pub px: Float,

    /// Momentum along y
    pub py: Float,

    /// Momentum along z
    pub pz: Float,

    /// Energy
    pub energy: Float,

    /// Momentum magnitude
    pub momentum: Float,

    /// Transverse momentum
    pub pt: Float,

    /// Polar angle, or the sentinel
    pub theta: Float,

    /// Azimuthal angle, or the sentinel
    pub phi: Float,

    /// Pseudorapidity, or the sentinel
    pub eta: Float,

    /// Invariant mass
    pub mass: Float,
}
//
impl Kinematics {
    /// Derive every observable of one 4-momentum
    pub fn of(p: &Momentum) -> Self {
        let theta = polar_angle(p);
        Self {
            px: p[X],
            py: p[Y],
            pz: p[Z],
            energy: p[E],
            momentum: momentum::momentum_norm(p),
            pt: transverse_momentum(p),
            theta,
            phi: azimuthal_angle(p),
            eta: pseudorapidity(theta),
            mass: momentum::invariant_mass(p),
        }
    }
}
