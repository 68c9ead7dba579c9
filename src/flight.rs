//! Proper decay time sampling and lab-frame flight distances
//!
//! Each particle draws its own proper time from an exponential distribution
//! with its mean lifetime as scale, then time dilation stretches it into a
//! lab-frame displacement along the particle's momentum direction.

use crate::{
    momentum::{Momentum, E, X, Y, Z},
    numeric::Float,
    random::RandomSource,
};

use prefix_num_ops::real::*;

/// Conversion from (lifetime in s) x (momentum in MeV / mass in MeV) to a
/// flight distance, kept verbatim from the original generator
pub const FLIGHT_CONVERSION: Float =
    (5.729e-29f64 * 1e-12 / (1e6 * 1.911e-43 * 1e-3)) as Float;

/// One particle's sampled proper time and lab-frame displacement
pub struct FlightSample {
    /// Proper decay time, in the particle's rest frame
    pub proper_time: Float,

    /// Displacement along x
    pub dx: Float,

    /// Displacement along y
    pub dy: Float,

    /// Displacement along z
    pub dz: Float,

    /// Euclidean norm of the displacement
    pub distance: Float,
}

/// Sample a proper time and derive the flight displacement
///
/// `mass` and `lifetime` are the particle's catalog values; the Lorentz
/// factor comes from the 4-momentum as gamma = E / m. A zero lifetime marks
/// a stable particle, whose proper time and displacement vanish.
///
pub fn sample_flight(
    mass: Float,
    lifetime: Float,
    p: &Momentum,
    rng: &mut RandomSource,
) -> FlightSample {
    let proper_time = rng.exponential(lifetime);
    let gamma = p[E] / mass;
    let stretch = gamma * proper_time * FLIGHT_CONVERSION / mass;
    let (dx, dy, dz) = (stretch * p[X], stretch * p[Y], stretch * p[Z]);
    FlightSample {
        proper_time,
        dx,
        dy,
        dz,
        distance: sqrt(dx * dx + dy * dy + dz * dz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::momentum::{at_rest, on_shell};

    #[test]
    fn conversion_constant_value() {
        // The literal expression boils down to roughly c in useful units
        assert!((FLIGHT_CONVERSION - 0.29979).abs() < 1e-4);
    }

    #[test]
    fn distance_is_the_displacement_norm() {
        let p = on_shell(139.57, 300., 400., 1200.);
        let mut rng = RandomSource::new();
        for _ in 0..100 {
            let flight = sample_flight(139.57, 2.6e-8, &p, &mut rng);
            let norm = (flight.dx * flight.dx + flight.dy * flight.dy + flight.dz * flight.dz)
                .sqrt();
            assert_eq!(flight.distance, norm);
            assert!(flight.proper_time >= 0.);
        }
    }

    #[test]
    fn displacement_follows_the_momentum_direction() {
        let p = on_shell(139.57, 300., 400., 1200.);
        let flight = sample_flight(139.57, 2.6e-8, &p, &mut RandomSource::new());
        if flight.proper_time > 0. {
            assert!((flight.dy / flight.dx - 400. / 300.).abs() < 1e-9);
            assert!((flight.dz / flight.dx - 1200. / 300.).abs() < 1e-9);
        }
    }

    #[test]
    fn stable_particles_do_not_fly() {
        let p = on_shell(938.27, 100., 0., 0.);
        let flight = sample_flight(938.27, 0., &p, &mut RandomSource::new());
        assert_eq!(flight.proper_time, 0.);
        assert_eq!(flight.distance, 0.);
    }

    #[test]
    fn resting_particles_age_but_do_not_move() {
        let p = at_rest(5279.34);
        let mut rng = RandomSource::new();
        let flight = sample_flight(5279.34, 1.6e-12, &p, &mut rng);
        assert_eq!((flight.dx, flight.dy, flight.dz), (0., 0., 0.));
        assert_eq!(flight.distance, 0.);
        assert!(flight.proper_time > 0.);
    }
}
