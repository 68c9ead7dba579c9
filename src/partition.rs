//! Momentum partitioning across the daughters of a decay
//!
//! Given a mother particle (at rest, or boosted along a randomly decomposed
//! direction) and an ordered list of daughters, this module produces one
//! 3-momentum per daughter whose vector sum reproduces the mother's
//! 3-momentum exactly. No phase-space density weighting is applied: shares
//! are drawn uniformly from three independent squared-component budgets
//! seeded from the mother's squared energy. The mixing of energy² and
//! momentum² in that seeding is a deliberate property of the toy model, not
//! something to correct.
//!
//! Conservation is enforced structurally: every daughter but the last is
//! sampled and subtracted from a running remainder 4-vector, and the last
//! daughter simply receives the remainder.

use crate::{
    momentum::{self, clamped_sqrt, Momentum, E},
    numeric::Float,
    random::RandomSource,
};

use prefix_num_ops::real::*;

/// Splitter of a mother's momentum budget among its daughters
pub struct MomentumPartitioner {
    /// Mother rest mass (MeV)
    mother_mass: Float,

    /// Daughter rest masses, in decay order (at least two)
    daughter_masses: Vec<Float>,

    /// Optional boost energy; zero leaves the mother at rest
    boost_energy: Float,
}
//
impl MomentumPartitioner {
    // ### CONSTRUCTION ###

    /// Set up partitioning for one decay channel
    pub fn new(mother_mass: Float, daughter_masses: Vec<Float>, boost_energy: Float) -> Self {
        assert!(
            daughter_masses.len() >= 2,
            "Momentum partitioning needs at least two daughters"
        );
        Self {
            mother_mass,
            daughter_masses,
            boost_energy,
        }
    }

    // ### SAMPLING ###

    /// Sample one partitioned decay
    pub fn partition(&self, rng: &mut RandomSource) -> PartitionedEvent {
        let mother = self.sample_mother(rng);
        let mut budget = Budget::from_total_energy(mother[E], rng);

        // Fold over all daughters but the last, carrying the not-yet-assigned
        // part of the mother 4-vector and the shrinking component budgets.
        // Subtracting each emitted daughter from the remainder is what makes
        // conservation exact rather than approximate.
        let num_daughters = self.daughter_masses.len();
        let mut daughters = Vec::with_capacity(num_daughters);
        let mut remainder = mother;
        for &mass in &self.daughter_masses[..num_daughters - 1] {
            let shares = budget.draw_shares(rng);
            let daughter = momentum::on_shell(
                mass,
                rng.sign() * sqrt(shares[0]),
                rng.sign() * sqrt(shares[1]),
                rng.sign() * sqrt(shares[2]),
            );
            remainder -= daughter;
            budget.consume(&shares);
            daughters.push(daughter);
        }

        // The last daughter is not sampled: it absorbs the remainder
        daughters.push(remainder);

        PartitionedEvent { mother, daughters }
    }

    /// Sample the mother's lab-frame 4-momentum
    ///
    /// With a boost energy B, the momentum direction comes from a sequential
    /// decomposition: px uniform in [0, B], py uniform in [0, sqrt(B² - px²)],
    /// pz taking up the rest. This is intentionally not a uniform sphere
    /// sample; the scheme is kept for consistency with the original
    /// generator's outputs.
    ///
    fn sample_mother(&self, rng: &mut RandomSource) -> Momentum {
        if self.boost_energy == 0. {
            return momentum::at_rest(self.mother_mass);
        }
        let boost_sq = self.boost_energy * self.boost_energy;
        let px = rng.uniform(0., self.boost_energy);
        let py = rng.uniform(0., clamped_sqrt(boost_sq - px * px, "boost"));
        let pz = clamped_sqrt(boost_sq - px * px - py * py, "boost");
        momentum::on_shell(self.mother_mass, px, py, pz)
    }
}

/// One sampled decay: the mother and its daughters, momentum-conserving
pub struct PartitionedEvent {
    /// Mother 4-momentum
    pub mother: Momentum,

    /// Daughter 4-momenta, in decay order; their components sum to the
    /// mother's
    pub daughters: Vec<Momentum>,
}

/// Squared-component momentum budgets remaining for daughter sampling
struct Budget {
    /// Remaining squared budget along x
    x_sq: Float,

    /// Remaining squared budget along y
    y_sq: Float,

    /// Remaining squared budget along z
    z_sq: Float,
}
//
impl Budget {
    /// Partition a squared total energy into three component budgets
    ///
    /// Sequential uniform splitting of E²: the x budget is drawn first, the
    /// y budget from what is left, and z takes the rest. Each draw shrinks
    /// the range of the next, so the three budgets always sum to E².
    ///
    fn from_total_energy(total_energy: Float, rng: &mut RandomSource) -> Self {
        let energy_sq = total_energy * total_energy;
        let x_sq = rng.uniform(0., energy_sq);
        let leftover = energy_sq - x_sq;
        let y_sq = rng.uniform(0., leftover);
        let z_sq = leftover - y_sq;
        Self { x_sq, y_sq, z_sq }
    }

    /// Draw one daughter's squared-momentum shares
    fn draw_shares(&self, rng: &mut RandomSource) -> [Float; 3] {
        [
            rng.uniform(0., self.x_sq),
            rng.uniform(0., self.y_sq),
            rng.uniform(0., self.z_sq),
        ]
    }

    /// Remove an emitted daughter's shares from the budgets
    fn consume(&mut self, shares: &[Float; 3]) {
        self.x_sq -= shares[0];
        self.y_sq -= shares[1];
        self.z_sq -= shares[2];
    }
}
