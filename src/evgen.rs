//! This module provides event generation facilities
//!
//! An `EventGenerator` owns everything that is fixed across a run: the decay
//! definition, the derived branch names, the momentum partitioner, and the
//! requested event count. Each generated event samples proper times, momenta
//! and derived observables for the mother and every daughter, and flattens
//! them into the event tree.

use crate::{
    decay::DecayDefinition,
    error::Result,
    flight::{self, FlightSample},
    kinematics::Kinematics,
    momentum::Momentum,
    numeric::Float,
    partition::MomentumPartitioner,
    random::RandomSource,
    scheduling,
    tree::EventTree,
};

/// Cadence of progress reports, in events
pub const PROGRESS_CADENCE: usize = 1000;

/// Kinematic quantities recorded per particle, in branch registration order
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum Quantity {
    Tau,
    Px,
    Py,
    Pz,
    Pe,
    P,
    Pt,
    Theta,
    Phi,
    Eta,
    M,
    Fdx,
    Fdy,
    Fdz,
    Fd,
}
//
impl Quantity {
    /// Every recorded quantity, in branch registration order
    pub const ALL: [Quantity; 15] = [
        Quantity::Tau,
        Quantity::Px,
        Quantity::Py,
        Quantity::Pz,
        Quantity::Pe,
        Quantity::P,
        Quantity::Pt,
        Quantity::Theta,
        Quantity::Phi,
        Quantity::Eta,
        Quantity::M,
        Quantity::Fdx,
        Quantity::Fdy,
        Quantity::Fdz,
        Quantity::Fd,
    ];

    /// Branch-name suffix of this quantity
    pub fn name(self) -> &'static str {
        match self {
            Quantity::Tau => "TAU",
            Quantity::Px => "PX",
            Quantity::Py => "PY",
            Quantity::Pz => "PZ",
            Quantity::Pe => "PE",
            Quantity::P => "P",
            Quantity::Pt => "PT",
            Quantity::Theta => "THETA",
            Quantity::Phi => "PHI",
            Quantity::Eta => "ETA",
            Quantity::M => "M",
            Quantity::Fdx => "FDX",
            Quantity::Fdy => "FDY",
            Quantity::Fdz => "FDZ",
            Quantity::Fd => "FD",
        }
    }
}

/// Generator of toy decay events for one channel
pub struct EventGenerator<'dec> {
    /// Decay channel being simulated
    decay: &'dec DecayDefinition,

    /// Name of the produced tree
    tree_name: String,

    /// Branch-name labels: mother first, then daughters in decay order,
    /// disambiguated when two particles share a display name
    labels: Vec<String>,

    /// Momentum splitter for this channel
    partitioner: MomentumPartitioner,

    /// Number of events to generate
    num_events: usize,
}
//
impl<'dec> EventGenerator<'dec> {
    // ### CONSTRUCTION ###

    /// Initialize event generation for one decay channel
    ///
    /// Branch names are derived once here. A malformed channel (fewer than
    /// two daughters) has already been rejected by the decay catalog.
    ///
    pub fn new(
        decay: &'dec DecayDefinition,
        tree_name: &str,
        num_events: usize,
        boost_energy: Float,
    ) -> Self {
        let partitioner = MomentumPartitioner::new(
            decay.mother.mass,
            decay.daughters.iter().map(|d| d.mass).collect(),
            boost_energy,
        );
        Self {
            decay,
            tree_name: tree_name.to_owned(),
            labels: derive_labels(decay),
            partitioner,
            num_events,
        }
    }

    // ### EVENT GENERATION ###

    /// Generate the requested number of events and return the filled tree
    ///
    /// Generation happens in batches (see the scheduling module); each batch
    /// fills a private partial tree, and batches are merged in order, so a
    /// given seed yields the same tree in sequential and parallel mode.
    ///
    pub fn generate(&self, rng: RandomSource) -> Result<EventTree> {
        log::info!(
            "Will generate {} events of type '{}'",
            self.num_events,
            self.decay.id
        );
        scheduling::run_generation(self.num_events, rng, |count, offset, rng| {
            self.generate_batch(count, offset, rng)
        })
    }

    /// Generate one batch of events on a fresh partial tree
    fn generate_batch(
        &self,
        count: usize,
        first_event: usize,
        rng: &mut RandomSource,
    ) -> Result<EventTree> {
        let mut tree = self.make_tree()?;
        for event in first_event..first_event + count {
            if event % PROGRESS_CADENCE == 0 {
                log::info!("Generating event {}/{}", event, self.num_events);
            }
            self.generate_event(&mut tree, rng)?;
        }
        Ok(tree)
    }

    /// Sample one decay and fill every branch once
    fn generate_event(&self, tree: &mut EventTree, rng: &mut RandomSource) -> Result<()> {
        let event = self.partitioner.partition(rng);
        self.fill_particle(tree, 0, &event.mother, rng)?;
        for (daughter, momentum) in event.daughters.iter().enumerate() {
            self.fill_particle(tree, daughter + 1, momentum, rng)?;
        }
        Ok(())
    }

    /// Fill all quantities of one particle (0 = mother, 1.. = daughters)
    fn fill_particle(
        &self,
        tree: &mut EventTree,
        particle: usize,
        momentum: &Momentum,
        rng: &mut RandomSource,
    ) -> Result<()> {
        let properties = if particle == 0 {
            &self.decay.mother
        } else {
            &self.decay.daughters[particle - 1]
        };
        let kinematics = Kinematics::of(momentum);
        let flight = flight::sample_flight(properties.mass, properties.lifetime, momentum, rng);
        let label = &self.labels[particle];
        for quantity in Quantity::ALL {
            let value = record(&kinematics, &flight, quantity);
            tree.fill(&format!("{label}_{}", quantity.name()), value)?;
        }
        Ok(())
    }

    /// Build an empty tree with every branch registered
    fn make_tree(&self) -> Result<EventTree> {
        let mut tree = EventTree::new(&self.tree_name);
        for quantity in Quantity::ALL {
            for label in &self.labels {
                tree.add_branch(&format!("{label}_{}", quantity.name()))?;
            }
        }
        Ok(tree)
    }
}

/// Value of one recorded quantity for one particle
fn record(kinematics: &Kinematics, flight: &FlightSample, quantity: Quantity) -> Float {
    match quantity {
        Quantity::Tau => flight.proper_time,
        Quantity::Px => kinematics.px,
        Quantity::Py => kinematics.py,
        Quantity::Pz => kinematics.pz,
        Quantity::Pe => kinematics.energy,
        Quantity::P => kinematics.momentum,
        Quantity::Pt => kinematics.pt,
        Quantity::Theta => kinematics.theta,
        Quantity::Phi => kinematics.phi,
        Quantity::Eta => kinematics.eta,
        Quantity::M => kinematics.mass,
        Quantity::Fdx => flight.dx,
        Quantity::Fdy => flight.dy,
        Quantity::Fdz => flight.dz,
        Quantity::Fd => flight.distance,
    }
}

/// Branch-name labels for the mother and daughters of a channel
///
/// Display names collide when a decay has identical daughters (or a daughter
/// named like its mother); later occurrences get a numeric suffix so that
/// every particle keeps its own set of branches.
///
fn derive_labels(decay: &DecayDefinition) -> Vec<String> {
    let names =
        std::iter::once(&decay.mother.name).chain(decay.daughters.iter().map(|d| &d.name));
    let mut seen = std::collections::HashMap::<&str, usize>::new();
    names
        .map(|name| {
            let occurrence = seen.entry(name.as_str()).or_insert(0);
            *occurrence += 1;
            if *occurrence == 1 {
                name.clone()
            } else {
                format!("{name}{occurrence}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kinematics::UNDEFINED, particle::ParticleProperties};

    const TOLERANCE: Float = 1e-6;

    /// Toy two-body channel: 5000 -> 1000 + 1000, unit lifetimes
    fn toy_decay() -> DecayDefinition {
        DecayDefinition {
            id: "X2AB".to_owned(),
            branching_ratio: 1.,
            descriptor: "X0 -> A0 A0".to_owned(),
            description: "Toy two-body channel".to_owned(),
            mother: ParticleProperties::new("X0", 0., 5000., 1.),
            daughters: vec![
                ParticleProperties::new("A0", 0., 1000., 1.),
                ParticleProperties::new("A0", 0., 1000., 1.),
            ],
        }
    }

    fn generate(decay: &DecayDefinition, num_events: usize, seed: u64) -> EventTree {
        EventGenerator::new(decay, "TestTree", num_events, 0.)
            .generate(RandomSource::with_seed(seed))
            .unwrap()
    }

    #[test]
    fn identical_daughters_get_distinct_labels() {
        let decay = toy_decay();
        assert_eq!(derive_labels(&decay), ["X0", "A0", "A02"]);
    }

    #[test]
    fn all_branches_are_registered() {
        let decay = toy_decay();
        let tree = generate(&decay, 0, 1);
        assert_eq!(tree.num_branches(), 15 * 3);
        assert!(tree.branch_names().any(|b| b == "X0_TAU"));
        assert!(tree.branch_names().any(|b| b == "A02_FD"));
    }

    #[test]
    fn zero_events_yield_an_empty_tree() {
        let tree = generate(&toy_decay(), 0, 1);
        assert_eq!(tree.entry_count(), None);
    }

    #[test]
    fn entry_count_matches_the_request() {
        let decay = toy_decay();
        let tree = generate(&decay, 25, 1);
        assert_eq!(tree.entry_count(), Some(25));
        for branch in tree.branch_names() {
            assert_eq!(tree.column(branch).unwrap().len(), 25);
        }
    }

    #[test]
    fn single_event_scenario_conserves_energy_and_momentum() {
        let decay = toy_decay();
        let tree = generate(&decay, 1, 7);
        let entry = tree.entry(0).unwrap();

        // The resting mother's angular observables are degenerate
        assert_eq!(entry.get("X0_PT"), Some(0.));
        assert_eq!(entry.get("X0_THETA"), Some(UNDEFINED));
        assert_eq!(entry.get("X0_PHI"), Some(UNDEFINED));

        // Daughters must exactly share the mother's energy and momentum
        for coord in ["PX", "PY", "PZ", "PE"] {
            let mother = entry.get(&format!("X0_{coord}")).unwrap();
            let sum = entry.get(&format!("A0_{coord}")).unwrap()
                + entry.get(&format!("A02_{coord}")).unwrap();
            assert!(
                (sum - mother).abs() < TOLERANCE * 5000.,
                "{coord}: {sum} != {mother}"
            );
        }
    }

    #[test]
    fn flight_distance_is_the_norm_of_its_components() {
        let decay = toy_decay();
        let tree = generate(&decay, 10, 3);
        for event in 0..10 {
            let entry = tree.entry(event).unwrap();
            for label in ["X0", "A0", "A02"] {
                let [dx, dy, dz, fd] = ["FDX", "FDY", "FDZ", "FD"]
                    .map(|q| entry.get(&format!("{label}_{q}")).unwrap());
                assert_eq!(fd, (dx * dx + dy * dy + dz * dz).sqrt());
            }
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_tree() {
        let decay = toy_decay();
        let first = generate(&decay, 50, 99);
        let second = generate(&decay, 50, 99);
        for branch in first.branch_names() {
            assert_eq!(first.column(branch).unwrap(), second.column(branch).unwrap());
        }
    }

    #[test]
    fn conservation_holds_for_every_event_of_a_long_run() {
        let decay = toy_decay();
        let tree = generate(&decay, 500, 11);
        for event in 0..500 {
            let entry = tree.entry(event).unwrap();
            for coord in ["PX", "PY", "PZ", "PE"] {
                let mother = entry.get(&format!("X0_{coord}")).unwrap();
                let sum = entry.get(&format!("A0_{coord}")).unwrap()
                    + entry.get(&format!("A02_{coord}")).unwrap();
                assert!((sum - mother).abs() < TOLERANCE * 5000.);
            }
        }
    }
}
