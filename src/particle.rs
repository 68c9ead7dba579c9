//! Particle properties and the particle catalog
//!
//! The catalog is an explicitly constructed table, handed to whoever needs it
//! rather than living in process-wide state, so that initialization order is
//! deterministic and testable. It is seeded with a fixed set of common
//! leptons and hadrons, and every charged entry automatically gets its
//! charge-conjugate partner.

use crate::{
    error::{Error, Result},
    numeric::Float,
};

/// Properties of one particle species
///
/// Masses are in MeV, mean lifetimes in seconds. A zero lifetime marks a
/// particle treated as stable on detector timescales: its sampled proper
/// time, and therefore its flight distance, is identically zero.
///
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleProperties {
    /// Symbol as written in decay descriptors, e.g. "K*(892)+"
    pub symbol: String,

    /// Branch-name-safe display name, e.g. "Kstar_892_plus"
    pub name: String,

    /// Electric charge in units of e
    pub charge: Float,

    /// Rest mass (MeV)
    pub mass: Float,

    /// Mean proper lifetime (s)
    pub lifetime: Float,
}
//
impl ParticleProperties {
    /// Register a particle species
    pub fn new(symbol: &str, charge: Float, mass: Float, lifetime: Float) -> Self {
        assert!(mass > 0., "Particle masses must be positive");
        assert!(lifetime >= 0., "Particle lifetimes must be non-negative");
        Self {
            symbol: symbol.to_owned(),
            name: sanitize_symbol(symbol),
            charge,
            mass,
            lifetime,
        }
    }

    /// Charge-conjugate partner of a charged particle
    ///
    /// Mirrors the symbol's charge markers and negates the charge; mass and
    /// lifetime are shared. Neutral species are their own partner and yield
    /// nothing.
    ///
    fn charge_conjugate(&self) -> Option<Self> {
        if !self.symbol.contains('+') && !self.symbol.contains('-') {
            return None;
        }
        let symbol = self
            .symbol
            .chars()
            .map(|c| match c {
                '+' => '-',
                '-' => '+',
                other => other,
            })
            .collect::<String>();
        Some(Self::new(&symbol, -self.charge, self.mass, self.lifetime))
    }
}

/// Turn a particle symbol into a name that is safe inside a branch name
///
/// Replacement table kept from the original generator so that existing
/// branch-name consumers keep working.
///
pub fn sanitize_symbol(symbol: &str) -> String {
    const REPLACEMENTS: [(&str, &str); 6] = [
        (")(", "_"),
        ("(", "_"),
        (")", "_"),
        ("*", "star"),
        ("+", "plus"),
        ("-", "minus"),
    ];
    let mut name = symbol.to_owned();
    for (from, to) in REPLACEMENTS {
        name = name.replace(from, to);
    }
    name
}

/// Table of particle species, searchable by symbol
pub struct ParticleCatalog {
    /// Registered species, base entries interleaved with their conjugates
    particles: Vec<ParticleProperties>,
}
//
impl ParticleCatalog {
    /// Build the standard catalog of common leptons and hadrons
    ///
    /// Masses and lifetimes follow the PDG listings. Stable species carry a
    /// zero lifetime.
    ///
    #[rustfmt::skip]
    pub fn standard() -> Self {
        let table = [
            //                      symbol        charge  mass (MeV)  lifetime (s)
            ParticleProperties::new("e-",          -1.,      0.511,   0.),
            ParticleProperties::new("mu-",         -1.,    105.658,   2.197e-6),
            ParticleProperties::new("tau-",        -1.,   1776.86,    2.903e-13),
            ParticleProperties::new("pi+",          1.,    139.570,   2.603e-8),
            ParticleProperties::new("pi0",          0.,    134.977,   8.43e-17),
            ParticleProperties::new("K+",           1.,    493.677,   1.238e-8),
            ParticleProperties::new("K(S)0",        0.,    497.611,   8.954e-11),
            ParticleProperties::new("K(L)0",        0.,    497.611,   5.116e-8),
            ParticleProperties::new("K*(892)+",     1.,    891.67,    1.3e-23),
            ParticleProperties::new("p+",           1.,    938.272,   0.),
            ParticleProperties::new("n0",           0.,    939.565,   878.4),
            ParticleProperties::new("Lambda0",      0.,   1115.683,   2.632e-10),
            ParticleProperties::new("D0",           0.,   1864.84,    4.10e-13),
            ParticleProperties::new("D+",           1.,   1869.66,    1.033e-12),
            ParticleProperties::new("D(s)+",        1.,   1968.35,    5.01e-13),
            ParticleProperties::new("B+",           1.,   5279.34,    1.638e-12),
            ParticleProperties::new("B0",           0.,   5279.66,    1.519e-12),
            ParticleProperties::new("B(s)0",        0.,   5366.92,    1.520e-12),
        ];
        let mut particles = Vec::with_capacity(2 * table.len());
        for particle in table {
            let conjugate = particle.charge_conjugate();
            particles.push(particle);
            particles.extend(conjugate);
        }
        Self { particles }
    }

    /// Look up a species by its symbol
    pub fn get(&self, symbol: &str) -> Result<&ParticleProperties> {
        self.particles
            .iter()
            .find(|p| p.symbol == symbol)
            .ok_or_else(|| Error::UnknownParticle(symbol.to_owned()))
    }

    /// Number of registered species
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Truth that the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Iterate over the registered species
    pub fn iter(&self) -> impl Iterator<Item = &ParticleProperties> {
        self.particles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_sanitize_to_branch_safe_names() {
        assert_eq!(sanitize_symbol("B+"), "Bplus");
        assert_eq!(sanitize_symbol("mu-"), "muminus");
        assert_eq!(sanitize_symbol("K*(892)+"), "Kstar_892_plus");
        assert_eq!(sanitize_symbol("K(S)0"), "K_S_0");
        for name in ParticleCatalog::standard().iter().map(|p| &p.name) {
            assert!(!name.contains(['+', '-', '*', '(', ')']), "{name}");
        }
    }

    #[test]
    fn standard_catalog_lookup() {
        let catalog = ParticleCatalog::standard();
        let b = catalog.get("B+").unwrap();
        assert_eq!(b.name, "Bplus");
        assert_eq!(b.charge, 1.);
        assert!(b.mass > 5000.);
        assert!(matches!(
            catalog.get("X(3872)"),
            Err(Error::UnknownParticle(_))
        ));
    }

    #[test]
    fn charged_species_have_mirrored_partners() {
        let catalog = ParticleCatalog::standard();
        let pi_plus = catalog.get("pi+").unwrap().clone();
        let pi_minus = catalog.get("pi-").unwrap();
        assert_eq!(pi_minus.charge, -pi_plus.charge);
        assert_eq!(pi_minus.mass, pi_plus.mass);
        assert_eq!(pi_minus.lifetime, pi_plus.lifetime);
        assert_eq!(pi_minus.name, "piminus");
    }

    #[test]
    fn neutral_species_are_not_mirrored() {
        let catalog = ParticleCatalog::standard();
        assert_eq!(
            catalog.iter().filter(|p| p.symbol.contains("D0")).count(),
            1
        );
    }

    #[test]
    fn all_masses_positive_all_lifetimes_non_negative() {
        for p in ParticleCatalog::standard().iter() {
            assert!(p.mass > 0.);
            assert!(p.lifetime >= 0.);
        }
    }
}
