//! Decay definitions and the decay catalog
//!
//! A decay is described by a `.dcf` file of `Key : Value` lines:
//!
//! ```text
//! ID : B2PiPi
//! Branching Ratio : 5.5e-6
//! Decay : B+ -> pi+ pi0
//! Description : Toy charmless decay
//! ```
//!
//! Lines without a colon are ignored. The `Decay` field is the descriptor:
//! a mother symbol, an arrow, and at least two daughter symbols, all of which
//! must resolve against the particle catalog. Any failure here is a fatal
//! configuration error: generation never starts on a malformed catalog.

use crate::{
    error::{Error, Result},
    numeric::Float,
    particle::{ParticleCatalog, ParticleProperties},
};

use std::{fs, path::Path};

/// One decay channel: a mother and its ordered daughters
#[derive(Debug, Clone)]
pub struct DecayDefinition {
    /// Identifier used for lookup, e.g. "B2PiPi"
    pub id: String,

    /// Branching ratio of the channel
    pub branching_ratio: Float,

    /// Human-readable descriptor, e.g. "B+ -> pi+ pi0"
    pub descriptor: String,

    /// Free-text description
    pub description: String,

    /// Decaying particle
    pub mother: ParticleProperties,

    /// Decay products, in descriptor order (at least two)
    pub daughters: Vec<ParticleProperties>,
}
//
impl DecayDefinition {
    /// Parse a decay definition from `.dcf` file contents
    ///
    /// `path` is only used to label error messages.
    ///
    pub fn parse(content: &str, path: &str, particles: &ParticleCatalog) -> Result<Self> {
        // Collect the Key : Value lines, ignoring anything else
        let fields = content
            .lines()
            .filter_map(|line| {
                let (key, value) = line.split_once(':')?;
                Some((key.trim(), value.trim()))
            })
            .collect::<Vec<_>>();
        let lookup = |field: &'static str| -> Result<&str> {
            fields
                .iter()
                .find(|(key, _)| *key == field)
                .map(|(_, value)| *value)
                .ok_or(Error::MissingDescriptorField {
                    path: path.to_owned(),
                    field,
                })
        };

        // Decode the four mandatory fields
        let id = lookup("ID")?.replace(' ', "");
        let branching_ratio = {
            let raw = lookup("Branching Ratio")?;
            raw.parse::<Float>()
                .map_err(|_| Error::UnparseableDescriptorField {
                    path: path.to_owned(),
                    field: "Branching Ratio",
                    value: raw.to_owned(),
                })?
        };
        let descriptor = lookup("Decay")?.to_owned();
        let description = lookup("Description")?.to_owned();

        // Resolve the descriptor against the particle catalog
        let (mother, daughters) = Self::parse_descriptor(&descriptor, particles)?;
        if daughters.len() < 2 {
            return Err(Error::TooFewDaughters {
                id,
                count: daughters.len(),
            });
        }

        Ok(Self {
            id,
            branching_ratio,
            descriptor,
            description,
            mother,
            daughters,
        })
    }

    /// Split a "Mother -> D1 D2 ..." descriptor and resolve every symbol
    fn parse_descriptor(
        descriptor: &str,
        particles: &ParticleCatalog,
    ) -> Result<(ParticleProperties, Vec<ParticleProperties>)> {
        let (mother_str, daughters_str) =
            descriptor
                .split_once("->")
                .ok_or_else(|| Error::MalformedDescriptor {
                    descriptor: descriptor.to_owned(),
                    reason: "expected 'Mother -> Daughters'".to_owned(),
                })?;
        let mother = particles.get(mother_str.trim())?.clone();
        let daughters = daughters_str
            .split_whitespace()
            .map(|symbol| particles.get(symbol).cloned())
            .collect::<Result<Vec<_>>>()?;
        Ok((mother, daughters))
    }
}

/// Table of decay channels loaded from descriptor files
pub struct DecayCatalog {
    /// Loaded channels, in file-name order
    decays: Vec<DecayDefinition>,
}
//
impl DecayCatalog {
    /// Load every `.dcf` file found under a directory
    ///
    /// Files are visited in lexicographic order so that catalog construction
    /// is deterministic. An empty catalog is a configuration error.
    ///
    pub fn load(dir: &Path, particles: &ParticleCatalog) -> Result<Self> {
        let io_err = |source| Error::DecayFileIo {
            path: dir.display().to_string(),
            source,
        };
        let mut paths = fs::read_dir(dir)
            .map_err(io_err)?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(io_err)?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "dcf"))
            .collect::<Vec<_>>();
        paths.sort();

        let mut decays = Vec::with_capacity(paths.len());
        for path in paths {
            let label = path.display().to_string();
            let content = fs::read_to_string(&path).map_err(|source| Error::DecayFileIo {
                path: label.clone(),
                source,
            })?;
            decays.push(DecayDefinition::parse(&content, &label, particles)?);
        }
        if decays.is_empty() {
            return Err(Error::EmptyDecayCatalog(dir.display().to_string()));
        }
        Ok(Self { decays })
    }

    /// Look up a decay channel by identifier
    pub fn get(&self, id: &str) -> Result<&DecayDefinition> {
        self.decays
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| Error::UnknownDecay(id.to_owned()))
    }

    /// Iterate over the loaded channels
    pub fn iter(&self) -> impl Iterator<Item = &DecayDefinition> {
        self.decays.iter()
    }
}
