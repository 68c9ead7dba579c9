//! Mechanism for loading and sharing the run configuration

use crate::{numeric::Float, random};

use anyhow::{ensure, Result};
use clap::Parser;

use std::path::PathBuf;

/// Run configuration
#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Toy Monte Carlo generator for particle decay kinematics"
)]
pub struct Configuration {
    /// Identifier of the decay channel to generate
    #[arg(long = "decay", value_name = "ID")]
    pub decay_id: String,

    /// Number of events to generate
    #[arg(long = "events", value_name = "N", default_value_t = 1)]
    pub num_events: usize,

    /// Boost energy of the mother (MeV); zero leaves the mother at rest
    #[arg(long, value_name = "MEV", default_value_t = 0.)]
    pub boost_energy: Float,

    /// Random seed
    #[arg(long, default_value_t = random::DEFAULT_SEED)]
    pub seed: u64,

    /// Directory holding the .dcf decay descriptor files
    #[arg(long, value_name = "DIR", default_value = "decay_files")]
    pub decay_dir: PathBuf,

    /// Output file for the generated tree (JSON)
    #[arg(long, value_name = "FILE", default_value = "events.json")]
    pub output: PathBuf,

    /// Name of the produced tree (default: DecayTree_<ID>)
    #[arg(long, value_name = "NAME")]
    tree_name: Option<String>,
}
//
impl Configuration {
    /// Load the configuration from the command line and check it
    pub fn load() -> Result<Self> {
        let config = Self::parse();
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot be generated
    fn validate(&self) -> Result<()> {
        ensure!(
            self.boost_energy >= 0. && self.boost_energy.is_finite(),
            "The boost energy must be finite and non-negative"
        );
        ensure!(!self.decay_id.is_empty(), "Please select a decay channel");
        Ok(())
    }

    /// Name of the tree to be produced
    pub fn tree_name(&self) -> String {
        self.tree_name
            .clone()
            .unwrap_or_else(|| format!("DecayTree_{}", self.decay_id))
    }

    /// Display the configuration at the start of a run
    pub fn print(&self) {
        log::info!("DecID       : {}", self.decay_id);
        log::info!("nEvts       : {}", self.num_events);
        log::info!("Energy      : {}", self.boost_energy);
        log::info!("Seed        : {}", self.seed);
        log::info!("DecayDir    : {}", self.decay_dir.display());
        log::info!("OutFile     : {}", self.output.display());
        log::info!("OutTree     : {}", self.tree_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(boost_energy: Float, tree_name: Option<&str>) -> Configuration {
        Configuration {
            decay_id: "B2PiPi".to_owned(),
            num_events: 10,
            boost_energy,
            seed: 1,
            decay_dir: "decay_files".into(),
            output: "events.json".into(),
            tree_name: tree_name.map(str::to_owned),
        }
    }

    #[test]
    fn command_line_is_well_formed() {
        use clap::CommandFactory;
        Configuration::command().debug_assert();
    }

    #[test]
    fn negative_boosts_are_rejected() {
        assert!(configuration(-1., None).validate().is_err());
        assert!(configuration(0., None).validate().is_ok());
    }

    #[test]
    fn tree_name_defaults_to_the_decay_id() {
        assert_eq!(configuration(0., None).tree_name(), "DecayTree_B2PiPi");
        assert_eq!(configuration(0., Some("MyTree")).tree_name(), "MyTree");
    }
}
