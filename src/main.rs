//! Command-line driver of the toy decay-kinematics Monte Carlo generator

use anyhow::Context;

use hepgen::{
    config::Configuration, decay::DecayCatalog, evgen::EventGenerator, output,
    particle::ParticleCatalog, random::RandomSource,
};

use std::time::Instant;

/// We'll use anyhow's type-erased result type throughout the application
type Result<T> = anyhow::Result<T>;

/// This will act as our main function, with suitable error handling
fn main() -> Result<()> {
    env_logger::init();

    // ### CONFIGURATION READOUT ###

    let cfg = Configuration::load().context("Failed to load the configuration")?;
    cfg.print();

    // ### CATALOG CONSTRUCTION ###

    // Any failure in here is a fatal configuration error: generation must
    // never start on a malformed decay definition.
    let particles = ParticleCatalog::standard();
    log::info!("Particle catalog holds {} species", particles.len());
    let decays = DecayCatalog::load(&cfg.decay_dir, &particles)
        .context("Failed to load the decay catalog")?;
    log::debug!(
        "Loaded decay channels: {}",
        decays
            .iter()
            .map(|d| d.id.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    let decay = decays
        .get(&cfg.decay_id)
        .context("Failed to look up the requested decay")?;
    log::info!(
        "Selected channel '{}' ({}), branching ratio {}: {}",
        decay.id,
        decay.descriptor,
        decay.branching_ratio,
        decay.description
    );

    // ### EVENT GENERATION ###

    // NOTE: The clock starts after configuration and catalog I/O, to avoid
    //       IO-induced timing fluctuations
    let saved_time = Instant::now();

    let generator = EventGenerator::new(decay, &cfg.tree_name(), cfg.num_events, cfg.boost_energy);
    let tree = generator
        .generate(RandomSource::with_seed(cfg.seed))
        .context("Failed to generate events")?;

    // ### RESULTS DISPLAY AND STORAGE ###

    let elapsed_time = saved_time.elapsed();
    output::dump_results(&cfg, &tree, elapsed_time).context("Failed to output the results")?;

    // ...and we're done
    Ok(())
}
