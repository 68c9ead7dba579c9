//! This module is in charge of outputting the populated event tree to the
//! standard output and to disk

use crate::{config::Configuration, tree::EventTree};

use anyhow::{Context, Result};

use std::{
    fs::File,
    io::{BufWriter, Write},
    time::Duration,
};

use time::{format_description::well_known::Rfc2822, OffsetDateTime};

/// Persist the tree and write a human-readable run summary
///
/// The tree goes to the configured output file as JSON; a sibling `.summary`
/// file records when the run ended, how long it took, and the per-branch
/// entry counts. The summary is also echoed to the standard output.
///
pub fn dump_results(config: &Configuration, tree: &EventTree, elapsed: Duration) -> Result<()> {
    // Write the tree itself
    let file = File::create(&config.output)
        .with_context(|| format!("Failed to create {}", config.output.display()))?;
    serde_json::to_writer(BufWriter::new(file), tree)
        .context("Failed to serialize the event tree")?;
    log::info!("Wrote '{}' to {}", tree.name(), config.output.display());

    // Write the run summary next to it
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc2822)
        .context("Failed to format the run timestamp")?;
    let summary_path = config.output.with_extension("summary");
    let mut summary = File::create(&summary_path)
        .with_context(|| format!("Failed to create {}", summary_path.display()))?;
    writeln!(summary, "{timestamp}")?;
    writeln!(summary, "{tree}")?;
    let elapsed_secs = elapsed.as_secs_f64();
    writeln!(summary, " Elapsed time           : {elapsed_secs}")?;
    if let Some(entries) = tree.entry_count() {
        let secs_per_event = elapsed_secs / entries as f64;
        writeln!(summary, " Elapsed time per event : {secs_per_event}")?;
    }

    // ...and echo the summary to the console
    println!("{tree}");
    Ok(())
}
