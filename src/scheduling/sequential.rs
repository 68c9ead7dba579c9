//! Sequential back-end of event generation
//!
//! We use batched logic even in sequential mode, with one random-stream jump
//! per batch, in order to achieve reproducibility with respect to
//! multi-threaded runs.

use crate::{error::Result, random::RandomSource, tree::EventTree};

/// Generate events in sequential mode
pub(super) fn run_generation_impl(
    num_events: usize,
    mut rng: RandomSource,
    generate_batch: impl Send + Sync + Fn(usize, usize, &mut RandomSource) -> Result<EventTree>,
) -> Result<EventTree> {
    let mut batches = super::batches(num_events);

    // Initialize the accumulator tree with the first batch of events
    let (first_offset, first_size) = batches.next().expect("There is always a first batch");
    let mut task_rng = rng.clone();
    rng.long_jump();
    let mut tree = generate_batch(first_size, first_offset, &mut task_rng)?;

    // Generate and merge the remaining batches (if any)
    for (offset, size) in batches {
        let mut task_rng = rng.clone();
        rng.long_jump();
        tree.merge(generate_batch(size, offset, &mut task_rng)?);
    }
    Ok(tree)
}
