//! Multi-threaded back-end of event generation
//!
//! Each batch of events runs as a rayon task with a private clone of the
//! random source, jumped to its own region of the stream. Task results are
//! stored per batch and merged in batch order, so the output tree is
//! identical to what the sequential back-end produces for the same seed.

use crate::{error::Result, random::RandomSource, tree::EventTree};

use std::sync::Mutex;

/// Generate events in multi-threaded mode
pub(super) fn run_generation_impl(
    num_events: usize,
    mut rng: RandomSource,
    generate_batch: impl Send + Sync + Fn(usize, usize, &mut RandomSource) -> Result<EventTree>,
) -> Result<EventTree> {
    let layout = super::batches(num_events).collect::<Vec<_>>();

    // Storage for the partial tree of each batch
    let results = layout
        .iter()
        .map(|_| Mutex::new(None))
        .collect::<Vec<Mutex<Option<Result<EventTree>>>>>();

    // This function is a synchronization scope: it will only return
    // once all inner tasks have been executed
    rayon::scope(|scope| {
        for (batch_id, &(offset, size)) in layout.iter().enumerate() {
            // Jump the base stream past the region claimed by this batch
            let mut task_rng = rng.clone();
            rng.long_jump();

            let results_ref = &results;
            let generate_batch_ref = &generate_batch;
            scope.spawn(move |_| {
                let result = generate_batch_ref(size, offset, &mut task_rng);
                let mut slot = results_ref[batch_id]
                    .lock()
                    .expect("Mutex data should be valid");
                assert!(slot.is_none(), "Tasks should not report results twice");
                *slot = Some(result);
            });
        }
    });

    // Merge the partial trees in batch order
    let mut results_iter = results.into_iter().map(|slot| {
        slot.into_inner()
            .expect("Mutex data should be valid")
            .expect("Result should be ready")
    });
    let mut tree = results_iter.next().expect("There is always a first batch")?;
    for result in results_iter {
        tree.merge(result?);
    }
    Ok(tree)
}
