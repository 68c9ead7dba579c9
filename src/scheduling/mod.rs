//! This module takes care of scheduling the generation work, encapsulating
//! use of multiple threads and anything else that will come in the future

#[cfg(feature = "multi-threading")]
mod multi_threading;
#[cfg(not(feature = "multi-threading"))]
mod sequential;

use crate::{error::Result, random::RandomSource, tree::EventTree};

/// Size of the generated event batches
///
/// Events are generated in batches: each batch fills a private partial tree
/// from a private random stream, and partial trees are concatenated in batch
/// order. This is what makes sequential and multi-threaded runs of the same
/// seed produce identical trees.
///
const EVENT_BATCH_SIZE: usize = 10_000;

/// Run event generation in the manner that was configured at build time.
///
/// Takes as parameters the total number of events to be generated, the base
/// random source, and a generation kernel which fills a partial tree with a
/// given number of events, knowing the global index of its first event (used
/// for progress reporting).
///
/// Returns the merged event tree. Zero requested events still run one empty
/// batch, so the returned tree carries its branches.
///
pub fn run_generation(
    num_events: usize,
    rng: RandomSource,
    generate_batch: impl Send + Sync + Fn(usize, usize, &mut RandomSource) -> Result<EventTree>,
) -> Result<EventTree> {
    #[cfg(not(feature = "multi-threading"))]
    {
        sequential::run_generation_impl(num_events, rng, generate_batch)
    }

    #[cfg(feature = "multi-threading")]
    {
        multi_threading::run_generation_impl(num_events, rng, generate_batch)
    }
}

/// Batch layout for a run: (first event index, batch size) pairs
///
/// A request for zero events still yields one zero-sized batch, whose kernel
/// invocation produces the empty-but-shaped tree.
///
fn batches(num_events: usize) -> impl Iterator<Item = (usize, usize)> {
    let num_batches = std::cmp::max(1, num_events.div_ceil(EVENT_BATCH_SIZE));
    (0..num_batches).map(move |batch| {
        let offset = batch * EVENT_BATCH_SIZE;
        (offset, EVENT_BATCH_SIZE.min(num_events - offset))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_layouts() {
        let layout = |n| batches(n).collect::<Vec<_>>();
        assert_eq!(layout(0), [(0, 0)]);
        assert_eq!(layout(1), [(0, 1)]);
        assert_eq!(layout(EVENT_BATCH_SIZE), [(0, EVENT_BATCH_SIZE)]);
        assert_eq!(
            layout(EVENT_BATCH_SIZE + 2),
            [(0, EVENT_BATCH_SIZE), (EVENT_BATCH_SIZE, 2)]
        );
    }

    #[test]
    fn batches_are_merged_in_order() {
        // Kernel that records the global index of every event it generates
        let kernel = |count: usize, offset: usize, _rng: &mut RandomSource| {
            let mut tree = EventTree::new("Batches");
            tree.add_branch("INDEX")?;
            for event in offset..offset + count {
                tree.fill("INDEX", event as crate::numeric::Float)?;
            }
            Ok(tree)
        };
        let total = 2 * EVENT_BATCH_SIZE + 17;
        let tree = run_generation(total, RandomSource::new(), kernel).unwrap();
        assert_eq!(tree.entry_count(), Some(total));
        let indices = tree.column("INDEX").unwrap();
        for (position, &index) in indices.iter().enumerate() {
            assert_eq!(index, position as crate::numeric::Float);
        }
    }

    #[test]
    fn zero_events_still_shape_the_tree() {
        let kernel = |_count: usize, _offset: usize, _rng: &mut RandomSource| {
            let mut tree = EventTree::new("Empty");
            tree.add_branch("INDEX")?;
            Ok(tree)
        };
        let tree = run_generation(0, RandomSource::new(), kernel).unwrap();
        assert_eq!(tree.entry_count(), None);
        assert_eq!(tree.num_branches(), 1);
    }
}
