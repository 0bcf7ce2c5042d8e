//! Fan-out/fan-in over chunks
//!
//! The slot vector is allocated once, pre-sized to the chunk count, and split
//! with `iter_mut` before any unit starts. Each unit receives the only `&mut`
//! to its own slot, so disjoint writes are enforced by the borrow checker
//! instead of by convention. The enclosing `thread::scope` or `ThreadPool::install`
//! is the join-all barrier: no slot can be read until every unit has returned.

use super::operations::{collect_partials, combine, partial_sum, PartialSlot};
use crate::errors::{MeanError, Result};
use crate::parallel::{build_pool, Dispatch};
use crate::partition::Chunk;
use rayon::prelude::*;
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread;
use tracing::{debug, trace};

/// Parallel total of `(i + 1)` over every chunk
///
/// # Errors
///
/// Returns [`MeanError::WorkerFailure`] if any unit fails and
/// [`MeanError::Overflow`] if the combined total does not fit in `u64`.
pub fn reduce(chunks: &[Chunk], dispatch: Dispatch) -> Result<u64> {
    let partials = reduce_partials(chunks, dispatch)?;
    combine(&partials)
}

/// Run one unit per chunk and return the partial sums in chunk order
///
/// # Errors
///
/// See [`reduce`].
pub fn reduce_partials(chunks: &[Chunk], dispatch: Dispatch) -> Result<Vec<u64>> {
    reduce_partials_with(chunks, dispatch, partial_sum)
}

/// Like [`reduce_partials`] but with a caller-supplied unit body
///
/// # Errors
///
/// A unit that returns an error or panics turns into a
/// [`MeanError::WorkerFailure`] for that chunk's index.
pub fn reduce_partials_with<F>(chunks: &[Chunk], dispatch: Dispatch, unit: F) -> Result<Vec<u64>>
where
    F: Fn(&Chunk) -> Result<u64> + Sync,
{
    let slots = fan_out(chunks, dispatch, &unit)?;
    debug!(units = chunks.len(), "barrier released, combining partial sums");
    collect_partials(slots)
}

fn fan_out<F>(chunks: &[Chunk], dispatch: Dispatch, unit: &F) -> Result<Vec<PartialSlot>>
where
    F: Fn(&Chunk) -> Result<u64> + Sync,
{
    let mut slots: Vec<PartialSlot> = vec![None; chunks.len()];
    if chunks.is_empty() {
        return Ok(slots);
    }

    debug!(units = chunks.len(), %dispatch, "dispatching units");
    match dispatch {
        Dispatch::Threads => fan_out_threads(chunks, &mut slots, unit)?,
        Dispatch::Rayon => fan_out_rayon(chunks, &mut slots, unit)?,
    }
    Ok(slots)
}

fn fan_out_threads<F>(chunks: &[Chunk], slots: &mut [PartialSlot], unit: &F) -> Result<()>
where
    F: Fn(&Chunk) -> Result<u64> + Sync,
{
    thread::scope(|s| {
        for (slot, chunk) in slots.iter_mut().zip(chunks) {
            thread::Builder::new()
                .name(format!("par-mean-unit-{}", chunk.index))
                .spawn_scoped(s, move || *slot = Some(run_unit(chunk, unit)))
                .map_err(|e| spawn_error(chunk.index, &e))?;
        }
        Ok(())
    })
}

fn fan_out_rayon<F>(chunks: &[Chunk], slots: &mut [PartialSlot], unit: &F) -> Result<()>
where
    F: Fn(&Chunk) -> Result<u64> + Sync,
{
    let pool = build_pool(num_cpus::get().min(chunks.len()))?;
    pool.install(|| {
        slots
            .par_iter_mut()
            .zip(chunks.par_iter())
            .for_each(|(slot, chunk)| *slot = Some(run_unit(chunk, unit)));
    });
    Ok(())
}

fn spawn_error(worker: usize, err: &io::Error) -> MeanError {
    MeanError::WorkerFailure {
        worker,
        reason: format!("failed to spawn thread: {err}"),
    }
}

/// Body of a single unit; never unwinds past this frame
fn run_unit<F>(chunk: &Chunk, unit: &F) -> Result<u64>
where
    F: Fn(&Chunk) -> Result<u64> + Sync,
{
    trace!(%chunk, "unit started");
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| unit(chunk)));
    let result = match outcome {
        Ok(Ok(sum)) => Ok(sum),
        Ok(Err(e)) => Err(MeanError::WorkerFailure {
            worker: chunk.index,
            reason: e.to_string(),
        }),
        Err(payload) => Err(MeanError::WorkerFailure {
            worker: chunk.index,
            reason: format!("panicked: {}", panic_message(payload.as_ref())),
        }),
    };
    trace!(%chunk, ok = result.is_ok(), "unit finished");
    result
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{partition, ChunkPolicy};
    use std::time::{Duration, Instant};

    #[test]
    fn both_dispatch_modes_agree() {
        let chunks = partition(1_000, 7, ChunkPolicy::Clamped).unwrap();
        let threads = reduce(&chunks, Dispatch::Threads).unwrap();
        let rayon = reduce(&chunks, Dispatch::Rayon).unwrap();
        assert_eq!(threads, 500_500);
        assert_eq!(threads, rayon);
    }

    #[test]
    fn partials_stay_in_chunk_order() {
        let chunks = partition(10, 2, ChunkPolicy::Clamped).unwrap();
        assert_eq!(reduce_partials(&chunks, Dispatch::Threads).unwrap(), vec![15, 40]);
    }

    #[test]
    fn no_chunks_sum_to_zero() {
        assert_eq!(reduce(&[], Dispatch::Rayon).unwrap(), 0);
    }

    #[test]
    fn panicking_unit_fails_the_reduction() {
        let chunks = partition(100, 4, ChunkPolicy::Clamped).unwrap();
        for dispatch in [Dispatch::Threads, Dispatch::Rayon] {
            let result = reduce_partials_with(&chunks, dispatch, |chunk| {
                if chunk.index == 2 {
                    panic!("boom");
                }
                partial_sum(chunk)
            });
            match result {
                Err(MeanError::WorkerFailure { worker, reason }) => {
                    assert_eq!(worker, 2);
                    assert!(reason.contains("boom"));
                }
                other => panic!("Expected WorkerFailure, got {other:?}"),
            }
        }
    }

    #[test]
    fn rayon_handles_thousands_of_chunks() {
        let chunks = partition(10, 1_500, ChunkPolicy::Clamped).unwrap();

        let started = Instant::now();
        assert_eq!(reduce(&chunks, Dispatch::Threads).unwrap(), 55);
        let threads = started.elapsed();

        let started = Instant::now();
        assert_eq!(reduce(&chunks, Dispatch::Rayon).unwrap(), 55);
        let rayon = started.elapsed();

        let budget = (threads * 10).max(Duration::from_secs(2));
        assert!(rayon < budget, "rayon took {rayon:?}, threads took {threads:?}");
    }

    #[test]
    fn spawn_failure_names_the_worker() {
        let err = spawn_error(7, &io::Error::new(io::ErrorKind::WouldBlock, "resource limit"));
        assert_eq!(
            err,
            MeanError::WorkerFailure {
                worker: 7,
                reason: "failed to spawn thread: resource limit".to_string()
            }
        );
    }

    #[test]
    fn erroring_unit_fails_the_reduction() {
        let chunks = partition(100, 3, ChunkPolicy::Clamped).unwrap();
        let result = reduce_partials_with(&chunks, Dispatch::Threads, |chunk| {
            if chunk.index == 0 {
                Err(MeanError::Overflow {
                    context: "test".to_string(),
                })
            } else {
                partial_sum(chunk)
            }
        });
        assert!(matches!(result, Err(MeanError::WorkerFailure { worker: 0, .. })));
    }
}
