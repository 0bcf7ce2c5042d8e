//! Core summation operations and traits
//!
//! Everything here is sequential: the per-chunk partial sum that each worker
//! runs, the fan-in combine over collected slots, and the mean derived from
//! the total.

use crate::errors::{MeanError, Result};
use crate::parallel::Dispatch;
use crate::partition::Chunk;

/// Outcome written by one worker into its own slot.
///
/// `None` means the worker never recorded anything.
pub type PartialSlot = Option<Result<u64>>;

/// Sum of the 1-indexed values at positions `[chunk.start, chunk.end)`
///
/// Position `i` holds the value `i + 1`. Ranges extending past the logical
/// dataset are summed as-is.
///
/// # Errors
///
/// Returns [`MeanError::Overflow`] if the sum does not fit in `u64`.
pub fn partial_sum(chunk: &Chunk) -> Result<u64> {
    (chunk.start..chunk.end)
        .try_fold(0_u64, |acc, i| acc.checked_add(i.checked_add(1)?))
        .ok_or_else(|| MeanError::Overflow {
            context: format!("partial sum over chunk {chunk}"),
        })
}

/// Unwrap every slot into its partial sum, in worker order
///
/// # Errors
///
/// Returns the first worker failure found. A slot left empty is reported as a
/// [`MeanError::WorkerFailure`] for that worker.
pub fn collect_partials(slots: Vec<PartialSlot>) -> Result<Vec<u64>> {
    slots
        .into_iter()
        .enumerate()
        .map(|(worker, slot)| {
            slot.unwrap_or_else(|| {
                Err(MeanError::WorkerFailure {
                    worker,
                    reason: "no partial sum recorded".to_string(),
                })
            })
        })
        .collect()
}

/// Sequential fan-in over the partial sums
///
/// # Errors
///
/// Returns [`MeanError::Overflow`] if the total does not fit in `u64`.
pub fn combine(partials: &[u64]) -> Result<u64> {
    partials
        .iter()
        .try_fold(0_u64, |acc, &p| acc.checked_add(p))
        .ok_or_else(|| MeanError::Overflow {
            context: format!("combining {} partial sums", partials.len()),
        })
}

/// Arithmetic mean of `total` over `dataset_size` elements
///
/// # Errors
///
/// Returns [`MeanError::DivisionByZero`] when `dataset_size` is zero.
#[allow(clippy::cast_precision_loss)]
pub fn mean(total: u64, dataset_size: u64) -> Result<f64> {
    if dataset_size == 0 {
        return Err(MeanError::DivisionByZero);
    }
    Ok(total as f64 / dataset_size as f64)
}

/// Single-unit reference total over the same chunk boundaries
///
/// # Errors
///
/// Returns [`MeanError::Overflow`] on overflow.
pub fn sequential_total(chunks: &[Chunk]) -> Result<u64> {
    chunks
        .iter()
        .try_fold(0_u64, |acc, chunk| {
            let part = partial_sum(chunk)?;
            acc.checked_add(part).ok_or_else(|| MeanError::Overflow {
                context: "sequential total".to_string(),
            })
        })
}

/// Trait for types that can perform parallel reductions
pub trait ParallelReduction<T> {
    /// Fan out one unit per element, wait for all, and combine
    ///
    /// # Errors
    ///
    /// Returns an error if any unit fails or the combine overflows.
    fn reduce_parallel(&self, dispatch: Dispatch) -> Result<T>;
}

impl ParallelReduction<u64> for [Chunk] {
    fn reduce_parallel(&self, dispatch: Dispatch) -> Result<u64> {
        super::parallel::reduce(self, dispatch)
    }
}
