//! Splitting an index range into per-worker chunks
//!
//! A dataset of `N` elements is addressed by indices `[0, N)`. The partitioner
//! hands each worker one contiguous half-open range, ordered by worker index.
//! How the bounds are derived is governed by [`ChunkPolicy`], because the
//! choice is observable in the final total whenever `N` is not a multiple of
//! the worker count.

use crate::errors::{MeanError, Result};
use std::fmt;
use std::str::FromStr;

/// A half-open index range `[start, end)` owned by exactly one worker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    /// Worker index, also the partial-sum slot this chunk writes to
    pub index: usize,
    pub start: u64,
    pub end: u64,
}

impl Chunk {
    #[must_use]
    pub const fn new(index: usize, start: u64, end: u64) -> Self {
        Self { index, start, end }
    }

    /// Number of indices covered by the chunk
    #[must_use]
    pub const fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The part of this chunk that lies inside `[0, bound)`
    #[must_use]
    pub fn clamped_to(&self, bound: u64) -> Self {
        Self {
            index: self.index,
            start: self.start.min(bound),
            end: self.end.min(bound),
        }
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} [{}, {})", self.index, self.start, self.end)
    }
}

/// Rule for turning `(dataset_size, worker_count)` into chunk bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChunkPolicy {
    /// `ceil(N / W)` sized chunks, bounds left as computed.
    ///
    /// The last chunk may run past `N`, and with `W > N` trailing chunks start
    /// beyond it. Indices past `N` are summed like any other, so the total
    /// over-counts for non-divisible inputs.
    Faithful,
    /// `ceil(N / W)` sized chunks with both bounds clamped to `N`.
    ///
    /// The union of all chunks is exactly `[0, N)`; surplus chunks are empty.
    #[default]
    Clamped,
    /// `floor(N / W)` sized chunks, unclamped.
    ///
    /// The trailing `N mod W` indices belong to no chunk and are lost.
    Floor,
}

impl ChunkPolicy {
    /// Get the string representation of the policy
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Faithful => "faithful",
            Self::Clamped => "clamped",
            Self::Floor => "floor",
        }
    }

    /// Size of every chunk under this policy
    fn chunk_size(self, dataset_size: u64, workers: u64) -> u64 {
        match self {
            Self::Faithful | Self::Clamped => dataset_size.div_ceil(workers),
            Self::Floor => dataset_size / workers,
        }
    }
}

impl fmt::Display for ChunkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChunkPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "faithful" => Ok(Self::Faithful),
            "clamped" | "clamp" => Ok(Self::Clamped),
            "floor" => Ok(Self::Floor),
            other => Err(format!(
                "Unknown chunk policy '{other}'. Expected one of: faithful, clamped, floor"
            )),
        }
    }
}

/// Compute one contiguous chunk per worker, ordered by worker index
///
/// # Errors
///
/// Returns [`MeanError::InvalidWorkerCount`] when `worker_count` is zero and
/// [`MeanError::Overflow`] when a chunk bound does not fit in `u64`.
pub fn partition(dataset_size: u64, worker_count: usize, policy: ChunkPolicy) -> Result<Vec<Chunk>> {
    if worker_count == 0 {
        return Err(MeanError::InvalidWorkerCount {
            input: worker_count.to_string(),
        });
    }

    let workers = u64::try_from(worker_count).map_err(|_| MeanError::Overflow {
        context: format!("worker count {worker_count} does not fit in u64"),
    })?;
    let chunk_size = policy.chunk_size(dataset_size, workers);

    (0..worker_count)
        .zip(0..workers)
        .map(|(index, i)| {
            let start = bound(i, chunk_size)?;
            let end = bound(i + 1, chunk_size)?;
            let chunk = Chunk::new(index, start, end);
            Ok(match policy {
                ChunkPolicy::Clamped => chunk.clamped_to(dataset_size),
                ChunkPolicy::Faithful | ChunkPolicy::Floor => chunk,
            })
        })
        .collect()
}

fn bound(i: u64, chunk_size: u64) -> Result<u64> {
    i.checked_mul(chunk_size).ok_or_else(|| MeanError::Overflow {
        context: format!("chunk bound {i} * {chunk_size}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(chunks: &[Chunk]) -> Vec<(u64, u64)> {
        chunks.iter().map(|c| (c.start, c.end)).collect()
    }

    #[test]
    fn even_split() {
        let chunks = partition(10, 2, ChunkPolicy::Clamped).unwrap();
        assert_eq!(bounds(&chunks), vec![(0, 5), (5, 10)]);
        assert_eq!(chunks[1].index, 1);
    }

    #[test]
    fn faithful_overruns_the_dataset() {
        let chunks = partition(10, 3, ChunkPolicy::Faithful).unwrap();
        assert_eq!(bounds(&chunks), vec![(0, 4), (4, 8), (8, 12)]);
    }

    #[test]
    fn clamped_stops_at_the_dataset() {
        let chunks = partition(10, 3, ChunkPolicy::Clamped).unwrap();
        assert_eq!(bounds(&chunks), vec![(0, 4), (4, 8), (8, 10)]);
    }

    #[test]
    fn floor_drops_the_remainder() {
        let chunks = partition(10, 3, ChunkPolicy::Floor).unwrap();
        assert_eq!(bounds(&chunks), vec![(0, 3), (3, 6), (6, 9)]);
    }

    #[test]
    fn more_workers_than_elements() {
        let clamped = partition(3, 5, ChunkPolicy::Clamped).unwrap();
        assert_eq!(clamped.len(), 5);
        assert_eq!(clamped.iter().filter(|c| c.is_empty()).count(), 2);

        let faithful = partition(3, 5, ChunkPolicy::Faithful).unwrap();
        assert_eq!(faithful[4], Chunk::new(4, 4, 5));

        let floor = partition(3, 5, ChunkPolicy::Floor).unwrap();
        assert!(floor.iter().all(Chunk::is_empty));
    }

    #[test]
    fn zero_workers_is_rejected() {
        assert!(matches!(
            partition(10, 0, ChunkPolicy::Clamped),
            Err(MeanError::InvalidWorkerCount { .. })
        ));
    }

    #[test]
    fn empty_dataset_yields_empty_chunks() {
        let chunks = partition(0, 4, ChunkPolicy::Faithful).unwrap();
        assert!(chunks.iter().all(Chunk::is_empty));
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("Faithful".parse::<ChunkPolicy>(), Ok(ChunkPolicy::Faithful));
        assert_eq!("clamp".parse::<ChunkPolicy>(), Ok(ChunkPolicy::Clamped));
        assert!("ceil".parse::<ChunkPolicy>().is_err());
    }
}
