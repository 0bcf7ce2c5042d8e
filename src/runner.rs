//! End-to-end run: partition, reduce, derive the mean, and time it

use crate::errors::Result;
use crate::parallel::{Dispatch, ParallelConfig};
use crate::partition::{partition, ChunkPolicy};
use crate::statistics::{self, combine, reduce_partials};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Dataset size used by the command line tool unless overridden
pub const DEFAULT_DATASET_SIZE: u64 = 1_000_000_000;

/// Everything a single run needs
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dataset_size: u64,
    pub parallel: ParallelConfig,
    pub policy: ChunkPolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dataset_size: DEFAULT_DATASET_SIZE,
            parallel: ParallelConfig::default(),
            policy: ChunkPolicy::default(),
        }
    }
}

impl RunConfig {
    pub fn new(dataset_size: u64) -> Self {
        Self {
            dataset_size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.parallel.num_workers = Some(workers);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ChunkPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.parallel.dispatch = dispatch;
        self
    }
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub dataset_size: u64,
    pub workers: usize,
    pub policy: ChunkPolicy,
    pub dispatch: Dispatch,
    pub partials: Vec<u64>,
    pub total: u64,
    pub mean: f64,
    pub elapsed: Duration,
}

/// Partition the dataset, fan out one unit per chunk, and combine
///
/// # Errors
///
/// Propagates partitioning, worker, overflow and division-by-zero failures.
/// Nothing is returned for a run where any unit failed.
pub fn run(config: &RunConfig) -> Result<RunReport> {
    let started = Instant::now();
    let workers = config.parallel.resolve_workers()?;
    let dispatch = config.parallel.dispatch;

    let chunks = partition(config.dataset_size, workers, config.policy)?;
    debug!(
        dataset_size = config.dataset_size,
        workers,
        policy = %config.policy,
        "partitioned dataset"
    );

    let partials = reduce_partials(&chunks, dispatch)?;
    let total = combine(&partials)?;
    let mean = statistics::mean(total, config.dataset_size)?;
    let elapsed = started.elapsed();

    info!(total, mean, elapsed_secs = elapsed.as_secs_f64(), "run complete");

    Ok(RunReport {
        dataset_size: config.dataset_size,
        workers,
        policy: config.policy,
        dispatch,
        partials,
        total,
        mean,
        elapsed,
    })
}
