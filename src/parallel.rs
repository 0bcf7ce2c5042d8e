//! Parallel processing configuration and management
//!
//! This module decides how many concurrent units a run uses and which
//! concurrency primitive hosts them.

use crate::errors::{MeanError, Result};
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::fmt;
use std::str::FromStr;

/// Concurrency primitive hosting the per-chunk units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dispatch {
    /// One scoped OS thread per chunk
    #[default]
    Threads,
    /// One task per chunk on a dedicated Rayon pool of at most one thread per core
    Rayon,
}

impl Dispatch {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Threads => "threads",
            Self::Rayon => "rayon",
        }
    }

    /// Human readable label used in the run summary
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Threads => "Scoped Threads",
            Self::Rayon => "Rayon Thread Pool",
        }
    }
}

impl fmt::Display for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dispatch {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "threads" | "thread" => Ok(Self::Threads),
            "rayon" => Ok(Self::Rayon),
            other => Err(format!(
                "Unknown dispatch mode '{other}'. Expected one of: threads, rayon"
            )),
        }
    }
}

/// Configuration for parallel processing
#[derive(Debug, Clone, Default)]
pub struct ParallelConfig {
    /// Worker count; `None` means one per available CPU core
    pub num_workers: Option<usize>,
    pub dispatch: Dispatch,
}

impl ParallelConfig {
    /// Create a new parallel configuration
    pub fn new(num_workers: Option<usize>, dispatch: Dispatch) -> Self {
        Self {
            num_workers,
            dispatch,
        }
    }

    /// Create a configuration that uses all available CPU cores
    pub fn all_cores() -> Self {
        Self {
            num_workers: Some(num_cpus::get()),
            dispatch: Dispatch::default(),
        }
    }

    /// Create a configuration that uses a specific number of workers
    pub fn with_workers(num_workers: usize) -> Self {
        Self {
            num_workers: Some(num_workers),
            dispatch: Dispatch::default(),
        }
    }

    #[must_use]
    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// Resolve the effective worker count
    ///
    /// # Errors
    ///
    /// Returns [`MeanError::InvalidWorkerCount`] for an explicit count of zero.
    pub fn resolve_workers(&self) -> Result<usize> {
        match self.num_workers {
            Some(0) => Err(MeanError::InvalidWorkerCount {
                input: "0".to_string(),
            }),
            Some(n) => Ok(n),
            None => Ok(num_cpus::get().max(1)),
        }
    }
}

/// Build a dedicated pool with exactly `num_threads` workers.
/// The global pool can only be sized once per process.
pub(crate) fn build_pool(num_threads: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(num_threads.max(1))
        .thread_name(|i| format!("par-mean-{i}"))
        .build()
        .map_err(|e| pool_error(num_threads, &e))
}

fn pool_error(num_threads: usize, err: &ThreadPoolBuildError) -> MeanError {
    MeanError::ThreadPoolError(format!(
        "Failed to initialize thread pool with {} threads: {}",
        num_threads, err
    ))
}

/// Get information about the current parallel configuration
pub fn get_parallel_info() -> ParallelInfo {
    ParallelInfo {
        current_threads: rayon::current_num_threads(),
        available_cores: num_cpus::get(),
        physical_cores: num_cpus::get_physical(),
        available_parallelism: std::thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    }
}

/// Information about the parallel processing environment
#[derive(Debug, Clone)]
pub struct ParallelInfo {
    pub current_threads: usize,
    pub available_cores: usize,
    pub physical_cores: usize,
    pub available_parallelism: usize,
}

impl ParallelInfo {
    /// Print parallel processing information
    pub fn print_info(&self) {
        println!("📊 Parallel Processing Information:");
        println!("   Rayon global threads: {}", self.current_threads);
        println!("   Logical CPU cores: {}", self.available_cores);
        println!("   Physical CPU cores: {}", self.physical_cores);
        println!("   Available parallelism: {}", self.available_parallelism);
    }
}
