//! par_mean: parallel fan-out/fan-in mean of a large integer range
//!
//! The mean of `1..=N` is computed by cutting the index range `[0, N)` into
//! one contiguous chunk per worker, summing every chunk on its own concurrent
//! unit, waiting for all of them, and combining the partial sums.
//!
//! ## Module Organization
//!
//! - [`partition`]: chunk bounds and the policies that derive them
//! - [`statistics`]: partial sums, the parallel fan-out/fan-in, combine and mean
//! - [`parallel`]: worker count and dispatch configuration
//! - [`runner`]: end-to-end runs with timing
//! - [`report`]: console formatting
//! - [`cli`]: command line arguments
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust
//! use par_mean::prelude::*;
//!
//! let report = run(&RunConfig::new(10).with_workers(2)).unwrap();
//! assert_eq!(report.total, 55);
//! assert_eq!(format!("{:.2}", report.mean), "5.50");
//! ```

pub mod cli;
pub mod errors;
pub mod parallel;
pub mod partition;
pub mod report;
pub mod runner;
pub mod statistics;

pub use errors::*;
pub use parallel::*;
pub use partition::*;
pub use runner::*;
pub use statistics::*;

// High-level convenience API
pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::errors::{MeanError, Result};
    pub use crate::parallel::{Dispatch, ParallelConfig};
    pub use crate::partition::{partition, Chunk, ChunkPolicy};
    pub use crate::runner::{run, RunConfig, RunReport};
    pub use crate::statistics::{reduce, ParallelReduction};
}
