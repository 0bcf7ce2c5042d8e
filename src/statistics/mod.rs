//! Summation and parallel reduction operations
//!
//! # Organization
//!
//! - [`operations`]: per-chunk partial sums, the sequential combine, and the mean
//! - [`parallel`]: the fan-out/fan-in dispatcher

pub mod operations;
pub mod parallel;

pub use operations::{
    collect_partials, combine, mean, partial_sum, sequential_total, ParallelReduction, PartialSlot,
};
pub use parallel::{reduce, reduce_partials, reduce_partials_with};
