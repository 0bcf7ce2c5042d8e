//! Console output for a run
//!
//! Formatting is kept separate from printing so the exact lines can be tested.

use crate::parallel::Dispatch;
use crate::runner::{RunConfig, RunReport};
use chrono::Local;

/// Lines printed before the computation starts
pub fn format_summary(dispatch: Dispatch, workers: usize) -> String {
    format!(
        "Operation Type: CPU Bound Simulation with {}\nWorker Count: {}\n...",
        dispatch.label(),
        workers
    )
}

/// Lines printed once the mean is known
pub fn format_result(report: &RunReport) -> String {
    format!(
        "Mean: {:.2}\nElapsed Time: {:.2} seconds",
        report.mean,
        report.elapsed.as_secs_f64()
    )
}

/// Verbose header describing the run configuration
pub fn format_run_header(config: &RunConfig, workers: usize) -> String {
    format!(
        "🔬 Run started {}\n   Dataset size: {}\n   Workers: {}\n   Chunk policy: {}\n   Dispatch: {}",
        Local::now().to_rfc3339(),
        config.dataset_size,
        workers,
        config.policy,
        config.parallel.dispatch
    )
}

/// Per-worker partial sums, one line each
pub fn format_partials(report: &RunReport) -> String {
    report
        .partials
        .iter()
        .enumerate()
        .map(|(worker, sum)| format!("   worker {worker}: {sum}"))
        .collect::<Vec<_>>()
        .join("\n")
}
