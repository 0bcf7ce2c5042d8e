//! Centralized error handling for par_mean
//!
//! Every failure in the pipeline is terminal: there is no retry and no
//! partial result. The CLI maps any of these to exit status 1.

use std::fmt;

/// Main error type for par_mean operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeanError {
    /// Worker count was non-numeric or not strictly positive
    InvalidWorkerCount { input: String },

    /// Mean requested over an empty dataset
    DivisionByZero,

    /// A concurrent unit terminated without producing its partial sum
    WorkerFailure { worker: usize, reason: String },

    /// Integer arithmetic left the representable range
    Overflow { context: String },

    /// Thread pool configuration error
    ThreadPoolError(String),
}

impl fmt::Display for MeanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeanError::InvalidWorkerCount { input } if input.trim().parse::<i128>().is_err() => {
                write!(
                    f,
                    "Invalid worker count '{}': not a positive integer; number of workers must be greater than 0.",
                    input
                )
            }
            MeanError::InvalidWorkerCount { input } => write!(
                f,
                "Invalid worker count '{}': number of workers must be greater than 0.",
                input
            ),
            MeanError::DivisionByZero => {
                write!(f, "Cannot compute the mean of an empty dataset (division by zero)")
            }
            MeanError::WorkerFailure { worker, reason } => {
                write!(f, "Worker {} failed: {}", worker, reason)
            }
            MeanError::Overflow { context } => write!(f, "Arithmetic overflow: {}", context),
            MeanError::ThreadPoolError(msg) => write!(f, "Thread pool error: {}", msg),
        }
    }
}

impl std::error::Error for MeanError {}

/// Result type alias for par_mean operations
pub type Result<T> = std::result::Result<T, MeanError>;
