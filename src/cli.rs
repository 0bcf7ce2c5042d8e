//! Defines command-line interface options using `clap` for the par_mean tool.

use crate::errors::MeanError;
use crate::parallel::{Dispatch, ParallelConfig};
use crate::partition::ChunkPolicy;
use crate::runner::{RunConfig, DEFAULT_DATASET_SIZE};
use clap::Parser;

/// Mean of 1..=N computed by summing contiguous chunks in parallel
#[derive(Parser, Debug)]
#[command(
    version,
    name = "par_mean",
    about = "CPU bound fan-out/fan-in mean of a large integer range",
    allow_negative_numbers = true
)]
pub struct Args {
    /// Number of workers. Defaults to the number of logical CPU cores.
    #[arg(value_name = "WORKERS", value_parser = parse_worker_count)]
    pub workers: Option<usize>,

    /// Number of elements in the range being averaged
    #[arg(long, default_value_t = DEFAULT_DATASET_SIZE)]
    pub dataset_size: u64,

    /// How chunk bounds are derived: faithful, clamped or floor
    #[arg(long, default_value_t = ChunkPolicy::Clamped)]
    pub chunk_policy: ChunkPolicy,

    /// Concurrency primitive hosting each chunk: threads or rayon
    #[arg(long, default_value_t = Dispatch::Threads)]
    pub dispatch: Dispatch,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Translate parsed arguments into a run configuration
    pub fn run_config(&self) -> RunConfig {
        RunConfig {
            dataset_size: self.dataset_size,
            parallel: ParallelConfig::new(self.workers, self.dispatch),
            policy: self.chunk_policy,
        }
    }
}

/// Accept only strictly positive integers
pub fn parse_worker_count(s: &str) -> Result<usize, String> {
    let invalid = || {
        MeanError::InvalidWorkerCount {
            input: s.to_string(),
        }
        .to_string()
    };

    let n: i128 = s.trim().parse().map_err(|_| invalid())?;
    if n <= 0 {
        return Err(invalid());
    }
    usize::try_from(n).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worker_count_parsing() {
        assert_eq!(parse_worker_count("8"), Ok(8));
        assert_eq!(parse_worker_count(" 3 "), Ok(3));
        assert!(parse_worker_count("0").is_err());
        assert!(parse_worker_count("-3").is_err());
        assert!(parse_worker_count("four").is_err());
        assert!(parse_worker_count("").is_err());
    }

    #[test]
    fn defaults_when_no_arguments() {
        let args = Args::try_parse_from(["par_mean"]).unwrap();
        assert_eq!(args.workers, None);
        assert_eq!(args.dataset_size, DEFAULT_DATASET_SIZE);
        assert_eq!(args.chunk_policy, ChunkPolicy::Clamped);
        assert_eq!(args.dispatch, Dispatch::Threads);
    }

    #[test]
    fn negative_worker_count_reaches_the_validator() {
        let err = Args::try_parse_from(["par_mean", "-3"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert!(err.to_string().contains("greater than 0"));
    }

    #[test]
    fn full_flag_set() {
        let args = Args::try_parse_from([
            "par_mean",
            "4",
            "--dataset-size",
            "10",
            "--chunk-policy",
            "faithful",
            "--dispatch",
            "rayon",
            "-vv",
        ])
        .unwrap();
        let config = args.run_config();
        assert_eq!(config.parallel.num_workers, Some(4));
        assert_eq!(config.dataset_size, 10);
        assert_eq!(config.policy, ChunkPolicy::Faithful);
        assert_eq!(config.parallel.dispatch, Dispatch::Rayon);
        assert_eq!(args.verbose, 2);
    }
}
