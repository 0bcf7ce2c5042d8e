//! Entry point for the par_mean application.
//! Handles CLI parsing, prints the run summary, and dispatches the parallel mean.

use clap::error::ErrorKind;
use clap::Parser;
use par_mean::cli::Args;
use par_mean::parallel::get_parallel_info;
use par_mean::report::{format_partials, format_result, format_run_header, format_summary};
use par_mean::runner::run;
use std::process::ExitCode;

fn init_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                return ExitCode::FAILURE;
            }
        },
    };

    init_logging(args.verbose);

    let config = args.run_config();
    let workers = match config.parallel.resolve_workers() {
        Ok(workers) => workers,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.verbose > 0 {
        println!("{}", format_run_header(&config, workers));
        get_parallel_info().print_info();
    }
    println!("{}", format_summary(config.parallel.dispatch, workers));

    match run(&config) {
        Ok(report) => {
            if args.verbose > 1 {
                println!("{}", format_partials(&report));
            }
            println!("{}", format_result(&report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
