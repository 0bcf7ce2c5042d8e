//! Simple benchmark comparing worker counts and dispatch modes.
//!
//! Run with: cargo run --release --example benchmark

use par_mean::prelude::*;
use par_mean::statistics::sequential_total;
use std::time::Instant;

fn main() -> Result<()> {
    println!("🔬 par_mean Parallel Processing Benchmark");
    println!("==========================================\n");

    let cores = num_cpus::get();
    println!("System has {} logical CPU cores available\n", cores);

    let data_sizes = vec![10_000_000_u64, 100_000_000];
    let mut worker_counts = vec![1, 2, 4, cores];
    worker_counts.sort_unstable();
    worker_counts.dedup();

    for data_size in data_sizes {
        println!("📊 Testing with {} data points:", data_size);
        println!("-------------------------------------------");

        let chunks = partition(data_size, 1, ChunkPolicy::Clamped)?;
        let start = Instant::now();
        let expected = sequential_total(&chunks)?;
        let seq_time = start.elapsed().as_secs_f64();
        println!("🐌 Sequential: {:.3} seconds", seq_time);

        for &workers in &worker_counts {
            for dispatch in [Dispatch::Threads, Dispatch::Rayon] {
                let config = RunConfig::new(data_size)
                    .with_workers(workers)
                    .with_dispatch(dispatch);
                let report = run(&config)?;
                assert_eq!(report.total, expected);

                let par_time = report.elapsed.as_secs_f64();
                println!(
                    "⚡ {:>3} workers, {:<8} {:.3} seconds ({:.2}x)",
                    workers,
                    dispatch.as_str(),
                    par_time,
                    seq_time / par_time
                );
            }
        }
        println!("=========================================\n");
    }

    Ok(())
}
