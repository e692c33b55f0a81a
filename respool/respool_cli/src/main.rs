use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

mod config;
mod connection;
mod workload;

use config::{DemoConfig, Overrides};

/// respool demonstration
///
/// Runs a batch of simulated queries on worker threads that share a small
/// pool of fake database connections.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Number of concurrent query workers
    #[arg(long)]
    workers: Option<usize>,

    /// Number of idle connections the pool keeps
    #[arg(long)]
    capacity: Option<usize>,

    /// Upper bound of the simulated query time, in milliseconds
    #[arg(long)]
    max_query_ms: Option<u64>,

    /// TOML file with `workers`, `capacity` and `max_query_ms` keys
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let base = match &cli.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    let config = base.with_overrides(Overrides {
        workers: cli.workers,
        capacity: cli.capacity,
        max_query_ms: cli.max_query_ms,
    });

    let summary = workload::run(&config)?;
    println!(
        "completed {} queries using {} connections",
        summary.queries, summary.connections_created
    );

    Ok(())
}
