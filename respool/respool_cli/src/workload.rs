//! Simulated query workers sharing one connection pool.

use crate::config::DemoConfig;
use crate::connection::{Connector, DbConnection};
use anyhow::{anyhow, Context, Result};
use log::{error, info};
use rand::Rng;
use respool_core::{ResourcePool, ResourcePoolConfig};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Outcome of a demonstration run
#[derive(Debug)]
pub struct Summary {
    /// Queries that finished without error
    pub queries: usize,

    /// Connections the pool had to open
    pub connections_created: u32,
}

/// Run `config.workers` queries in parallel and close the pool afterwards
pub fn run(config: &DemoConfig) -> Result<Summary> {
    let connector = Arc::new(Connector::default());
    let factory = Arc::clone(&connector);
    let pool = Arc::new(
        ResourcePool::with_config(
            move || factory.connect(),
            ResourcePoolConfig::with_capacity(config.capacity).named("db"),
        )
        .context("failed to create connection pool")?,
    );

    let max_query_ms = config.max_query_ms;
    let results: Vec<Result<()>> = thread::scope(|s| {
        let workers: Vec<_> = (0..config.workers)
            .map(|query| {
                let pool = &pool;
                s.spawn(move || perform_query(query, pool, max_query_ms))
            })
            .collect();

        workers
            .into_iter()
            .map(|worker| {
                worker
                    .join()
                    .unwrap_or_else(|_| Err(anyhow!("query worker panicked")))
            })
            .collect()
    });

    let mut queries = 0;
    for result in results {
        match result {
            Ok(()) => queries += 1,
            Err(e) => error!("{:#}", e),
        }
    }

    pool.close();
    info!("shut down the program");

    Ok(Summary {
        queries,
        connections_created: connector.opened(),
    })
}

fn perform_query(
    query: usize,
    pool: &Arc<ResourcePool<DbConnection>>,
    max_query_ms: u64,
) -> Result<()> {
    let conn = pool
        .checkout()
        .with_context(|| format!("query {} could not get a connection", query))?;

    let delay = if max_query_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..max_query_ms)
    };
    thread::sleep(Duration::from_millis(delay));
    info!("QID[{}] CID[{}]", query, conn.id());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_completes_every_query() {
        let config = DemoConfig {
            workers: 12,
            capacity: 2,
            max_query_ms: 5,
        };

        let summary = run(&config).unwrap();
        assert_eq!(summary.queries, 12);
        assert!(summary.connections_created >= 1);
        assert!(summary.connections_created <= 12);
    }

    #[test]
    fn test_run_rejects_zero_capacity() {
        let config = DemoConfig {
            capacity: 0,
            ..DemoConfig::default()
        };

        let err = run(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("capacity must be at least 1"));
    }
}
