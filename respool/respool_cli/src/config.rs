//! Settings for a demonstration run.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Settings for a demonstration run
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Number of concurrent query workers
    pub workers: usize,

    /// Idle capacity of the connection pool
    pub capacity: usize,

    /// Upper bound of the simulated query time in milliseconds
    pub max_query_ms: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            workers: 20,
            capacity: 2,
            max_query_ms: 1000,
        }
    }
}

/// Values given on the command line, which win over the file
#[derive(Debug, Default)]
pub struct Overrides {
    pub workers: Option<usize>,
    pub capacity: Option<usize>,
    pub max_query_ms: Option<u64>,
}

impl DemoConfig {
    /// Read settings from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            workers: overrides.workers.unwrap_or(self.workers),
            capacity: overrides.capacity.unwrap_or(self.capacity),
            max_query_ms: overrides.max_query_ms.unwrap_or(self.max_query_ms),
        }
    }
}
