//! Pool configuration.

use crate::error::{ResourcePoolError, Result};
use serde::{Deserialize, Serialize};

/// Default label used in log records
pub const DEFAULT_POOL_NAME: &str = "resource-pool";

/// Configuration for a resource pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePoolConfig {
    /// Maximum number of idle resources kept for reuse
    pub capacity: usize,

    /// Name of the pool, used in log records
    pub name: String,
}

impl Default for ResourcePoolConfig {
    fn default() -> Self {
        Self {
            capacity: 2,
            name: DEFAULT_POOL_NAME.to_string(),
        }
    }
}

impl ResourcePoolConfig {
    /// Create a configuration with the given capacity and the default name
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Set the name used in log records
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Check that a pool can be built from this configuration
    pub fn validate(&self) -> Result<()> {
        if self.capacity < 1 {
            return Err(ResourcePoolError::InvalidConfiguration(format!(
                "capacity must be at least 1, got {}",
                self.capacity
            )));
        }
        Ok(())
    }
}
