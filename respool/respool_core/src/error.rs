//! Error types for the resource pool.
//!
//! Construction and acquisition failures are returned to the caller. Failures
//! while closing a resource are never returned: `release` and `close` are
//! best-effort cleanup, so those failures are logged and the pool moves on.

use thiserror::Error;

/// Error produced by a resource factory.
///
/// Factories box whatever error their construction step produces; the pool
/// hands it back unchanged inside [`ResourcePoolError::CreationFailed`].
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for pool operations.
pub type Result<T> = std::result::Result<T, ResourcePoolError>;

/// Error returned by pool construction and acquisition
#[derive(Error, Debug)]
pub enum ResourcePoolError {
    /// The pool was configured with values it cannot run with
    #[error("invalid pool configuration: {0}")]
    InvalidConfiguration(String),

    /// The pool has been closed
    #[error("resource pool has been closed")]
    PoolClosed,

    /// The factory failed to produce a resource
    #[error("failed to create resource: {0}")]
    CreationFailed(#[source] FactoryError),
}

impl ResourcePoolError {
    /// Returns the factory's own error when this is a creation failure.
    pub fn factory_error(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::CreationFailed(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
