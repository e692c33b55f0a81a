//! Resource pooling and reuse of expensive resources.
//!
//! - [`ResourcePool`] keeps a bounded buffer of idle resources in front of a factory
//! - [`ResourceHandle`] is an RAII checkout that releases back into its pool on drop
//! - [`ResourcePoolConfig`] holds the settings a pool is built from

/// Pool configuration
pub mod config;

/// The pool and its RAII handle
pub mod resource;

pub use config::{ResourcePoolConfig, DEFAULT_POOL_NAME};
pub use resource::{ResourceHandle, ResourcePool};
