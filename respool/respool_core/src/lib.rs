#![deny(warnings)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # respool_core
//!
//! A bounded pool of reusable, closable resources shared across threads.
//!
//! Constructing a resource such as a database connection is often expensive.
//! A [`ResourcePool`] keeps up to `capacity` idle resources around so they can
//! be handed out again instead of being rebuilt:
//!
//! - [`ResourcePool::acquire`] pops an idle resource, or builds a fresh one
//!   with the pool's factory when none is idle. It never waits.
//! - [`ResourcePool::release`] puts a resource back, closing it when the idle
//!   buffer is full or the pool has been closed.
//! - [`ResourcePool::close`] shuts the pool down and closes everything idle.
//!
//! Capacity bounds the idle buffer only. Any number of resources may be
//! checked out at once.
//!
//! ```
//! use respool_core::{Closeable, ResourcePool};
//! use std::convert::Infallible;
//!
//! struct Conn(u32);
//!
//! impl Closeable for Conn {
//!     type Error = Infallible;
//!
//!     fn close(self) -> Result<(), Infallible> {
//!         Ok(())
//!     }
//! }
//!
//! let pool = ResourcePool::new(|| Ok(Conn(1)), 2).unwrap();
//! let conn = pool.acquire().unwrap();
//! pool.release(conn);
//! assert_eq!(pool.idle_count(), 1);
//! pool.close();
//! ```

/// The capability a pooled resource must provide
pub mod closeable;

/// Error types for pool operations
pub mod error;

/// The resource pool and its configuration
pub mod pool;

// Re-export key types for easier access
pub use closeable::Closeable;
pub use error::{FactoryError, ResourcePoolError, Result};
pub use pool::{ResourceHandle, ResourcePool, ResourcePoolConfig};
