//! Pooling for reusable resources like connections.
//!
//! Idle resources sit in a bounded channel. Acquiring pops one without
//! waiting, or falls through to the pool's factory when none is idle.
//! Releasing pushes one back without waiting, or closes it when the buffer is
//! full. A reader/writer guard around the `closed` flag keeps `close` from
//! draining the buffer while a release is in the middle of filling it.

use crate::closeable::Closeable;
use crate::error::{FactoryError, ResourcePoolError, Result};
use crate::pool::config::ResourcePoolConfig;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, info, trace, warn};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

type Factory<R> = Box<dyn Fn() -> std::result::Result<R, FactoryError> + Send + Sync>;

/// A pool of reusable resources
///
/// `capacity` bounds how many idle resources are kept, not how many may be
/// checked out: when the buffer is empty the factory is called again.
pub struct ResourcePool<R: Closeable> {
    /// Producer side of the idle buffer
    idle_tx: Sender<R>,

    /// Consumer side of the idle buffer
    idle_rx: Receiver<R>,

    /// Builds a new resource when none is idle
    factory: Factory<R>,

    /// Whether this pool is closed. Taken shared by acquire/release and
    /// exclusively by close.
    closed: RwLock<bool>,

    /// Held by `close` from draining until the last idle resource is closed,
    /// so a later `close` returns only once shutdown has finished.
    closing: Mutex<()>,

    /// Maximum number of idle resources
    capacity: usize,

    /// Name used in log records
    name: String,
}

impl<R: Closeable> ResourcePool<R> {
    /// Create a pool keeping at most `capacity` idle resources.
    ///
    /// The factory is not called until the first acquire finds the buffer
    /// empty.
    ///
    /// # Errors
    ///
    /// [`ResourcePoolError::InvalidConfiguration`] if `capacity` is zero.
    pub fn new<F>(factory: F, capacity: usize) -> Result<Self>
    where
        F: Fn() -> std::result::Result<R, FactoryError> + Send + Sync + 'static,
    {
        Self::with_config(factory, ResourcePoolConfig::with_capacity(capacity))
    }

    /// Create a pool from a configuration
    pub fn with_config<F>(factory: F, config: ResourcePoolConfig) -> Result<Self>
    where
        F: Fn() -> std::result::Result<R, FactoryError> + Send + Sync + 'static,
    {
        config.validate()?;

        let (idle_tx, idle_rx) = bounded(config.capacity);
        debug!(
            "Created resource pool {} with capacity {}",
            config.name, config.capacity
        );

        Ok(Self {
            idle_tx,
            idle_rx,
            factory: Box::new(factory),
            closed: RwLock::new(false),
            closing: Mutex::new(()),
            capacity: config.capacity,
            name: config.name,
        })
    }

    /// Take an idle resource, or build a new one if none is idle.
    ///
    /// Never waits for another caller to release. The factory runs outside
    /// the guard, so a resource built while the pool is being closed is
    /// still returned; it gets closed when it is released.
    ///
    /// # Errors
    ///
    /// - [`ResourcePoolError::PoolClosed`] if the pool has been closed
    /// - [`ResourcePoolError::CreationFailed`] carrying the factory's error
    pub fn acquire(&self) -> Result<R> {
        {
            let closed = self.closed.read();
            if *closed {
                trace!("{}: acquire on closed pool", self.name);
                return Err(ResourcePoolError::PoolClosed);
            }

            if let Ok(resource) = self.idle_rx.try_recv() {
                trace!("{}: reusing idle resource", self.name);
                return Ok(resource);
            }
        }

        trace!("{}: no idle resource, creating a new one", self.name);
        (self.factory)().map_err(|e| {
            debug!("{}: failed to create resource: {}", self.name, e);
            ResourcePoolError::CreationFailed(e)
        })
    }

    /// Acquire a resource wrapped in a handle that releases it on drop
    pub fn checkout(self: &Arc<Self>) -> Result<ResourceHandle<R>> {
        let resource = self.acquire()?;
        Ok(ResourceHandle::new(resource, self))
    }

    /// Return a resource to the pool.
    ///
    /// The resource is buffered when the pool is open and has a free idle
    /// slot. Otherwise it is closed. Close failures are logged, not returned.
    /// A resource must not be used or released again afterwards.
    pub fn release(&self, resource: R) {
        let rejected = {
            let closed = self.closed.read();
            if *closed {
                Some((resource, "pool is closed"))
            } else {
                match self.idle_tx.try_send(resource) {
                    Ok(()) => {
                        debug!("{}: resource returned to idle buffer", self.name);
                        None
                    }
                    Err(TrySendError::Full(resource)) => Some((resource, "idle buffer is full")),
                    Err(TrySendError::Disconnected(resource)) => {
                        Some((resource, "idle buffer is gone"))
                    }
                }
            }
        };

        if let Some((resource, reason)) = rejected {
            info!("{}: closing released resource ({})", self.name, reason);
            self.close_resource(resource);
        }
    }

    /// Close the pool and every idle resource.
    ///
    /// Only the first call has any effect. Each idle resource is closed once;
    /// a failure is logged and does not stop the rest from being closed.
    /// A call racing with the first one waits until every drained resource
    /// has been closed before returning.
    pub fn close(&self) {
        let _closing = self.closing.lock();
        let drained: Vec<R> = {
            let mut closed = self.closed.write();
            if *closed {
                trace!("{}: already closed", self.name);
                return;
            }
            *closed = true;
            self.idle_rx.try_iter().collect()
        };

        info!(
            "Closing resource pool {} ({} idle resources)",
            self.name,
            drained.len()
        );

        let total = drained.len();
        let mut failed = 0;
        for resource in drained {
            if !self.close_resource(resource) {
                failed += 1;
            }
        }

        if failed > 0 {
            warn!(
                "{}: {} of {} idle resources failed to close",
                self.name, failed, total
            );
        }
        debug!("Resource pool {} closed", self.name);
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        *self.closed.read()
    }

    /// Maximum number of idle resources
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of resources currently idle
    pub fn idle_count(&self) -> usize {
        self.idle_rx.len()
    }

    /// Name used in log records
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Close a resource, logging failure. Returns whether it closed cleanly.
    fn close_resource(&self, resource: R) -> bool {
        match resource.close() {
            Ok(()) => true,
            Err(e) => {
                warn!("{}: failed to close resource: {}", self.name, e);
                false
            }
        }
    }
}

impl<R: Closeable> Drop for ResourcePool<R> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<R: Closeable> fmt::Debug for ResourcePool<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourcePool")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("idle", &self.idle_count())
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// A handle to a resource checked out of a pool
///
/// Dropping the handle releases the resource back into the pool. If the pool
/// no longer exists the resource is closed instead.
pub struct ResourceHandle<R: Closeable> {
    /// The resource itself
    resource: Option<R>,

    /// Reference to the pool this resource belongs to
    pool: Weak<ResourcePool<R>>,

    /// When this resource was checked out
    acquired_at: Instant,
}

impl<R: Closeable> ResourceHandle<R> {
    fn new(resource: R, pool: &Arc<ResourcePool<R>>) -> Self {
        Self {
            resource: Some(resource),
            pool: Arc::downgrade(pool),
            acquired_at: Instant::now(),
        }
    }

    /// Release the resource back to the pool now
    pub fn release(mut self) {
        self.give_back();
    }

    /// Take the resource out of the handle without releasing it
    pub fn detach(mut self) -> R {
        self.resource.take().expect("Resource missing")
    }

    /// Get the time since this resource was checked out
    pub fn held_duration(&self) -> Duration {
        self.acquired_at.elapsed()
    }

    fn give_back(&mut self) {
        let Some(resource) = self.resource.take() else {
            return;
        };

        match self.pool.upgrade() {
            Some(pool) => pool.release(resource),
            None => {
                // Pool no longer exists, close the resource
                if let Err(e) = resource.close() {
                    warn!("Failed to close resource after its pool was dropped: {}", e);
                }
            }
        }
    }
}

impl<R: Closeable> Deref for ResourceHandle<R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.resource.as_ref().expect("Resource missing")
    }
}

impl<R: Closeable> DerefMut for ResourceHandle<R> {
    fn deref_mut(&mut self) -> &mut R {
        self.resource.as_mut().expect("Resource missing")
    }
}

impl<R: Closeable> Drop for ResourceHandle<R> {
    fn drop(&mut self) {
        self.give_back();
    }
}

impl<R: Closeable + fmt::Debug> fmt::Debug for ResourceHandle<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(resource) = &self.resource {
            write!(f, "ResourceHandle({:?})", resource)
        } else {
            write!(f, "ResourceHandle(released)")
        }
    }
}
