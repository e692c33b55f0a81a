//! Shared fixtures for the pool integration tests.

#![allow(dead_code)]

use parking_lot::Mutex;
use respool_core::{Closeable, ResourcePool};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::Arc;

/// Tracks every connection a test pool builds and closes.
#[derive(Debug, Default)]
pub struct Tracker {
    next_id: AtomicU32,
    created: AtomicUsize,
    closed: Mutex<Vec<u32>>,
}

impl Tracker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Build a connection with the next id, starting at 1
    pub fn connect(self: &Arc<Self>) -> FakeConnection {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.created.fetch_add(1, Ordering::SeqCst);
        FakeConnection {
            id,
            tracker: Arc::clone(self),
        }
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn closed_ids(&self) -> Vec<u32> {
        let mut ids = self.closed.lock().clone();
        ids.sort_unstable();
        ids
    }

    pub fn close_count(&self) -> usize {
        self.closed.lock().len()
    }

    /// Panics if any connection was closed more than once
    pub fn assert_no_double_close(&self) {
        let closed = self.closed.lock();
        let unique: HashSet<_> = closed.iter().collect();
        assert_eq!(unique.len(), closed.len(), "double close in {:?}", closed);
    }
}

#[derive(Debug)]
pub struct FakeConnection {
    pub id: u32,
    tracker: Arc<Tracker>,
}

impl Closeable for FakeConnection {
    type Error = String;

    fn close(self) -> Result<(), String> {
        self.tracker.closed.lock().push(self.id);
        Ok(())
    }
}

/// A pool whose factory hands out connections from `tracker`
pub fn tracked_pool(capacity: usize, tracker: &Arc<Tracker>) -> ResourcePool<FakeConnection> {
    let tracker = Arc::clone(tracker);
    ResourcePool::new(move || Ok(tracker.connect()), capacity).unwrap()
}
