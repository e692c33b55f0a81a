//! Fake database connections handed out by the demonstration pool.

use log::info;
use respool_core::{Closeable, FactoryError};
use std::convert::Infallible;
use std::sync::atomic::{AtomicU32, Ordering};

#[derive(Debug)]
pub struct DbConnection {
    id: u32,
}

impl DbConnection {
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl Closeable for DbConnection {
    type Error = Infallible;

    fn close(self) -> Result<(), Infallible> {
        info!("close db connection: {}", self.id);
        Ok(())
    }
}

/// Opens connections with ids counting up from 1
#[derive(Debug, Default)]
pub struct Connector {
    opened: AtomicU32,
}

impl Connector {
    pub fn connect(&self) -> Result<DbConnection, FactoryError> {
        let id = self.opened.fetch_add(1, Ordering::SeqCst) + 1;
        info!("create db connection: {}", id);
        Ok(DbConnection { id })
    }

    /// Number of connections opened so far
    pub fn opened(&self) -> u32 {
        self.opened.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_start_at_one() {
        let connector = Connector::default();
        assert_eq!(connector.connect().unwrap().id(), 1);
        assert_eq!(connector.connect().unwrap().id(), 2);
        assert_eq!(connector.opened(), 2);
    }
}
