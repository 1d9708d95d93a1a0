//! Store handle and transaction scoping.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{Connection, Transaction};

use crate::config::{DatabaseConfig, DatabaseLocation};
use crate::store::error::StoreError;
use crate::store::schema;

/// Handle to the relational store.
///
/// Cheap to clone; every clone shares the same connection. Opened once at
/// startup, handed to the router as state, and closed after the server drains.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
    location: Arc<DatabaseLocation>,
}

impl Store {
    /// Open (or create) the database and ensure the schema exists.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let location = config.location();
        let conn = match &location {
            DatabaseLocation::Memory => Connection::open_in_memory(),
            DatabaseLocation::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                Connection::open(path)
            }
        }
        .map_err(|source| StoreError::Open {
            location: location.to_string(),
            source,
        })?;

        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        schema::init(&conn)?;

        tracing::info!(database = %location, "Store opened");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            location: Arc::new(location),
        })
    }

    /// Fresh in-memory store.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::open(&DatabaseConfig::in_memory())
    }

    pub fn location(&self) -> &DatabaseLocation {
        &self.location
    }

    /// Run a read-only closure against the connection.
    pub async fn read<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = lock(&conn);
            f(&*guard)
        })
        .await?
    }

    /// Run a closure inside a transaction.
    ///
    /// Commits when the closure returns `Ok`. On `Err` every change made in
    /// the scope is rolled back before the error is returned.
    pub async fn write<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T, StoreError> {
            let mut guard = lock(&conn);
            let tx = guard.transaction()?;
            match f(&tx) {
                Ok(value) => {
                    tx.commit()?;
                    Ok(value)
                }
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback() {
                        tracing::error!(error = %rollback_err, "Rollback failed");
                    }
                    Err(err)
                }
            }
        })
        .await?
    }

    /// Round-trip to the database, for health checks.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.read(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
            Ok(())
        })
        .await
    }

    /// Close the connection.
    ///
    /// If other clones are still alive the connection stays open until the
    /// last one drops.
    pub fn close(self) -> Result<(), StoreError> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner());
                conn.close().map_err(|(_, err)| StoreError::Database(err))?;
                tracing::info!(database = %self.location, "Store closed");
            }
            Err(_) => {
                tracing::warn!(
                    database = %self.location,
                    "Store still shared at close; connection released with the last handle"
                );
            }
        }
        Ok(())
    }
}

/// A panic inside a closure poisons the mutex, but the connection itself is
/// still usable: any open transaction was rolled back when it dropped.
fn lock(conn: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
