//! Scoped database sessions.
//!
//! `SessionFactory` is the storage layer's front door: it resolves the
//! configured driver to a connection URI, borrows the pool for that URI from
//! the registry, and opens one logical session at a time. A `DbSession` is a
//! guaranteed-release scope: writes become visible on `commit`, read-only
//! scopes end with `close`, and a session dropped any other way (an error
//! propagating out of the caller) rolls back.

use std::sync::Arc;

use anyhow::Result;
use sqlx::{Any, AnyConnection, Transaction};
use tracing::warn;

use crate::config::{Config, ConfigError};
use crate::storage::driver::{driver_for, ConnectionDriver};
use crate::storage::pool::PoolRegistry;
use crate::storage::schema;

pub struct SessionFactory {
    driver: Box<dyn ConnectionDriver>,
    pools: Arc<PoolRegistry>,
}

impl SessionFactory {
    /// Build a factory for the profile's driver over an injected registry
    pub fn new(config: &Config, pools: Arc<PoolRegistry>) -> Self {
        Self {
            driver: driver_for(config.driver),
            pools,
        }
    }

    /// Build a factory over an explicit driver implementation
    pub fn with_driver(driver: Box<dyn ConnectionDriver>, pools: Arc<PoolRegistry>) -> Self {
        Self { driver, pools }
    }

    /// Factory over a uniquely named shared in-memory SQLite database.
    ///
    /// Every call gets an isolated database; this is the seam tests use to
    /// run against real storage without touching disk.
    pub fn in_memory() -> Self {
        let uri = format!(
            "sqlite:file:memdb_{}?mode=memory&cache=shared",
            uuid::Uuid::new_v4()
        );
        Self::with_driver(
            Box::new(MemoryDriver { uri }),
            Arc::new(PoolRegistry::new()),
        )
    }

    /// Open a new session: driver → URI → pooled connection → transaction.
    pub async fn session(&self) -> Result<DbSession> {
        let uri = self.driver.connection_uri()?;
        let pool = self.pools.get_or_create(&uri).await?;
        let pool = self.driver.wrap_pool(pool);
        let tx = pool.begin().await?;
        Ok(DbSession { tx: Some(tx) })
    }

    /// One-time schema bootstrap against this factory's database
    pub async fn bootstrap(&self) -> Result<()> {
        let uri = self.driver.connection_uri()?;
        let pool = self.pools.get_or_create(&uri).await?;
        schema::ensure(&pool).await
    }
}

/// Fixed-URI driver backing `SessionFactory::in_memory`
struct MemoryDriver {
    uri: String,
}

impl ConnectionDriver for MemoryDriver {
    fn connection_uri(&self) -> Result<String, ConfigError> {
        Ok(self.uri.clone())
    }
}

/// One logical database session.
///
/// Holds a transaction for its whole lifetime. Invariant: `tx` is `Some`
/// until `commit` or `close` consumes the session.
pub struct DbSession {
    tx: Option<Transaction<'static, Any>>,
}

impl DbSession {
    /// Executor for statements inside this session
    pub fn executor(&mut self) -> &mut AnyConnection {
        self.tx
            .as_deref_mut()
            .expect("session used after commit or close")
    }

    /// Publish the session's writes and return the connection to the pool
    pub async fn commit(mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    /// End a read-only session without publishing anything
    pub async fn close(mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}

impl Drop for DbSession {
    fn drop(&mut self) {
        // An error path dropped the scope; the transaction rolls back as it
        // returns to the pool.
        if self.tx.is_some() {
            warn!("session dropped mid-scope, rolling back");
        }
    }
}
