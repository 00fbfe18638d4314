//! URI-keyed connection pool registry.
//!
//! One bounded pool exists per unique connection URI, created lazily on the
//! first session that needs it and reused for the life of the process. The
//! check-then-create step runs under a mutex so concurrent first requests
//! for the same URI cannot build two pools.

use std::collections::HashMap;
use std::sync::Once;

use anyhow::Result;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tokio::sync::Mutex;
use tracing::info;

/// Pool capacity; sqlx never opens connections beyond it
const POOL_SIZE: u32 = 5;

static INSTALL_DRIVERS: Once = Once::new();

/// Process-lifetime registry of connection pools, keyed by URI.
///
/// There is no eviction and no TTL; this is single-flight memoization by
/// key, not a cache.
#[derive(Default)]
pub struct PoolRegistry {
    pools: Mutex<HashMap<String, AnyPool>>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the pool for `uri`, connecting a new one on first request.
    pub async fn get_or_create(&self, uri: &str) -> Result<AnyPool> {
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);

        let mut pools = self.pools.lock().await;
        if let Some(pool) = pools.get(uri) {
            return Ok(pool.clone());
        }

        info!("creating connection pool for {uri}");
        let pool = AnyPoolOptions::new()
            .max_connections(POOL_SIZE)
            .connect(uri)
            .await?;
        pools.insert(uri.to_string(), pool.clone());
        Ok(pool)
    }

    /// Number of distinct pools held by the registry
    pub async fn pool_count(&self) -> usize {
        self.pools.lock().await.len()
    }
}
