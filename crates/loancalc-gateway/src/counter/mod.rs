//! Cluster-wide hit counter.
//!
//! The counter lives in an external store; every call is one atomic
//! increment-and-return on a named key. No caching, no local pre-increment:
//! uniqueness and ordering across instances come from the store alone.

mod memory;
mod redis;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use loancalc_core::error::Result;

use crate::config::{CounterBackend, CounterSection};

pub use self::memory::MemoryHitCounter;
pub use self::redis::RedisHitCounter;

/// Client for the shared hit count.
#[async_trait]
pub trait HitCounter: Send + Sync {
    /// Short backend name for logs and metrics.
    fn backend(&self) -> &'static str;

    /// Atomically advance the shared count and return the new value.
    ///
    /// Fails with `StoreUnavailable` or `Protocol`; never returns a stale or
    /// made-up count.
    async fn get_and_increment(&self) -> Result<i64>;

    /// Round trip to the store without touching the count.
    async fn ping(&self) -> Result<()>;
}

/// Build the configured counter. Connections are opened lazily on first use.
pub fn from_config(cfg: &CounterSection) -> Result<Arc<dyn HitCounter>> {
    match cfg.backend {
        CounterBackend::Redis => Ok(Arc::new(RedisHitCounter::new(
            &cfg.redis_url,
            cfg.key.clone(),
            Duration::from_millis(cfg.timeout_ms),
        )?)),
        CounterBackend::Memory => {
            tracing::warn!("memory hit counter selected; counts are not shared across instances");
            Ok(Arc::new(MemoryHitCounter::new()))
        }
    }
}
