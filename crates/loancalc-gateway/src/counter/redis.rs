//! Redis-backed hit counter (`INCR`).
//!
//! - One multiplexed `ConnectionManager`, opened on first use and shared by
//!   clone. Replies are paired with requests in pipeline order, so concurrent
//!   increments never read each other's answers.
//! - The first connection is tried once; a refused or unreachable store
//!   fails immediately instead of waiting out the reconnect backoff.
//! - Each call is bounded by `timeout`; an elapsed call is dropped, not
//!   retried. An `INCR` the store already applied stays applied (gap, never
//!   a duplicate).

use std::time::Duration;

use ::redis::aio::ConnectionManager;
use ::redis::{Client, ErrorKind, RedisError};
use async_trait::async_trait;
use tokio::sync::OnceCell;

use loancalc_core::error::{LoanCalcError, Result};

use super::HitCounter;

pub struct RedisHitCounter {
    client: Client,
    conn: OnceCell<ConnectionManager>,
    key: String,
    timeout: Duration,
}

impl RedisHitCounter {
    pub fn new(url: &str, key: String, timeout: Duration) -> Result<Self> {
        let client = Client::open(url)
            .map_err(|e| LoanCalcError::Config(format!("counter.redis_url: {e}")))?;
        Ok(Self {
            client,
            conn: OnceCell::new(),
            key,
            timeout,
        })
    }

    /// Handle to the shared connection; dropped by the caller on every path.
    async fn connection(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                tracing::debug!(key = %self.key, "opening counter store connection");
                // ConnectionManager::new retries with backoff; a single plain
                // connect first lets a refused store fail fast as refused.
                drop(
                    self.client
                        .get_multiplexed_tokio_connection()
                        .await
                        .map_err(classify)?,
                );
                ConnectionManager::new(self.client.clone())
                    .await
                    .map_err(classify)
            })
            .await?;
        Ok(conn.clone())
    }

    async fn incr(&self) -> Result<i64> {
        let mut conn = self.connection().await?;
        let n: i64 = ::redis::cmd("INCR")
            .arg(&self.key)
            .query_async(&mut conn)
            .await
            .map_err(classify)?;

        // INCR on a healthy key never yields < 1.
        if n < 1 {
            return Err(LoanCalcError::Protocol(format!(
                "counter key {} returned non-positive value {n}",
                self.key
            )));
        }
        Ok(n)
    }

    async fn ping_inner(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let pong: String = ::redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(classify)?;
        if pong != "PONG" {
            return Err(LoanCalcError::Protocol(format!("unexpected PING reply: {pong}")));
        }
        Ok(())
    }

    async fn bounded<T>(
        &self,
        op: &'static str,
        fut: impl std::future::Future<Output = Result<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(res) => res,
            Err(_) => Err(LoanCalcError::StoreUnavailable(format!(
                "{op} timed out after {}ms",
                self.timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl HitCounter for RedisHitCounter {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn get_and_increment(&self) -> Result<i64> {
        self.bounded("INCR", self.incr()).await
    }

    async fn ping(&self) -> Result<()> {
        self.bounded("PING", self.ping_inner()).await
    }
}

/// Split redis failures into "store not reachable" and "store answered wrong".
fn classify(e: RedisError) -> LoanCalcError {
    if e.is_timeout() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_io_error() {
        return LoanCalcError::StoreUnavailable(e.to_string());
    }
    match e.kind() {
        ErrorKind::AuthenticationFailed
        | ErrorKind::BusyLoadingError
        | ErrorKind::TryAgain
        | ErrorKind::ClusterDown
        | ErrorKind::MasterDown
        | ErrorKind::ReadOnly => LoanCalcError::StoreUnavailable(e.to_string()),
        _ => LoanCalcError::Protocol(e.to_string()),
    }
}
