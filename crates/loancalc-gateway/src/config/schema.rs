use serde::Deserialize;
use loancalc_core::error::{LoanCalcError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub counter: CounterSection,

    #[serde(default)]
    pub instance: InstanceSection,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(LoanCalcError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.counter.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen
            .parse::<std::net::SocketAddr>()
            .map_err(|e| LoanCalcError::Config(format!("server.listen: {e}")))?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Which store backs the hit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterBackend {
    /// Redis `INCR`; shared by every instance pointing at the same key.
    Redis,
    /// Process-local atomic. Only correct for a single instance.
    Memory,
}

/// What the payment endpoint does when the counter store fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnCounterFailure {
    /// Fail the request with a 5xx and a JSON error body.
    Fail,
    /// Answer with `count = -1` and `degraded = true`.
    Sentinel,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterSection {
    #[serde(default = "default_backend")]
    pub backend: CounterBackend,

    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    #[serde(default = "default_key")]
    pub key: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_on_failure")]
    pub on_failure: OnCounterFailure,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            redis_url: default_redis_url(),
            key: default_key(),
            timeout_ms: default_timeout_ms(),
            on_failure: default_on_failure(),
        }
    }
}

impl CounterSection {
    pub fn validate(&self) -> Result<()> {
        if self.key.trim().is_empty() {
            return Err(LoanCalcError::Config("counter.key must not be empty".into()));
        }
        if !(10..=60000).contains(&self.timeout_ms) {
            return Err(LoanCalcError::Config(
                "counter.timeout_ms must be between 10 and 60000".into(),
            ));
        }
        if self.backend == CounterBackend::Redis
            && !(self.redis_url.starts_with("redis://")
                || self.redis_url.starts_with("rediss://")
                || self.redis_url.starts_with("redis+unix://")
                || self.redis_url.starts_with("unix://"))
        {
            return Err(LoanCalcError::Config(
                "counter.redis_url must be a redis:// (or rediss://, unix://) URL".into(),
            ));
        }
        Ok(())
    }
}

fn default_backend() -> CounterBackend {
    CounterBackend::Redis
}
fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/".into()
}
fn default_key() -> String {
    "loancalc:hits".into()
}
fn default_timeout_ms() -> u64 {
    1000
}
fn default_on_failure() -> OnCounterFailure {
    OnCounterFailure::Fail
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceSection {
    /// Used when the platform does not say which instance this is.
    #[serde(default)]
    pub id: Option<String>,
}
