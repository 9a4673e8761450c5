//! Gateway config loader (strict parsing).

pub mod schema;

use std::fs;

use loancalc_core::error::{LoanCalcError, Result};

pub use schema::{
    CounterBackend, CounterSection, GatewayConfig, InstanceSection, OnCounterFailure,
    ServerSection,
};

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "LOANCALC_CONFIG";
/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "loancalc.yaml";
/// Env var that overrides `counter.redis_url`.
pub const REDIS_URL_ENV: &str = "REDIS_URL";

/// Load from `$LOANCALC_CONFIG` (or `loancalc.yaml`) and apply env overrides.
pub fn load() -> Result<GatewayConfig> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
    let mut cfg = load_from_file(&path)?;
    if let Ok(url) = std::env::var(REDIS_URL_ENV) {
        apply_redis_url_override(&mut cfg, url)?;
    }
    Ok(cfg)
}

pub fn load_from_file(path: &str) -> Result<GatewayConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| LoanCalcError::Config(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<GatewayConfig> {
    let cfg: GatewayConfig = serde_yaml::from_str(s)
        .map_err(|e| LoanCalcError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Replace the redis URL and re-validate the counter section.
pub fn apply_redis_url_override(cfg: &mut GatewayConfig, url: String) -> Result<()> {
    cfg.counter.redis_url = url;
    cfg.counter.validate()
}
