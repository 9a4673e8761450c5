//! Shared application state for the loancalc gateway.
//!
//! Built once at startup and cloned into every handler. The hit counter
//! client and the instance id are injected here; handlers never reach for
//! globals or platform metadata at request time.

use std::sync::Arc;

use loancalc_core::error::Result;

use crate::config::{GatewayConfig, OnCounterFailure};
use crate::context;
use crate::counter::{self, HitCounter};
use crate::obs::GatewayMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    counter: Arc<dyn HitCounter>,
    instance: String,
    metrics: GatewayMetrics,
}

impl AppState {
    /// Assemble state from already-built parts.
    pub fn new(cfg: GatewayConfig, counter: Arc<dyn HitCounter>, instance: String) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                counter,
                instance,
                metrics: GatewayMetrics::default(),
            }),
        }
    }

    /// Build the configured counter client and resolve the instance id.
    /// Returns Result so main can report startup errors instead of panicking.
    pub fn from_config(cfg: GatewayConfig) -> Result<Self> {
        let counter = counter::from_config(&cfg.counter)?;
        let instance = context::resolve_instance_id(&cfg.instance);
        Ok(Self::new(cfg, counter, instance))
    }

    pub fn counter(&self) -> &dyn HitCounter {
        self.inner.counter.as_ref()
    }

    pub fn instance(&self) -> &str {
        &self.inner.instance
    }

    pub fn on_counter_failure(&self) -> OnCounterFailure {
        self.inner.cfg.counter.on_failure
    }

    pub fn metrics(&self) -> &GatewayMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }
}
