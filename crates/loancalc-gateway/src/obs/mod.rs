//! In-process metrics.
//!
//! Request outcomes, counter failures, and counter round-trip latency are kept
//! as atomics and rendered by the `/metrics` handler.

pub mod metrics;

pub use metrics::GatewayMetrics;
