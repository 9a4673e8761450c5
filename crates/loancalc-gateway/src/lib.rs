//! loancalc gateway library entry.
//!
//! Wires config, the shared hit counter client, the payment handler, and the
//! ops endpoints into one axum service. Consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod config;
pub mod context;
pub mod counter;
pub mod obs;
pub mod ops;
pub mod router;
pub mod transport;
