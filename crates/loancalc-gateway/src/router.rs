//! Axum router wiring.
//!
//! The payment route answers on `/payment` and `/Payment`; ops routes sit
//! alongside it.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/payment", get(transport::http::calculate_payment))
        .route("/Payment", get(transport::http::calculate_payment))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
