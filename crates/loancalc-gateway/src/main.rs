//! loancalc gateway
//!
//! - `GET /payment?Amount=..&Rate=..&Years=..` -> CalculatedPayment JSON
//! - Hit count from the shared counter store, instance id from platform metadata
//! - Ops: /healthz, /readyz, /metrics
//! - Graceful shutdown: mark draining, finish in-flight requests

use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

use loancalc_core::error::{LoanCalcError, Result};
use loancalc_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.client_code().as_str(), "loancalc-gateway stopped");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| LoanCalcError::Config(format!("server.listen: {e}")))?;

    let state = AppState::from_config(cfg)?;
    tracing::info!(
        %listen,
        backend = state.counter().backend(),
        instance = %state.instance(),
        on_failure = ?state.on_counter_failure(),
        "loancalc-gateway starting"
    );

    let app = router::build_router(state.clone());
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| LoanCalcError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| LoanCalcError::Internal(format!("server failed: {e}")))?;

    tracing::info!("loancalc-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    state.set_draining();
    tracing::info!("shutdown signal received; draining");
}
