//! Payment endpoint.
//!
//! Per request: decode inputs, compute the payment, take one count from the
//! shared counter, assemble `CalculatedPayment`. Inputs are validated before
//! the counter is touched so rejected requests do not consume a count.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use tokio::time::Instant;

use loancalc_core::error::LoanCalcError;
use loancalc_core::payment;
use loancalc_core::CalculatedPayment;

use crate::app_state::AppState;
use crate::config::OnCounterFailure;
use crate::transport::codec::{decode_query, error_response, PaymentQuery};

pub async fn calculate_payment(
    State(app): State<AppState>,
    query: std::result::Result<Query<PaymentQuery>, QueryRejection>,
) -> Response {
    let decoded = query
        .map_err(|e| LoanCalcError::InvalidInput(e.body_text()))
        .and_then(|Query(q)| decode_query(q))
        .and_then(|req| {
            payment::calculate(req.amount, req.rate, req.years).map(|p| (req, p))
        });

    let (req, payment) = match decoded {
        Ok(v) => v,
        Err(e) => {
            app.metrics().requests.inc(&[("outcome", "invalid_input")]);
            tracing::debug!(error = %e, "payment request rejected");
            return error_response(&e);
        }
    };

    let counter = app.counter();
    let started = Instant::now();
    let counted = counter.get_and_increment().await;
    app.metrics()
        .counter_latency
        .observe(&[("backend", counter.backend())], started.elapsed());

    let record = match counted {
        Ok(count) => {
            app.metrics().requests.inc(&[("outcome", "ok")]);
            CalculatedPayment::new(req.amount, req.rate, req.years, payment, count, app.instance())
        }
        Err(e) => {
            let code = e.client_code().as_str();
            app.metrics().counter_errors.inc(&[("code", code)]);

            match app.on_counter_failure() {
                OnCounterFailure::Fail => {
                    tracing::warn!(
                        error = %e,
                        code,
                        backend = counter.backend(),
                        "hit counter failed; failing request"
                    );
                    app.metrics().requests.inc(&[("outcome", "counter_error")]);
                    return error_response(&e);
                }
                OnCounterFailure::Sentinel => {
                    tracing::warn!(
                        error = %e,
                        code,
                        backend = counter.backend(),
                        "hit counter failed; answering degraded"
                    );
                    app.metrics().requests.inc(&[("outcome", "degraded")]);
                    CalculatedPayment::degraded(
                        req.amount,
                        req.rate,
                        req.years,
                        payment,
                        app.instance(),
                    )
                }
            }
        }
    };

    Json(record).into_response()
}
