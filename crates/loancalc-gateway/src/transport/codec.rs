//! Request decoding and error encoding for the HTTP transport.
//!
//! - Query string => `PaymentRequest` (typed, with per-field messages)
//! - `LoanCalcError` => status code + `{ "code", "msg" }` JSON body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use loancalc_core::error::{ClientCode, LoanCalcError, Result};

/// Raw query parameters. Names are accepted as `Amount` or `amount`.
#[derive(Debug, Deserialize)]
pub struct PaymentQuery {
    #[serde(rename = "Amount", alias = "amount")]
    pub amount: Option<String>,
    #[serde(rename = "Rate", alias = "rate")]
    pub rate: Option<String>,
    #[serde(rename = "Years", alias = "years")]
    pub years: Option<String>,
}

/// Decoded payment inputs. Range checks live in the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaymentRequest {
    pub amount: f64,
    pub rate: f64,
    pub years: i64,
}

pub fn decode_query(q: PaymentQuery) -> Result<PaymentRequest> {
    Ok(PaymentRequest {
        amount: parse_field("Amount", q.amount)?,
        rate: parse_field("Rate", q.rate)?,
        years: parse_field("Years", q.years)?,
    })
}

fn parse_field<T: std::str::FromStr>(name: &str, raw: Option<String>) -> Result<T> {
    let raw = raw.ok_or_else(|| LoanCalcError::InvalidInput(format!("{name} is required")))?;
    raw.trim()
        .parse()
        .map_err(|_| LoanCalcError::InvalidInput(format!("{name} is not a valid number: {raw:?}")))
}

pub fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::InvalidInput => StatusCode::BAD_REQUEST,
        ClientCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ClientCode::ProtocolError => StatusCode::BAD_GATEWAY,
        ClientCode::InvalidConfig | ClientCode::UnsupportedVersion | ClientCode::Internal => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Encode an error as `{ "code": ..., "msg": ... }` with the mapped status.
pub fn error_response(err: &LoanCalcError) -> Response {
    let code = err.client_code();
    (
        status_for(code),
        Json(json!({
            "code": code.as_str(),
            "msg": err.to_string(),
        })),
    )
        .into_response()
}
