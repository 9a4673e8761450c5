//! Fixed-rate amortized payment formula.
//!
//! Rules:
//! - monthly rate `r = annual_rate_percent / 100 / 12`, payments `n = years * 12`
//! - `principal * r / (1 - (1 + r)^-n)` when `r != 0`, otherwise `principal / n`
//! - result is rounded to cents (half away from zero)
//! - every rejected input is `InvalidInput`; NaN/Infinity never escape

use crate::error::{LoanCalcError, Result};

/// Payments per year.
pub const PERIODS_PER_YEAR: u32 = 12;

/// Compute the periodic (monthly) payment for a fixed-rate loan.
pub fn calculate(principal: f64, annual_rate_percent: f64, years: i64) -> Result<f64> {
    if !principal.is_finite() || principal < 0.0 {
        return Err(LoanCalcError::InvalidInput(
            "Amount must be a finite number >= 0".into(),
        ));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(LoanCalcError::InvalidInput(
            "Rate must be a finite number >= 0".into(),
        ));
    }
    if years <= 0 {
        return Err(LoanCalcError::InvalidInput("Years must be > 0".into()));
    }

    let n = years as f64 * f64::from(PERIODS_PER_YEAR);
    let r = annual_rate_percent / 100.0 / f64::from(PERIODS_PER_YEAR);

    // 1 - (1 + r)^-n, kept accurate for r close to zero.
    let discount = -(-n * r.ln_1p()).exp_m1();
    let payment = if r == 0.0 {
        principal / n
    } else {
        principal * r / discount
    };

    let payment = round_cents(payment);
    if !payment.is_finite() {
        tracing::debug!(principal, annual_rate_percent, years, "payment not finite");
        return Err(LoanCalcError::InvalidInput(
            "inputs produce a non-finite payment".into(),
        ));
    }

    Ok(payment)
}

/// Round to two decimals, half away from zero.
pub fn round_cents(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
