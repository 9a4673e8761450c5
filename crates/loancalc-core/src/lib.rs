//! loancalc core: payment arithmetic, the response record, and the error surface.
//!
//! This crate holds everything the gateway needs that does not touch the
//! network: the amortized payment formula, the `CalculatedPayment` record
//! returned to callers, and the error codes shared by every layer. It carries
//! no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Bad input surfaces as `LoanCalcError::InvalidInput`, never as NaN/Infinity.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod model;
pub mod payment;

pub use error::{LoanCalcError, Result};
pub use model::CalculatedPayment;
