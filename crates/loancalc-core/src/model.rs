//! Response record returned by the payment endpoint.

use serde::{Deserialize, Serialize};

/// Count reported when the counter store failed and the gateway runs in
/// sentinel mode. Never a value the store hands out.
pub const DEGRADED_COUNT: i64 = -1;

/// One calculated payment plus the cluster-wide hit count and the instance
/// that served it. Built once per request; read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatedPayment {
    amount: f64,
    rate: f64,
    years: i64,
    payment: f64,
    count: i64,
    instance: String,
    #[serde(default, skip_serializing_if = "is_false")]
    degraded: bool,
}

fn is_false(v: &bool) -> bool {
    !*v
}

impl CalculatedPayment {
    /// Record for a request whose count came from the store.
    pub fn new(
        amount: f64,
        rate: f64,
        years: i64,
        payment: f64,
        count: i64,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            amount,
            rate,
            years,
            payment,
            count,
            instance: instance.into(),
            degraded: false,
        }
    }

    /// Record for a request whose count could not be obtained.
    pub fn degraded(
        amount: f64,
        rate: f64,
        years: i64,
        payment: f64,
        instance: impl Into<String>,
    ) -> Self {
        Self {
            degraded: true,
            ..Self::new(amount, rate, years, payment, DEGRADED_COUNT, instance)
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }
    pub fn rate(&self) -> f64 {
        self.rate
    }
    pub fn years(&self) -> i64 {
        self.years
    }
    pub fn payment(&self) -> f64 {
        self.payment
    }
    pub fn count(&self) -> i64 {
        self.count
    }
    pub fn instance(&self) -> &str {
        &self.instance
    }
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}
