//! Open-interest history models.

use rust_decimal::Decimal;
use serde::Deserialize;

/// One sample from `/futures/data/openInterestHist`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenInterestPoint {
    /// Sample time, epoch milliseconds.
    pub timestamp: i64,
    pub symbol: String,
    /// Open interest in contracts (base asset).
    pub sum_open_interest: Decimal,
    /// Open interest in quote asset (notional).
    pub sum_open_interest_value: Decimal,
}
