//! Kline (OHLCV candle) models for the spot and futures REST endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

/// A single OHLCV bar.
///
/// The exchange sends each candle as a fixed-arity JSON array rather than an
/// object, so this struct is deserialized positionally: field order here must
/// match the array layout `[open_time, open, high, low, close, volume,
/// close_time, quote_volume, trade_count, taker_buy_base, taker_buy_quote,
/// ignore]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candle {
    /// Bucket start, epoch milliseconds.
    pub open_time: i64,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    /// Base-asset volume.
    pub volume: Decimal,
    /// Bucket end, epoch milliseconds (inclusive, so `open_time + width - 1`).
    pub close_time: i64,
    pub quote_volume: Decimal,
    pub trade_count: u64,
    pub taker_buy_base: Decimal,
    pub taker_buy_quote: Decimal,
    /// Unused by the exchange; always `"0"`.
    #[serde(default)]
    pub ignore: String,
}
