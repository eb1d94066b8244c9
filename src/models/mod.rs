//! Typed models for the Binance public REST responses.
//!
//! Contains the candle, open-interest and exchange-metadata shapes plus the
//! interval/period codes used as query parameters.

pub mod candle;
pub mod exchange_info;
pub mod interval;
pub mod open_interest;

pub use candle::Candle;
pub use exchange_info::{ExchangeInfoResponse, SymbolInfo, SymbolOption};
pub use interval::{Interval, Period};
pub use open_interest::OpenInterestPoint;
