//! Binance market-data dashboard library.
//!
//! Fetches spot and futures candles plus futures open-interest history from
//! Binance's public REST API, assembles them into time-indexed line charts,
//! and renders them in a tabbed terminal dashboard.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod error;
pub mod handlers;
pub mod market_data;
pub mod models;
pub mod tui;

pub use error::{FetchCause, FetchError, OidashError, Result};
