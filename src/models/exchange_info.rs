//! Exchange metadata (`exchangeInfo`) models.

use serde::{Deserialize, Serialize};

/// Trading status the exchange reports for symbols that accept orders.
pub const TRADING_STATUS: &str = "TRADING";

/// Response body of the exchange metadata endpoint.
///
/// Only the symbol list is read; rate limits, assets and filters are ignored.
#[derive(Debug, Deserialize)]
pub struct ExchangeInfoResponse {
    pub symbols: Vec<SymbolInfo>,
}

/// Reference data for a single symbol.
#[derive(Debug, Deserialize)]
pub struct SymbolInfo {
    pub symbol: String,
    /// `TRADING`, `PENDING_TRADING`, `SETTLING`, `BREAK`, ...
    pub status: String,
}

/// A selectable symbol as shown in the dashboard's pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolOption {
    pub label: String,
    pub value: String,
}

impl SymbolOption {
    /// Creates an option whose label and value are both the symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        Self {
            label: symbol.clone(),
            value: symbol,
        }
    }
}

impl ExchangeInfoResponse {
    /// Returns one option per actively trading symbol, in response order.
    pub fn tradable_symbols(self) -> Vec<SymbolOption> {
        self.symbols
            .into_iter()
            .filter(|s| s.status == TRADING_STATUS)
            .map(|s| SymbolOption::new(s.symbol))
            .collect()
    }
}
