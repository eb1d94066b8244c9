//! Read-only reference list of tradable symbols.

use tracing::info;

use crate::market_data::MarketDataClient;
use crate::models::SymbolOption;

/// The symbols offered by the dashboard's pickers.
///
/// Built once at start-up and never refreshed; the UI borrows it for the
/// lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct SymbolCatalog {
    options: Vec<SymbolOption>,
}

impl SymbolCatalog {
    pub fn new(options: Vec<SymbolOption>) -> Self {
        Self { options }
    }

    /// Fetches the tradable symbol list from the exchange.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Fetch`](crate::OidashError::Fetch) if the
    /// exchange metadata request fails.
    pub async fn load(client: &MarketDataClient) -> crate::Result<Self> {
        let options = client.list_tradable_symbols().await?;
        info!(symbols = options.len(), "Symbol catalog ready");
        Ok(Self::new(options))
    }

    pub fn options(&self) -> &[SymbolOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Whether `symbol` is one of the catalog's values.
    pub fn contains(&self, symbol: &str) -> bool {
        self.options.iter().any(|o| o.value == symbol)
    }

    /// Options whose label contains `filter`, ignoring ASCII case.
    ///
    /// An empty filter matches everything.
    pub fn matching(&self, filter: &str) -> Vec<&SymbolOption> {
        let needle = filter.trim().to_ascii_uppercase();
        self.options
            .iter()
            .filter(|o| needle.is_empty() || o.label.to_ascii_uppercase().contains(&needle))
            .collect()
    }

    /// Returns `preferred` if listed, otherwise the first catalog value.
    pub fn default_symbol(&self, preferred: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == preferred)
            .or_else(|| self.options.first())
            .map(|o| o.value.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SymbolCatalog {
        SymbolCatalog::new(vec![
            SymbolOption::new("BTCUSDT"),
            SymbolOption::new("ETHUSDT"),
            SymbolOption::new("ETHBTC"),
        ])
    }

    #[test]
    fn matching_is_case_insensitive() {
        let cat = catalog();
        let hits: Vec<_> = cat
            .matching("eth")
            .iter()
            .map(|o| o.value.as_str())
            .collect();
        assert_eq!(hits, vec!["ETHUSDT", "ETHBTC"]);
    }

    #[test]
    fn empty_filter_matches_all() {
        assert_eq!(catalog().matching("  ").len(), 3);
    }

    #[test]
    fn default_symbol_falls_back_to_first() {
        let cat = catalog();
        assert_eq!(cat.default_symbol("ETHUSDT"), Some("ETHUSDT"));
        assert_eq!(cat.default_symbol("DOGEUSDT"), Some("BTCUSDT"));
        assert_eq!(SymbolCatalog::default().default_symbol("BTCUSDT"), None);
    }

    #[test]
    fn default_symbol_outlives_the_preferred_argument() {
        let cat = catalog();
        let picked = {
            let preferred = String::from("ETHUSDT");
            cat.default_symbol(&preferred)
        };
        assert_eq!(picked, Some("ETHUSDT"));
    }
}
