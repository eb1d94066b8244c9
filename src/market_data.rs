//! Binance public REST client for candles, open interest and symbol metadata.
//!
//! Every operation performs exactly one GET and returns the decoded body in
//! the order the exchange sent it. There is no caching, no pagination and no
//! retry: a failed request surfaces as a [`FetchError`] naming the endpoint.

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::OidashError;
use crate::config::BinanceConfig;
use crate::error::FetchError;
use crate::models::{
    Candle, ExchangeInfoResponse, Interval, OpenInterestPoint, Period, SymbolOption,
};

const SPOT_KLINES_PATH: &str = "/api/v3/klines";
const FUTURES_KLINES_PATH: &str = "/fapi/v1/klines";
const OPEN_INTEREST_HIST_PATH: &str = "/futures/data/openInterestHist";
const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";

const USER_AGENT: &str = concat!("oidash/", env!("CARGO_PKG_VERSION"));

/// HTTP client bound to a spot and a futures REST base URL.
#[derive(Debug, Clone)]
pub struct MarketDataClient {
    http: reqwest::Client,
    spot_url: String,
    futures_url: String,
}

impl MarketDataClient {
    /// Builds a client with the configured base URLs and request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Config`] if the underlying HTTP client cannot
    /// be constructed (for example when no TLS backend is available).
    pub fn new(config: &BinanceConfig) -> crate::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|e| OidashError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            spot_url: config.spot_url.clone(),
            futures_url: config.futures_url.clone(),
        })
    }

    /// Fetches one page of futures-market candles.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-2xx status or
    /// malformed JSON.
    pub async fn fetch_futures_candles(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, FetchError> {
        let endpoint = format!("{}{FUTURES_KLINES_PATH}", self.futures_url);
        let candles: Vec<Candle> = self
            .get_json(&endpoint, &[("symbol", symbol), ("interval", interval.as_str())])
            .await?;
        info!(
            symbol,
            interval = interval.as_str(),
            count = candles.len(),
            "Fetched futures candles"
        );
        Ok(candles)
    }

    /// Fetches one page of spot-market candles.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-2xx status or
    /// malformed JSON.
    pub async fn fetch_spot_candles(
        &self,
        symbol: &str,
        interval: Interval,
    ) -> Result<Vec<Candle>, FetchError> {
        let endpoint = format!("{}{SPOT_KLINES_PATH}", self.spot_url);
        let candles: Vec<Candle> = self
            .get_json(&endpoint, &[("symbol", symbol), ("interval", interval.as_str())])
            .await?;
        info!(
            symbol,
            interval = interval.as_str(),
            count = candles.len(),
            "Fetched spot candles"
        );
        Ok(candles)
    }

    /// Fetches one page of open-interest history for a futures symbol.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-2xx status or
    /// malformed JSON.
    pub async fn fetch_open_interest(
        &self,
        symbol: &str,
        period: Period,
    ) -> Result<Vec<OpenInterestPoint>, FetchError> {
        let endpoint = format!("{}{OPEN_INTEREST_HIST_PATH}", self.futures_url);
        let points: Vec<OpenInterestPoint> = self
            .get_json(&endpoint, &[("symbol", symbol), ("period", period.as_str())])
            .await?;
        info!(
            symbol,
            period = period.as_str(),
            count = points.len(),
            "Fetched open interest history"
        );
        Ok(points)
    }

    /// Lists futures symbols whose status is `TRADING`, in exchange order.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] on transport failure, non-2xx status or
    /// malformed JSON.
    pub async fn list_tradable_symbols(&self) -> Result<Vec<SymbolOption>, FetchError> {
        let endpoint = format!("{}{EXCHANGE_INFO_PATH}", self.futures_url);
        let info: ExchangeInfoResponse = self.get_json(&endpoint, &[]).await?;
        let listed = info.symbols.len();
        let symbols = info.tradable_symbols();
        info!(listed, tradable = symbols.len(), "Loaded exchange symbols");
        Ok(symbols)
    }

    /// Issues a GET and decodes the JSON body into `T`.
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        debug!(endpoint, ?query, "GET");

        let response = self
            .http
            .get(endpoint)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint, error = %e, "Request failed");
                FetchError::transport(endpoint, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint, %status, "Non-success status");
            return Err(FetchError::status(endpoint, status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::transport(endpoint, e))?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!(endpoint, error = %e, "Malformed response body");
            FetchError::decode(endpoint, e)
        })
    }
}
