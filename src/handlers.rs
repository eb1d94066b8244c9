//! Request handlers invoked by the dashboard on submit.
//!
//! Each handler takes a structured request, performs its fetches one after
//! another and returns a freshly built [`Figure`]. One invocation per user
//! action, awaited to completion by the caller.

use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::OidashError;
use crate::chart::{self, Figure};
use crate::market_data::MarketDataClient;
use crate::models::{Interval, Period};

/// Date format accepted by the range inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// An inclusive calendar date range picked in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Parses the two range inputs.
    ///
    /// Both blank means no range was chosen.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Input`] when only one side is filled, a side is
    /// not `YYYY-MM-DD`, or the start is after the end.
    pub fn parse(start: &str, end: &str) -> crate::Result<Option<Self>> {
        let (start, end) = (start.trim(), end.trim());
        match (start.is_empty(), end.is_empty()) {
            (true, true) => Ok(None),
            (false, true) => Err(OidashError::Input("end date is missing".to_string())),
            (true, false) => Err(OidashError::Input("start date is missing".to_string())),
            (false, false) => {
                let start = parse_date("start", start)?;
                let end = parse_date("end", end)?;
                if start > end {
                    return Err(OidashError::Input(format!(
                        "start date {start} is after end date {end}"
                    )));
                }
                Ok(Some(Self { start, end }))
            }
        }
    }
}

fn parse_date(which: &str, raw: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| OidashError::Input(format!("{which} date {raw:?} is not YYYY-MM-DD")))
}

/// Submit from the spot/futures price tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceChartRequest {
    pub symbol: String,
    pub date_range: Option<DateRange>,
}

/// Submit from the open-interest tab.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenInterestChartRequest {
    /// Symbols in the order they were picked; series keep this order.
    pub symbols: Vec<String>,
    pub date_range: Option<DateRange>,
}

/// Builds figures from live market data.
#[derive(Debug, Clone)]
pub struct ChartHandlers {
    client: MarketDataClient,
    interval: Interval,
    period: Period,
}

impl ChartHandlers {
    pub fn new(client: MarketDataClient, interval: Interval, period: Period) -> Self {
        Self {
            client,
            interval,
            period,
        }
    }

    pub fn interval(&self) -> Interval {
        self.interval
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Fetches spot then futures candles and builds the price chart.
    ///
    /// Without a date range nothing is fetched and the figure is empty.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Fetch`] from whichever request failed first.
    #[instrument(skip(self), fields(symbol = %request.symbol))]
    pub async fn price_chart(&self, request: &PriceChartRequest) -> crate::Result<Figure> {
        let Some(date_range) = request.date_range else {
            info!("No date range picked, skipping price fetch");
            return Ok(Figure::empty(chart::PRICE_CHART_TITLE));
        };
        // The range gates the build; the fetch uses the endpoint's default
        // lookback.
        info!(?date_range, "Building price chart");

        let spot = self
            .client
            .fetch_spot_candles(&request.symbol, self.interval)
            .await?;
        let futures = self
            .client
            .fetch_futures_candles(&request.symbol, self.interval)
            .await?;

        Ok(chart::build_price_chart(&spot, &futures))
    }

    /// Fetches open interest for each requested symbol in turn and builds
    /// the open-interest chart.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Fetch`] for the first symbol whose request
    /// failed; later symbols are not fetched.
    #[instrument(skip(self), fields(symbols = request.symbols.len()))]
    pub async fn open_interest_chart(
        &self,
        request: &OpenInterestChartRequest,
    ) -> crate::Result<Figure> {
        info!(date_range = ?request.date_range, "Building open interest chart");

        let mut per_symbol = Vec::with_capacity(request.symbols.len());
        for symbol in &request.symbols {
            let points = self.client.fetch_open_interest(symbol, self.period).await?;
            per_symbol.push((symbol.clone(), points));
        }

        Ok(chart::build_open_interest_chart(&per_symbol))
    }
}
