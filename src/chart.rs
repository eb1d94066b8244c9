//! Chart assembly: turns fetched records into time-indexed line series.
//!
//! The assembler only re-types values (decimal to `f64`, epoch milliseconds
//! to UTC timestamps); it never re-sorts, so every series keeps the order the
//! exchange returned.

use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};

use crate::OidashError;
use crate::models::{Candle, OpenInterestPoint};

pub const SPOT_SERIES_NAME: &str = "Spot Price";
pub const FUTURES_SERIES_NAME: &str = "Futures Price";
pub const PRICE_CHART_TITLE: &str = "Spot and Futures Prices";
pub const OPEN_INTEREST_CHART_TITLE: &str = "Open Interest";

/// Decimal places kept for open-interest notional values.
const OPEN_INTEREST_DISPLAY_DP: u32 = 2;

/// Converts epoch milliseconds to a UTC timestamp.
///
/// Returns `None` only for values outside chrono's representable range.
pub fn millis_to_datetime(ms: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(ms)
}

/// Converts a UTC timestamp back to epoch milliseconds.
pub fn datetime_to_millis(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_millis()
}

/// How a renderer should behave when the pointer is over the plot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HoverMode {
    /// Show every series' value at the hovered x position together.
    #[default]
    XUnified,
}

impl HoverMode {
    /// Plotly `layout.hovermode` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            HoverMode::XUnified => "x unified",
        }
    }
}

/// One named line: parallel x and y sequences of equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub x: Vec<DateTime<Utc>>,
    pub y: Vec<f64>,
}

impl ChartSeries {
    /// Builds a series from `(epoch_ms, value)` pairs, dropping pairs whose
    /// timestamp cannot be represented.
    fn from_points(name: impl Into<String>, points: impl IntoIterator<Item = (i64, f64)>) -> Self {
        let (x, y) = points
            .into_iter()
            .filter_map(|(ms, value)| millis_to_datetime(ms).map(|ts| (ts, value)))
            .unzip();
        Self {
            name: name.into(),
            x,
            y,
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterates `(x, y)` pairs in series order.
    pub fn points(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    /// Returns the y of the point nearest to `at`; ties go to the earlier point.
    pub fn nearest_value(&self, at: DateTime<Utc>) -> Option<f64> {
        let idx = self.x.partition_point(|t| *t < at);
        let after = self.x.get(idx).map(|t| (idx, *t - at));
        let before = idx
            .checked_sub(1)
            .and_then(|i| self.x.get(i).map(|t| (i, at - *t)));
        let nearest = match (before, after) {
            (Some(b), Some(a)) => Some(if a.1 < b.1 { a.0 } else { b.0 }),
            (Some(b), None) => Some(b.0),
            (None, Some(a)) => Some(a.0),
            (None, None) => None,
        };
        nearest.and_then(|i| self.y.get(i).copied())
    }
}

/// A single series' value at a hovered position.
#[derive(Clone, Debug, PartialEq)]
pub struct HoverValue<'a> {
    pub name: &'a str,
    pub y: Option<f64>,
}

/// A complete chart description.
#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub title: String,
    pub series: Vec<ChartSeries>,
    pub hover_mode: HoverMode,
}

impl Figure {
    /// A figure with no series, used before the first submit and after errors.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            series: Vec::new(),
            hover_mode: HoverMode::XUnified,
        }
    }

    pub fn series_named(&self, name: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Whether no series has any point.
    pub fn has_no_points(&self) -> bool {
        self.series.iter().all(ChartSeries::is_empty)
    }

    /// Sorted, de-duplicated union of every series' x values.
    pub fn x_values(&self) -> Vec<DateTime<Utc>> {
        let mut xs: Vec<_> = self
            .series
            .iter()
            .flat_map(|s| s.x.iter().copied())
            .collect();
        xs.sort_unstable();
        xs.dedup();
        xs
    }

    /// Earliest and latest x across all series.
    pub fn x_bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let mut xs = self.series.iter().flat_map(|s| s.x.iter().copied());
        let first = xs.next()?;
        Some(xs.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t))))
    }

    /// Smallest and largest finite y across all series.
    pub fn y_bounds(&self) -> Option<(f64, f64)> {
        self.series
            .iter()
            .flat_map(|s| s.y.iter().copied())
            .filter(|y| y.is_finite())
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }

    /// Every series' value nearest to `at`, in series order.
    pub fn hover_at(&self, at: DateTime<Utc>) -> Vec<HoverValue<'_>> {
        self.series
            .iter()
            .map(|s| HoverValue {
                name: &s.name,
                y: s.nearest_value(at),
            })
            .collect()
    }

    /// Renders the figure as a Plotly JSON figure (`data` + `layout`).
    pub fn to_plotly_json(&self) -> Value {
        let data: Vec<Value> = self
            .series
            .iter()
            .map(|s| {
                let x: Vec<String> = s
                    .x
                    .iter()
                    .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
                    .collect();
                json!({
                    "type": "scatter",
                    "mode": "lines",
                    "name": s.name,
                    "x": x,
                    "y": s.y,
                })
            })
            .collect();

        json!({
            "data": data,
            "layout": {
                "title": { "text": self.title },
                "hovermode": self.hover_mode.as_str(),
            },
        })
    }

    /// Writes [`to_plotly_json`](Self::to_plotly_json) to `path`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Io`] if the file cannot be written.
    pub fn export(&self, path: &Path) -> crate::Result<()> {
        let body = serde_json::to_string_pretty(&self.to_plotly_json())
            .map_err(|e| OidashError::Io(format!("failed to encode figure: {e}")))?;
        std::fs::write(path, body)
            .map_err(|e| OidashError::Io(format!("failed to write {}: {e}", path.display())))
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Builds the spot-vs-futures close price chart.
///
/// Always yields exactly two series, spot first, even when either input is
/// empty.
pub fn build_price_chart(spot_candles: &[Candle], futures_candles: &[Candle]) -> Figure {
    let close_series = |name: &str, candles: &[Candle]| {
        ChartSeries::from_points(
            name,
            candles.iter().map(|c| (c.open_time, to_f64(c.close))),
        )
    };

    Figure {
        title: PRICE_CHART_TITLE.to_string(),
        series: vec![
            close_series(SPOT_SERIES_NAME, spot_candles),
            close_series(FUTURES_SERIES_NAME, futures_candles),
        ],
        hover_mode: HoverMode::XUnified,
    }
}

/// Builds the open-interest notional chart, one series per symbol in the
/// order given.
pub fn build_open_interest_chart(per_symbol_points: &[(String, Vec<OpenInterestPoint>)]) -> Figure {
    let series = per_symbol_points
        .iter()
        .map(|(symbol, points)| {
            ChartSeries::from_points(
                format!("{symbol} Open Interest"),
                points.iter().map(|p| {
                    (
                        p.timestamp,
                        to_f64(p.sum_open_interest_value.round_dp(OPEN_INTEREST_DISPLAY_DP)),
                    )
                }),
            )
        })
        .collect();

    Figure {
        title: OPEN_INTEREST_CHART_TITLE.to_string(),
        series,
        hover_mode: HoverMode::XUnified,
    }
}
