//! Time-resolution codes accepted by the Binance REST endpoints.

use std::fmt;
use std::str::FromStr;

use crate::OidashError;

/// Kline bucket size for the spot and futures candle endpoints.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interval {
    M1,
    M3,
    M5,
    M15,
    M30,
    H1,
    H2,
    H4,
    H6,
    H8,
    H12,
    #[default]
    D1,
    D3,
    W1,
    /// One calendar month (wire code `1M`, case-sensitive).
    Mo1,
}

impl Interval {
    pub const ALL: [Interval; 15] = [
        Interval::M1,
        Interval::M3,
        Interval::M5,
        Interval::M15,
        Interval::M30,
        Interval::H1,
        Interval::H2,
        Interval::H4,
        Interval::H6,
        Interval::H8,
        Interval::H12,
        Interval::D1,
        Interval::D3,
        Interval::W1,
        Interval::Mo1,
    ];

    /// Returns the wire-format code expected by the `interval` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M3 => "3m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::H2 => "2h",
            Interval::H4 => "4h",
            Interval::H6 => "6h",
            Interval::H8 => "8h",
            Interval::H12 => "12h",
            Interval::D1 => "1d",
            Interval::D3 => "3d",
            Interval::W1 => "1w",
            Interval::Mo1 => "1M",
        }
    }
}

impl FromStr for Interval {
    type Err = OidashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|i| i.as_str() == s)
            .ok_or_else(|| OidashError::UnsupportedInterval(s.to_string()))
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregation period for the open-interest history endpoint.
///
/// A strict subset of [`Interval`]: the statistics endpoint has no
/// 1m/3m/8h buckets or anything longer than a day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Period {
    M5,
    M15,
    M30,
    H1,
    H2,
    H4,
    H6,
    H12,
    #[default]
    D1,
}

impl Period {
    pub const ALL: [Period; 9] = [
        Period::M5,
        Period::M15,
        Period::M30,
        Period::H1,
        Period::H2,
        Period::H4,
        Period::H6,
        Period::H12,
        Period::D1,
    ];

    /// Returns the wire-format code expected by the `period` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::M5 => "5m",
            Period::M15 => "15m",
            Period::M30 => "30m",
            Period::H1 => "1h",
            Period::H2 => "2h",
            Period::H4 => "4h",
            Period::H6 => "6h",
            Period::H12 => "12h",
            Period::D1 => "1d",
        }
    }
}

impl FromStr for Period {
    type Err = OidashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| OidashError::UnsupportedInterval(s.to_string()))
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
