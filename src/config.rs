//! Application configuration loaded from environment variables.
//!
//! Every variable is optional:
//! - `OIDASH_SPOT_URL` / `OIDASH_FUTURES_URL` override the public REST bases
//! - `OIDASH_HTTP_TIMEOUT_SECS` bounds each outbound GET (default 10)
//! - `OIDASH_DEFAULT_SYMBOL` preselects a symbol in both pickers
//! - `OIDASH_INTERVAL` / `OIDASH_PERIOD` choose the candle and
//!   open-interest resolution (default `1d`)
//! - `OIDASH_EXPORT_DIR` is where exported figures are written
//! - `OIDASH_LOG_FILE` / `OIDASH_LOG_LEVEL` configure tracing output

use std::path::PathBuf;
use std::time::Duration;

use tracing::Level;

use crate::OidashError;
use crate::models::{Interval, Period};

/// Default spot-market REST base.
const DEFAULT_SPOT_URL: &str = "https://api.binance.com";

/// Default USDⓈ-M futures REST base.
const DEFAULT_FUTURES_URL: &str = "https://fapi.binance.com";

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SYMBOL: &str = "BTCUSDT";
const DEFAULT_LOG_FILE: &str = "oidash.log";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub binance: BinanceConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

/// Where and how market data is fetched.
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    pub spot_url: String,
    pub futures_url: String,
    pub timeout: Duration,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self {
            spot_url: DEFAULT_SPOT_URL.to_string(),
            futures_url: DEFAULT_FUTURES_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Dashboard behaviour.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub default_symbol: String,
    pub interval: Interval,
    pub period: Period,
    pub export_dir: PathBuf,
}

/// Log sink settings.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub file: PathBuf,
    pub level: Level,
}

/// Loads the application configuration from environment variables.
///
/// # Errors
///
/// Returns [`OidashError::Config`] if the timeout or log level cannot be
/// parsed, and [`OidashError::UnsupportedInterval`] if the interval or
/// period code is not one the exchange accepts.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let spot_url = non_empty_var("OIDASH_SPOT_URL")
        .unwrap_or_else(|| DEFAULT_SPOT_URL.to_string());
    let futures_url = non_empty_var("OIDASH_FUTURES_URL")
        .unwrap_or_else(|| DEFAULT_FUTURES_URL.to_string());

    let timeout_secs = match non_empty_var("OIDASH_HTTP_TIMEOUT_SECS") {
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                return Err(OidashError::Config(format!(
                    "OIDASH_HTTP_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                )));
            }
        },
        None => DEFAULT_TIMEOUT_SECS,
    };

    let interval = match non_empty_var("OIDASH_INTERVAL") {
        Some(raw) => raw.parse()?,
        None => Interval::default(),
    };
    let period = match non_empty_var("OIDASH_PERIOD") {
        Some(raw) => raw.parse()?,
        None => Period::default(),
    };

    let level = match non_empty_var("OIDASH_LOG_LEVEL") {
        Some(raw) => raw.parse::<Level>().map_err(|_| {
            OidashError::Config(format!("OIDASH_LOG_LEVEL is not a log level: {raw:?}"))
        })?,
        None => Level::INFO,
    };

    Ok(AppConfig {
        binance: BinanceConfig {
            spot_url: trim_base(spot_url),
            futures_url: trim_base(futures_url),
            timeout: Duration::from_secs(timeout_secs),
        },
        dashboard: DashboardConfig {
            default_symbol: non_empty_var("OIDASH_DEFAULT_SYMBOL")
                .unwrap_or_else(|| DEFAULT_SYMBOL.to_string()),
            interval,
            period,
            export_dir: non_empty_var("OIDASH_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        },
        logging: LoggingConfig {
            file: non_empty_var("OIDASH_LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            level,
        },
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

/// Strips trailing slashes so endpoint paths can be appended verbatim.
fn trim_base(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VARS: [&str; 9] = [
        "OIDASH_SPOT_URL",
        "OIDASH_FUTURES_URL",
        "OIDASH_HTTP_TIMEOUT_SECS",
        "OIDASH_DEFAULT_SYMBOL",
        "OIDASH_INTERVAL",
        "OIDASH_PERIOD",
        "OIDASH_EXPORT_DIR",
        "OIDASH_LOG_FILE",
        "OIDASH_LOG_LEVEL",
    ];

    /// Serializes tests that touch the process environment.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    /// Helper that clears every config var, applies `vars`, runs `f`, then
    /// restores the originals.
    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let originals: Vec<(&str, Option<String>)> = ALL_VARS
            .iter()
            .map(|k| (*k, std::env::var(k).ok()))
            .collect();

        // SAFETY: every env-mutating test holds ENV_LOCK.
        unsafe {
            for k in ALL_VARS {
                std::env::remove_var(k);
            }
            for (k, v) in vars {
                std::env::set_var(k, v);
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values under the same lock.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(&[], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.binance.spot_url, DEFAULT_SPOT_URL);
            assert_eq!(config.binance.futures_url, DEFAULT_FUTURES_URL);
            assert_eq!(config.binance.timeout, Duration::from_secs(10));
            assert_eq!(config.dashboard.default_symbol, "BTCUSDT");
            assert_eq!(config.dashboard.interval, Interval::D1);
            assert_eq!(config.dashboard.period, Period::D1);
            assert_eq!(config.dashboard.export_dir, PathBuf::from("."));
            assert_eq!(config.logging.file, PathBuf::from("oidash.log"));
            assert_eq!(config.logging.level, Level::INFO);
        });
    }

    #[test]
    fn custom_urls_lose_trailing_slash() {
        with_env(
            &[
                ("OIDASH_SPOT_URL", "http://127.0.0.1:9000/"),
                ("OIDASH_FUTURES_URL", "http://127.0.0.1:9001"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.binance.spot_url, "http://127.0.0.1:9000");
                assert_eq!(config.binance.futures_url, "http://127.0.0.1:9001");
            },
        );
    }

    #[test]
    fn loads_resolution_and_symbol() {
        with_env(
            &[
                ("OIDASH_INTERVAL", "4h"),
                ("OIDASH_PERIOD", "1h"),
                ("OIDASH_DEFAULT_SYMBOL", "ETHUSDT"),
                ("OIDASH_LOG_LEVEL", "debug"),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.dashboard.interval, Interval::H4);
                assert_eq!(config.dashboard.period, Period::H1);
                assert_eq!(config.dashboard.default_symbol, "ETHUSDT");
                assert_eq!(config.logging.level, Level::DEBUG);
            },
        );
    }

    #[test]
    fn rejects_zero_timeout() {
        with_env(&[("OIDASH_HTTP_TIMEOUT_SECS", "0")], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("OIDASH_HTTP_TIMEOUT_SECS"));
        });
    }

    #[test]
    fn rejects_unknown_period() {
        with_env(&[("OIDASH_PERIOD", "1w")], || {
            let err = fetch_config().unwrap_err();
            assert!(matches!(err, OidashError::UnsupportedInterval(_)));
        });
    }

    #[test]
    fn rejects_bad_log_level() {
        with_env(&[("OIDASH_LOG_LEVEL", "loud")], || {
            assert!(matches!(fetch_config(), Err(OidashError::Config(_))));
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("OIDASH_SPOT_URL", ""),
                ("OIDASH_HTTP_TIMEOUT_SECS", ""),
                ("OIDASH_INTERVAL", ""),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.binance.spot_url, DEFAULT_SPOT_URL);
                assert_eq!(config.binance.timeout, Duration::from_secs(10));
                assert_eq!(config.dashboard.interval, Interval::D1);
            },
        );
    }
}
