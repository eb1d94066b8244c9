//! Crate-level error types.
//!
//! [`OidashError`] unifies every error source (configuration, HTTP fetches,
//! user input, terminal I/O) behind a single enum so callers can match on the
//! variant they care about while still using the `?` operator for easy
//! propagation. Fetch failures keep their own [`FetchError`] type so the
//! endpoint that failed travels with the cause.

use reqwest::StatusCode;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OidashError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OidashError {
    /// An environment variable held a value that could not be used.
    #[error("configuration error: {0}")]
    Config(String),

    /// An interval or period code is not one the exchange accepts.
    #[error("unsupported interval code: {0}")]
    UnsupportedInterval(String),

    /// A market-data request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A form value entered in the UI was rejected.
    #[error("invalid input: {0}")]
    Input(String),

    /// Terminal or filesystem I/O failed.
    #[error("io error: {0}")]
    Io(String),
}

/// A single market-data GET that did not produce a usable body.
#[derive(Debug, thiserror::Error)]
#[error("request to {endpoint} failed: {cause}")]
pub struct FetchError {
    /// Endpoint URL without the query string.
    pub endpoint: String,
    #[source]
    pub cause: FetchCause,
}

/// Why a [`FetchError`] happened.
#[derive(Debug, thiserror::Error)]
pub enum FetchCause {
    /// Connection, TLS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// The body was not the JSON shape we expected.
    #[error("malformed response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub(crate) fn transport(endpoint: &str, err: reqwest::Error) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            cause: FetchCause::Transport(err),
        }
    }

    pub(crate) fn status(endpoint: &str, status: StatusCode) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            cause: FetchCause::Status(status),
        }
    }

    pub(crate) fn decode(endpoint: &str, err: serde_json::Error) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            cause: FetchCause::Decode(err),
        }
    }
}
