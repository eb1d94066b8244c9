//! REST client tests against a local stub server.

mod common;

use reqwest::StatusCode;
use rust_decimal_macros::dec;

use common::{
    EXCHANGE_INFO_JSON, FUTURES_KLINES_JSON, OPEN_INTEREST_JSON, Route, SPOT_KLINES_JSON,
    StubServer, unreachable_client,
};
use oidash::FetchCause;
use oidash::models::{Interval, Period};

#[tokio::test]
async fn test_fetch_spot_candles_sends_symbol_and_interval() {
    let server = StubServer::start(vec![Route::ok("/api/v3/klines", SPOT_KLINES_JSON)]).await;

    let candles = server
        .client()
        .fetch_spot_candles("BTCUSDT", Interval::H4)
        .await
        .expect("spot fetch failed");

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].close, dec!(44179.55));
    assert_eq!(
        server.requests(),
        vec!["/api/v3/klines?symbol=BTCUSDT&interval=4h".to_string()]
    );
}

#[tokio::test]
async fn test_fetch_futures_candles_uses_futures_path() {
    let server = StubServer::start(vec![Route::ok("/fapi/v1/klines", FUTURES_KLINES_JSON)]).await;

    let candles = server
        .client()
        .fetch_futures_candles("BTCUSDT", Interval::Mo1)
        .await
        .expect("futures fetch failed");

    assert_eq!(candles.len(), 2);
    assert_eq!(candles[1].close, dec!(44990.10));
    assert_eq!(
        server.requests(),
        vec!["/fapi/v1/klines?symbol=BTCUSDT&interval=1M".to_string()]
    );
}

#[tokio::test]
async fn test_fetch_open_interest_sends_period() {
    let server = StubServer::start(vec![Route::ok(
        "/futures/data/openInterestHist",
        OPEN_INTEREST_JSON,
    )])
    .await;

    let points = server
        .client()
        .fetch_open_interest("BTCUSDT", Period::H1)
        .await
        .expect("open interest fetch failed");

    assert_eq!(points.len(), 2);
    assert!(points[0].timestamp < points[1].timestamp);
    assert_eq!(
        server.requests(),
        vec!["/futures/data/openInterestHist?symbol=BTCUSDT&period=1h".to_string()]
    );
}

#[tokio::test]
async fn test_empty_body_is_empty_sequence() {
    let server = StubServer::start(vec![Route::ok("/api/v3/klines", "[]")]).await;

    let candles = server
        .client()
        .fetch_spot_candles("BTCUSDT", Interval::D1)
        .await
        .expect("spot fetch failed");

    assert!(candles.is_empty());
}

#[tokio::test]
async fn test_list_tradable_symbols_filters_status() {
    let server =
        StubServer::start(vec![Route::ok("/fapi/v1/exchangeInfo", EXCHANGE_INFO_JSON)]).await;

    let symbols = server
        .client()
        .list_tradable_symbols()
        .await
        .expect("exchange info fetch failed");

    let values: Vec<&str> = symbols.iter().map(|s| s.value.as_str()).collect();
    assert_eq!(values, vec!["BTCUSDT", "ETHUSDT", "SOLUSDT"]);
    assert!(symbols.iter().all(|s| s.label == s.value));
    assert_eq!(server.requests(), vec!["/fapi/v1/exchangeInfo".to_string()]);
}

#[tokio::test]
async fn test_non_success_status_names_endpoint() {
    let server = StubServer::start(vec![Route::status(
        "/futures/data/openInterestHist",
        400,
        r#"{"code":-1121,"msg":"Invalid symbol."}"#,
    )])
    .await;

    let err = server
        .client()
        .fetch_open_interest("NOPE", Period::D1)
        .await
        .expect_err("expected a status error");

    assert_eq!(err.endpoint, format!("{}/futures/data/openInterestHist", server.url()));
    assert!(matches!(err.cause, FetchCause::Status(StatusCode::BAD_REQUEST)));
    assert!(err.to_string().contains("/futures/data/openInterestHist"));
}

#[tokio::test]
async fn test_unknown_path_is_status_error() {
    let server = StubServer::start(vec![]).await;

    let err = server
        .client()
        .fetch_futures_candles("BTCUSDT", Interval::D1)
        .await
        .expect_err("expected a status error");

    assert!(matches!(err.cause, FetchCause::Status(StatusCode::NOT_FOUND)));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server =
        StubServer::start(vec![Route::ok("/api/v3/klines", r#"{"not":"an array"}"#)]).await;

    let err = server
        .client()
        .fetch_spot_candles("BTCUSDT", Interval::D1)
        .await
        .expect_err("expected a decode error");

    assert!(matches!(err.cause, FetchCause::Decode(_)));
    assert!(err.endpoint.ends_with("/api/v3/klines"));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let client = unreachable_client().await;

    let err = client
        .list_tradable_symbols()
        .await
        .expect_err("expected a transport error");

    assert!(matches!(err.cause, FetchCause::Transport(_)));
    assert!(err.endpoint.ends_with("/fapi/v1/exchangeInfo"));
}
