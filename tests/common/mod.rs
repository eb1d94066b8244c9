//! Shared test utilities: a canned-response HTTP server and fixtures.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use oidash::config::BinanceConfig;
use oidash::market_data::MarketDataClient;

pub const SPOT_KLINES_JSON: &str = include_str!("../fixtures/spot_klines.json");
pub const FUTURES_KLINES_JSON: &str = include_str!("../fixtures/futures_klines.json");
pub const OPEN_INTEREST_JSON: &str = include_str!("../fixtures/open_interest.json");
pub const EXCHANGE_INFO_JSON: &str = include_str!("../fixtures/exchange_info.json");

/// Binance production base URLs, for the live tests.
pub const BINANCE_SPOT_URL: &str = "https://api.binance.com";
pub const BINANCE_FUTURES_URL: &str = "https://fapi.binance.com";

/// A canned response for one request path.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: String,
    /// `symbol` query value this route is limited to, if any.
    pub symbol: Option<String>,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn ok(path: &str, body: &str) -> Self {
        Self {
            path: path.to_string(),
            symbol: None,
            status: 200,
            body: body.to_string(),
        }
    }

    pub fn status(path: &str, status: u16, body: &str) -> Self {
        Self {
            status,
            ..Self::ok(path, body)
        }
    }

    pub fn for_symbol(mut self, symbol: &str) -> Self {
        self.symbol = Some(symbol.to_string());
        self
    }

    fn matches(&self, path: &str, query: &str) -> bool {
        if self.path != path {
            return false;
        }
        match self.symbol {
            Some(ref symbol) => query
                .split('&')
                .any(|pair| pair == format!("symbol={symbol}")),
            None => true,
        }
    }
}

/// Minimal HTTP/1.1 server answering each connection with a [`Route`].
///
/// Unknown paths get a 404. Every request target (path plus query) is
/// recorded in arrival order.
pub struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    pub async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind stub server");
        let addr = listener.local_addr().expect("no local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let routes = Arc::new(routes);

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else {
                    break;
                };
                let routes = Arc::clone(&routes);
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let Some(target) = read_request_target(&mut socket).await else {
                        return;
                    };
                    log.lock().unwrap().push(target.clone());

                    let (path, query) = target.split_once('?').unwrap_or((target.as_str(), ""));
                    let (status, body) = routes
                        .iter()
                        .find(|r| r.matches(path, query))
                        .map(|r| (r.status, r.body.clone()))
                        .unwrap_or((404, r#"{"code":-1,"msg":"not found"}"#.to_string()));

                    let response = format!(
                        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                        reason(status),
                        body.len()
                    );
                    let _ = socket.write_all(response.as_bytes()).await;
                    let _ = socket.shutdown().await;
                });
            }
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request targets received so far.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    /// Client whose spot and futures bases both point at this server.
    pub fn client(&self) -> MarketDataClient {
        MarketDataClient::new(&BinanceConfig {
            spot_url: self.url(),
            futures_url: self.url(),
            timeout: Duration::from_secs(5),
        })
        .expect("failed to build client")
    }
}

/// Reads the request head and returns the request target.
async fn read_request_target(socket: &mut tokio::net::TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    request_line.split_whitespace().nth(1).map(str::to_string)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Client pointing at a port nothing listens on.
pub async fn unreachable_client() -> MarketDataClient {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind");
    let addr = listener.local_addr().expect("no local addr");
    drop(listener);
    MarketDataClient::new(&BinanceConfig {
        spot_url: format!("http://{addr}"),
        futures_url: format!("http://{addr}"),
        timeout: Duration::from_secs(2),
    })
    .expect("failed to build client")
}

/// Builds a kline array row with the given open time and close price.
pub fn kline_row(open_time: i64, close: &str) -> String {
    format!(
        r#"[{open_time},"1.0","2.0","0.5","{close}","10.0",{},"15.0",42,"5.0","7.5","0"]"#,
        open_time + 86_399_999
    )
}

/// Builds an open-interest JSON array from (timestamp, value) pairs.
pub fn open_interest_body(symbol: &str, points: &[(i64, &str)]) -> String {
    let rows: Vec<String> = points
        .iter()
        .map(|(ts, value)| {
            format!(
                r#"{{"symbol":"{symbol}","sumOpenInterest":"1000.0","sumOpenInterestValue":"{value}","timestamp":{ts}}}"#
            )
        })
        .collect();
    format!("[{}]", rows.join(","))
}
