//! Fixed-window rate limiting per client address.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use parking_lot::Mutex;

use crate::errors::AppError;

/// Header the reverse proxy in front of the site appends the peer address to.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Expired windows are swept once the table grows past this many clients.
const SWEEP_THRESHOLD: usize = 10_000;

struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per client key inside fixed windows.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    clients: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Record one request for `key`; false once the window's budget is spent.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut clients = self.clients.lock();

        if clients.len() >= SWEEP_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.saturating_duration_since(w.started) < window);
        }

        let entry = clients.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.saturating_duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return false;
        }
        entry.count += 1;
        true
    }
}

/// Identify the caller: the last `X-Forwarded-For` hop, else the peer address.
///
/// Only the single proxy in front of us is trusted, so earlier hops are
/// whatever the client chose to send.
fn client_key(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.rsplit(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware function rejecting callers over their budget with 429.
pub async fn rate_limit_layer(limiter: Arc<RateLimiter>, request: Request, next: Next) -> Response {
    let key = client_key(&request);

    if !limiter.check(&key) {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return AppError::TooManyRequests("Too many requests, please try again later.".to_string())
            .into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http;

    #[test]
    fn test_budget_is_per_client() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        let now = Instant::now();

        assert!(limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.1", now));
        assert!(!limiter.check_at("10.0.0.1", now));
        assert!(limiter.check_at("10.0.0.2", now));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check_at("client", start));
        assert!(!limiter.check_at("client", start + Duration::from_secs(59)));
        assert!(limiter.check_at("client", start + Duration::from_secs(60)));
    }

    #[test]
    fn test_client_key_uses_proxy_appended_hop() {
        let request = http::Request::builder()
            .header(FORWARDED_FOR_HEADER, "10.9.0.1, 203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "203.0.113.7");

        let request = http::Request::builder()
            .header(FORWARDED_FOR_HEADER, "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "203.0.113.7");

        let request = http::Request::builder()
            .header(FORWARDED_FOR_HEADER, "203.0.113.7, ")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_key(&request), "unknown");

        let mut request = http::Request::builder().body(Body::empty()).unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 9], 4000))));
        assert_eq!(client_key(&request), "192.168.1.9");

        let request = http::Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_key(&request), "unknown");
    }
}
