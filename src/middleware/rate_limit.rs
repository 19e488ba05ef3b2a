//! Fixed-window request limiting, one limiter per protected route.
//!
//! Counters live in process memory keyed by originating client; the window is
//! independent of server load and resets as a whole rather than sliding.
//! Exceeding the limit yields 429 with a fixed, route-specific message and the
//! standard X-RateLimit-* headers.

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

struct Window {
    started: Instant,
    count: u32,
}

pub struct RateLimiter {
    name: &'static str,
    limit: u32,
    window: Duration,
    body: Value,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(name: &'static str, limit: u32, window: Duration, body: Value) -> Arc<Self> {
        Arc::new(Self {
            name,
            limit,
            window,
            body,
            windows: Mutex::new(HashMap::new()),
        })
    }

    /// Records one request for `key`. `Err(reset_in)` means over the limit.
    fn check_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");

        // Bound memory: drop windows that have fully elapsed.
        if windows.len() > 4096 {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            entry.started = now;
            entry.count = 0;
        }

        entry.count += 1;
        if entry.count > self.limit {
            let reset_in = self.window.saturating_sub(now.duration_since(entry.started));
            return Err(reset_in);
        }

        Ok(())
    }

    pub fn check(&self, key: &str) -> Result<(), Duration> {
        self.check_at(key, Instant::now())
    }

    fn reject(&self, reset_in: Duration) -> Response {
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(self.body.clone())).into_response();
        let headers = response.headers_mut();
        headers.insert("X-RateLimit-Limit", header_num(self.limit as u64));
        headers.insert("X-RateLimit-Remaining", HeaderValue::from_static("0"));
        headers.insert("X-RateLimit-Reset", header_num(reset_in.as_secs()));
        headers.insert("Retry-After", header_num(reset_in.as_secs()));
        response
    }
}

fn header_num(n: u64) -> HeaderValue {
    HeaderValue::from_str(&n.to_string()).unwrap_or(HeaderValue::from_static("0"))
}

/// Best identifier available for the originating client: proxy headers first,
/// then the socket address.
pub fn client_key(request: &Request) -> String {
    let headers = request.headers();

    if let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return forwarded.to_string();
    }

    if let Some(real_ip) = headers
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
    {
        return real_ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| "local".to_string())
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let key = client_key(&request);

    match limiter.check(&key) {
        Ok(()) => next.run(request).await,
        Err(reset_in) => {
            tracing::warn!(
                limiter = limiter.name,
                client = %key,
                "rate limit exceeded"
            );
            limiter.reject(reset_in)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn limiter(limit: u32, window: Duration) -> Arc<RateLimiter> {
        RateLimiter::new("test", limit, window, json!({"error": "too many"}))
    }

    #[test]
    fn allows_up_to_limit_then_rejects() {
        let limiter = limiter(5, Duration::from_secs(3600));
        let now = Instant::now();
        for _ in 0..5 {
            assert!(limiter.check_at("1.2.3.4", now).is_ok());
        }
        assert!(limiter.check_at("1.2.3.4", now).is_err());
    }

    #[test]
    fn windows_are_per_client() {
        let limiter = limiter(1, Duration::from_secs(3600));
        let now = Instant::now();
        assert!(limiter.check_at("1.2.3.4", now).is_ok());
        assert!(limiter.check_at("5.6.7.8", now).is_ok());
        assert!(limiter.check_at("1.2.3.4", now).is_err());
    }

    #[test]
    fn window_resets_after_elapsing() {
        let limiter = limiter(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("1.2.3.4", start).is_ok());
        assert!(limiter.check_at("1.2.3.4", start).is_err());
        let later = start + Duration::from_secs(61);
        assert!(limiter.check_at("1.2.3.4", later).is_ok());
    }

    #[test]
    fn rejection_reports_time_until_reset() {
        let limiter = limiter(1, Duration::from_secs(60));
        let start = Instant::now();
        let _ = limiter.check_at("1.2.3.4", start);
        let reset_in = limiter
            .check_at("1.2.3.4", start + Duration::from_secs(10))
            .unwrap_err();
        assert!(reset_in <= Duration::from_secs(50));
        assert!(reset_in > Duration::from_secs(45));
    }
}
