use std::net::SocketAddr;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderName, HeaderValue, header::RETRY_AFTER},
    middleware::Next,
    response::{IntoResponse, Response},
};
use moka::sync::Cache;
use tracing::warn;

use crate::application::http::server::{api_entities::api_error::ApiError, app_state::AppState};

pub const RATE_LIMITED_DETAILS: &str = "Too many requests from this IP, please try again later.";

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Distinct clients tracked at once; the oldest windows are evicted first.
const MAX_TRACKED_CLIENTS: u64 = 100_000;
const MAX_WINDOW_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32, reset: Duration },
    Limited { reset: Duration },
}

/// Fixed-window request counter keyed by client address.
///
/// A `max_requests` or `window` of zero disables limiting.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Cache<String, Window>,
    window: Duration,
    max_requests: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        let windows = Cache::builder()
            .time_to_live(window.clamp(Duration::from_millis(1), MAX_WINDOW_TTL))
            .max_capacity(MAX_TRACKED_CLIENTS)
            .build();

        Self {
            windows,
            window,
            max_requests,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0 && !self.window.is_zero()
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    pub fn check(&self, client: &str) -> RateLimitDecision {
        let now = Instant::now();
        let window = self
            .windows
            .entry_by_ref(client)
            .and_upsert_with(|current| match current.map(|entry| entry.into_value()) {
                Some(w) if now.duration_since(w.started) < self.window => Window {
                    started: w.started,
                    hits: w.hits.saturating_add(1),
                },
                _ => Window {
                    started: now,
                    hits: 1,
                },
            })
            .into_value();

        let reset = self
            .window
            .saturating_sub(now.duration_since(window.started));

        if window.hits > self.max_requests {
            RateLimitDecision::Limited { reset }
        } else {
            RateLimitDecision::Allowed {
                remaining: self.max_requests - window.hits,
                reset,
            }
        }
    }
}

fn client_key(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn reset_secs(reset: Duration) -> u64 {
    reset.as_secs() + u64::from(reset.subsec_nanos() > 0)
}

fn insert_headers(headers: &mut HeaderMap, limit: u32, remaining: u32, reset: Duration) {
    headers.insert(RATELIMIT_LIMIT, HeaderValue::from(limit));
    headers.insert(RATELIMIT_REMAINING, HeaderValue::from(remaining));
    headers.insert(RATELIMIT_RESET, HeaderValue::from(reset_secs(reset)));
}

pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let limiter = &state.rate_limiter;
    if !limiter.is_enabled() {
        return next.run(req).await;
    }

    let client = client_key(&req);
    match limiter.check(&client) {
        RateLimitDecision::Allowed { remaining, reset } => {
            let mut response = next.run(req).await;
            insert_headers(
                response.headers_mut(),
                limiter.max_requests(),
                remaining,
                reset,
            );
            response
        }
        RateLimitDecision::Limited { reset } => {
            warn!(client, "rate limit exceeded");
            let mut response =
                ApiError::TooManyRequests(RATE_LIMITED_DETAILS.to_string()).into_response();
            let headers = response.headers_mut();
            insert_headers(headers, limiter.max_requests(), 0, reset);
            headers.insert(RETRY_AFTER, HeaderValue::from(reset_secs(reset)));
            response
        }
    }
}
