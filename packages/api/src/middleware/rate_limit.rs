use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tracing::{debug, warn};

/// Per-IP request spacing. Each admitted request blocks its IP until
/// `window` has passed.
pub struct RateLimiter {
    window: Duration,
    blocked_until: DashMap<IpAddr, Instant>,
}

impl RateLimiter {
    pub fn new(window: Duration) -> Self {
        RateLimiter {
            window,
            blocked_until: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        !self.window.is_zero()
    }

    /// Returns false when `ip` is still inside the window of its previous
    /// request.
    pub fn check(&self, ip: IpAddr, now: Instant) -> bool {
        if !self.is_enabled() {
            return true;
        }

        let mut until = self.blocked_until.entry(ip).or_insert(now);
        if *until > now {
            return false;
        }
        *until = now + self.window;
        true
    }

    /// Forgets IPs whose window has run out.
    pub fn purge_expired(&self, now: Instant) {
        let before = self.blocked_until.len();
        self.blocked_until.retain(|_, until| *until > now);
        debug!(
            "Rate limiter purged {} entries",
            before.saturating_sub(self.blocked_until.len())
        );
    }

    pub fn tracked_clients(&self) -> usize {
        self.blocked_until.len()
    }
}

/// Rejects requests from an IP that already made one within the window.
/// Requests without a known peer address pass through.
pub async fn rate_limit(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());

    if let Some(ip) = peer {
        if !limiter.check(ip, Instant::now()) {
            warn!("Rate limit exceeded for {}", ip);
            return (
                StatusCode::TOO_MANY_REQUESTS,
                "Rate limit exceeded. Try again later.",
            )
                .into_response();
        }
    }

    next.run(request).await
}
