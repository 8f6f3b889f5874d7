//! In-memory, per-client rate limiting.
//!
//! Uses a fixed window counter keyed by client address. Each check holds a
//! single lock across the read-modify-write, so concurrent requests from the
//! same client never lose an increment. Expired windows are swept at most
//! once per window length, which bounds memory to the clients seen in the
//! last window.

mod clock;

pub use clock::{Clock, ManualClock, SystemClock};

use crate::config::RateQuota;
use crate::error::{Result, TranslatorError};
use axum::http::HeaderMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct LimiterState {
    windows: HashMap<String, Window>,
    last_sweep: Instant,
}

pub struct RateLimiter {
    quota: RateQuota,
    clock: Arc<dyn Clock>,
    state: Mutex<LimiterState>,
}

impl RateLimiter {
    pub fn new(quota: RateQuota) -> Self {
        Self::with_clock(quota, Arc::new(SystemClock))
    }

    pub fn with_clock(quota: RateQuota, clock: Arc<dyn Clock>) -> Self {
        let now = clock.now();
        Self {
            quota,
            clock,
            state: Mutex::new(LimiterState {
                windows: HashMap::new(),
                last_sweep: now,
            }),
        }
    }

    pub fn quota(&self) -> RateQuota {
        self.quota
    }

    /// Count one request for `client`.
    ///
    /// Returns `RateLimited` once the client has used up its quota for the
    /// current window. Rejected requests still count toward the window.
    pub fn check(&self, client: &str) -> Result<()> {
        let now = self.clock.now();
        let window_len = self.quota.window;
        let mut state = self.state.lock();

        if now.duration_since(state.last_sweep) >= window_len {
            state
                .windows
                .retain(|_, w| now.duration_since(w.started) < window_len);
            state.last_sweep = now;
        }

        let window = state
            .windows
            .entry(client.to_string())
            .or_insert(Window {
                started: now,
                count: 0,
            });

        if now.duration_since(window.started) >= window_len {
            *window = Window {
                started: now,
                count: 0,
            };
        }

        window.count = window.count.saturating_add(1);

        if window.count > self.quota.limit {
            let remaining = window_len.saturating_sub(now.duration_since(window.started));
            debug!(
                client = client,
                count = window.count,
                limit = self.quota.limit,
                "rate limit exceeded"
            );
            return Err(TranslatorError::RateLimited {
                limit: self.quota.limit,
                window_secs: window_len.as_secs(),
                retry_after_secs: ceil_secs(remaining),
            });
        }

        Ok(())
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.state.lock().windows.len()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter")
            .field("quota", &self.quota)
            .finish()
    }
}

fn ceil_secs(d: Duration) -> u64 {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    secs.max(1)
}

/// Get the client identifier (IP address) for rate limiting.
///
/// Forwarding headers are only consulted when `trust_forwarded` is set,
/// otherwise any client could pick its own bucket.
pub fn client_id(addr: Option<SocketAddr>, headers: &HeaderMap, trust_forwarded: bool) -> String {
    if trust_forwarded {
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|ip| !ip.is_empty())
        {
            return ip.to_string();
        }
    }

    addr.map(|a| a.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
