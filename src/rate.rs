//! Client-side view of the Pipedrive request quota
//!
//! Every response carries `X-RateLimit-*` headers. The most recent values are
//! kept per client instance and consulted before the next request is sent.
//! The check is advisory: concurrent callers can all pass it and still be
//! rejected by the server.

use std::fmt;
use std::sync::{Arc, Mutex};

use http::HeaderMap;

use crate::types::Timestamp;

pub const HEADER_RATE_LIMIT: &str = "x-ratelimit-limit";
pub const HEADER_RATE_REMAINING: &str = "x-ratelimit-remaining";
pub const HEADER_RATE_RESET: &str = "x-ratelimit-reset";

/// Last observed quota. The zero value means "nothing observed yet".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    /// Requests allowed in the current window.
    pub limit: i64,
    /// Requests left in the current window.
    pub remaining: i64,
    /// When the window resets (epoch when unknown).
    pub reset: Timestamp,
}

impl Rate {
    /// Reads the three quota headers. Missing or non-numeric values stay zero.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            limit: header_i64(headers, HEADER_RATE_LIMIT).unwrap_or_default(),
            remaining: header_i64(headers, HEADER_RATE_REMAINING).unwrap_or_default(),
            reset: header_i64(headers, HEADER_RATE_RESET)
                .filter(|epoch| *epoch != 0)
                .map(Timestamp::from_unix)
                .unwrap_or_default(),
        }
    }

    /// `true` when the quota is spent and the window has not reset yet.
    pub fn is_exhausted_at(&self, now: Timestamp) -> bool {
        self.remaining == 0 && !self.reset.is_zero() && self.reset > now
    }

    pub fn is_exhausted(&self) -> bool {
        self.is_exhausted_at(Timestamp::now())
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} remaining, resets at {}",
            self.remaining, self.limit, self.reset
        )
    }
}

pub(crate) fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<i64>().ok())
}

/// Shared, lock-guarded [`Rate`] owned by one client and its clones.
#[derive(Debug, Clone, Default)]
pub struct RateState {
    inner: Arc<Mutex<Rate>>,
}

impl RateState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `headers`, stores the result and returns it.
    pub fn observe(&self, headers: &HeaderMap) -> Rate {
        let rate = Rate::from_headers(headers);
        self.store(rate);
        rate
    }

    pub fn store(&self, rate: Rate) {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = rate;
    }

    pub fn current(&self) -> Rate {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{HeaderName, HeaderValue};

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_from_headers_reads_all_three() {
        let rate = Rate::from_headers(&headers(&[
            ("X-RateLimit-Limit", "40"),
            ("X-RateLimit-Remaining", "39"),
            ("X-RateLimit-Reset", "1700000000"),
        ]));
        assert_eq!(rate.limit, 40);
        assert_eq!(rate.remaining, 39);
        assert_eq!(rate.reset, Timestamp::from_unix(1_700_000_000));
    }

    #[test]
    fn test_missing_headers_stay_zero() {
        let rate = Rate::from_headers(&HeaderMap::new());
        assert_eq!(rate, Rate::default());
        assert!(rate.reset.is_zero());
    }

    #[test]
    fn test_malformed_headers_are_ignored() {
        let rate = Rate::from_headers(&headers(&[
            ("X-RateLimit-Limit", "forty"),
            ("X-RateLimit-Remaining", "12"),
            ("X-RateLimit-Reset", "soon"),
        ]));
        assert_eq!(rate.limit, 0);
        assert_eq!(rate.remaining, 12);
        assert!(rate.reset.is_zero());
    }

    #[test]
    fn test_exhaustion_requires_future_reset() {
        let now = Timestamp::from_unix(1_000);
        let mut rate = Rate {
            limit: 10,
            remaining: 0,
            reset: Timestamp::from_unix(2_000),
        };
        assert!(rate.is_exhausted_at(now));

        rate.reset = Timestamp::from_unix(500);
        assert!(!rate.is_exhausted_at(now));

        rate.reset = Timestamp::default();
        assert!(!rate.is_exhausted_at(now));

        rate.remaining = 3;
        rate.reset = Timestamp::from_unix(2_000);
        assert!(!rate.is_exhausted_at(now));
    }

    #[test]
    fn test_state_is_zero_before_first_observation() {
        let state = RateState::new();
        assert_eq!(state.current(), Rate::default());
    }

    #[test]
    fn test_state_shared_between_clones_only() {
        let state = RateState::new();
        let clone = state.clone();
        let other = RateState::new();

        state.observe(&headers(&[("X-RateLimit-Remaining", "5")]));

        assert_eq!(clone.current().remaining, 5);
        assert_eq!(other.current().remaining, 0);
    }
}
