use crate::config::WalkerConfig;
use std::time::{Duration, Instant};

/// Tracks request pacing against the article server
///
/// Requests are spaced by a minimum delay. Each consecutive failed fetch doubles
/// that delay, up to a ceiling, and the first success resets it. Failed fetches
/// are never retried; the longer delay only applies to the next request.
#[derive(Debug, Clone)]
pub struct PacingState {
    /// Timestamp of the last request start
    pub last_request_time: Option<Instant>,

    /// Number of fetch failures since the last success
    pub consecutive_failures: u32,

    /// Total number of requests issued
    pub request_count: u64,

    base_delay: Duration,
    max_delay: Duration,
}

impl PacingState {
    /// Creates a pacing state from the walker configuration
    pub fn new(config: &WalkerConfig) -> Self {
        Self {
            last_request_time: None,
            consecutive_failures: 0,
            request_count: 0,
            base_delay: Duration::from_millis(config.request_delay_ms),
            max_delay: Duration::from_millis(config.max_backoff_ms),
        }
    }

    /// Current delay between requests, including any back-off
    pub fn current_delay(&self) -> Duration {
        if self.consecutive_failures == 0 {
            return self.base_delay;
        }

        let floor = self.base_delay.max(Duration::from_millis(100));
        let factor = 1u32 << self.consecutive_failures.min(16);
        floor.saturating_mul(factor).min(self.max_delay)
    }

    /// Calculates the time until the next request can be made
    ///
    /// Returns None if a request can be made now, or the duration to wait otherwise.
    pub fn time_until_next_request(&self, now: Instant) -> Option<Duration> {
        let last = self.last_request_time?;
        let delay = self.current_delay();
        let elapsed = now.duration_since(last);
        if elapsed < delay {
            Some(delay - elapsed)
        } else {
            None
        }
    }

    /// Records that a request was started
    pub fn record_request(&mut self, now: Instant) {
        self.request_count += 1;
        self.last_request_time = Some(now);
    }

    /// Records a successful fetch, clearing any back-off
    pub fn record_success(&mut self) {
        self.consecutive_failures = 0;
    }

    /// Records a failed fetch, lengthening the delay before the next request
    pub fn record_failure(&mut self) {
        self.consecutive_failures = self.consecutive_failures.saturating_add(1);
    }
}
