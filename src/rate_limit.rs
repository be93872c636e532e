//! Fixed-window request limiter for public form endpoints.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::config::RateLimitConfig;

#[derive(Debug, Clone, Copy)]
struct Window {
    reset_at: Instant,
    count: u32,
}

/// Counts requests per client key inside a fixed window.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, Duration::from_secs(config.window_secs))
    }

    /// Records a request and returns whether it is allowed.
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    pub fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self
            .windows
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        windows.retain(|_, w| w.reset_at > now);

        let window = windows.entry(key.to_string()).or_insert(Window {
            reset_at: now + self.window,
            count: 0,
        });
        if window.count >= self.max_requests {
            log::warn!("Rate limit exceeded for {key}");
            return false;
        }
        window.count += 1;
        true
    }
}
