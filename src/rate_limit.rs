use dashmap::DashMap;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

// Sliding window limiter keyed by client ip.
//
// Built once at startup and owned by AppState. The table lives as long as the
// process; per-ip updates are atomic through the DashMap entry lock.
pub struct RateLimiter {
    requests: DashMap<String, VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

// Rejection with the time until the oldest request leaves the window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimited {
    pub retry_after: Duration,
}

impl RateLimited {
    // Whole seconds for the Retry-After header, never zero
    pub fn retry_after_secs(&self) -> u64 {
        let secs = self.retry_after.as_secs();
        let secs = if self.retry_after.subsec_nanos() > 0 { secs.saturating_add(1) } else { secs };
        secs.max(1)
    }
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            requests: DashMap::new(),
            max_requests,
            window,
        }
    }

    pub fn check(&self, ip: &str) -> Result<(), RateLimited> {
        self.check_at(ip, Instant::now())
    }

    // Check + record with explicit timestamp (for testing)
    pub fn check_at(&self, ip: &str, now: Instant) -> Result<(), RateLimited> {
        let mut entry = self.requests.entry(ip.to_string()).or_default();
        let timestamps = entry.value_mut();

        // drop everything that fell out of the trailing window
        while let Some(&oldest) = timestamps.front() {
            if now.saturating_duration_since(oldest) >= self.window {
                timestamps.pop_front();
            } else {
                break;
            }
        }

        if timestamps.len() >= self.max_requests {
            let retry_after = timestamps
                .front()
                .and_then(|&oldest| oldest.checked_add(self.window))
                .map(|expires| expires.saturating_duration_since(now))
                .unwrap_or(self.window);
            return Err(RateLimited { retry_after });
        }

        timestamps.push_back(now);
        Ok(())
    }

    // Number of ips with a table entry
    pub fn tracked_clients(&self) -> usize {
        self.requests.len()
    }
}
