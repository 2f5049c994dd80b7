//! Outgoing rate limiter for the game backend (sliding one-second window)
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct BackendRateLimiter {
    /// Request timestamps inside the current window
    request_times: Mutex<VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl BackendRateLimiter {
    pub fn new(max_requests_per_second: usize) -> Self {
        Self {
            request_times: Mutex::new(VecDeque::new()),
            max_requests: max_requests_per_second.max(1),
            window: Duration::from_secs(1),
        }
    }

    /// Record a request at `now`, or return how long to wait before retrying
    fn check_and_record(&self, now: Instant) -> Duration {
        let mut request_times = match self.request_times.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        while let Some(&front) = request_times.front() {
            if now.duration_since(front) > self.window {
                request_times.pop_front();
            } else {
                break;
            }
        }

        if request_times.len() >= self.max_requests {
            if let Some(&oldest) = request_times.front() {
                let elapsed = now.duration_since(oldest);
                if elapsed < self.window {
                    return self.window - elapsed;
                }
            }
        }

        request_times.push_back(now);
        Duration::ZERO
    }

    /// Wait until a request slot is free, then take it
    pub async fn acquire(&self) {
        loop {
            let wait = self.check_and_record(Instant::now());
            if wait.is_zero() {
                return;
            }
            tracing::debug!("Backend rate limit: waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_allows_requests_within_limit() {
        let limiter = BackendRateLimiter::new(20);
        let now = Instant::now();

        for _ in 0..20 {
            assert!(limiter.check_and_record(now).is_zero());
        }
    }

    #[test]
    fn test_rate_limiter_blocks_over_limit() {
        let limiter = BackendRateLimiter::new(3);
        let now = Instant::now();

        for _ in 0..3 {
            limiter.check_and_record(now);
        }

        assert!(limiter.check_and_record(now) > Duration::ZERO);
    }

    #[test]
    fn test_rate_limiter_frees_slots_after_window() {
        let limiter = BackendRateLimiter::new(1);
        let start = Instant::now();

        assert!(limiter.check_and_record(start).is_zero());
        let later = start + Duration::from_millis(1500);
        assert!(limiter.check_and_record(later).is_zero());
    }

    #[tokio::test]
    async fn test_acquire_returns_immediately_when_free() {
        let limiter = BackendRateLimiter::new(5);
        limiter.acquire().await;
        limiter.acquire().await;
    }
}
