//! Timing attack protection utilities
//!
//! Login must not reveal through latency whether an email exists or a
//! password merely mismatched; both failure paths are stretched to the same
//! minimum duration.

use std::time::{Duration, Instant};

/// Add artificial delay to prevent timing analysis
/// This ensures authentication failures take a minimum amount of time
pub async fn add_auth_delay(start_time: Instant, min_duration: Duration) {
    let elapsed = start_time.elapsed();
    if elapsed < min_duration {
        tokio::time::sleep(min_duration - elapsed).await;
    }
}

/// Authentication timing helper
pub struct AuthTimer {
    start: Instant,
    min_duration: Duration,
}

impl AuthTimer {
    /// Create a new auth timer with minimum duration
    pub fn new(min_duration: Duration) -> Self {
        Self {
            start: Instant::now(),
            min_duration,
        }
    }

    /// Wait until minimum duration has elapsed
    pub async fn wait(self) {
        add_auth_delay(self.start, self.min_duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_auth_timer() {
        let timer = AuthTimer::new(Duration::from_millis(10));
        let start = Instant::now();
        timer.wait().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(10));
    }

    #[tokio::test]
    async fn test_elapsed_timer_does_not_wait_again() {
        let timer = AuthTimer::new(Duration::from_millis(0));
        let start = Instant::now();
        timer.wait().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
