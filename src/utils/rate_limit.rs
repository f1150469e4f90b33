use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Spaces out requests to the data source by a fixed pause.
pub struct RateLimiter {
    pause: Duration,
    last: Mutex<Option<Instant>>,
}

impl RateLimiter {
    pub fn new(pause: Duration) -> Self {
        RateLimiter {
            pause,
            last: Mutex::new(None),
        }
    }

    /// Waits until at least `pause` has passed since the previous call
    /// returned. The first call never waits.
    pub async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.pause;
            let now = Instant::now();
            if ready_at > now {
                tokio::time::sleep(ready_at - now).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_acquire_is_immediate() {
        let limiter = RateLimiter::new(Duration::from_secs(60));
        let started = Instant::now();
        limiter.acquire().await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_second_acquire_waits_for_pause() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        limiter.acquire().await;
        let started = Instant::now();
        limiter.acquire().await;
        assert!(started.elapsed() >= Duration::from_millis(45));
    }
}
