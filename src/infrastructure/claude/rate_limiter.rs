use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

/// Token bucket rate limiter for API request throttling
///
/// Shared by every run in the process, so concurrent runs together stay
/// under the configured request rate. Capacity equals the refill rate, but
/// never drops below one token so sub-1 rates still admit requests.
#[derive(Clone)]
pub struct TokenBucketRateLimiter {
    state: Arc<Mutex<BucketState>>,
    capacity: f64,
    refill_rate: f64,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketRateLimiter {
    /// Create a new rate limiter allowing `requests_per_second` sustained requests.
    ///
    /// Non-positive rates are clamped to a minimal positive rate; config
    /// validation rejects them before this point.
    pub fn new(requests_per_second: f64) -> Self {
        let rate = if requests_per_second > 0.0 {
            requests_per_second
        } else {
            0.01
        };

        let capacity = rate.max(1.0);

        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: capacity,
                last_refill: Instant::now(),
            })),
            capacity,
            refill_rate: rate,
        }
    }

    /// Acquire a token from the bucket, waiting if necessary
    pub async fn acquire(&self) {
        loop {
            let wait_duration = {
                let mut state = self.state.lock().await;

                let now = Instant::now();
                let elapsed = now.duration_since(state.last_refill).as_secs_f64();
                let available = (state.tokens + elapsed * self.refill_rate).min(self.capacity);

                if available >= 1.0 {
                    state.tokens = available - 1.0;
                    state.last_refill = now;
                    return;
                }

                let tokens_needed = 1.0 - available;
                Duration::from_secs_f64((tokens_needed / self.refill_rate).max(0.01))
            };

            sleep(wait_duration).await;
        }
    }

    /// Get the current number of available tokens (for testing/monitoring)
    pub async fn available_tokens(&self) -> f64 {
        let state = self.state.lock().await;
        let elapsed = Instant::now().duration_since(state.last_refill).as_secs_f64();
        (state.tokens + elapsed * self.refill_rate).min(self.capacity)
    }
}
