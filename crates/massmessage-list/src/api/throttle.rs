//! Request spacing for paginated listings.
//!
//! Keeps a minimum interval between consecutive page requests so a long
//! enumeration does not hammer the wiki.

use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Enforces a minimum interval between request starts
#[derive(Debug)]
pub struct PageThrottle {
    /// Minimum spacing between two requests
    min_interval: Duration,
    /// Last request timestamp
    last_request: Option<Instant>,
}

impl PageThrottle {
    /// Create a new throttle; a zero interval never waits
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: None,
        }
    }

    /// Wait until the next request may start, then record it
    pub async fn acquire(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();

            if elapsed < self.min_interval {
                let wait_time = self.min_interval - elapsed;
                tracing::debug!(
                    wait_ms = wait_time.as_millis(),
                    "Throttle: waiting before next page"
                );
                sleep(wait_time).await;
            }
        }

        self.last_request = Some(Instant::now());
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
