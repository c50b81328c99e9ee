//! Simulated backend latency
//!
//! Every ledger operation waits a random delay before touching the
//! snapshot, so the presentation layer sees realistic loading states.

use std::time::Duration;

use rand::Rng;

use crate::config::LatencySettings;

/// Inclusive delay range in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    min_ms: u64,
    max_ms: u64,
}

impl Latency {
    /// No delay at all
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn fixed(ms: u64) -> Self {
        Self {
            min_ms: ms,
            max_ms: ms,
        }
    }

    /// Random delay in `[min_ms, max_ms]`; bounds are swapped if reversed
    pub fn range(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn from_settings(settings: &LatencySettings) -> Self {
        Self::range(settings.min_ms, settings.max_ms)
    }

    pub fn is_none(&self) -> bool {
        self.max_ms == 0
    }

    /// Draw one delay from the range
    pub fn sample(&self) -> Duration {
        if self.min_ms == self.max_ms {
            return Duration::from_millis(self.min_ms);
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Sleep for one sampled delay
    pub async fn pause(&self) {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::from_settings(&LatencySettings::default())
    }
}
