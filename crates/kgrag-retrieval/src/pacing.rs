//! Cosmetic pauses between published phases so observers can render each one.

use std::time::Duration;

use async_trait::async_trait;

/// Delay inserted between the `seeds`, `traversing` and `complete` phases.
#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Sleeps for a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct SleepPacer {
    delay: Duration,
}

impl SleepPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl Pacer for SleepPacer {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never pauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPacing;

#[async_trait]
impl Pacer for NoPacing {
    async fn pause(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sleep_pacer_waits_configured_delay() {
        let start = tokio::time::Instant::now();
        SleepPacer::new(Duration::from_millis(800)).pause().await;
        assert!(start.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn no_pacing_returns_immediately() {
        let start = tokio::time::Instant::now();
        NoPacing.pause().await;
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
