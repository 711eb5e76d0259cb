//! Browser clock: wall time from `Date.now()` through chrono's wasmbind
//! feature, timers from gloo-timers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use gloo_timers::future::TimeoutFuture;

use insight_core::ports::ClockPort;

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserClock;

impl BrowserClock {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl ClockPort for BrowserClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, ms: u64) {
        // setTimeout takes an i32-ranged delay
        let ms = u32::try_from(ms).unwrap_or(u32::MAX).min(i32::MAX as u32);
        TimeoutFuture::new(ms).await;
    }
}
