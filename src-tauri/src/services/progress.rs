use std::time::Duration;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Cosmetic progress counter. It advances one unit per tick up to a ceiling
/// and has no relation to bytes transferred.
#[derive(Debug, Clone, Copy)]
pub struct ProgressAnimation {
    tick: Duration,
    ceiling: u8,
}

impl ProgressAnimation {
    pub fn new(tick: Duration, ceiling: u8) -> Self {
        Self { tick, ceiling }
    }

    /// Calls `on_step` with 1, 2, ... ceiling, one call per tick, and returns
    /// on the tick after the ceiling is reached.
    pub async fn run<F>(&self, mut on_step: F)
    where
        F: FnMut(u8) + Send,
    {
        let mut ticker = interval_at(Instant::now() + self.tick, self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut width = 0u8;
        loop {
            ticker.tick().await;
            if width >= self.ceiling {
                break;
            }
            width += 1;
            on_step(width);
        }
    }
}
