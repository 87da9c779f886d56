// host.rs - Tick scheduling for the frame loop

use std::time::{Duration, Instant};

use tracing::debug;

/// Decides when the frame loop runs a generation.
///
/// Ticking stops while `paused` (stop / continue) or while a paint gesture
/// is in progress. Ending a gesture never clears an explicit pause.
#[derive(Debug, Clone)]
pub struct HostLoop {
    paused: bool,
    gesture: bool,
    update_interval: Duration,
    last_update: Instant,
}

impl HostLoop {
    pub fn new(tick_rate: u32, now: Instant) -> Self {
        Self {
            paused: false,
            gesture: false,
            update_interval: interval_for(tick_rate),
            last_update: now,
        }
    }

    pub fn tick_rate(&self) -> u32 {
        (1.0 / self.update_interval.as_secs_f64()).round() as u32
    }

    pub fn set_tick_rate(&mut self, tick_rate: u32) {
        self.update_interval = interval_for(tick_rate);
    }

    pub fn update_interval(&self) -> Duration {
        self.update_interval
    }

    pub fn is_running(&self) -> bool {
        !self.paused && !self.gesture
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn stop(&mut self) {
        self.paused = true;
        debug!("ticking stopped");
    }

    pub fn resume(&mut self, now: Instant) {
        self.paused = false;
        self.last_update = now;
        debug!("ticking resumed");
    }

    pub fn begin_gesture(&mut self) {
        self.gesture = true;
    }

    pub fn end_gesture(&mut self, now: Instant) {
        if self.gesture {
            self.gesture = false;
            self.last_update = now;
        }
    }

    pub fn in_gesture(&self) -> bool {
        self.gesture
    }

    /// True when a generation should run at `now`; records the tick.
    pub fn tick_due(&mut self, now: Instant) -> bool {
        if !self.is_running() {
            return false;
        }
        if now.saturating_duration_since(self.last_update) < self.update_interval {
            return false;
        }
        self.last_update = now;
        true
    }

    /// Time left until the next tick, for repaint scheduling.
    pub fn time_until_tick(&self, now: Instant) -> Duration {
        self.update_interval
            .saturating_sub(now.saturating_duration_since(self.last_update))
    }
}

fn interval_for(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / tick_rate.max(1) as u64)
}
