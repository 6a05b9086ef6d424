//! Battery countdown: the session's soft time limit.

use crate::config::{BatteryConfig, ClockConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drain {
    /// Still charged (possibly lower than before).
    Running,
    /// Reached zero on this advance. Reported exactly once.
    Depleted,
    /// Already at zero before this advance.
    Dead,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    remaining: u32,
    start: u32,
    interval_ticks: u64,
    /// Ticks accumulated toward the next unit of drain.
    into_interval: u64,
}

impl Countdown {
    pub fn new(battery: &BatteryConfig, clock: &ClockConfig) -> Self {
        Self {
            remaining: battery.start_charge,
            start: battery.start_charge,
            interval_ticks: clock.ms_to_ticks(battery.drain_interval_ms).max(1),
            into_interval: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn advance(&mut self, ticks: u64) -> Drain {
        if self.remaining == 0 {
            return Drain::Dead;
        }
        self.into_interval += ticks;
        while self.into_interval >= self.interval_ticks && self.remaining > 0 {
            self.into_interval -= self.interval_ticks;
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.into_interval = 0;
            Drain::Depleted
        } else {
            Drain::Running
        }
    }

    pub fn reset(&mut self) {
        self.remaining = self.start;
        self.into_interval = 0;
    }
}
