//! Fixed-timestep clock using an accumulator pattern.
//!
//! The host calls `update()` with whatever wall-clock timestamps it has.
//! GameTime turns them into whole ticks so the battery drain and every
//! delayed puzzle transition advance deterministically and can be tested
//! without real time.

use crate::config::ClockConfig;

/// Largest gap fed into the accumulator at once. A phone put to sleep
/// mid-game should not drain several charge units in one frame.
const MAX_FRAME_MS: f64 = 500.0;

pub struct GameTime {
    /// Milliseconds per tick (e.g. 100ms = 10 ticks/sec)
    ms_per_tick: f64,
    /// Accumulated milliseconds not yet consumed as ticks
    accumulator: f64,
    /// Total elapsed ticks since creation
    pub total_ticks: u64,
    /// Timestamp of the last update (ms), None if first frame
    last_timestamp: Option<f64>,
}

impl GameTime {
    pub fn new(clock: &ClockConfig) -> Self {
        Self {
            ms_per_tick: clock.ms_per_tick(),
            accumulator: 0.0,
            total_ticks: 0,
            last_timestamp: None,
        }
    }

    /// Feed a wall-clock timestamp. Returns the number of ticks to pass to
    /// `Session::tick`.
    pub fn update(&mut self, now_ms: f64) -> u64 {
        self.advance_to(now_ms, MAX_FRAME_MS)
    }

    /// Like `update`, but counts the whole gap. For hosts that only wake up
    /// on input and must still account for the time in between.
    pub fn catch_up(&mut self, now_ms: f64) -> u64 {
        self.advance_to(now_ms, f64::INFINITY)
    }

    fn advance_to(&mut self, now_ms: f64, max_delta: f64) -> u64 {
        let delta = match self.last_timestamp {
            Some(prev) => (now_ms - prev).clamp(0.0, max_delta),
            None => 0.0,
        };
        self.last_timestamp = Some(now_ms);

        self.accumulator += delta;
        let ticks = (self.accumulator / self.ms_per_tick) as u64;
        self.accumulator -= ticks as f64 * self.ms_per_tick;
        self.total_ticks += ticks;
        ticks
    }

    /// Forget the previous timestamp, e.g. after the host was suspended.
    pub fn resync(&mut self) {
        self.last_timestamp = None;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ten_per_sec() -> GameTime {
        GameTime::new(&ClockConfig { ticks_per_sec: 10 })
    }

    #[test]
    fn first_frame_returns_zero_ticks() {
        let mut gt = ten_per_sec();
        assert_eq!(gt.update(0.0), 0);
    }

    #[test]
    fn one_tick_at_100ms() {
        let mut gt = ten_per_sec();
        gt.update(0.0);
        assert_eq!(gt.update(100.0), 1);
        assert_eq!(gt.total_ticks, 1);
    }

    #[test]
    fn remainder_carried_over() {
        let mut gt = ten_per_sec();
        gt.update(0.0);
        assert_eq!(gt.update(150.0), 1);
        // 50ms left over + 50ms new = one more tick
        assert_eq!(gt.update(200.0), 1);
        assert_eq!(gt.total_ticks, 2);
    }

    #[test]
    fn clamp_large_delta() {
        let mut gt = ten_per_sec();
        gt.update(0.0);
        assert_eq!(gt.update(10_000.0), 5);
    }

    #[test]
    fn catch_up_counts_the_whole_gap() {
        let mut gt = ten_per_sec();
        gt.catch_up(0.0);
        assert_eq!(gt.catch_up(28_000.0), 280);
        assert_eq!(gt.catch_up(28_050.0), 0);
        assert_eq!(gt.catch_up(20_000.0), 0);
        assert_eq!(gt.total_ticks, 280);
    }

    #[test]
    fn clock_going_backwards_adds_nothing() {
        let mut gt = ten_per_sec();
        gt.update(1_000.0);
        assert_eq!(gt.update(400.0), 0);
    }

    #[test]
    fn resync_drops_pending_time() {
        let mut gt = ten_per_sec();
        gt.update(0.0);
        gt.update(90.0);
        gt.resync();
        assert_eq!(gt.update(5_000.0), 0);
        assert_eq!(gt.update(5_010.0), 0);
        assert_eq!(gt.update(5_100.0), 1);
    }

    #[test]
    fn steady_60fps() {
        let mut gt = ten_per_sec();
        gt.update(0.0);
        let mut total = 0u64;
        for i in 1..=60 {
            total += gt.update(f64::from(i) * 16.667);
        }
        assert!((9..=11).contains(&total), "expected ~10 ticks, got {}", total);
    }
}
