use anyhow::{Context, Result, bail};
use std::time::{Duration, Instant};

pub const FRAME_COUNT: usize = 100;
pub const MIN_INTERVAL_MS: u64 = 10;

pub const INVALID_DURATION: &str = "Duration must be a number.";

/// Parse the duration entry, in seconds.
pub fn parse_duration(text: &str) -> Result<f64> {
    let secs: f64 = text.trim().parse().context(INVALID_DURATION)?;
    if !secs.is_finite() {
        bail!(INVALID_DURATION);
    }
    Ok(secs)
}

/// Spread `FRAME_COUNT` frames over the requested duration.
pub fn frame_interval(duration_secs: f64) -> Duration {
    let ms = (duration_secs * 1000.0 / FRAME_COUNT as f64).trunc();
    // negative and tiny durations land on the floor
    let ms = if ms > MIN_INTERVAL_MS as f64 {
        ms as u64
    } else {
        MIN_INTERVAL_MS
    };
    Duration::from_millis(ms)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Running(usize),
    Finished(usize),
}

impl Playback {
    pub fn frame(self) -> usize {
        match self {
            Playback::Running(f) | Playback::Finished(f) => f,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Animation {
    started: Instant,
    interval: Duration,
    repeat: bool,
}

impl Animation {
    pub fn start(interval: Duration, repeat: bool, now: Instant) -> Self {
        Self {
            started: now,
            interval: interval.max(Duration::from_millis(MIN_INTERVAL_MS)),
            repeat,
        }
    }

    fn ticks(&self, now: Instant) -> u128 {
        now.saturating_duration_since(self.started).as_nanos() / self.interval.as_nanos()
    }

    pub fn frame_at(&self, now: Instant) -> Playback {
        let ticks = self.ticks(now);
        if self.repeat {
            Playback::Running((ticks % FRAME_COUNT as u128) as usize)
        } else if ticks >= (FRAME_COUNT - 1) as u128 {
            Playback::Finished(FRAME_COUNT - 1)
        } else {
            Playback::Running(ticks as usize)
        }
    }

    /// Time left until the next frame boundary.
    pub fn next_deadline(&self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.started).as_nanos();
        let interval = self.interval.as_nanos();
        let next = (self.ticks(now) + 1) * interval;
        // always below one interval, so it fits
        Duration::from_nanos(next.saturating_sub(elapsed) as u64)
    }
}
