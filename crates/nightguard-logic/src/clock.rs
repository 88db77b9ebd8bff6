//! Night clock - wall-clock milliseconds to bounded in-game seconds.
//!
//! The clock is anchored at the wall-clock instant the night started. Elapsed
//! time is derived from that anchor on every call, so it never drifts with
//! frame timing and never runs past the end of the night.

use serde::{Deserialize, Serialize};

use crate::constants::NIGHT_DURATION_SECONDS;

/// Wall-clock anchor for the current night.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NightClock {
    /// Wall-clock time (ms) at which the current night began.
    pub night_start_ms: u64,
    /// Night length in seconds.
    pub duration_seconds: f64,
}

impl NightClock {
    pub fn new(night_start_ms: u64) -> Self {
        Self::with_duration(night_start_ms, NIGHT_DURATION_SECONDS)
    }

    pub fn with_duration(night_start_ms: u64, duration_seconds: f64) -> Self {
        Self {
            night_start_ms,
            duration_seconds,
        }
    }

    /// Elapsed night seconds at `now_ms`, clamped to `[0, duration]`.
    ///
    /// A timestamp earlier than the anchor reads as the start of the night.
    pub fn tick(&self, now_ms: u64) -> f64 {
        let delta_ms = now_ms.saturating_sub(self.night_start_ms);
        (delta_ms as f64 / 1000.0).min(self.duration_seconds)
    }

    pub fn is_night_over(&self, elapsed_seconds: f64) -> bool {
        elapsed_seconds >= self.duration_seconds
    }

    /// Re-anchor the clock for a new night.
    pub fn restart(&mut self, now_ms: u64) {
        self.night_start_ms = now_ms;
    }
}

/// 12-hour display time shown on the office HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTime {
    pub hour: u8,
    pub minute: u8,
}

impl std::fmt::Display for DisplayTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02} AM", self.hour, self.minute)
    }
}

/// Map elapsed night seconds onto the HUD clock.
///
/// Every real minute is one in-game hour starting at 12 AM, so a full night
/// ends at 6 AM. The minute field is the seconds within the current hour.
pub fn display_time(elapsed_seconds: f64) -> DisplayTime {
    let elapsed = elapsed_seconds.max(0.0);
    let hours = (elapsed / 60.0).floor() as u64 + 12;
    let hour = match hours % 12 {
        0 => 12,
        h => h as u8,
    };
    let minute = (elapsed % 60.0).floor() as u8;
    DisplayTime { hour, minute }
}
