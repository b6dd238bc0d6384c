//! Elapsed time value object

use std::fmt;
use std::time::Duration as StdDuration;

/// Length of one tick of the recording timer
pub const TICK_SECS: u64 = 1;

/// Elapsed recording time, counted in whole ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElapsedTime {
    seconds: u64,
}

impl ElapsedTime {
    /// Zero elapsed time
    pub const fn zero() -> Self {
        Self { seconds: 0 }
    }

    /// Create from whole seconds
    pub const fn from_secs(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Get elapsed time in seconds
    pub const fn as_secs(&self) -> u64 {
        self.seconds
    }

    /// Elapsed time after one more tick
    pub const fn advanced(&self) -> Self {
        Self {
            seconds: self.seconds.saturating_add(TICK_SECS),
        }
    }

    /// Period of the recording timer
    pub const fn tick_period() -> StdDuration {
        StdDuration::from_secs(TICK_SECS)
    }
}

impl fmt::Display for ElapsedTime {
    /// Formats as `MM:SS`, or `H:MM:SS` once an hour has passed
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.seconds / 3600;
        let minutes = (self.seconds % 3600) / 60;
        let seconds = self.seconds % 60;

        if hours == 0 {
            write!(f, "{:02}:{:02}", minutes, seconds)
        } else {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
        }
    }
}
