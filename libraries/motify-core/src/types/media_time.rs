//! Fixed-point media time
//!
//! Positions and durations are stored as signed ticks at a fixed timescale so
//! that arithmetic stays exact. On the wire (and in the cached catalog) a time
//! is a plain floating-point number of seconds.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Ticks per second
pub const TIMESCALE: i64 = 600;

/// Signed fixed-point time value (`TIMESCALE` ticks per second)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MediaTime {
    ticks: i64,
}

/// Clock layout used by [`MediaTime::format_clock`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockFormat {
    /// `M:SS`
    Minutes,
    /// `H:MM:SS`
    Hours,
    /// `HH:MM:SS`
    Full,
}

impl MediaTime {
    /// Zero time
    pub const ZERO: Self = Self { ticks: 0 };

    /// Create from raw ticks
    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    /// Create from seconds, rounding to the nearest tick
    ///
    /// Non-finite input maps to zero.
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() {
            return Self::ZERO;
        }
        Self {
            ticks: (seconds * TIMESCALE as f64).round() as i64,
        }
    }

    /// Create from a `Duration` (truncated to whole ticks)
    pub fn from_duration(duration: Duration) -> Self {
        let ticks = duration.as_nanos() * TIMESCALE as u128 / 1_000_000_000;
        Self {
            ticks: i64::try_from(ticks).unwrap_or(i64::MAX),
        }
    }

    /// Raw ticks
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Time in seconds
    pub fn seconds(&self) -> f64 {
        self.ticks as f64 / TIMESCALE as f64
    }

    /// Whole seconds, truncated toward zero
    pub fn whole_seconds(&self) -> i64 {
        self.ticks / TIMESCALE
    }

    /// Convert to a `Duration`; negative times clamp to zero
    pub fn to_duration(&self) -> Duration {
        if self.ticks <= 0 {
            return Duration::ZERO;
        }
        Duration::from_nanos((self.ticks as u64).saturating_mul(1_000_000_000) / TIMESCALE as u64)
    }

    /// Saturating subtraction
    pub fn saturating_sub(self, other: Self) -> Self {
        Self {
            ticks: self.ticks.saturating_sub(other.ticks),
        }
    }

    /// Format whole seconds as a clock string
    ///
    /// Negative values render as zero.
    pub fn format_clock(&self, format: ClockFormat) -> String {
        let total = self.whole_seconds().max(0);
        let hours = total / 3600;
        let minutes = (total / 60) % 60;
        let seconds = total % 60;
        match format {
            ClockFormat::Minutes => format!("{}:{:02}", minutes, seconds),
            ClockFormat::Hours => format!("{}:{:02}:{:02}", hours, minutes, seconds),
            ClockFormat::Full => format!("{:02}:{:02}:{:02}", hours, minutes, seconds),
        }
    }
}

impl fmt::Display for MediaTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.seconds())
    }
}

impl Serialize for MediaTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.seconds())
    }
}

impl<'de> Deserialize<'de> for MediaTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let seconds = f64::deserialize(deserializer)?;
        Ok(Self::from_seconds(seconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seconds_round_to_nearest_tick() {
        let t = MediaTime::from_seconds(2.5);
        assert_eq!(t.ticks(), 1500);
        assert_eq!(t.seconds(), 2.5);
        assert_eq!(MediaTime::from_seconds(f64::NAN), MediaTime::ZERO);
    }

    #[test]
    fn duration_conversion() {
        let t = MediaTime::from_duration(Duration::from_millis(100));
        assert_eq!(t.ticks(), 60);
        assert_eq!(t.to_duration(), Duration::from_millis(100));
        assert_eq!(MediaTime::from_ticks(-5).to_duration(), Duration::ZERO);
    }

    #[test]
    fn serializes_as_seconds() {
        let json = serde_json::to_string(&MediaTime::from_seconds(3540.0)).unwrap();
        assert_eq!(json, "3540.0");

        let back: MediaTime = serde_json::from_str("12.25").unwrap();
        assert_eq!(back, MediaTime::from_seconds(12.25));
    }

    #[test]
    fn clock_formats() {
        let t = MediaTime::from_seconds(3725.0); // 1h 2m 5s
        assert_eq!(t.format_clock(ClockFormat::Hours), "1:02:05");
        assert_eq!(t.format_clock(ClockFormat::Full), "01:02:05");
        assert_eq!(
            MediaTime::from_seconds(65.9).format_clock(ClockFormat::Minutes),
            "1:05"
        );
        assert_eq!(
            MediaTime::from_seconds(-3.0).format_clock(ClockFormat::Minutes),
            "0:00"
        );
    }
}
