/// Timer activity types
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Hours/minutes/seconds triple used by the countdown timer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Time {
    /// Hours
    pub hours: u32,
    /// Minutes (0-59 once normalized)
    pub minutes: u32,
    /// Seconds (0-59 once normalized)
    pub seconds: u32,
}

impl Time {
    /// Create a new time
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Build a normalized time from a number of seconds
    ///
    /// Negative and non-finite values clamp to zero; fractions are truncated.
    pub fn from_interval(interval: f64) -> Self {
        let total = if interval.is_finite() && interval > 0.0 {
            interval as u64
        } else {
            0
        };
        Self {
            hours: u32::try_from(total / 3600).unwrap_or(u32::MAX),
            minutes: ((total / 60) % 60) as u32,
            seconds: (total % 60) as u32,
        }
    }

    /// Total number of seconds
    pub fn time_interval(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60 + u64::from(self.seconds)
    }

    /// True when the time is zero
    pub fn is_zero(&self) -> bool {
        self.time_interval() == 0
    }

    /// `HH:MM:SS`
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }

    /// Parse `HH:MM:SS`, `MM:SS` or `SS`
    pub fn parse(s: &str) -> Option<Self> {
        let parts = s
            .trim()
            .split(':')
            .map(|p| p.parse::<u32>().ok())
            .collect::<Option<Vec<_>>>()?;
        match parts.as_slice() {
            [h, m, s] => Some(Self::new(*h, *m, *s)),
            [m, s] => Some(Self::new(0, *m, *s)),
            [s] => Some(Self::new(0, 0, *s)),
            _ => None,
        }
    }
}

/// A named activity with a default countdown duration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    pub id: String,
    /// Short name (at most [`Activity::NAME_LIMIT`] characters)
    pub name: String,
    /// Text shown while the timer runs (at most [`Activity::DISPLAY_TEXT_LIMIT`] characters)
    pub display_text: String,
    /// Countdown preset
    pub default_time: Time,
}

impl Activity {
    /// Maximum name length in characters
    pub const NAME_LIMIT: usize = 20;

    /// Maximum display text length in characters
    pub const DISPLAY_TEXT_LIMIT: usize = 40;

    /// Create an activity with a fresh id
    pub fn new(name: &str, display_text: &str, default_time: Time) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: truncate_chars(name, Self::NAME_LIMIT),
            display_text: truncate_chars(display_text, Self::DISPLAY_TEXT_LIMIT),
            default_time,
        }
    }

    /// Rename, truncating to the name limit
    pub fn set_name(&mut self, name: &str) {
        self.name = truncate_chars(name, Self::NAME_LIMIT);
    }

    /// Change the display text, truncating to its limit
    pub fn set_display_text(&mut self, text: &str) {
        self.display_text = truncate_chars(text, Self::DISPLAY_TEXT_LIMIT);
    }
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_round_trip() {
        let time = Time::new(5, 30, 15);
        assert_eq!(time.time_interval(), 19815);
        assert_eq!(Time::from_interval(19815.7), time);
        assert_eq!(Time::from_interval(-4.0), Time::default());
    }

    #[test]
    fn formatted_pads_every_field() {
        assert_eq!(Time::new(1, 2, 3).formatted(), "01:02:03");
    }

    #[test]
    fn parse_accepts_short_forms() {
        assert_eq!(Time::parse("01:30:00"), Some(Time::new(1, 30, 0)));
        assert_eq!(Time::parse("25:00"), Some(Time::new(0, 25, 0)));
        assert_eq!(Time::parse("90"), Some(Time::new(0, 0, 90)));
        assert_eq!(Time::parse("a:b"), None);
        assert_eq!(Time::parse("1:2:3:4"), None);
    }

    #[test]
    fn activity_text_is_capped() {
        let mut activity = Activity::new(&"x".repeat(30), &"y".repeat(50), Time::default());
        assert_eq!(activity.name.chars().count(), Activity::NAME_LIMIT);
        assert_eq!(activity.display_text.chars().count(), Activity::DISPLAY_TEXT_LIMIT);

        activity.set_name("Work");
        assert_eq!(activity.name, "Work");
    }
}
