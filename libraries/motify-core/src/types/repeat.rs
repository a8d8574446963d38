/// Repeat option for the music player
use serde::{Deserialize, Serialize};

/// Repeat option
///
/// Cycles NoRepeat → RepeatAll → RepeatOne → NoRepeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatOption {
    /// Stop when the queue runs out
    #[default]
    NoRepeat,
    /// Re-append each finished track to the queue tail
    RepeatAll,
    /// Replay the current track when it ends
    RepeatOne,
}

impl RepeatOption {
    /// Next option in the cycle
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::NoRepeat => Self::RepeatAll,
            Self::RepeatAll => Self::RepeatOne,
            Self::RepeatOne => Self::NoRepeat,
        }
    }

    /// Convert to string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoRepeat => "no_repeat",
            Self::RepeatAll => "repeat_all",
            Self::RepeatOne => "repeat_one",
        }
    }

    /// Parse from string
    #[must_use]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "no_repeat" => Some(Self::NoRepeat),
            "repeat_all" => Some(Self::RepeatAll),
            "repeat_one" => Some(Self::RepeatOne),
            _ => None,
        }
    }
}

impl std::fmt::Display for RepeatOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_has_length_three() {
        for start in [
            RepeatOption::NoRepeat,
            RepeatOption::RepeatAll,
            RepeatOption::RepeatOne,
        ] {
            assert_ne!(start.next(), start);
            assert_eq!(start.next().next().next(), start);
        }
    }

    #[test]
    fn string_form_matches_serde() {
        for option in [
            RepeatOption::NoRepeat,
            RepeatOption::RepeatAll,
            RepeatOption::RepeatOne,
        ] {
            let json = serde_json::to_value(option).unwrap();
            assert_eq!(json, serde_json::json!(option.as_str()));
            assert_eq!(RepeatOption::from_str(option.as_str()), Some(option));
        }
        assert_eq!(RepeatOption::from_str("shuffle"), None);
    }
}
