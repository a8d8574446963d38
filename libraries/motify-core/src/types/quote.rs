/// Quote of the day types
use chrono::{DateTime, Days, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// An inspirational quote
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// Quote text
    pub text: String,
    /// Quote author
    pub author: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// Quote shown while nothing has been fetched yet
    pub fn placeholder() -> Self {
        Self::new("Well begun is half done", "Aristotle")
    }
}

/// A fetched quote together with the moment it was fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteHolder {
    /// When the quote was fetched
    pub date_updated: DateTime<Utc>,
    /// The quote
    pub quote: Quote,
}

impl QuoteHolder {
    /// Wrap a quote fetched at `now`
    pub fn new(quote: Quote, now: DateTime<Utc>) -> Self {
        Self {
            date_updated: now,
            quote,
        }
    }

    /// True when the quote was fetched on the same local calendar day as `now`
    pub fn is_current(&self, now: DateTime<Local>) -> bool {
        self.date_updated.with_timezone(&Local).date_naive() == now.date_naive()
    }
}

/// Start of the local day following `now`
///
/// Falls back to 24 hours after `now` when local midnight is ambiguous or skipped.
pub fn next_local_midnight(now: DateTime<Local>) -> DateTime<Local> {
    now.date_naive()
        .checked_add_days(Days::new(1))
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .and_then(|midnight| Local.from_local_datetime(&midnight).earliest())
        .unwrap_or_else(|| now + chrono::Duration::hours(24))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn holder_fetched_today_is_current() {
        let now = Local::now();
        let holder = QuoteHolder::new(Quote::placeholder(), now.with_timezone(&Utc));
        assert!(holder.is_current(now));
    }

    #[test]
    fn holder_from_two_days_ago_is_stale() {
        let now = Local::now();
        let holder = QuoteHolder::new(
            Quote::placeholder(),
            (now - chrono::Duration::days(2)).with_timezone(&Utc),
        );
        assert!(!holder.is_current(now));
    }

    #[test]
    fn next_midnight_is_tomorrow() {
        let now = Local::now();
        let midnight = next_local_midnight(now);
        assert!(midnight > now);
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
    }
}
