//! Daily quote service and widget timeline.

use chrono::{DateTime, Local, Utc};
use motify_core::{next_local_midnight, KeyValueStore, Quote, QuoteHolder, QuoteSource};
use motify_storage::{keys, load, save};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One widget timeline entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetEntry {
    /// When the entry becomes current
    pub date: DateTime<Local>,
    /// Quote to show
    pub quote: Quote,
}

impl WidgetEntry {
    /// Entry shown before any quote was fetched.
    pub fn placeholder(now: DateTime<Local>) -> Self {
        Self {
            date: now,
            quote: Quote::placeholder(),
        }
    }
}

/// Quote of the day, cached for the rest of the local day.
pub struct DailyQuote {
    source: Arc<dyn QuoteSource>,
    store: Arc<dyn KeyValueStore>,
}

impl DailyQuote {
    /// Create the service.
    pub fn new(source: Arc<dyn QuoteSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { source, store }
    }

    /// Today's quote.
    ///
    /// Returns the stored quote when it was fetched today. Otherwise fetches
    /// and stores a new one; when that fails, returns the stale quote if any.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store fails
    pub async fn current(&self, now: DateTime<Local>) -> motify_core::Result<Option<QuoteHolder>> {
        let stored = match load::<QuoteHolder>(self.store.as_ref(), keys::QUOTE).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored quote");
                None
            }
        };

        if let Some(holder) = stored.as_ref().filter(|h| h.is_current(now)) {
            debug!(date = %holder.date_updated, "Using today's stored quote");
            return Ok(Some(holder.clone()));
        }

        match self.source.fetch_quote().await {
            Ok(quote) => {
                let holder = QuoteHolder::new(quote, now.with_timezone(&Utc));
                save(self.store.as_ref(), keys::QUOTE, &holder).await?;
                info!(author = %holder.quote.author, "Fetched quote of the day");
                Ok(Some(holder))
            }
            Err(e) => {
                warn!(error = %e, stale = stored.is_some(), "Quote fetch failed");
                Ok(stored)
            }
        }
    }

    /// Entry for a widget snapshot: a fresh quote dated `now`, or the placeholder.
    pub async fn snapshot_entry(&self, now: DateTime<Local>) -> WidgetEntry {
        match self.source.fetch_quote().await {
            Ok(quote) => WidgetEntry { date: now, quote },
            Err(e) => {
                warn!(error = %e, "Quote fetch failed, using placeholder");
                WidgetEntry::placeholder(now)
            }
        }
    }

    /// Timeline entry dated the next local midnight.
    ///
    /// Holds a freshly fetched quote, or the placeholder when the fetch fails.
    pub async fn widget_entry(&self, now: DateTime<Local>) -> WidgetEntry {
        let date = next_local_midnight(now);
        let quote = match self.source.fetch_quote().await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "Quote fetch failed, using placeholder");
                Quote::placeholder()
            }
        };
        WidgetEntry { date, quote }
    }
}

impl std::fmt::Debug for DailyQuote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyQuote").finish_non_exhaustive()
    }
}
