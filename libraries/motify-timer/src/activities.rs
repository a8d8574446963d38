//! Activity presets
//!
//! Ordered list of named countdown presets plus the current selection.
//! Every change is written through to the key-value store.

use crate::error::{Result, TimerError};
use motify_core::{offsets, Activity, KeyValueStore, Time};
use motify_storage::{keys, load, save};
use std::sync::Arc;
use tracing::{debug, warn};

/// Name and display text of a freshly created activity
pub const NEW_ACTIVITY_NAME: &str = "New activity";

/// Persisted list of activities with an optional selection
pub struct ActivityBook {
    activities: Vec<Activity>,
    selected_id: Option<String>,
    store: Arc<dyn KeyValueStore>,
}

impl ActivityBook {
    /// Load activities and selection from the store
    ///
    /// Unreadable values are treated as absent. A stored selection that no
    /// longer names an activity is dropped and removed from the store.
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let activities = match load::<Vec<Activity>>(store.as_ref(), keys::ACTIVITIES).await {
            Ok(activities) => activities.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable activities");
                Vec::new()
            }
        };

        let stored_id = match load::<String>(store.as_ref(), keys::SELECTED_ACTIVITY_ID).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable activity selection");
                None
            }
        };

        let selected_id = match stored_id {
            Some(id) if activities.iter().any(|a| a.id == id) => Some(id),
            Some(id) => {
                debug!(activity_id = %id, "Dropping stale activity selection");
                store.remove(keys::SELECTED_ACTIVITY_ID).await?;
                None
            }
            None => None,
        };

        Ok(Self {
            activities,
            selected_id,
            store,
        })
    }

    /// All activities in display order
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Id of the selected activity
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// The selected activity, if it still exists
    pub fn selected(&self) -> Option<&Activity> {
        let id = self.selected_id.as_deref()?;
        self.activities.iter().find(|a| a.id == id)
    }

    /// Number of activities
    pub fn len(&self) -> usize {
        self.activities.len()
    }

    /// True when there are no activities
    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Append a new activity with default values
    pub async fn create(&mut self) -> Result<&Activity> {
        self.activities
            .push(Activity::new(NEW_ACTIVITY_NAME, NEW_ACTIVITY_NAME, Time::default()));
        self.save_activities().await?;
        let index = self.activities.len() - 1;
        Ok(&self.activities[index])
    }

    /// Append an existing activity
    pub async fn push(&mut self, activity: Activity) -> Result<()> {
        self.activities.push(activity);
        self.save_activities().await
    }

    /// Remove the activities at the given positions
    ///
    /// If any position is out of range nothing is removed.
    pub async fn delete(&mut self, indices: &[usize]) -> Result<Vec<Activity>> {
        let sorted = self.validated(indices)?;
        if sorted.is_empty() {
            return Ok(Vec::new());
        }

        let removed = offsets::remove_offsets(&mut self.activities, &sorted);
        self.save_activities().await?;
        Ok(removed)
    }

    /// Move the activities at `from` before the activity currently at `to`
    ///
    /// `to == len()` moves them to the end; moved items keep their order.
    pub async fn move_items(&mut self, from: &[usize], to: usize) -> Result<()> {
        if to > self.activities.len() {
            return Err(TimerError::IndexOutOfBounds(to));
        }
        let sorted = self.validated(from)?;
        if sorted.is_empty() {
            return Ok(());
        }

        offsets::move_offsets(&mut self.activities, &sorted, to);
        self.save_activities().await
    }

    /// Replace the activity at `index`
    pub async fn set(&mut self, activity: Activity, index: usize) -> Result<()> {
        let slot = self
            .activities
            .get_mut(index)
            .ok_or(TimerError::IndexOutOfBounds(index))?;
        if *slot == activity {
            return Ok(());
        }
        *slot = activity;
        self.save_activities().await
    }

    /// Select an activity by id, returning its preset time
    pub async fn select(&mut self, id: &str) -> Result<Time> {
        let time = self
            .activities
            .iter()
            .find(|a| a.id == id)
            .map(|a| a.default_time)
            .ok_or_else(|| TimerError::UnknownActivity(id.to_string()))?;

        if self.selected_id.as_deref() != Some(id) {
            self.selected_id = Some(id.to_string());
            save(self.store.as_ref(), keys::SELECTED_ACTIVITY_ID, id).await?;
        }
        Ok(time)
    }

    /// Clear the selection
    pub async fn unselect(&mut self) -> Result<()> {
        if self.selected_id.take().is_some() {
            self.store.remove(keys::SELECTED_ACTIVITY_ID).await?;
        }
        Ok(())
    }

    async fn save_activities(&self) -> Result<()> {
        debug!(count = self.activities.len(), "Saving activities");
        save(self.store.as_ref(), keys::ACTIVITIES, &self.activities).await?;
        Ok(())
    }

    /// Sorted, deduplicated copy of `indices`, all in range
    fn validated(&self, indices: &[usize]) -> Result<Vec<usize>> {
        offsets::sorted_offsets(indices, self.activities.len())
            .map_err(TimerError::IndexOutOfBounds)
    }
}
