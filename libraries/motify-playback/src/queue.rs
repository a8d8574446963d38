//! Play queue
//!
//! Ordered list of pending play requests. Entries carry their own identity,
//! so the same track can be queued more than once.

use crate::error::{PlaybackError, Result};
use motify_core::{offsets, QueueElement};

/// Ordered queue of [`QueueElement`]s, head first
#[derive(Debug, Clone, Default)]
pub struct Queue {
    elements: Vec<QueueElement>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a queue from existing entries
    pub fn from_elements(elements: Vec<QueueElement>) -> Self {
        Self { elements }
    }

    /// Insert at the head (plays next)
    pub fn push_front(&mut self, element: QueueElement) {
        self.elements.insert(0, element);
    }

    /// Insert at the tail
    pub fn push_back(&mut self, element: QueueElement) {
        self.elements.push(element);
    }

    /// Look at the head without removing it
    pub fn peek_front(&self) -> Option<&QueueElement> {
        self.elements.first()
    }

    /// Remove and return the head
    pub fn pop_front(&mut self) -> Option<QueueElement> {
        if self.elements.is_empty() {
            None
        } else {
            Some(self.elements.remove(0))
        }
    }

    /// Remove entries at the given positions
    ///
    /// Positions are relative to the queue before removal. Duplicate positions
    /// are ignored. If any position is out of range nothing is removed.
    pub fn remove_at(&mut self, indices: &[usize]) -> Result<Vec<QueueElement>> {
        let sorted = self.validated(indices)?;
        Ok(offsets::remove_offsets(&mut self.elements, &sorted))
    }

    /// Move the entries at `from` so they land before the entry currently at `to`
    ///
    /// `to == len()` moves the entries to the tail. Moved entries keep their
    /// relative order; no entry is lost or duplicated.
    pub fn move_offsets(&mut self, from: &[usize], to: usize) -> Result<()> {
        if to > self.elements.len() {
            return Err(PlaybackError::IndexOutOfBounds(to));
        }
        let sorted = self.validated(from)?;
        offsets::move_offsets(&mut self.elements, &sorted, to);
        Ok(())
    }

    /// Keep only entries matching the predicate
    ///
    /// Returns the number of removed entries.
    pub fn retain<F>(&mut self, keep: F) -> usize
    where
        F: FnMut(&QueueElement) -> bool,
    {
        let before = self.elements.len();
        self.elements.retain(keep);
        before - self.elements.len()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// All entries, head first
    pub fn elements(&self) -> &[QueueElement] {
        &self.elements
    }

    /// Get entry at index
    pub fn get(&self, index: usize) -> Option<&QueueElement> {
        self.elements.get(index)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Sorted, deduplicated copy of `indices`, all in range
    fn validated(&self, indices: &[usize]) -> Result<Vec<usize>> {
        offsets::sorted_offsets(indices, self.elements.len())
            .map_err(PlaybackError::IndexOutOfBounds)
    }
}
