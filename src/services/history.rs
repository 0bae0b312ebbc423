//! Bounded undo history of configuration snapshots.

use crate::constants::HISTORY_LIMIT;
use crate::models::SiteConfiguration;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Stack of prior configurations, most recent first.
///
/// Holds at most [`HISTORY_LIMIT`] snapshots; pushing beyond that drops the
/// oldest one. Serializes as a plain JSON array, head first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: VecDeque<SiteConfiguration>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `previous` as the most recent snapshot.
    ///
    /// Evicts the oldest snapshot once the stack grows past the limit.
    pub fn push(&mut self, previous: SiteConfiguration) {
        self.entries.push_front(previous);
        self.entries.truncate(HISTORY_LIMIT);
    }

    /// Removes and returns the most recent snapshot, or `None` when empty.
    pub fn restore(&mut self) -> Option<SiteConfiguration> {
        self.entries.pop_front()
    }

    /// Gets the most recent snapshot without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&SiteConfiguration> {
        self.entries.front()
    }

    /// Number of stored snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks whether there is nothing to restore.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates snapshots from most recent to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &SiteConfiguration> {
        self.entries.iter()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Re-applies the size bound, e.g. after loading an oversized stack.
    #[must_use]
    pub fn bounded(mut self) -> Self {
        self.entries.truncate(HISTORY_LIMIT);
        self
    }
}
