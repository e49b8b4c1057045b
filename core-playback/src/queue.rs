//! Play queue with a single active entry
//!
//! The queue is a flattened copy of the playlist view (favorites first).
//! Exactly one entry can be active at a time; the pointer defaults to the
//! head of the queue and survives rebuilds while its entry remains present.

use core_library::models::{SongEntry, SongId};
use core_library::query::PlaylistView;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The ordered play queue and its active-entry pointer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayQueue {
    entries: Vec<SongEntry>,
    active: Option<SongId>,
}

impl PlayQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from a playlist view, activating the head entry.
    pub fn from_view(view: &PlaylistView) -> Self {
        let mut queue = Self::new();
        queue.rebuild(view);
        queue
    }

    /// Replace the queue contents after a collection change.
    ///
    /// The active pointer is kept while its entry is still present.
    /// Otherwise it reassigns to the new first entry of the combined
    /// sequence, or to nothing when the queue became empty.
    pub fn rebuild(&mut self, view: &PlaylistView) {
        self.entries = view.queue().cloned().collect();

        let still_present = self
            .active
            .is_some_and(|id| self.entries.iter().any(|e| e.id == id));

        if !still_present {
            let fallback = self.entries.first().map(|e| e.id);
            if self.active != fallback {
                match fallback {
                    Some(id) => debug!(song_id = %id, "Reassigned active queue entry"),
                    None => debug!("Cleared active queue entry, queue is empty"),
                }
            }
            self.active = fallback;
        }
    }

    /// Select an entry as active. Ids not in the queue are ignored.
    ///
    /// # Returns
    /// - `true` if the pointer moved to the requested entry
    /// - `false` if the id is not in the queue
    pub fn select(&mut self, id: &SongId) -> bool {
        if self.entries.iter().any(|e| e.id == *id) {
            self.active = Some(*id);
            true
        } else {
            debug!(song_id = %id, "Select ignored, id not in queue");
            false
        }
    }

    /// The currently active entry, if any
    pub fn active(&self) -> Option<&SongEntry> {
        let id = self.active?;
        self.entries.iter().find(|e| e.id == id)
    }

    /// Id of the currently active entry
    pub fn active_id(&self) -> Option<SongId> {
        self.active
    }

    /// Queue contents in play order (favorites first)
    pub fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
