//! Song repository trait and in-memory implementation
//!
//! The repository owns the canonical, insertion-ordered collection. It never
//! re-sorts on its own; ordering beyond insertion order is the query layer's
//! job. Mutations are serialized behind `&mut self` (single-writer
//! discipline), so concurrent projection reads never observe partial state.

use crate::error::{LibraryError, Result};
use crate::models::{SongEntry, SongId};
use chrono::NaiveDate;
use tracing::debug;

/// Song repository interface for collection mutations and reads
pub trait SongRepository: Send {
    /// Insert a new entry at the front of the collection, so the most
    /// recently added entry is first regardless of its `date`.
    ///
    /// # Errors
    /// Returns error if:
    /// - An entry with the same id already exists (the collection is left
    ///   unchanged; ids are never silently overwritten)
    /// - Entry validation fails
    fn add(&mut self, entry: SongEntry) -> Result<()>;

    /// Delete the entry with the given id.
    ///
    /// Removal of an absent id is a no-op: the call returns `false` and a
    /// second delete of the same id never errors.
    ///
    /// # Returns
    /// - `true` if an entry was removed
    /// - `false` if no entry matched
    fn remove(&mut self, id: &SongId) -> bool;

    /// Set the favorite flag on one entry. Idempotent: setting an already
    /// matching value leaves state identical.
    ///
    /// # Errors
    /// Returns `NotFound` if the id is absent.
    fn set_favorite(&mut self, id: &SongId, value: bool) -> Result<()>;

    /// Set the favorite flag on every entry whose UTC calendar date equals
    /// `date`.
    ///
    /// # Returns
    /// The number of entries touched (zero when no entry matches).
    fn set_favorite_by_date(&mut self, date: NaiveDate, value: bool) -> usize;

    /// Find an entry by its id
    fn find_by_id(&self, id: &SongId) -> Option<&SongEntry>;

    /// All entries in insertion order (most recently added first)
    fn entries(&self) -> &[SongEntry];

    /// Count entries in the collection
    fn len(&self) -> usize;

    /// Check whether the collection is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The persisted-state layout: the full collection as an ordered list.
    fn snapshot(&self) -> Vec<SongEntry>;

    /// Replace the collection with a previously captured snapshot.
    ///
    /// # Errors
    /// Returns `DuplicateId` if the snapshot repeats an id; the collection
    /// is left unchanged in that case.
    fn restore(&mut self, entries: Vec<SongEntry>) -> Result<()>;
}

/// In-memory implementation of `SongRepository`
#[derive(Debug, Default, Clone)]
pub struct MemorySongRepository {
    entries: Vec<SongEntry>,
}

impl MemorySongRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl SongRepository for MemorySongRepository {
    fn add(&mut self, entry: SongEntry) -> Result<()> {
        entry.validate().map_err(|e| LibraryError::InvalidInput {
            field: "SongEntry".to_string(),
            message: e,
        })?;

        if self.entries.iter().any(|e| e.id == entry.id) {
            return Err(LibraryError::DuplicateId {
                id: entry.id.to_string(),
            });
        }

        debug!(song_id = %entry.id, title = %entry.title, "Adding song entry");
        self.entries.insert(0, entry);
        Ok(())
    }

    fn remove(&mut self, id: &SongId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != *id);
        let removed = self.entries.len() < before;

        if removed {
            debug!(song_id = %id, "Removed song entry");
        } else {
            debug!(song_id = %id, "Remove was a no-op, id not present");
        }

        removed
    }

    fn set_favorite(&mut self, id: &SongId, value: bool) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == *id)
            .ok_or_else(|| LibraryError::NotFound { id: id.to_string() })?;

        entry.is_favorite = value;
        debug!(song_id = %id, favorite = value, "Updated favorite flag");
        Ok(())
    }

    fn set_favorite_by_date(&mut self, date: NaiveDate, value: bool) -> usize {
        let mut touched = 0;
        for entry in self
            .entries
            .iter_mut()
            .filter(|e| e.calendar_date() == date)
        {
            entry.is_favorite = value;
            touched += 1;
        }

        debug!(%date, favorite = value, touched, "Updated favorite flag by date");
        touched
    }

    fn find_by_id(&self, id: &SongId) -> Option<&SongEntry> {
        self.entries.iter().find(|e| e.id == *id)
    }

    fn entries(&self) -> &[SongEntry] {
        &self.entries
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn snapshot(&self) -> Vec<SongEntry> {
        self.entries.clone()
    }

    fn restore(&mut self, entries: Vec<SongEntry>) -> Result<()> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.id == entry.id) {
                return Err(LibraryError::DuplicateId {
                    id: entry.id.to_string(),
                });
            }
        }

        debug!(count = entries.len(), "Restored song collection");
        self.entries = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(title: &str, artist: &str, day: u32) -> SongEntry {
        SongEntry::new(
            title,
            artist,
            Utc.with_ymd_and_hms(2023, 10, day, 12, 0, 0).unwrap(),
            format!("https://youtu.be/{}", title.replace(' ', "")),
        )
    }

    #[test]
    fn test_add_inserts_at_front() {
        let mut repo = MemorySongRepository::new();
        repo.add(entry("Perfect", "Ed Sheeran", 26)).unwrap();
        repo.add(entry("All of Me", "John Legend", 27)).unwrap();

        assert_eq!(repo.entries()[0].title, "All of Me");
        assert_eq!(repo.entries()[1].title, "Perfect");
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut repo = MemorySongRepository::new();
        let song = entry("Perfect", "Ed Sheeran", 26);
        let dup = song.clone();

        repo.add(song).unwrap();
        let err = repo.add(dup).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId { .. }));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_entry() {
        let mut repo = MemorySongRepository::new();
        let mut song = entry("Perfect", "Ed Sheeran", 26);
        song.artist = String::new();

        assert!(repo.add(song).is_err());
        assert!(repo.is_empty());
    }

    #[test]
    fn test_remove_twice_is_noop() {
        let mut repo = MemorySongRepository::new();
        let song = entry("Perfect", "Ed Sheeran", 26);
        let id = song.id;
        repo.add(song).unwrap();

        assert!(repo.remove(&id));
        assert!(!repo.remove(&id));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_set_favorite_is_idempotent() {
        let mut repo = MemorySongRepository::new();
        let song = entry("Perfect", "Ed Sheeran", 26);
        let id = song.id;
        repo.add(song).unwrap();

        repo.set_favorite(&id, true).unwrap();
        let once = repo.snapshot();
        repo.set_favorite(&id, true).unwrap();
        assert_eq!(once, repo.snapshot());
    }

    #[test]
    fn test_set_favorite_missing_id() {
        let mut repo = MemorySongRepository::new();
        let err = repo.set_favorite(&SongId::new(), true).unwrap_err();
        assert!(matches!(err, LibraryError::NotFound { .. }));
    }

    #[test]
    fn test_set_favorite_by_date_touches_matching_day_only() {
        let mut repo = MemorySongRepository::new();
        repo.add(entry("Perfect", "Ed Sheeran", 26)).unwrap();
        repo.add(entry("All of Me", "John Legend", 27)).unwrap();
        repo.add(entry("A Thousand Years", "Christina Perri", 27))
            .unwrap();

        let day = chrono::NaiveDate::from_ymd_opt(2023, 10, 27).unwrap();
        assert_eq!(repo.set_favorite_by_date(day, true), 2);

        for e in repo.entries() {
            assert_eq!(e.is_favorite, e.calendar_date() == day);
        }
    }

    #[test]
    fn test_snapshot_restore_roundtrip() {
        let mut repo = MemorySongRepository::new();
        repo.add(entry("Perfect", "Ed Sheeran", 26)).unwrap();
        repo.add(entry("All of Me", "John Legend", 27)).unwrap();

        let snapshot = repo.snapshot();
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: Vec<SongEntry> = serde_json::from_str(&json).unwrap();

        let mut restored = MemorySongRepository::new();
        restored.restore(decoded).unwrap();
        assert_eq!(restored.entries(), repo.entries());
    }

    #[test]
    fn test_restore_rejects_duplicate_ids() {
        let song = entry("Perfect", "Ed Sheeran", 26);
        let dup = song.clone();

        let mut repo = MemorySongRepository::new();
        let err = repo.restore(vec![song, dup]).unwrap_err();
        assert!(matches!(err, LibraryError::DuplicateId { .. }));
        assert!(repo.is_empty());
    }
}
