//! Domain models for the song collection
//!
//! This module contains the song entry model with validation and the
//! identifier newtype used across the workspace.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a song entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SongId(pub Uuid);

impl SongId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for SongId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Domain Models
// =============================================================================

/// A single song in the shared jukebox.
///
/// Identity is immutable; `is_favorite` is the only field mutated after
/// creation. Removal is the only other lifecycle event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongEntry {
    /// Unique identifier, assigned at creation, never reused
    pub id: SongId,

    // Metadata
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// The instant the song is associated with; grouping compares the
    /// UTC calendar date only, never the time of day
    pub date: DateTime<Utc>,
    /// Free-text dedication shown with the entry
    pub message: Option<String>,

    // Media references
    /// External video URL the entry plays from
    pub video_url: String,
    /// Optional image URL or data reference
    pub photo_url: Option<String>,
    /// Thumbnail derived from `video_url`
    pub thumbnail_url: Option<String>,

    // Lyrics
    /// Full lyric sheet or a bounded snippet; which one it is gets decided
    /// at display time, not stored here
    pub lyrics: Option<String>,
    /// Start of the lyric/playback window (`m:ss` or `mm:ss`)
    pub start_offset: Option<String>,
    /// End of the lyric/playback window (`m:ss` or `mm:ss`)
    pub end_offset: Option<String>,

    /// Favorite flag, defaults to false
    pub is_favorite: bool,
}

impl SongEntry {
    /// Create a new entry with the required fields; optional fields start
    /// empty and are attached with the `with_*` builders.
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        date: DateTime<Utc>,
        video_url: impl Into<String>,
    ) -> Self {
        Self {
            id: SongId::new(),
            title: title.into(),
            artist: artist.into(),
            date,
            message: None,
            video_url: video_url.into(),
            photo_url: None,
            thumbnail_url: None,
            lyrics: None,
            start_offset: None,
            end_offset: None,
            is_favorite: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_photo_url(mut self, photo_url: impl Into<String>) -> Self {
        self.photo_url = Some(photo_url.into());
        self
    }

    pub fn with_thumbnail_url(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    pub fn with_lyrics(mut self, lyrics: impl Into<String>) -> Self {
        self.lyrics = Some(lyrics.into());
        self
    }

    pub fn with_offsets(
        mut self,
        start_offset: Option<String>,
        end_offset: Option<String>,
    ) -> Self {
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        self
    }

    /// Validate entry data
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Song title cannot be empty".to_string());
        }

        if self.artist.trim().is_empty() {
            return Err("Artist name cannot be empty".to_string());
        }

        if self.video_url.trim().is_empty() {
            return Err("Video URL cannot be empty".to_string());
        }

        Ok(())
    }

    /// The UTC calendar date this entry is grouped under.
    ///
    /// Bucketing is fixed to the UTC calendar day so grouping stays
    /// deterministic regardless of the host's locale.
    pub fn calendar_date(&self) -> NaiveDate {
        self.date.date_naive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry() -> SongEntry {
        SongEntry::new(
            "Perfect",
            "Ed Sheeran",
            Utc.with_ymd_and_hms(2023, 10, 26, 21, 30, 0).unwrap(),
            "https://www.youtube.com/watch?v=2Vv-BfVoq4g",
        )
    }

    #[test]
    fn test_song_id_display_roundtrip() {
        let id = SongId::new();
        let parsed = SongId::from_string(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_new_entry_defaults() {
        let song = entry();
        assert!(!song.is_favorite);
        assert!(song.message.is_none());
        assert!(song.lyrics.is_none());
        assert!(song.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_blank_fields() {
        let mut song = entry();
        song.title = "   ".to_string();
        assert!(song.validate().is_err());

        let mut song = entry();
        song.artist = String::new();
        assert!(song.validate().is_err());

        let mut song = entry();
        song.video_url = String::new();
        assert!(song.validate().is_err());
    }

    #[test]
    fn test_calendar_date_ignores_time_of_day() {
        let song = entry();
        assert_eq!(
            song.calendar_date(),
            NaiveDate::from_ymd_opt(2023, 10, 26).unwrap()
        );

        let late = SongEntry::new(
            "All of Me",
            "John Legend",
            Utc.with_ymd_and_hms(2023, 10, 26, 23, 59, 59).unwrap(),
            "https://youtu.be/450p7goxZqg",
        );
        assert_eq!(song.calendar_date(), late.calendar_date());
    }

    #[test]
    fn test_builder_attaches_optional_fields() {
        let song = entry()
            .with_message("For the one who makes everything perfect.")
            .with_lyrics("I found a love for me")
            .with_offsets(Some("0:55".to_string()), None);

        assert!(song.message.is_some());
        assert_eq!(song.start_offset.as_deref(), Some("0:55"));
        assert!(song.end_offset.is_none());
    }
}
