//! # Jukebox service façade
//!
//! Wires the song collection, the play queue, and the external search
//! providers into the workflow the rendering layer drives: resolve, mutate,
//! then re-derive both views. Every mutation runs to completion (including
//! the queue rebuild) before the caller reads again, so observers never see
//! partial state.

pub mod error;

pub use error::{CoreError, Result};

use chrono::{DateTime, NaiveDate, Utc};
use core_library::models::{SongEntry, SongId};
use core_library::query::{
    playlist, timeline, DateGroup, PlaylistSort, PlaylistView, TimelineFilter, TimelineSort,
};
use core_library::repository::{MemorySongRepository, SongRepository};
use core_metadata::embed;
use core_metadata::search::{
    with_retry, CoverImageProvider, LyricsSearchProvider, LyricsSearchQuery, RetryConfig,
    VideoSearchProvider, VideoSearchQuery,
};
use core_playback::PlayQueue;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

// =============================================================================
// Requests
// =============================================================================

/// User input for the add-song workflow.
///
/// The video reference is always resolved; lyrics and a generated cover are
/// opt-in. An offset window only matters when lyrics are requested, where it
/// narrows the search to that range (it is stored on the entry either way).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSongRequest {
    pub title: String,
    pub artist: String,
    pub date: DateTime<Utc>,
    pub message: Option<String>,
    pub start_offset: Option<String>,
    pub end_offset: Option<String>,
    pub fetch_lyrics: bool,
    pub generate_cover: bool,
}

impl AddSongRequest {
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            date,
            message: None,
            start_offset: None,
            end_offset: None,
            fetch_lyrics: false,
            generate_cover: false,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
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

    pub fn fetch_lyrics(mut self) -> Self {
        self.fetch_lyrics = true;
        self
    }

    pub fn generate_cover(mut self) -> Self {
        self.generate_cover = true;
        self
    }
}

// =============================================================================
// Service
// =============================================================================

/// Primary façade exposed to host applications.
pub struct JukeboxService {
    repository: MemorySongRepository,
    queue: PlayQueue,
    playlist_sort: PlaylistSort,
    video_search: Arc<dyn VideoSearchProvider>,
    lyrics_search: Option<Arc<dyn LyricsSearchProvider>>,
    cover_images: Option<Arc<dyn CoverImageProvider>>,
    retry: RetryConfig,
}

impl JukeboxService {
    /// Create a service around the required video search provider.
    pub fn new(video_search: Arc<dyn VideoSearchProvider>) -> Self {
        Self {
            repository: MemorySongRepository::new(),
            queue: PlayQueue::new(),
            playlist_sort: PlaylistSort::default(),
            video_search,
            lyrics_search: None,
            cover_images: None,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_lyrics_provider(mut self, provider: Arc<dyn LyricsSearchProvider>) -> Self {
        self.lyrics_search = Some(provider);
        self
    }

    pub fn with_cover_provider(mut self, provider: Arc<dyn CoverImageProvider>) -> Self {
        self.cover_images = Some(provider);
        self
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    // -------------------------------------------------------------------------
    // Add-song workflow
    // -------------------------------------------------------------------------

    /// Resolve a song request against the providers and insert the entry.
    ///
    /// All resolution happens before the first mutation, so any failure
    /// (no match, inaccurate match, missing lyrics when requested, image
    /// generation failure) leaves the repository untouched.
    pub async fn add_song(&mut self, request: AddSongRequest) -> Result<SongEntry> {
        let video_url = self.resolve_video(&request).await?;
        let lyrics = self.resolve_lyrics(&request).await?;
        let photo_url = self.resolve_cover(&request).await?;

        let mut entry = SongEntry::new(request.title, request.artist, request.date, video_url)
            .with_offsets(request.start_offset, request.end_offset);

        if let Some(message) = request.message {
            entry = entry.with_message(message);
        }
        if let Some(text) = lyrics {
            entry = entry.with_lyrics(text);
        }
        if let Some(url) = photo_url {
            entry = entry.with_photo_url(url);
        }
        if let Some(url) = embed::thumbnail_url(&entry.video_url) {
            entry = entry.with_thumbnail_url(url);
        }

        self.repository.add(entry.clone())?;
        self.rebuild_queue();

        info!(song_id = %entry.id, title = %entry.title, artist = %entry.artist, "Added song");
        Ok(entry)
    }

    async fn resolve_video(&self, request: &AddSongRequest) -> Result<String> {
        let query = VideoSearchQuery::new(&request.title, &request.artist);
        let provider = Arc::clone(&self.video_search);

        let hit = with_retry(&self.retry, "video_search", || {
            let provider = Arc::clone(&provider);
            let query = query.clone();
            async move { provider.search(&query).await }
        })
        .await?;

        match hit {
            Some(hit) if hit.is_usable() => Ok(hit.video_url),
            Some(hit) => Err(CoreError::Resolution {
                reason: hit
                    .reason
                    .unwrap_or_else(|| "no accurate video match".to_string()),
            }),
            None => Err(CoreError::Resolution {
                reason: "no video found".to_string(),
            }),
        }
    }

    async fn resolve_lyrics(&self, request: &AddSongRequest) -> Result<Option<String>> {
        if !request.fetch_lyrics {
            return Ok(None);
        }

        let provider = self
            .lyrics_search
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| CoreError::Resolution {
                reason: "lyrics requested but no lyric provider is configured".to_string(),
            })?;

        let query = LyricsSearchQuery::new(&request.title, &request.artist)
            .with_window(request.start_offset.clone(), request.end_offset.clone());

        let lyrics = with_retry(&self.retry, "lyric_search", || {
            let provider = Arc::clone(&provider);
            let query = query.clone();
            async move { provider.fetch(&query).await }
        })
        .await?;

        match lyrics {
            Some(text) => Ok(Some(text)),
            None => Err(CoreError::Resolution {
                reason: "no lyrics found".to_string(),
            }),
        }
    }

    async fn resolve_cover(&self, request: &AddSongRequest) -> Result<Option<String>> {
        if !request.generate_cover {
            return Ok(None);
        }

        let provider = self
            .cover_images
            .as_ref()
            .map(Arc::clone)
            .ok_or_else(|| CoreError::Resolution {
                reason: "cover requested but no image provider is configured".to_string(),
            })?;

        let title = request.title.clone();
        let artist = request.artist.clone();
        let url = with_retry(&self.retry, "cover_image", || {
            let provider = Arc::clone(&provider);
            let title = title.clone();
            let artist = artist.clone();
            async move { provider.generate(&title, &artist).await }
        })
        .await?;

        Ok(Some(url))
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Delete an entry. Deleting an absent id is a no-op returning `false`.
    pub fn remove_song(&mut self, id: &SongId) -> bool {
        let removed = self.repository.remove(id);
        if removed {
            self.rebuild_queue();
            info!(song_id = %id, "Removed song");
        }
        removed
    }

    /// Set the favorite flag on one entry.
    pub fn set_favorite(&mut self, id: &SongId, value: bool) -> Result<()> {
        self.repository.set_favorite(id, value)?;
        self.rebuild_queue();
        Ok(())
    }

    /// Set the favorite flag on every entry of a calendar date; returns the
    /// number of entries touched.
    pub fn set_favorite_by_date(&mut self, date: NaiveDate, value: bool) -> usize {
        let touched = self.repository.set_favorite_by_date(date, value);
        if touched > 0 {
            self.rebuild_queue();
        }
        touched
    }

    /// Change the playlist ordering the queue is derived from.
    pub fn set_playlist_sort(&mut self, sort: PlaylistSort) {
        self.playlist_sort = sort;
        self.rebuild_queue();
    }

    /// Make an entry the active one. Ids not in the queue are ignored.
    pub fn select_active(&mut self, id: &SongId) -> bool {
        self.queue.select(id)
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    /// The timeline view: date buckets under the given ordering and filter.
    pub fn timeline(&self, sort: TimelineSort, filter: TimelineFilter) -> Vec<DateGroup> {
        timeline(self.repository.entries(), sort, filter)
    }

    /// The playlist view under the current playlist ordering.
    pub fn playlist_view(&self) -> PlaylistView {
        playlist(self.repository.entries(), self.playlist_sort)
    }

    /// The play queue (combined sequence plus active pointer).
    pub fn queue(&self) -> &PlayQueue {
        &self.queue
    }

    /// The currently active entry, if any.
    pub fn active_song(&self) -> Option<&SongEntry> {
        self.queue.active()
    }

    /// All entries in insertion order.
    pub fn songs(&self) -> &[SongEntry] {
        self.repository.entries()
    }

    /// One embeddable URL playing the whole queue in order, when at least
    /// one entry resolves.
    pub fn playlist_embed_url(&self) -> Option<String> {
        let urls: Vec<&str> = self
            .queue
            .entries()
            .iter()
            .map(|e| e.video_url.as_str())
            .collect();
        embed::playlist_url(&urls)
    }

    // -------------------------------------------------------------------------
    // Persistence
    // -------------------------------------------------------------------------

    /// The persisted-state layout: the collection as an ordered list.
    pub fn snapshot(&self) -> Vec<SongEntry> {
        self.repository.snapshot()
    }

    /// Replace the collection from a snapshot and rebuild the queue.
    pub fn restore(&mut self, entries: Vec<SongEntry>) -> Result<()> {
        self.repository.restore(entries)?;
        self.rebuild_queue();
        Ok(())
    }

    fn rebuild_queue(&mut self) {
        let view = playlist(self.repository.entries(), self.playlist_sort);
        self.queue.rebuild(&view);
    }
}
