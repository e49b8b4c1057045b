//! External search provider contracts
//!
//! The jukebox resolves song input against AI-backed search services: a
//! video search that maps (title, artist) to an embeddable reference with an
//! accuracy flag, a lyric search that can target a time window, and a cover
//! image generator. The services themselves live outside the core; this
//! module defines the contracts and the retry policy their calls run under.

use crate::error::{MetadataError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

// =============================================================================
// Video Search
// =============================================================================

/// Video search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSearchQuery {
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
}

impl VideoSearchQuery {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }
}

/// A resolved video reference as returned by the search service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSearchHit {
    /// URL of the best matching embeddable video; empty when nothing
    /// suitable was found
    pub video_url: String,
    /// Whether the service considers the result an accurate match for the
    /// given song and artist
    pub is_accurate: bool,
    /// Brief explanation when no suitable video was found
    pub reason: Option<String>,
}

impl VideoSearchHit {
    /// A hit only feeds the add-song workflow when it is accurate and
    /// actually carries a URL; anything else counts as a miss.
    pub fn is_usable(&self) -> bool {
        self.is_accurate && !self.video_url.trim().is_empty()
    }
}

/// Trait for video search implementations
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Search for the best embeddable video for a song.
    ///
    /// # Returns
    /// * `Ok(Some(hit))` if the service produced a result (check
    ///   `is_usable` before trusting it)
    /// * `Ok(None)` if the service explicitly found nothing
    /// * `Err` on transport or service failure
    async fn search(&self, query: &VideoSearchQuery) -> Result<Option<VideoSearchHit>>;
}

// =============================================================================
// Lyric Search
// =============================================================================

/// Lyric search query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LyricsSearchQuery {
    /// Song title
    pub title: String,
    /// Performing artist
    pub artist: String,
    /// Start of the requested snippet window (`m:ss`), full sheet when absent
    pub start: Option<String>,
    /// End of the requested snippet window (`m:ss`)
    pub end: Option<String>,
}

impl LyricsSearchQuery {
    /// Query for the full lyric sheet
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            start: None,
            end: None,
        }
    }

    /// Restrict the query to a time window
    pub fn with_window(mut self, start: Option<String>, end: Option<String>) -> Self {
        self.start = start;
        self.end = end;
        self
    }
}

/// Trait for lyric search implementations
#[async_trait]
pub trait LyricsSearchProvider: Send + Sync {
    /// Fetch lyrics for a song, optionally limited to a time window.
    ///
    /// # Returns
    /// * `Ok(Some(text))` with non-empty lyric text
    /// * `Ok(None)` if no lyrics were found (an empty string from the
    ///   service counts as not found)
    /// * `Err` on transport or service failure
    async fn fetch(&self, query: &LyricsSearchQuery) -> Result<Option<String>>;
}

// =============================================================================
// Cover Image Generation
// =============================================================================

/// Trait for cover image generation implementations
#[async_trait]
pub trait CoverImageProvider: Send + Sync {
    /// Generate a cover image for a song.
    ///
    /// # Returns
    /// An image data reference (URL or data URI). Unlike the search
    /// contracts there is no "not found": the service either produces an
    /// image or fails.
    async fn generate(&self, title: &str, artist: &str) -> Result<String>;
}

// =============================================================================
// Retry
// =============================================================================

/// Retry configuration for provider calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum retry attempts
    pub max_attempts: usize,
    /// Base delay for exponential backoff
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 100,
        }
    }
}

impl RetryConfig {
    /// Calculate backoff duration for attempt number
    pub fn backoff_duration(&self, attempt: usize) -> Duration {
        let delay_ms = self.base_delay_ms * 2u64.pow(attempt as u32);
        Duration::from_millis(delay_ms.min(10000)) // Cap at 10 seconds
    }
}

/// Run a provider call with retry and exponential backoff.
///
/// Retries on `Err` only; `Ok(None)` is a definitive miss and returned as
/// is. The last error is returned once attempts are exhausted.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, operation: &str, mut call: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < config.max_attempts {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                attempts += 1;
                warn!(operation, error = %e, attempt = attempts, "Provider call failed");
                last_error = Some(e);

                if attempts < config.max_attempts {
                    let delay = config.backoff_duration(attempts);
                    debug!(
                        operation,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying after failure"
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        MetadataError::VideoSearchFailed("All retry attempts exhausted".to_string())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_hit_usability() {
        let hit = VideoSearchHit {
            video_url: "https://youtu.be/2Vv-BfVoq4g".to_string(),
            is_accurate: true,
            reason: None,
        };
        assert!(hit.is_usable());

        let inaccurate = VideoSearchHit {
            is_accurate: false,
            ..hit.clone()
        };
        assert!(!inaccurate.is_usable());

        let empty = VideoSearchHit {
            video_url: "  ".to_string(),
            is_accurate: true,
            reason: Some("No lyric video found.".to_string()),
        };
        assert!(!empty.is_usable());
    }

    #[test]
    fn test_lyrics_query_window() {
        let query = LyricsSearchQuery::new("Perfect", "Ed Sheeran")
            .with_window(Some("0:55".to_string()), Some("1:15".to_string()));

        assert_eq!(query.start.as_deref(), Some("0:55"));
        assert_eq!(query.end.as_deref(), Some("1:15"));

        let full = LyricsSearchQuery::new("Perfect", "Ed Sheeran");
        assert!(full.start.is_none() && full.end.is_none());
    }

    #[test]
    fn test_retry_config_backoff() {
        let config = RetryConfig::default();

        assert_eq!(config.backoff_duration(0).as_millis(), 100);
        assert_eq!(config.backoff_duration(1).as_millis(), 200);
        assert_eq!(config.backoff_duration(2).as_millis(), 400);
        assert_eq!(config.backoff_duration(10).as_millis(), 10000); // Capped at 10s
    }
}
