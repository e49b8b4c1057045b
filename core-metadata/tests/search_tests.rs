//! Tests for the search provider contracts and retry policy
//!
//! This test suite verifies:
//! - Mock implementations of the provider traits
//! - Retry semantics: errors retry, definitive misses do not
//! - Error handling once attempts are exhausted

use async_trait::async_trait;
use core_metadata::search::{
    with_retry, LyricsSearchProvider, LyricsSearchQuery, RetryConfig, VideoSearchHit,
    VideoSearchProvider, VideoSearchQuery,
};
use core_metadata::{MetadataError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ============================================================================
// Mock Providers
// ============================================================================

/// Video search that fails a fixed number of times before succeeding.
struct FlakyVideoSearch {
    failures_remaining: AtomicUsize,
    calls: AtomicUsize,
}

impl FlakyVideoSearch {
    fn new(failures: usize) -> Self {
        Self {
            failures_remaining: AtomicUsize::new(failures),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl VideoSearchProvider for FlakyVideoSearch {
    async fn search(&self, _query: &VideoSearchQuery) -> Result<Option<VideoSearchHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let failing = self
            .failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(MetadataError::VideoSearchFailed("transient".to_string()));
        }

        Ok(Some(VideoSearchHit {
            video_url: "https://www.youtube.com/watch?v=2Vv-BfVoq4g".to_string(),
            is_accurate: true,
            reason: None,
        }))
    }
}

/// Lyric search that always reports a definitive miss.
struct MissingLyrics {
    calls: AtomicUsize,
}

#[async_trait]
impl LyricsSearchProvider for MissingLyrics {
    async fn fetch(&self, _query: &LyricsSearchQuery) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(None)
    }
}

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_attempts: 3,
        base_delay_ms: 1,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_retry_recovers_from_transient_failures() {
    let provider = Arc::new(FlakyVideoSearch::new(2));
    let query = VideoSearchQuery::new("Perfect", "Ed Sheeran");

    let hit = with_retry(&fast_retry(), "video_search", || {
        let provider = provider.clone();
        let query = query.clone();
        async move { provider.search(&query).await }
    })
    .await
    .unwrap()
    .unwrap();

    assert!(hit.is_usable());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_gives_up_after_max_attempts() {
    let provider = Arc::new(FlakyVideoSearch::new(usize::MAX));
    let query = VideoSearchQuery::new("Perfect", "Ed Sheeran");

    let err = with_retry(&fast_retry(), "video_search", || {
        let provider = provider.clone();
        let query = query.clone();
        async move { provider.search(&query).await }
    })
    .await
    .unwrap_err();

    assert!(matches!(err, MetadataError::VideoSearchFailed(_)));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_definitive_miss_is_not_retried() {
    let provider = Arc::new(MissingLyrics {
        calls: AtomicUsize::new(0),
    });
    let query = LyricsSearchQuery::new("Perfect", "Ed Sheeran")
        .with_window(Some("0:55".to_string()), None);

    let result = with_retry(&fast_retry(), "lyric_search", || {
        let provider = provider.clone();
        let query = query.clone();
        async move { provider.fetch(&query).await }
    })
    .await
    .unwrap();

    assert!(result.is_none());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
