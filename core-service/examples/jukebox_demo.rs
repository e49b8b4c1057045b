//! # Jukebox Service Usage Example
//!
//! This example demonstrates the full workflow against a canned search
//! provider: add songs, favorite a date, and walk the derived views.
//!
//! Run with: `cargo run --example jukebox_demo --package core-service`

use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use core_library::query::{TimelineFilter, TimelineSort};
use core_metadata::search::{VideoSearchHit, VideoSearchProvider, VideoSearchQuery};
use core_service::{AddSongRequest, JukeboxService};
use std::sync::Arc;

// ============================================================================
// Canned Search Provider (for demonstration)
// ============================================================================

/// Resolves a few well-known songs from a fixed table.
struct CannedVideoSearch;

#[async_trait]
impl VideoSearchProvider for CannedVideoSearch {
    async fn search(&self, query: &VideoSearchQuery) -> core_metadata::Result<Option<VideoSearchHit>> {
        let url = match query.title.as_str() {
            "Perfect" => "https://www.youtube.com/watch?v=2Vv-BfVoq4g",
            "All of Me" => "https://www.youtube.com/watch?v=450p7goxZqg",
            "A Thousand Years" => "https://www.youtube.com/watch?v=rtOvBOTyX00",
            _ => {
                return Ok(Some(VideoSearchHit {
                    video_url: String::new(),
                    is_accurate: false,
                    reason: Some("Not in the demo catalog.".to_string()),
                }))
            }
        };

        Ok(Some(VideoSearchHit {
            video_url: url.to_string(),
            is_accurate: true,
            reason: None,
        }))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut service = JukeboxService::new(Arc::new(CannedVideoSearch));

    service
        .add_song(
            AddSongRequest::new(
                "Perfect",
                "Ed Sheeran",
                Utc.with_ymd_and_hms(2023, 10, 26, 0, 0, 0).unwrap(),
            )
            .with_message("For the one who makes everything perfect.")
            .with_offsets(Some("0:55".to_string()), None),
        )
        .await?;

    service
        .add_song(AddSongRequest::new(
            "All of Me",
            "John Legend",
            Utc.with_ymd_and_hms(2023, 10, 27, 0, 0, 0).unwrap(),
        ))
        .await?;

    service
        .add_song(AddSongRequest::new(
            "A Thousand Years",
            "Christina Perri",
            Utc.with_ymd_and_hms(2023, 10, 27, 0, 0, 0).unwrap(),
        ))
        .await?;

    // A song outside the catalog fails loudly and leaves the collection alone.
    let miss = service
        .add_song(AddSongRequest::new(
            "Unknown Song",
            "Unknown Artist",
            Utc::now(),
        ))
        .await;
    println!("adding an unknown song: {}\n", miss.unwrap_err());

    // Favorite everything on the 27th in one stroke.
    let day = NaiveDate::from_ymd_opt(2023, 10, 27).unwrap();
    service.set_favorite_by_date(day, true);

    println!("timeline (newest first):");
    for group in service.timeline(TimelineSort::NewestFirst, TimelineFilter::All) {
        let marker = if group.all_favorites { " *" } else { "" };
        println!("  {}{}", group.date, marker);
        for song in &group.songs {
            println!("    {} — {}", song.artist, song.title);
        }
    }

    println!("\nplay queue (favorites first):");
    for song in service.queue().entries() {
        let active = service
            .active_song()
            .is_some_and(|a| a.id == song.id);
        let cursor = if active { ">" } else { " " };
        println!("  {cursor} {} — {}", song.artist, song.title);
    }

    if let Some(url) = service.playlist_embed_url() {
        println!("\nplaylist embed: {url}");
    }

    Ok(())
}
