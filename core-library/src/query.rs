//! High-level query API for the song collection.
//!
//! This module derives the two read views from the flat collection: the
//! timeline (entries bucketed by calendar date) and the playlist (a single
//! ordered play queue split into favorites and the rest). Projections are
//! pure functions of (entries, parameters); they are recomputed on every
//! call and hold no hidden state.

use crate::models::SongEntry;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Sort & Filter Options
// =============================================================================

/// Ordering of the timeline's date buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimelineSort {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Which entries the timeline shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TimelineFilter {
    #[default]
    All,
    FavoritesOnly,
}

/// Ordering of the playlist queue.
///
/// Favorites precede non-favorites in the combined queue under every sort;
/// the variants control ordering within each partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlaylistSort {
    /// Favorites first, the rest by date descending.
    #[default]
    FavoritesFirst,
    NewestFirst,
    OldestFirst,
    TitleAz,
}

// =============================================================================
// View Types
// =============================================================================

/// One timeline bucket: every entry sharing a UTC calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateGroup {
    /// The shared calendar date (unique across groups).
    pub date: NaiveDate,
    /// Entries on that date, ordered by artist.
    pub songs: Vec<SongEntry>,
    /// Derived, not stored: true only when every entry in the bucket is
    /// favorited. The UI shows a bucket as favorited only when unanimous.
    pub all_favorites: bool,
}

/// The playlist view: favorites and the rest, each internally ordered,
/// combined into one play queue with favorites first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PlaylistView {
    pub favorites: Vec<SongEntry>,
    pub others: Vec<SongEntry>,
}

impl PlaylistView {
    /// The combined ordered play sequence (favorites, then others).
    pub fn queue(&self) -> impl Iterator<Item = &SongEntry> {
        self.favorites.iter().chain(self.others.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty() && self.others.is_empty()
    }

    pub fn len(&self) -> usize {
        self.favorites.len() + self.others.len()
    }
}

// =============================================================================
// Projections
// =============================================================================

/// Project the collection into date-bucketed timeline groups.
///
/// Entries are bucketed by their UTC calendar date; buckets are ordered by
/// `sort` and entries within a bucket by artist. Artist comparison is
/// case-insensitive (Unicode lowercase) and stable, so exact ties keep
/// insertion order. An empty input, or a filter that removes everything,
/// yields an empty sequence.
pub fn timeline(
    entries: &[SongEntry],
    sort: TimelineSort,
    filter: TimelineFilter,
) -> Vec<DateGroup> {
    let mut buckets: BTreeMap<NaiveDate, Vec<SongEntry>> = BTreeMap::new();

    for entry in entries {
        if filter == TimelineFilter::FavoritesOnly && !entry.is_favorite {
            continue;
        }
        buckets
            .entry(entry.calendar_date())
            .or_default()
            .push(entry.clone());
    }

    let mut groups: Vec<DateGroup> = buckets
        .into_iter()
        .map(|(date, mut songs)| {
            songs.sort_by(|a, b| a.artist.to_lowercase().cmp(&b.artist.to_lowercase()));
            let all_favorites = songs.iter().all(|s| s.is_favorite);
            DateGroup {
                date,
                songs,
                all_favorites,
            }
        })
        .collect();

    if sort == TimelineSort::NewestFirst {
        groups.reverse();
    }

    groups
}

/// Project the collection into the playlist view.
///
/// Entries are partitioned into favorites and others, each partition is
/// sorted per `sort`, and the combined queue always lists favorites first.
/// Sorts are stable: equal dates (or titles) keep insertion order.
pub fn playlist(entries: &[SongEntry], sort: PlaylistSort) -> PlaylistView {
    let (mut favorites, mut others): (Vec<SongEntry>, Vec<SongEntry>) =
        entries.iter().cloned().partition(|e| e.is_favorite);

    for partition in [&mut favorites, &mut others] {
        match sort {
            PlaylistSort::FavoritesFirst | PlaylistSort::NewestFirst => {
                partition.sort_by(|a, b| b.date.cmp(&a.date));
            }
            PlaylistSort::OldestFirst => {
                partition.sort_by(|a, b| a.date.cmp(&b.date));
            }
            PlaylistSort::TitleAz => {
                partition.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
            }
        }
    }

    PlaylistView { favorites, others }
}
