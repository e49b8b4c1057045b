//! # Song Collection Module
//!
//! Owns the canonical song collection and provides the query API that
//! derives its views.
//!
//! ## Overview
//!
//! This module manages:
//! - The `SongEntry` domain model with validation
//! - The in-memory `SongRepository` (insertion-ordered, single-writer)
//! - Timeline and playlist projections with filtering and sorting

pub mod error;
pub mod models;
pub mod query;
pub mod repository;

pub use error::{LibraryError, Result};
pub use models::{SongEntry, SongId};
pub use query::{
    playlist, timeline, DateGroup, PlaylistSort, PlaylistView, TimelineFilter, TimelineSort,
};
pub use repository::{MemorySongRepository, SongRepository};
