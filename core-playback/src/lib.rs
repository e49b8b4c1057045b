//! # Playback Module
//!
//! Provides the play queue for the jukebox's single active player.
//!
//! ## Overview
//!
//! This module handles:
//! - The combined play queue derived from the playlist view
//! - The single active-entry pointer and its reassignment rules

pub mod queue;

pub use queue::PlayQueue;
