//! Workspace placeholder crate.
//!
//! This crate exists to expose the workspace crates behind a single
//! dependency (e.g., `core-service`, `core-metadata`, `core-playback`).
//! Host applications can depend on `jukebox-workspace` and enable the
//! documented features without needing to wire each crate individually.
