//! Character stage for visual-novel scenes.
//!
//! Tracks which characters are on screen, fades them on and off, highlights
//! the current speaker, and tells the narrative script when it may move on.
//! Drawing is delegated to a [`engine::host::StageHost`].

pub mod core;
pub mod engine;
pub mod game;
