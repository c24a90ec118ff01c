//! Adapter implementations for port traits.
//!
//! - `live/` — Real pipeline backends
//! - `recording/` — Record interactions to cassettes
//! - `replaying/` — Replay interactions from cassettes

pub mod live;
pub mod recording;
pub mod replaying;
