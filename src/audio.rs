//! Playback subsystem: a single-session progress-tracking controller on
//! top of a swappable playback engine.
//!
//! `Player` owns the one active `PlaybackSession`; `PlaybackEngine` is the
//! seam to the actual decoder/output (rodio in production, a scripted fake
//! in tests).

mod controller;
mod engine;
mod probe;
mod types;

pub use controller::Player;
pub use engine::{EngineError, PlaybackEngine, RodioEngine};
pub use probe::probe_duration;
pub use types::PlaybackSession;

#[cfg(test)]
mod tests;
