use std::path::Path;
use std::time::Duration;

use super::engine::{EngineError, PlaybackEngine};
use super::types::PlaybackSession;

/// The playback/progress controller. Owns the engine and the single
/// session; all playback mutations go through here.
pub struct Player<E> {
    engine: E,
    session: PlaybackSession,
}

impl<E: PlaybackEngine> Player<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            session: PlaybackSession::default(),
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn playing_index(&self) -> Option<usize> {
        self.session.index
    }

    pub fn is_playing(&self) -> bool {
        self.session.playing
    }

    /// Start playing `path` as library index `index`. Any active session
    /// is stopped first; only one session exists at a time. The total
    /// duration is captured now (zero when the probe failed, which only
    /// disables end-of-track detection, not playback).
    pub fn play(&mut self, path: &Path, index: usize) -> Result<(), EngineError> {
        self.engine.release();
        if let Err(e) = self.engine.open(path) {
            // The old session's engine is gone; reporting it as still
            // playing would leave the UI polling a released engine.
            self.session = PlaybackSession::default();
            return Err(e);
        }
        let total = self.engine.duration();
        self.engine.start();

        self.session = PlaybackSession {
            index: Some(index),
            playing: true,
            elapsed: Duration::ZERO,
            total,
            progress: 0.0,
        };
        Ok(())
    }

    /// Valid from Playing; otherwise a no-op.
    pub fn pause(&mut self) {
        if self.session.playing {
            self.engine.pause();
            self.session.playing = false;
        }
    }

    /// Valid from Paused; a no-op when already playing or idle.
    pub fn resume(&mut self) {
        if !self.session.playing && self.session.index.is_some() {
            self.engine.resume();
            self.session.playing = true;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.session.playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// Reset to Idle. Progress is pinned at 1.0 as a visual completion
    /// marker; the next play clears it. Idempotent.
    pub fn stop(&mut self) {
        self.engine.release();
        self.session.index = None;
        self.session.playing = false;
        self.session.progress = 1.0;
    }

    /// Follow the playing clip when the library order moved it under us.
    pub fn retarget(&mut self, index: usize) {
        if self.session.index.is_some() {
            self.session.index = Some(index);
        }
    }

    /// One cooperative poll tick: O(1), gated strictly on the playing
    /// flag. Refreshes elapsed/progress and performs the implicit
    /// transition to Idle at end of track (progress exactly 1.0).
    pub fn poll(&mut self) {
        if !self.session.playing {
            return;
        }

        self.session.elapsed = self.engine.position();

        let total = self.session.total;
        if total.is_zero() {
            // Unknown duration: no fraction to derive and no end to detect.
            return;
        }

        let ratio = self.session.elapsed.as_secs_f32() / total.as_secs_f32();
        self.session.progress = ratio.clamp(0.0, 1.0);

        if self.session.elapsed >= total {
            self.engine.release();
            self.session.playing = false;
            self.session.index = None;
            self.session.progress = 1.0;
        }
    }
}
