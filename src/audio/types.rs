use std::time::Duration;

/// The single playback session, at most one per process.
///
/// `progress` is elapsed/total clamped to [0, 1]. After a natural end of
/// track or an explicit stop it stays pinned at 1.0 as a completion
/// marker until the next play resets it.
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    /// Index of the playing clip in the current library order, if any.
    pub index: Option<usize>,
    pub playing: bool,
    /// Elapsed playback time, refreshed by polling.
    pub elapsed: Duration,
    /// Total duration captured at play-start; zero when the probe failed.
    pub total: Duration,
    pub progress: f32,
}

impl Default for PlaybackSession {
    fn default() -> Self {
        Self {
            index: None,
            playing: false,
            elapsed: Duration::ZERO,
            total: Duration::ZERO,
            progress: 0.0,
        }
    }
}

impl PlaybackSession {
    pub fn is_idle(&self) -> bool {
        self.index.is_none()
    }
}
