//! The playback engine seam and its rodio implementation.
//!
//! Elapsed time uses the same bookkeeping as any wall-clock player: an
//! `Instant` for the current run plus a `Duration` accumulated across
//! pauses.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use thiserror::Error;

use super::probe::probe_duration;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("could not open {path:?}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        source: rodio::decoder::DecoderError,
    },
}

/// Contract the playback controller needs from the decoding/output layer.
pub trait PlaybackEngine {
    /// Load `path`, leaving the engine paused at position zero.
    fn open(&mut self, path: &Path) -> Result<(), EngineError>;
    fn start(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    /// Elapsed playback time of the loaded clip.
    fn position(&self) -> Duration;
    /// Total duration of the loaded clip; zero when unknown.
    fn duration(&self) -> Duration;
    /// Drop the loaded clip and stop output. Idempotent.
    fn release(&mut self);
}

pub struct RodioEngine {
    stream: OutputStream,
    sink: Option<Sink>,
    total: Duration,
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl RodioEngine {
    pub fn new() -> Self {
        let mut stream =
            OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        Self {
            stream,
            sink: None,
            total: Duration::ZERO,
            started_at: None,
            accumulated: Duration::ZERO,
        }
    }
}

impl PlaybackEngine for RodioEngine {
    fn open(&mut self, path: &Path) -> Result<(), EngineError> {
        self.release();

        let file = File::open(path).map_err(|source| EngineError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|source| EngineError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();

        self.total = probe_duration(path);
        self.sink = Some(sink);
        Ok(())
    }

    fn start(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.pause();
        }
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    fn resume(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            s.play();
            if self.started_at.is_none() {
                self.started_at = Some(Instant::now());
            }
        }
    }

    fn position(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn duration(&self) -> Duration {
        self.total
    }

    fn release(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.total = Duration::ZERO;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }
}
