//! Tone assignment: registering a clip as a system sound.
//!
//! `ToneSink` is the seam to whatever the platform does with the
//! assignment. The desktop implementation exports the payload into a
//! per-kind directory; the runtime records the assignment in prefs.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::library::Clip;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ToneKind {
    Ringtone,
    Notification,
    Alarm,
}

impl ToneKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ringtone => "ringtone",
            Self::Notification => "notification",
            Self::Alarm => "alarm",
        }
    }

    /// Prefs key recording which clip is assigned for this kind.
    pub fn prefs_key(&self) -> &'static str {
        match self {
            Self::Ringtone => "tone:ringtone",
            Self::Notification => "tone:notification",
            Self::Alarm => "tone:alarm",
        }
    }
}

#[derive(Debug, Error)]
pub enum ToneError {
    #[error("clip payload does not exist: {0:?}")]
    Missing(PathBuf),
    #[error("could not export tone: {0}")]
    Export(#[from] std::io::Error),
}

pub trait ToneSink {
    fn assign(&mut self, clip: &Clip, kind: ToneKind) -> Result<(), ToneError>;
}

/// Copies the clip into `<dir>/<kind>/<name>`, where desktop environments
/// (or the user) can pick it up as a system sound.
pub struct ExportToneSink {
    dir: PathBuf,
}

impl ExportToneSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ToneSink for ExportToneSink {
    fn assign(&mut self, clip: &Clip, kind: ToneKind) -> Result<(), ToneError> {
        if !clip.path.is_file() {
            return Err(ToneError::Missing(clip.path.clone()));
        }

        let target_dir = self.dir.join(kind.label());
        fs::create_dir_all(&target_dir)?;
        fs::copy(&clip.path, target_dir.join(&clip.name))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_exports_payload_under_kind_directory() {
        let dir = tempfile::tempdir().unwrap();
        let clip_path = dir.path().join("horn.mp3");
        std::fs::write(&clip_path, b"honk").unwrap();
        let clip = Clip::new("horn.mp3", clip_path);

        let mut sink = ExportToneSink::new(dir.path().join("tones"));
        sink.assign(&clip, ToneKind::Alarm).unwrap();

        let exported = dir.path().join("tones").join("alarm").join("horn.mp3");
        assert_eq!(std::fs::read(exported).unwrap(), b"honk");
    }

    #[test]
    fn assign_rejects_missing_payload() {
        let dir = tempfile::tempdir().unwrap();
        let clip = Clip::new("gone.wav", dir.path().join("gone.wav"));

        let mut sink = ExportToneSink::new(dir.path().join("tones"));
        let err = sink.assign(&clip, ToneKind::Ringtone).unwrap_err();
        assert!(matches!(err, ToneError::Missing(_)));
    }
}
