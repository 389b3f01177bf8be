use std::path::{Path, PathBuf};

/// Clip format tag derived from the file extension.
///
/// `Raw` covers anything the extension does not identify; such clips can
/// still be imported directly, they just get no format label.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ClipKind {
    Mp3,
    Wav,
    Aac,
    Mp4,
    M4a,
    Ogg,
    Flac,
    Raw,
}

impl ClipKind {
    pub fn from_name(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase());

        match ext.as_deref() {
            Some("mp3") => Self::Mp3,
            Some("wav") => Self::Wav,
            Some("aac") => Self::Aac,
            Some("mp4") => Self::Mp4,
            Some("m4a") => Self::M4a,
            Some("ogg") => Self::Ogg,
            Some("flac") => Self::Flac,
            _ => Self::Raw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Mp3 => "MP3",
            Self::Wav => "WAV",
            Self::Aac => "AAC",
            Self::Mp4 => "MP4",
            Self::M4a => "M4A",
            Self::Ogg => "OGG",
            Self::Flac => "FLAC",
            Self::Raw => "RAW",
        }
    }
}

/// One audio clip tracked by the library.
///
/// Identity is the file name, assumed unique within the storage directory.
/// Duration is intentionally not a field: it is probed on demand.
#[derive(Debug, Clone)]
pub struct Clip {
    /// File name inside the storage directory; the clip's identity.
    pub name: String,
    /// Absolute path of the payload.
    pub path: PathBuf,
    /// Name without its extension, used for display.
    pub display: String,
    pub kind: ClipKind,
}

impl Clip {
    pub fn new(name: &str, path: PathBuf) -> Self {
        let display = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name)
            .to_string();

        Self {
            name: name.to_string(),
            path,
            display,
            kind: ClipKind::from_name(name),
        }
    }
}
