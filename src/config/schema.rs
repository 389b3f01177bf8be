use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/soundpad/config.toml` or
/// `~/.config/soundpad/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SOUNDPAD__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub playback: PlaybackSettings,
    pub promo: PromoSettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            playback: PlaybackSettings::default(),
            promo: PromoSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// Where clip payloads, prefs and exported tones live. Unset paths are
/// resolved under `$XDG_DATA_HOME/soundpad` (or `~/.local/share/soundpad`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub clips_dir: Option<PathBuf>,
    pub prefs_path: Option<PathBuf>,
    pub tones_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Progress poll interval while a clip is playing (milliseconds).
    /// Short enough to approximate a smooth progress bar.
    pub poll_interval_ms: u64,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromoSettings {
    /// Show an interstitial attempt every Nth clip play. 0 disables.
    pub plays_per_interstitial: u32,
    /// Show a rewarded attempt every Nth tone change. 0 disables.
    pub tone_changes_per_reward: u32,
}

impl Default for PromoSettings {
    fn default() -> Self {
        Self {
            plays_per_interstitial: 20,
            tone_changes_per_reward: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top "soundpad" header box.
    pub header_text: String,
    /// Marker shown in front of liked clips.
    pub liked_marker: String,
    /// Whether to show the format tag (MP3/WAV/...) next to each clip.
    pub show_kind: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ soundpad: every button makes a noise ~ ".to_string(),
            liked_marker: "♥".to_string(),
            show_kind: true,
        }
    }
}
