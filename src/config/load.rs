use std::{env, path::PathBuf};

use super::schema::{Settings, StorageSettings};

/// Configuration loading helpers.
///
/// `Settings::load` tries environment variables first (prefix `SOUNDPAD__`),
/// then an optional config file and falls back to struct defaults.
impl Settings {
    /// Load settings from environment and optional config file.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("SOUNDPAD")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;
        let settings: Settings = cfg.try_deserialize()?;
        Ok(settings)
    }

    /// Perform basic validation checks on loaded settings.
    pub fn validate(&self) -> Result<(), String> {
        if self.playback.poll_interval_ms == 0 {
            return Err("playback.poll_interval_ms must be >= 1".to_string());
        }
        Ok(())
    }
}

/// Resolve the config path from `SOUNDPAD_CONFIG_PATH` or XDG defaults.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("SOUNDPAD_CONFIG_PATH") {
        let p = PathBuf::from(p);
        return Some(p);
    }
    default_config_path()
}

/// Compute the default config path under `$XDG_CONFIG_HOME/soundpad/config.toml`
/// or `~/.config/soundpad/config.toml` when `XDG_CONFIG_HOME` is not set.
pub fn default_config_path() -> Option<PathBuf> {
    let config_home = if let Some(xdg) = env::var_os("XDG_CONFIG_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".config"))
    } else {
        None
    };

    config_home.map(|d| d.join("soundpad").join("config.toml"))
}

/// Resolved filesystem locations for clip payloads, prefs and tone exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub clips_dir: PathBuf,
    pub prefs_path: PathBuf,
    pub tones_dir: PathBuf,
}

/// Fill unset storage paths from the XDG data directory.
pub fn resolve_storage_paths(storage: &StorageSettings) -> StoragePaths {
    let data_dir = default_data_dir();

    StoragePaths {
        clips_dir: storage
            .clips_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("clips")),
        prefs_path: storage
            .prefs_path
            .clone()
            .unwrap_or_else(|| data_dir.join("prefs.toml")),
        tones_dir: storage
            .tones_dir
            .clone()
            .unwrap_or_else(|| data_dir.join("tones")),
    }
}

/// `$XDG_DATA_HOME/soundpad`, `~/.local/share/soundpad`, or the current
/// directory as a last resort.
pub fn default_data_dir() -> PathBuf {
    let data_home = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        PathBuf::from(xdg)
    } else if let Some(home) = env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from(".")
    };

    data_home.join("soundpad")
}
