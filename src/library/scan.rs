use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use super::model::Clip;
use super::prefs::Prefs;
use super::storage::ClipStorage;
use super::store::{Library, LibraryError};

/// True when the extension is one the soundboard recognizes.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "wav" | "aac" | "mp4" | "m4a" | "ogg" | "flac"
            )
        })
        .unwrap_or(false)
}

/// Import `path` into the library.
///
/// A file imports as-is (any extension; unknown ones become RAW clips). A
/// directory is walked and every recognized audio file under it is
/// imported, in file-name order. Returns the imported clips.
pub fn import_path<S: ClipStorage, P: Prefs>(
    library: &mut Library<S, P>,
    path: &Path,
) -> Result<Vec<Clip>, LibraryError> {
    if path.is_dir() {
        return import_dir(library, path);
    }

    let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
        return Ok(Vec::new());
    };
    let bytes = fs::read(path)?;
    Ok(vec![library.import(name, &bytes)?])
}

fn import_dir<S: ClipStorage, P: Prefs>(
    library: &mut Library<S, P>,
    dir: &Path,
) -> Result<Vec<Clip>, LibraryError> {
    let mut paths: Vec<std::path::PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.is_file() && is_audio_file(p))
        .collect();

    // Deterministic import order regardless of directory iteration order.
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut imported = Vec::new();
    for path in paths {
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("soundpad: skipping {:?}: {e}", path);
                continue;
            }
        };
        imported.push(library.import(name, &bytes)?);
    }

    Ok(imported)
}
