//! Key-value preference persistence.
//!
//! `Prefs` is the small contract the library store needs: strings for the
//! clip order, booleans for liked flags. `FilePrefs` keeps the whole
//! document in memory and writes it through to a TOML file on every put.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::store::LibraryError;

pub trait Prefs {
    fn get_string(&self, key: &str) -> Option<String>;
    fn put_string(&mut self, key: &str, value: &str) -> Result<(), LibraryError>;
    /// Absent keys read as false.
    fn get_bool(&self, key: &str) -> bool;
    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), LibraryError>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct PrefsDoc {
    strings: BTreeMap<String, String>,
    flags: BTreeMap<String, bool>,
}

pub struct FilePrefs {
    path: PathBuf,
    doc: PrefsDoc,
}

impl FilePrefs {
    /// Open the prefs file at `path`. A missing file starts empty; an
    /// unparseable one is discarded with a warning rather than aborting.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let doc = match fs::read_to_string(&path) {
            Ok(text) => match toml::from_str(&text) {
                Ok(doc) => doc,
                Err(e) => {
                    eprintln!("soundpad: unreadable prefs file, starting fresh: {e}");
                    PrefsDoc::default()
                }
            },
            Err(_) => PrefsDoc::default(),
        };

        Self { path, doc }
    }

    fn flush(&self) -> Result<(), LibraryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(&self.doc)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl Prefs for FilePrefs {
    fn get_string(&self, key: &str) -> Option<String> {
        self.doc.strings.get(key).cloned()
    }

    fn put_string(&mut self, key: &str, value: &str) -> Result<(), LibraryError> {
        self.doc.strings.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn get_bool(&self, key: &str) -> bool {
        self.doc.flags.get(key).copied().unwrap_or(false)
    }

    fn put_bool(&mut self, key: &str, value: bool) -> Result<(), LibraryError> {
        self.doc.flags.insert(key.to_string(), value);
        self.flush()
    }
}
