//! Filesystem-backed clip payload storage.
//!
//! `ClipStorage` is the contract the library store needs from wherever
//! payload bytes actually live; `DirStorage` is the directory-backed
//! implementation used by the app.

use std::fs;
use std::path::{Path, PathBuf};

use super::store::LibraryError;

pub trait ClipStorage {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), LibraryError>;
    /// Remove the payload. Returns false when it did not exist.
    fn delete(&self, name: &str) -> bool;
    fn exists(&self, name: &str) -> bool;
    fn read(&self, name: &str) -> Result<Vec<u8>, LibraryError>;
    /// Opaque handle to the payload, suitable for the playback engine.
    fn path(&self, name: &str) -> PathBuf;
}

pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    /// Open (creating if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, LibraryError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ClipStorage for DirStorage {
    fn write(&self, name: &str, bytes: &[u8]) -> Result<(), LibraryError> {
        fs::write(self.dir.join(name), bytes)?;
        Ok(())
    }

    fn delete(&self, name: &str) -> bool {
        let path = self.dir.join(name);
        path.is_file() && fs::remove_file(&path).is_ok()
    }

    fn exists(&self, name: &str) -> bool {
        self.dir.join(name).is_file()
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, LibraryError> {
        Ok(fs::read(self.dir.join(name))?)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}
