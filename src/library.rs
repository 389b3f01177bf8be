//! Library store: the persisted, user-ordered list of audio clips.
//!
//! Clip payloads live in a storage directory (`ClipStorage`); the display
//! order and per-clip liked flags live in a key-value prefs file (`Prefs`).
//! `Library` ties the two together and is the sole owner of the order.

mod model;
mod prefs;
mod scan;
mod storage;
mod store;

pub use model::*;
pub use prefs::{FilePrefs, Prefs};
pub use scan::{import_path, is_audio_file};
pub use storage::{ClipStorage, DirStorage};
pub use store::{Library, LibraryError, follow_moved_index};
