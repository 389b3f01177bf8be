//! Configuration loader and schema types.
//!
//! This module exposes the configuration schema used to drive runtime
//! behavior and helpers to load configuration from disk.

mod load;
mod schema;

pub use load::{StoragePaths, default_config_path, resolve_config_path, resolve_storage_paths};
pub use schema::*;
