//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the current clip list
//! snapshot, selection, input mode and status line.

mod model;

pub use model::*;
