use std::path::Path;
use std::time::Duration;

use lofty::prelude::*;

/// Decode-probe `path` for its duration.
///
/// Probe failures are not fatal anywhere in the app, so this logs and
/// reports zero instead of returning an error.
pub fn probe_duration(path: &Path) -> Duration {
    match lofty::read_from_path(path) {
        Ok(tagged) => tagged.properties().duration(),
        Err(e) => {
            eprintln!("soundpad: duration probe failed for {:?}: {e}", path);
            Duration::ZERO
        }
    }
}
