use std::time::Duration;

use thiserror::Error;

use crate::audio::probe_duration;

use super::model::Clip;
use super::prefs::Prefs;
use super::storage::ClipStorage;

/// Prefs key holding the comma-joined clip order.
const ORDER_KEY: &str = "clip_order";
/// Namespace prefix for per-clip liked flags.
const LIKED_PREFIX: &str = "liked:";

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("storage unavailable: {0}")]
    Storage(#[from] std::io::Error),
    #[error("could not encode prefs: {0}")]
    Prefs(#[from] toml::ser::Error),
}

/// The library store: ordered clip list plus liked flags.
///
/// The persisted order string is the single source of truth for display
/// order and is rewritten in full on every add/remove/reorder.
pub struct Library<S, P> {
    storage: S,
    prefs: P,
}

impl<S: ClipStorage, P: Prefs> Library<S, P> {
    pub fn new(storage: S, prefs: P) -> Self {
        Self { storage, prefs }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn prefs_mut(&mut self) -> &mut P {
        &mut self.prefs
    }

    /// The persisted order, filtered down to identifiers whose payload
    /// still exists. Mutations index into this list, so caller indices
    /// taken from `list` always agree with it, and every rewrite drops
    /// stale entries.
    fn saved_order(&self) -> Vec<String> {
        self.prefs
            .get_string(ORDER_KEY)
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|e| !e.is_empty() && self.storage.exists(e))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    fn save_order(&mut self, names: &[String]) -> Result<(), LibraryError> {
        self.prefs.put_string(ORDER_KEY, &names.join(","))
    }

    /// The ordered clip list. Self-healing: identifiers whose payload no
    /// longer exists are silently dropped from the result (the stale order
    /// entry is rewritten away on the next mutation).
    pub fn list(&self) -> Vec<Clip> {
        self.saved_order()
            .into_iter()
            .map(|name| {
                let path = self.storage.path(&name);
                Clip::new(&name, path)
            })
            .collect()
    }

    /// Write `bytes` under `name` and append it to the order. Importing a
    /// name that is already present overwrites the payload but leaves the
    /// order untouched.
    pub fn import(&mut self, name: &str, bytes: &[u8]) -> Result<Clip, LibraryError> {
        self.storage.write(name, bytes)?;

        let mut order = self.saved_order();
        if !order.iter().any(|n| n == name) {
            order.push(name.to_string());
            self.save_order(&order)?;
        }

        Ok(Clip::new(name, self.storage.path(name)))
    }

    /// Delete the payload and drop it from the order. Returns false (and
    /// leaves the order unchanged) when the payload did not exist. The
    /// caller is responsible for stopping playback of the clip first.
    pub fn delete(&mut self, name: &str) -> Result<bool, LibraryError> {
        if !self.storage.delete(name) {
            return Ok(false);
        }

        let mut order = self.saved_order();
        order.retain(|n| n != name);
        self.save_order(&order)?;
        Ok(true)
    }

    /// Move the clip at `from` so it ends up at `to`; full order rewrite.
    /// Out-of-range indices are a no-op.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), LibraryError> {
        let mut order = self.saved_order();
        if from >= order.len() || to >= order.len() || from == to {
            return Ok(());
        }

        let name = order.remove(from);
        order.insert(to, name);
        self.save_order(&order)
    }

    /// Flip the liked flag for `name`; returns the new value.
    pub fn toggle_liked(&mut self, name: &str) -> Result<bool, LibraryError> {
        let key = liked_key(name);
        let liked = !self.prefs.get_bool(&key);
        self.prefs.put_bool(&key, liked)?;
        Ok(liked)
    }

    pub fn is_liked(&self, name: &str) -> bool {
        self.prefs.get_bool(&liked_key(name))
    }

    /// Decode-probe the clip's duration; zero when the probe fails.
    pub fn duration(&self, name: &str) -> Duration {
        probe_duration(&self.storage.path(name))
    }
}

fn liked_key(name: &str) -> String {
    format!("{LIKED_PREFIX}{name}")
}

/// Remap a tracked index (the currently playing clip) across a
/// single-element move from `from` to `to`, so it keeps pointing at the
/// same clip after the reorder. Handles multi-position moves, not just
/// adjacent swaps.
pub fn follow_moved_index(tracked: usize, from: usize, to: usize) -> usize {
    if tracked == from {
        to
    } else if from < to && tracked > from && tracked <= to {
        tracked - 1
    } else if to < from && tracked >= to && tracked < from {
        tracked + 1
    } else {
        tracked
    }
}
