//! Application model types: `App` and `Mode`.

use crate::library::Clip;

/// Input mode of the main screen.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Awaiting y/n for deleting the selected clip.
    ConfirmDelete,
    /// Typing a path to import.
    ImportPrompt,
    /// Awaiting r/n/a for the tone kind to assign.
    ToneMenu,
}

/// The main application model: a render snapshot of the library plus UI
/// state. All durable state lives in the library store; this struct is
/// rebuilt from it whenever `list_dirty` is set.
pub struct App {
    pub clips: Vec<Clip>,
    /// Liked flag per clip, parallel to `clips`.
    pub liked: Vec<bool>,
    pub selected: usize,
    pub mode: Mode,
    /// Text typed into the import prompt.
    pub input: String,
    /// One-line feedback message (the toast equivalent).
    pub status: Option<String>,
    /// Set after any library mutation; the runtime re-lists and clears it.
    pub list_dirty: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            clips: Vec::new(),
            liked: Vec::new(),
            selected: 0,
            mode: Mode::Normal,
            input: String::new(),
            status: None,
            list_dirty: true,
        }
    }

    /// Replace the clip snapshot, clamping the selection into range.
    pub fn set_clips(&mut self, clips: Vec<Clip>, liked: Vec<bool>) {
        debug_assert_eq!(clips.len(), liked.len());
        self.clips = clips;
        self.liked = liked;
        if self.selected >= self.clips.len() {
            self.selected = self.clips.len().saturating_sub(1);
        }
    }

    pub fn has_clips(&self) -> bool {
        !self.clips.is_empty()
    }

    pub fn selected_clip(&self) -> Option<&Clip> {
        self.clips.get(self.selected)
    }

    /// Move selection down, wrapping at the end.
    pub fn next(&mut self) {
        if !self.clips.is_empty() {
            self.selected = (self.selected + 1) % self.clips.len();
        }
    }

    /// Move selection up, wrapping at the start.
    pub fn prev(&mut self) {
        if !self.clips.is_empty() {
            self.selected = if self.selected == 0 {
                self.clips.len() - 1
            } else {
                self.selected - 1
            };
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.clips.len().saturating_sub(1);
    }

    pub fn mark_list_dirty(&mut self) {
        self.list_dirty = true;
    }

    pub fn clear_list_dirty(&mut self) {
        self.list_dirty = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }

    /// Enter a prompt/menu mode with a clean input buffer.
    pub fn enter_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.input.clear();
    }

    /// Abort whatever prompt is open and return to normal mode.
    pub fn cancel_mode(&mut self) {
        self.mode = Mode::Normal;
        self.input.clear();
    }

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.input.pop();
    }
}
