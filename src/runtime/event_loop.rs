use std::path::Path;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::ads::{AdSink, Cadence};
use crate::app::{App, Mode};
use crate::audio::{PlaybackEngine, Player};
use crate::config;
use crate::library::{ClipStorage, Library, Prefs, follow_moved_index, import_path};
use crate::tones::{ToneKind, ToneSink};
use crate::ui;

/// Poll timeout while nothing is playing; input latency only.
const IDLE_POLL_MS: u64 = 50;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// Interstitial pacing, ticked on every clip play.
    pub plays: Cadence,
    /// Rewarded pacing, ticked on every tone assignment.
    pub tone_changes: Cadence,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings) -> Self {
        Self {
            pending_gg: false,
            plays: Cadence::new(settings.promo.plays_per_interstitial),
            tone_changes: Cadence::new(settings.promo.tone_changes_per_reward),
        }
    }
}

/// Main terminal event loop: polls playback progress, re-lists the library
/// after mutations, draws, and dispatches input. Returns `Ok(())` when
/// shutdown is requested.
pub fn run<S, P, E, T, A>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    library: &mut Library<S, P>,
    player: &mut Player<E>,
    tones: &mut T,
    ads: &mut A,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>>
where
    S: ClipStorage,
    P: Prefs,
    E: PlaybackEngine,
    T: ToneSink,
    A: AdSink,
{
    loop {
        // One cooperative progress tick; gated on the playing flag inside.
        player.poll();

        if app.list_dirty {
            refresh_clips(app, library);
            app.clear_list_dirty();
        }

        terminal.draw(|f| ui::draw(f, app, player.session(), &settings.ui))?;

        // Poll fast while playing so the progress bar stays smooth.
        let timeout = if player.is_playing() {
            Duration::from_millis(settings.playback.poll_interval_ms)
        } else {
            Duration::from_millis(IDLE_POLL_MS)
        };

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, library, player, tones, ads, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn refresh_clips<S: ClipStorage, P: Prefs>(app: &mut App, library: &Library<S, P>) {
    let clips = library.list();
    let liked = clips.iter().map(|c| library.is_liked(&c.name)).collect();
    app.set_clips(clips, liked);
}

/// Dispatch one key press. Returns true when the app should quit.
fn handle_key_event<S, P, E, T, A>(
    key: KeyEvent,
    app: &mut App,
    library: &mut Library<S, P>,
    player: &mut Player<E>,
    tones: &mut T,
    ads: &mut A,
    state: &mut EventLoopState,
) -> bool
where
    S: ClipStorage,
    P: Prefs,
    E: PlaybackEngine,
    T: ToneSink,
    A: AdSink,
{
    match app.mode {
        Mode::ConfirmDelete => {
            handle_confirm_delete(key.code, app, library, player);
            return false;
        }
        Mode::ImportPrompt => {
            handle_import_prompt(key.code, app, library);
            return false;
        }
        Mode::ToneMenu => {
            handle_tone_menu(key.code, app, library, tones, ads, state);
            return false;
        }
        Mode::Normal => {}
    }

    match key.code {
        KeyCode::Char('q') => {
            state.pending_gg = false;
            player.stop();
            return true;
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.select_first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            state.pending_gg = false;
            app.select_last();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            state.pending_gg = false;
            app.next();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.pending_gg = false;
            app.prev();
        }
        KeyCode::Enter => {
            state.pending_gg = false;
            play_selected(app, player, ads, state);
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            state.pending_gg = false;
            if player.session().is_idle() {
                play_selected(app, player, ads, state);
            } else {
                player.toggle_pause();
            }
        }
        KeyCode::Char('s') => {
            state.pending_gg = false;
            player.stop();
            app.set_status("stopped");
        }
        KeyCode::Char('f') => {
            state.pending_gg = false;
            toggle_liked_selected(app, library);
        }
        KeyCode::Char('J') => {
            state.pending_gg = false;
            move_selected(app, library, player, true);
        }
        KeyCode::Char('K') => {
            state.pending_gg = false;
            move_selected(app, library, player, false);
        }
        KeyCode::Char('d') => {
            state.pending_gg = false;
            if app.has_clips() {
                app.enter_mode(Mode::ConfirmDelete);
            }
        }
        KeyCode::Char('i') => {
            state.pending_gg = false;
            app.enter_mode(Mode::ImportPrompt);
        }
        KeyCode::Char('t') => {
            state.pending_gg = false;
            if app.has_clips() {
                app.enter_mode(Mode::ToneMenu);
            }
        }
        KeyCode::Char(_) => {
            // g pending should clear on any other printable char
            state.pending_gg = false;
        }
        _ => {}
    }

    false
}

fn play_selected<E: PlaybackEngine, A: AdSink>(
    app: &mut App,
    player: &mut Player<E>,
    ads: &mut A,
    state: &mut EventLoopState,
) {
    let Some(clip) = app.selected_clip() else {
        return;
    };
    let path = clip.path.clone();
    let display = clip.display.clone();
    let index = app.selected;

    // Tapping the clip that is already playing pauses it instead.
    if player.playing_index() == Some(index) && player.is_playing() {
        player.pause();
        app.set_status(format!("paused {display}"));
        return;
    }

    if state.plays.tick() {
        ads.show_interstitial();
    }

    match player.play(&path, index) {
        Ok(()) => app.set_status(format!("playing {display}")),
        Err(e) => app.set_status(format!("could not play {display}: {e}")),
    }
}

fn toggle_liked_selected<S: ClipStorage, P: Prefs>(app: &mut App, library: &mut Library<S, P>) {
    let Some(clip) = app.selected_clip() else {
        return;
    };
    let name = clip.name.clone();
    let display = clip.display.clone();

    match library.toggle_liked(&name) {
        Ok(true) => app.set_status(format!("liked {display}")),
        Ok(false) => app.set_status(format!("unliked {display}")),
        Err(e) => app.set_status(format!("{e}")),
    }
    app.mark_list_dirty();
}

/// Reorder the selected clip one step and keep both the selection and the
/// playing index pointing at the clips they were on.
fn move_selected<S: ClipStorage, P: Prefs, E: PlaybackEngine>(
    app: &mut App,
    library: &mut Library<S, P>,
    player: &mut Player<E>,
    down: bool,
) {
    let len = app.clips.len();
    if len < 2 {
        return;
    }

    let from = app.selected;
    let to = if down {
        if from + 1 >= len {
            return;
        }
        from + 1
    } else {
        if from == 0 {
            return;
        }
        from - 1
    };

    match library.reorder(from, to) {
        Ok(()) => {
            if let Some(pi) = player.playing_index() {
                player.retarget(follow_moved_index(pi, from, to));
            }
            app.selected = to;
            app.mark_list_dirty();
        }
        Err(e) => app.set_status(format!("{e}")),
    }
}

fn handle_confirm_delete<S: ClipStorage, P: Prefs, E: PlaybackEngine>(
    code: KeyCode,
    app: &mut App,
    library: &mut Library<S, P>,
    player: &mut Player<E>,
) {
    match code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.cancel_mode();
            let Some(clip) = app.selected_clip() else {
                return;
            };
            let name = clip.name.clone();
            let display = clip.display.clone();

            match library.delete(&name) {
                Ok(true) => {
                    // Stop when the playing clip was deleted; shift the
                    // tracked index when an earlier one disappeared.
                    if let Some(pi) = player.playing_index() {
                        if pi == app.selected {
                            player.stop();
                        } else if pi > app.selected {
                            player.retarget(pi - 1);
                        }
                    }
                    app.set_status(format!("deleted {display}"));
                }
                Ok(false) => app.set_status(format!("{display} was already gone")),
                Err(e) => app.set_status(format!("{e}")),
            }
            app.mark_list_dirty();
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            // Declined: abort with no state change.
            app.cancel_mode();
            app.set_status("delete cancelled");
        }
        _ => {}
    }
}

fn handle_import_prompt<S: ClipStorage, P: Prefs>(
    code: KeyCode,
    app: &mut App,
    library: &mut Library<S, P>,
) {
    match code {
        KeyCode::Esc => {
            app.cancel_mode();
        }
        KeyCode::Backspace => {
            app.pop_input_char();
        }
        KeyCode::Enter => {
            let path_text = app.input.trim().to_string();
            app.cancel_mode();
            if path_text.is_empty() {
                return;
            }

            match import_path(library, Path::new(&path_text)) {
                Ok(clips) if clips.is_empty() => app.set_status("no audio files found"),
                Ok(clips) => {
                    app.set_status(format!("imported {} clip(s)", clips.len()));
                    app.mark_list_dirty();
                }
                Err(e) => app.set_status(format!("import failed: {e}")),
            }
        }
        KeyCode::Char(c) => {
            if !c.is_control() {
                app.push_input_char(c);
            }
        }
        _ => {}
    }
}

fn handle_tone_menu<S, P, T, A>(
    code: KeyCode,
    app: &mut App,
    library: &mut Library<S, P>,
    tones: &mut T,
    ads: &mut A,
    state: &mut EventLoopState,
) where
    S: ClipStorage,
    P: Prefs,
    T: ToneSink,
    A: AdSink,
{
    let kind = match code {
        KeyCode::Char('r') => ToneKind::Ringtone,
        KeyCode::Char('n') => ToneKind::Notification,
        KeyCode::Char('a') => ToneKind::Alarm,
        KeyCode::Esc => {
            app.cancel_mode();
            return;
        }
        _ => return,
    };
    app.cancel_mode();

    let Some(clip) = app.selected_clip() else {
        return;
    };
    let clip = clip.clone();

    if state.tone_changes.tick() {
        ads.show_rewarded();
    }

    match tones.assign(&clip, kind) {
        Ok(()) => {
            // Remember which clip backs each tone kind.
            match library.prefs_mut().put_string(kind.prefs_key(), &clip.name) {
                Ok(()) => app.set_status(format!("set as {}: {}", kind.label(), clip.display)),
                Err(e) => app.set_status(format!("{e}")),
            }
        }
        Err(e) => app.set_status(format!("{e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::EngineError;
    use crate::library::{DirStorage, FilePrefs};

    struct StubEngine;

    impl PlaybackEngine for StubEngine {
        fn open(&mut self, _path: &Path) -> Result<(), EngineError> {
            Ok(())
        }
        fn start(&mut self) {}
        fn pause(&mut self) {}
        fn resume(&mut self) {}
        fn position(&self) -> Duration {
            Duration::ZERO
        }
        fn duration(&self) -> Duration {
            Duration::from_secs(10)
        }
        fn release(&mut self) {}
    }

    type Fixture = (
        tempfile::TempDir,
        App,
        Library<DirStorage, FilePrefs>,
        Player<StubEngine>,
    );

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let storage = DirStorage::open(dir.path().join("clips")).unwrap();
        let prefs = FilePrefs::open(dir.path().join("prefs.toml"));
        let mut library = Library::new(storage, prefs);
        library.import("a.mp3", b"x").unwrap();
        library.import("b.wav", b"x").unwrap();

        let mut app = App::new();
        refresh_clips(&mut app, &library);
        app.clear_list_dirty();
        (dir, app, library, Player::new(StubEngine))
    }

    #[test]
    fn failed_delete_leaves_the_session_alone() {
        let (_dir, mut app, mut library, mut player) = fixture();
        player.play(Path::new("b.wav"), 1).unwrap();

        // a.mp3's payload is already gone: the delete comes back false,
        // so playback must be neither stopped nor retargeted.
        std::fs::remove_file(library.storage().path("a.mp3")).unwrap();
        app.selected = 0;
        app.enter_mode(Mode::ConfirmDelete);
        handle_confirm_delete(KeyCode::Char('y'), &mut app, &mut library, &mut player);

        assert_eq!(app.mode, Mode::Normal);
        assert!(player.is_playing());
        assert_eq!(player.playing_index(), Some(1));
    }

    #[test]
    fn deleting_an_earlier_clip_shifts_the_tracked_index() {
        let (_dir, mut app, mut library, mut player) = fixture();
        player.play(Path::new("b.wav"), 1).unwrap();

        app.selected = 0;
        app.enter_mode(Mode::ConfirmDelete);
        handle_confirm_delete(KeyCode::Char('y'), &mut app, &mut library, &mut player);

        assert_eq!(player.playing_index(), Some(0));
        assert!(player.is_playing());
        assert!(app.list_dirty);
    }

    #[test]
    fn deleting_the_playing_clip_stops_playback() {
        let (_dir, mut app, mut library, mut player) = fixture();
        player.play(Path::new("a.mp3"), 0).unwrap();

        app.selected = 0;
        app.enter_mode(Mode::ConfirmDelete);
        handle_confirm_delete(KeyCode::Char('y'), &mut app, &mut library, &mut player);

        assert!(player.session().is_idle());
        assert_eq!(player.session().progress, 1.0);
    }
}
