use std::env;
use std::path::Path;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::ads::NoAds;
use crate::app::App;
use crate::audio::{Player, RodioEngine};
use crate::config;
use crate::library::{DirStorage, FilePrefs, Library, import_path};
use crate::tones::ExportToneSink;

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    let paths = config::resolve_storage_paths(&settings.storage);

    let storage = DirStorage::open(&paths.clips_dir)?;
    let prefs = FilePrefs::open(&paths.prefs_path);
    let mut library = Library::new(storage, prefs);

    // Optional CLI argument: import a file or directory before starting.
    if let Some(arg) = env::args().nth(1) {
        match import_path(&mut library, Path::new(&arg)) {
            Ok(clips) => eprintln!("soundpad: imported {} clip(s) from {arg}", clips.len()),
            Err(e) => eprintln!("soundpad: import of {arg} failed: {e}"),
        }
    }

    let mut player = Player::new(RodioEngine::new());
    let mut tones = ExportToneSink::new(&paths.tones_dir);
    let mut ads = NoAds;
    let mut app = App::new();

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&settings);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut library,
            &mut player,
            &mut tones,
            &mut ads,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
