mod ads;
mod app;
mod audio;
mod config;
mod library;
mod runtime;
mod tones;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
