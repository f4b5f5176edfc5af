mod app;
mod config;
mod error;
mod media;
mod player;
mod runtime;
mod schedule;
mod source;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
