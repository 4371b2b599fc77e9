#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use neon_launcher::gui::itau;
use neon_launcher::logging;

/// Fullscreen loader that assembles a word from blocks. Esc closes it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Text drawn inside the badge
    #[arg(long, default_value = itau::DEFAULT_TITLE)]
    title: String,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    logging::init(None);
    itau::run(args.title)
}
