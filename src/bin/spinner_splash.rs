#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use neon_launcher::gui::spinner::{self, SpinnerOptions};
use neon_launcher::{config, logging, ready};
use std::time::Duration;

/// Translucent spinner shown while a companion app starts.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[arg(long, default_value = "chatbotai.exe")]
    companion: String,

    #[arg(long, default_value = ready::READY_EVENT_NAME)]
    event: String,

    /// Seconds before the splash closes on its own
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    #[arg(long, default_value_t = 0)]
    launch_delay: u64,

    #[arg(long, default_value = "Iniciando...")]
    title: String,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    logging::init(None);

    spinner::run(SpinnerOptions {
        companion: args.companion,
        event: args.event,
        timeout: Duration::from_secs(args.timeout),
        launch_delay: Duration::from_secs(args.launch_delay),
        title: args.title,
        base_dir: config::exe_dir(),
    })
}
