#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use neon_launcher::gui::neon::{self, NeonOptions};
use neon_launcher::{config, logging, ready};
use std::time::Duration;

/// Multi-mode neon loader that starts a companion app and waits for it.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Companion executable, relative to this program's directory
    #[arg(long, default_value = "chatbotai.exe")]
    companion: String,

    /// Command-line arguments passed to the companion
    #[arg(long, default_value = "")]
    args: String,

    /// Named event the companion sets once it is ready
    #[arg(long, default_value = ready::READY_EVENT_NAME)]
    event: String,

    /// Seconds before the loader gives up and closes
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Seconds to wait before launching the companion
    #[arg(long, default_value_t = neon::LAUNCH_DELAY.as_secs())]
    launch_delay: u64,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    logging::init(None);
    log::info!("Neon loader starting, companion {}", args.companion);

    let screenshot_dir = std::env::current_dir().unwrap_or_else(|_| config::exe_dir());
    neon::run(NeonOptions {
        companion: args.companion,
        args: args.args,
        event: args.event,
        timeout: Duration::from_secs(args.timeout),
        launch_delay: Duration::from_secs(args.launch_delay),
        base_dir: config::exe_dir(),
        screenshot_dir,
    })
}
