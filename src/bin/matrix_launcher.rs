#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use clap::Parser;
use neon_launcher::gui::matrix::{self, MatrixOptions};
use neon_launcher::{config, logging};
use std::path::PathBuf;

/// Radial app launcher over a digital rain background.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Apps file; created with a sample entry when missing
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> eframe::Result {
    let args = Args::parse();
    let base_dir = config::exe_dir();
    let log_file = args
        .log_file
        .unwrap_or_else(|| base_dir.join(matrix::LOG_FILE_NAME));
    logging::init(Some(&log_file));

    let config = args
        .config
        .unwrap_or_else(|| base_dir.join(config::CONFIG_FILE_NAME));
    log::info!("Matrix launcher starting, config {}", config.display());
    matrix::run(MatrixOptions { config, base_dir })
}
