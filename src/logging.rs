use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Initialise `env_logger` (default level `info`, `RUST_LOG` overrides).
/// With `file`, records are appended there instead of stderr.
pub fn init(file: Option<&Path>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    });

    let mut file_error = None;
    if let Some(path) = file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => {
                builder.target(env_logger::Target::Pipe(Box::new(f)));
            }
            Err(e) => file_error = Some((path.to_path_buf(), e)),
        }
    }

    if builder.try_init().is_err() {
        return;
    }
    if let Some((path, e)) = file_error {
        log::warn!("Could not open log file {}: {}", path.display(), e);
    }
}
