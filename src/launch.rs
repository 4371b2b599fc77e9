//! Starting companion and configured applications.

use crate::models::AppEntry;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};

#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("shortcut {} has no local target", .0.display())]
    BrokenShortcut(PathBuf),
    #[error("failed to start {}: {source}", path.display())]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Start `exe` with `args` from the executable's own directory. The child is
/// not waited on.
pub fn launch(exe: &Path, args: &str) -> Result<Child, LaunchError> {
    if !exe.exists() {
        return Err(LaunchError::NotFound(exe.to_path_buf()));
    }

    let (target, mut argv) = if is_shortcut(exe) {
        resolve_shortcut(exe).ok_or_else(|| LaunchError::BrokenShortcut(exe.to_path_buf()))?
    } else {
        (exe.to_path_buf(), Vec::new())
    };
    argv.extend(shell_split(args));

    let mut cmd = Command::new(&target);
    cmd.args(&argv);
    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        cmd.current_dir(dir);
    }

    log::info!("Launching {} {:?}", target.display(), argv);
    cmd.spawn().map_err(|source| LaunchError::Spawn {
        path: target.clone(),
        source,
    })
}

pub fn launch_entry(entry: &AppEntry) -> Result<Child, LaunchError> {
    launch(&entry.exe, &entry.args)
}

fn is_shortcut(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("lnk"))
}

/// Target path and arguments stored in a `.lnk` file.
pub fn resolve_shortcut(path: &Path) -> Option<(PathBuf, Vec<String>)> {
    let shortcut = lnk::ShellLink::open(path).ok()?;
    let target = shortcut
        .link_info()
        .as_ref()
        .and_then(|li| li.local_base_path().clone())?;
    let args = shortcut
        .arguments()
        .as_ref()
        .map(|a| shell_split(a))
        .unwrap_or_default();
    Some((PathBuf::from(target), args))
}

/// Whitespace splitting that keeps double-quoted runs together.
pub fn shell_split(s: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;

    for c in s.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            ' ' | '\t' if !in_quotes => {
                if !current.is_empty() || quoted {
                    args.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            _ => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        args.push(current);
    }
    args
}

/// Companion executable living next to the launcher.
pub struct Companion {
    path: PathBuf,
    args: String,
    child: Option<Child>,
}

impl Companion {
    pub fn new(dir: &Path, file_name: &str, args: impl Into<String>) -> Self {
        Self {
            path: dir.join(file_name),
            args: args.into(),
            child: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_running(&self) -> bool {
        self.child.is_some()
    }

    /// Missing files and spawn failures are logged and otherwise ignored.
    pub fn launch(&mut self) {
        if self.child.is_some() {
            return;
        }
        match launch(&self.path, &self.args) {
            Ok(child) => {
                log::info!("Companion started (pid {})", child.id());
                self.child = Some(child);
            }
            Err(LaunchError::NotFound(path)) => {
                log::warn!("Companion {} not found, skipping launch", path.display());
            }
            Err(e) => log::error!("{}", e),
        }
    }
}

/// Blocking error box shown when an entry fails to start.
pub fn show_launch_failure(err: &LaunchError) {
    log::error!("{}", err);
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Erro")
        .set_description("Falha ao iniciar a aplicação. Verifique o caminho no apps.cfg.")
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_quoted_arguments() {
        assert_eq!(
            shell_split(r#"--profile "my profile" -v"#),
            vec!["--profile", "my profile", "-v"]
        );
        assert_eq!(shell_split("  a\t b  "), vec!["a", "b"]);
        assert_eq!(shell_split(r#"--name """#), vec!["--name", ""]);
        assert!(shell_split("").is_empty());
    }


    #[test]
    fn missing_executable_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.exe");
        match launch(&missing, "") {
            Err(LaunchError::NotFound(p)) => assert_eq!(p, missing),
            other => panic!("unexpected {:?}", other.map(|c| c.id())),
        }
    }

    #[test]
    fn missing_companion_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let mut companion = Companion::new(dir.path(), "chatbotai.exe", "");
        companion.launch();
        assert!(!companion.is_running());
    }

    #[test]
    fn shortcut_detection_ignores_case() {
        assert!(is_shortcut(Path::new("Tool.LNK")));
        assert!(!is_shortcut(Path::new("tool.exe")));
    }
}
