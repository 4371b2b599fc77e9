use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Where an entry's icon comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconRef {
    None,
    /// PNG embedded in the executable as an `RCDATA` resource.
    Resource(u32),
    File(PathBuf),
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconRef::None => write!(f, "none"),
            IconRef::Resource(id) => write!(f, "resource #{}", id),
            IconRef::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A launchable application read from `apps.cfg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub name: String,
    pub exe: PathBuf,
    pub icon: IconRef,
    pub args: String,
}

impl AppEntry {
    /// Directory the entry is started from.
    pub fn working_dir(&self) -> Option<&Path> {
        self.exe.parent().filter(|p| !p.as_os_str().is_empty())
    }
}

/// Expand `%VAR%`, make relative paths absolute against `base_dir`, and
/// normalise `.`/`..` without touching the filesystem.
pub fn resolve_path(base_dir: &Path, raw: &str) -> PathBuf {
    let expanded = expand_env_vars(raw.trim());
    let path = Path::new(&expanded);
    let joined = if path.is_absolute() || has_windows_root(&expanded) {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    };
    normalize_lexically(&joined)
}

// `C:\...` is not absolute to std on non-Windows hosts.
fn has_windows_root(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && (b[2] == b'\\' || b[2] == b'/')
}

pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let popped = matches!(
                    out.components().next_back(),
                    Some(Component::Normal(_))
                ) && out.pop();
                if !popped && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

pub fn expand_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut search_from = 0;
    // Find all %VAR% patterns and expand them
    while let Some(rel_start) = result[search_from..].find('%') {
        let start = search_from + rel_start;
        let Some(end) = result[start + 1..].find('%') else {
            break;
        };
        let var_name = &result[start + 1..start + 1 + end];
        match std::env::var(var_name) {
            Ok(value) if !var_name.is_empty() => {
                result = format!("{}{}{}", &result[..start], value, &result[start + 2 + end..]);
                search_from = start + value.len();
            }
            // Unknown variables stay verbatim, like ExpandEnvironmentStrings
            _ => search_from = start + 1,
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_base_dir() {
        let base = Path::new("/opt/launcher");
        assert_eq!(
            resolve_path(base, r"./apps/tool.exe"),
            PathBuf::from("/opt/launcher/apps/tool.exe")
        );
        assert_eq!(
            resolve_path(base, "../shared/tool.exe"),
            PathBuf::from("/opt/shared/tool.exe")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let base = Path::new("/opt/launcher");
        assert_eq!(resolve_path(base, "/usr/bin/tool"), PathBuf::from("/usr/bin/tool"));
    }

    #[test]
    fn env_vars_expand_and_unknown_ones_survive() {
        std::env::set_var("NEON_LAUNCHER_TEST_DIR", "/data");
        assert_eq!(expand_env_vars("%NEON_LAUNCHER_TEST_DIR%/x"), "/data/x");
        assert_eq!(
            expand_env_vars("%NEON_LAUNCHER_SURELY_UNSET%/x"),
            "%NEON_LAUNCHER_SURELY_UNSET%/x"
        );
        assert_eq!(expand_env_vars("100%"), "100%");
    }

    #[test]
    fn working_dir_is_the_exe_folder() {
        let entry = AppEntry {
            name: "Tool".into(),
            exe: PathBuf::from("/opt/apps/ChatbotAI.EXE"),
            icon: IconRef::None,
            args: String::new(),
        };
        assert_eq!(entry.working_dir(), Some(Path::new("/opt/apps")));
        let bare = AppEntry {
            exe: PathBuf::from("tool.exe"),
            ..entry
        };
        assert_eq!(bare.working_dir(), None);
    }
}
