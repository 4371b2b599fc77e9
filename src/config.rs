//! `apps.cfg`: one `Name|ExePath|IconRef|Args` record per line.

use crate::models::{resolve_path, AppEntry, IconRef};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "apps.cfg";
pub const MAX_APPS: usize = 256;

const SAMPLE_CONFIG: &str = "\
# apps.cfg - Name|ExePath|IconRef|Args
Chatbot AI|.\\apps\\ChatbotAI.exe|#101|
OCR Tool|.\\apps\\OCRTesseract.exe|.\\resources\\data_ai.png|
Task Dashboard|.\\apps\\TaskDesk.exe|#103|
";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write sample config {}: {source}", path.display())]
    WriteSample {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of loading the apps file.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub entries: Vec<AppEntry>,
    /// A sample file was generated because none existed.
    pub created_sample: bool,
}

/// Directory holding the running executable.
pub fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Parse one line. Comments, blank lines and records without a name or
/// executable yield `None`.
pub fn parse_line(base_dir: &Path, line: &str) -> Option<AppEntry> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
        return None;
    }

    let mut fields = line.split('|').take(4);
    let name = fields.next().unwrap_or("").trim();
    let exe = fields.next().unwrap_or("").trim();
    let icon = fields.next().unwrap_or("");
    let args = fields.next().unwrap_or("").trim();

    if name.is_empty() || exe.is_empty() {
        return None;
    }

    Some(AppEntry {
        name: name.to_string(),
        exe: resolve_path(base_dir, exe),
        icon: parse_icon_ref(base_dir, icon),
        args: args.to_string(),
    })
}

/// `#101`, `RES:101`, `RID:101` and `101` are resource ids; anything else is
/// an image path.
pub fn parse_icon_ref(base_dir: &Path, token: &str) -> IconRef {
    let token = token.trim_start_matches([' ', '\t']).trim_end();
    if token.is_empty() {
        return IconRef::None;
    }

    if let Some(rest) = token.strip_prefix('#') {
        return resource_id(rest);
    }
    if let Some(prefix) = token.get(..4) {
        if prefix.eq_ignore_ascii_case("RES:") || prefix.eq_ignore_ascii_case("RID:") {
            return resource_id(&token[4..]);
        }
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return resource_id(token);
    }

    IconRef::File(resolve_path(base_dir, token))
}

// Leading digits only, like strtoul; zero means "no resource".
fn resource_id(s: &str) -> IconRef {
    let s = s.trim_start();
    let end = s.bytes().take_while(u8::is_ascii_digit).count();
    match s[..end].parse::<u32>() {
        Ok(id) if id > 0 => IconRef::Resource(id),
        _ => IconRef::None,
    }
}

pub fn parse_config(base_dir: &Path, text: &str) -> Vec<AppEntry> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    text.lines()
        .filter_map(|line| parse_line(base_dir, line))
        .take(MAX_APPS)
        .collect()
}

/// Load `path`, writing a sample file when it does not exist.
///
/// A freshly generated sample is not parsed: the launcher starts empty and
/// picks the records up on the next run.
pub fn load_or_create(path: &Path, base_dir: &Path) -> Result<LoadedConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(text) => {
            let entries = parse_config(base_dir, &text);
            log::info!("Loaded {} apps from {}", entries.len(), path.display());
            Ok(LoadedConfig {
                entries,
                created_sample: false,
            })
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::error!("Config not found: {} - creating sample.", path.display());
            write_sample(path)?;
            Ok(LoadedConfig {
                entries: Vec::new(),
                created_sample: true,
            })
        }
        Err(source) => Err(ConfigError::Read {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_sample(path: &Path) -> Result<(), ConfigError> {
    let map_err = |source| ConfigError::WriteSample {
        path: path.to_path_buf(),
        source,
    };
    let mut file = std::fs::File::create(path).map_err(map_err)?;
    file.write_all(SAMPLE_CONFIG.as_bytes()).map_err(map_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> PathBuf {
        PathBuf::from("/opt/launcher")
    }

    #[test]
    fn parses_a_full_record() {
        let entry = parse_line(&base(), "A|b.exe|#5|--x").unwrap();
        assert_eq!(entry.name, "A");
        assert!(entry.exe.ends_with("b.exe"));
        assert_eq!(entry.exe, PathBuf::from("/opt/launcher/b.exe"));
        assert_eq!(entry.icon, IconRef::Resource(5));
        assert_eq!(entry.args, "--x");
    }

    #[test]
    fn icon_ref_forms() {
        let b = base();
        assert_eq!(parse_icon_ref(&b, "#101"), IconRef::Resource(101));
        assert_eq!(parse_icon_ref(&b, "RES:102"), IconRef::Resource(102));
        assert_eq!(parse_icon_ref(&b, "rid:7"), IconRef::Resource(7));
        assert_eq!(parse_icon_ref(&b, "  103"), IconRef::Resource(103));
        assert_eq!(parse_icon_ref(&b, "#0"), IconRef::None);
        assert_eq!(parse_icon_ref(&b, "#abc"), IconRef::None);
        assert_eq!(parse_icon_ref(&b, ""), IconRef::None);
        assert_eq!(
            parse_icon_ref(&b, "./resources/data_ai.png"),
            IconRef::File(PathBuf::from("/opt/launcher/resources/data_ai.png"))
        );
    }

    #[test]
    fn comments_and_incomplete_records_are_skipped() {
        let text = "# header\n// note\n\nOnly a name\n|missing.exe|#1|\nName||#1|\nOk|ok.exe\r\n";
        let entries = parse_config(&base(), text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "Ok");
        assert_eq!(entries[0].icon, IconRef::None);
        assert!(entries[0].args.is_empty());
    }

    #[test]
    fn fields_after_the_fourth_are_dropped() {
        let entry = parse_line(&base(), "A|a.exe||--one|extra").unwrap();
        assert_eq!(entry.args, "--one");
    }

    #[test]
    fn record_count_is_capped() {
        let text: String = (0..MAX_APPS + 10).map(|i| format!("App{i}|app{i}.exe\n")).collect();
        assert_eq!(parse_config(&base(), &text).len(), MAX_APPS);
    }
}
