use neon_launcher::config::{load_or_create, parse_config, CONFIG_FILE_NAME, MAX_APPS};
use neon_launcher::models::IconRef;
use std::fs;

#[test]
fn missing_file_writes_a_sample_that_loads_next_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    let first = load_or_create(&path, dir.path()).unwrap();
    assert!(first.created_sample);
    assert!(first.entries.is_empty());
    assert!(path.exists());

    let second = load_or_create(&path, dir.path()).unwrap();
    assert!(!second.created_sample);
    let names: Vec<_> = second.entries.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Chatbot AI", "OCR Tool", "Task Dashboard"]);
    assert_eq!(second.entries[0].icon, IconRef::Resource(101));
    assert!(matches!(second.entries[1].icon, IconRef::File(_)));
    assert_eq!(second.entries[2].icon, IconRef::Resource(103));
}

#[test]
fn records_resolve_against_the_base_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::write(
        &path,
        "\u{feff}# launcher apps\r\n\
         A|b.exe|#5|--x\r\n\
         |nameless.exe|#1|\r\n\
         NoExe||#2|\r\n\
         \r\n\
         // disabled|c.exe||\r\n\
         Tools|bin/tool.exe|icons/tool.png| -v \r\n",
    )
    .unwrap();

    let loaded = load_or_create(&path, dir.path()).unwrap();
    assert_eq!(loaded.entries.len(), 2);

    let a = &loaded.entries[0];
    assert_eq!(a.name, "A");
    assert!(a.exe.ends_with("b.exe"));
    assert!(a.exe.starts_with(dir.path()));
    assert_eq!(a.icon, IconRef::Resource(5));
    assert_eq!(a.args, "--x");

    let tools = &loaded.entries[1];
    assert_eq!(tools.exe, dir.path().join("bin").join("tool.exe"));
    assert_eq!(tools.icon, IconRef::File(dir.path().join("icons").join("tool.png")));
    assert_eq!(tools.args, "-v");
    assert_eq!(tools.working_dir(), Some(dir.path().join("bin").as_path()));
}

#[test]
fn entry_count_is_capped() {
    let dir = tempfile::tempdir().unwrap();
    let text: String = (0..MAX_APPS + 20)
        .map(|i| format!("App {i}|app{i}.exe||\n"))
        .collect();
    let entries = parse_config(dir.path(), &text);
    assert_eq!(entries.len(), MAX_APPS);
    assert_eq!(entries[MAX_APPS - 1].name, format!("App {}", MAX_APPS - 1));
}

#[test]
fn unreadable_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as text
    let path = dir.path().join(CONFIG_FILE_NAME);
    fs::create_dir(&path).unwrap();
    let err = load_or_create(&path, dir.path()).unwrap_err();
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}
