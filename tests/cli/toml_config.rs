//! Configuration file loading tests

use clap::Parser;
use handoff::app::cli::{Args, FileConfig, Settings};
use handoff::queue::ConfigError;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_explicit_file() {
    let file = config_file(
        "[queue]\nname = \"uploads\"\ndefault-wait-ms = 75\n\n[stress]\nproducers = 5\n",
    );

    let config = FileConfig::discover(Some(file.path())).unwrap();
    let settings = Settings::resolve(&Args::default(), &config).unwrap();

    assert_eq!(settings.queue.name(), "uploads");
    assert_eq!(settings.queue.default_wait(), Duration::from_millis(75));
    assert_eq!(settings.stress.producers, 5);
}

#[test]
fn test_cli_wins_over_file() {
    let file = config_file("[queue]\nname = \"uploads\"\ndefault-wait-ms = 75\n");
    let path = file.path().to_string_lossy().to_string();

    let args = Args::try_parse_from(["handoff", "-c", path.as_str(), "-q", "downloads", "-w", "5"]).unwrap();
    let config = FileConfig::discover(args.config_file.as_deref()).unwrap();
    let settings = Settings::resolve(&args, &config).unwrap();

    assert_eq!(settings.queue.name(), "downloads");
    assert_eq!(settings.queue.default_wait(), Duration::from_millis(5));
}

#[test]
fn test_malformed_file_reports_path() {
    let file = config_file("[queue\nname = ");

    let error = FileConfig::load(file.path()).unwrap_err();
    assert!(matches!(error, ConfigError::Parse { .. }));
    assert!(error
        .to_string()
        .contains(&file.path().display().to_string()));
}

#[test]
fn test_wrong_type_rejected() {
    let file = config_file("[stress]\nproducers = \"four\"\n");
    assert!(matches!(
        FileConfig::load(file.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.toml");

    match FileConfig::discover(Some(&missing)) {
        Err(ConfigError::Read { path, .. }) => assert_eq!(path, missing),
        other => panic!("Expected Read error, got {:?}", other),
    }
}
