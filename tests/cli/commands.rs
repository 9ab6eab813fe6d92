//! End-to-end command tests through `startup::run`

use clap::Parser;
use handoff::app::cli::Args;
use handoff::app::startup::run;
use handoff::app::AppError;
use std::io::Write;
use tempfile::NamedTempFile;

fn args_with_config(contents: &str, extra: &[&str]) -> (Args, NamedTempFile) {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    let path = file.path().to_string_lossy().to_string();

    let mut argv = vec!["handoff".to_string(), "-c".to_string(), path];
    argv.extend(extra.iter().map(|s| s.to_string()));
    (Args::try_parse_from(argv).unwrap(), file)
}

#[test]
fn test_demo_command_output() {
    let (args, _file) = args_with_config("[queue]\ndefault-wait-ms = 20\n", &["demo"]);

    let output = run(&args).unwrap();
    assert!(output.contains("remove_no_wait() on empty queue -> None"));
    assert!(output.contains("add(\"a\"); size() -> 1"));
    assert!(output.contains("stats: added 3, removed 3, size 0"));
}

#[test]
fn test_stress_command_output() {
    let (args, _file) = args_with_config(
        "[queue]\ndefault-wait-ms = 10\n[stress]\nproducers = 2\nitems-per-producer = 250\n",
        &["stress", "--consumers", "3"],
    );

    let output = run(&args).unwrap();
    assert!(output.contains("stress: 2 producers x 250 items, 3 consumers"));
    assert!(output.contains("delivered 500 items exactly once"));
    assert!(output.contains("final size 0"));
}

#[test]
fn test_invalid_config_is_actionable_error() {
    use handoff::core::error_handling::ContextualError;

    let (args, _file) = args_with_config("[stress]\nconsumers = 0\n", &["stress"]);

    let error = run(&args).unwrap_err();
    assert!(matches!(error, AppError::Config(_)));
    assert!(error.is_user_actionable());
    assert!(error.user_message().unwrap().contains("consumers"));
}
