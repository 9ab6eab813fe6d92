//! CLI argument parsing tests

use clap::Parser;
use handoff::app::cli::{Args, Command, StressArgs};
use std::path::PathBuf;

#[test]
fn test_no_arguments_defaults_to_demo() {
    let args = Args::try_parse_from(["handoff"]).unwrap();
    assert_eq!(args.command, None);
    assert_eq!(args.command(), Command::Demo);
    assert_eq!(args.stress_args(), StressArgs::default());
}

#[test]
fn test_global_options() {
    let args = Args::try_parse_from([
        "handoff",
        "-c",
        "/tmp/handoff.toml",
        "--log-level",
        "debug",
        "--log-format",
        "json",
        "--log-file",
        "/tmp/handoff.log",
        "--wait-ms",
        "25",
        "--queue-name",
        "jobs",
        "demo",
    ])
    .unwrap();

    assert_eq!(args.config_file, Some(PathBuf::from("/tmp/handoff.toml")));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("json"));
    assert_eq!(args.log_file, Some(PathBuf::from("/tmp/handoff.log")));
    assert_eq!(args.wait_ms, Some(25));
    assert_eq!(args.queue_name.as_deref(), Some("jobs"));
    assert_eq!(args.command(), Command::Demo);
}

#[test]
fn test_stress_options() {
    let args =
        Args::try_parse_from(["handoff", "stress", "-p", "2", "-n", "50", "-k", "3"]).unwrap();

    assert_eq!(args.command().name(), "stress");
    assert_eq!(
        args.stress_args(),
        StressArgs {
            producers: Some(2),
            items_per_producer: Some(50),
            consumers: Some(3),
        }
    );
}

#[test]
fn test_invalid_values_rejected() {
    assert!(Args::try_parse_from(["handoff", "--wait-ms", "0"]).is_err());
    assert!(Args::try_parse_from(["handoff", "--log-level", "loud"]).is_err());
    assert!(Args::try_parse_from(["handoff", "--log-format", "xml"]).is_err());
    assert!(Args::try_parse_from(["handoff", "stress", "--producers", "0"]).is_err());
    assert!(Args::try_parse_from(["handoff", "stress", "--consumers", "two"]).is_err());
}

#[test]
fn test_color_flags() {
    let args = Args::try_parse_from(["handoff", "--no-color"]).unwrap();
    assert!(!args.use_color());

    let args = Args::try_parse_from(["handoff", "--color"]).unwrap();
    assert!(args.use_color());

    assert!(Args::try_parse_from(["handoff", "--color", "--no-color"]).is_err());
}
