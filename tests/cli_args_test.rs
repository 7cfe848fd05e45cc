//! Command-line parsing as seen from the binary's entry point.

use std::path::PathBuf;

use speedfit::cli::{parse_args, ArgsError, CliCommand};
use speedfit::error::{ErrorCategory, SpeedfitError};
use speedfit::models::{LiftType, PlateSize};

fn argv(args: &[&str]) -> impl Iterator<Item = String> {
    std::iter::once("speedfit".to_string())
        .chain(args.iter().map(|s| s.to_string()))
        .collect::<Vec<_>>()
        .into_iter()
}

#[test]
fn test_version_flag() {
    assert_eq!(parse_args(argv(&["--version"])).unwrap(), CliCommand::Version);
}

#[test]
fn test_analyze_bench_press() {
    let command = parse_args(argv(&[
        "analyze", "bench.mov", "--lift", "Bench Press", "--weight", "80", "--plate", "25",
    ]))
    .unwrap();

    match command {
        CliCommand::Analyze(args) => {
            assert_eq!(args.video, PathBuf::from("bench.mov"));
            assert_eq!(args.lift_type, LiftType::BenchPress);
            assert_eq!(args.weight, "80");
            assert_eq!(args.plate_size, PlateSize::Small25);
        }
        other => panic!("expected analyze, got {:?}", other),
    }
}

#[test]
fn test_bad_plate_is_user_error() {
    let err = parse_args(argv(&["analyze", "a.mov", "--plate", "50"])).unwrap_err();
    assert!(matches!(err, ArgsError::InvalidValue(_)));

    let err = SpeedfitError::from(err);
    assert_eq!(err.category(), ErrorCategory::User);
    assert!(err.user_message().contains("unknown plate size '50'"));
}
