//! Command-line argument parsing for the speedfit CLI.
//!
//! Hand-written: the surface is four subcommands with a handful of flags.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{LiftType, ParseLiftError, PlateSize};

/// Usage text printed by `--help`.
pub const USAGE: &str = "\
speedfit - barbell velocity analysis

USAGE:
    speedfit analyze <VIDEO> [OPTIONS]
    speedfit health [--url URL]
    speedfit guide
    speedfit --version
    speedfit --help

ANALYZE OPTIONS:
    --lift <LIFT>            squat, bench or deadlift (default: squat)
    --weight <KG>            load on the bar, e.g. 100
    --plate <SIZE>           plate diameter: 45, 35 or 25 cm (default: 45)
    --url <URL>              backend base URL (overrides SPEEDFIT_BACKEND_URL)
    --placeholder-metrics    show sample metrics when the metrics fetch fails

ENVIRONMENT:
    SPEEDFIT_BACKEND_URL       backend base URL
    SPEEDFIT_WORK_DIR          directory for the selected and processed videos
    SPEEDFIT_METRICS_FALLBACK  'placeholder' or 'disabled'
    SPEEDFIT_LOG               tracing filter, e.g. speedfit=debug
";

/// Error type for argument parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("option '{0}' requires a value")]
    MissingValue(String),

    #[error("missing video path for 'analyze'")]
    MissingVideo,

    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error(transparent)]
    InvalidValue(#[from] ParseLiftError),
}

/// Options for `speedfit analyze`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalyzeArgs {
    pub video: PathBuf,
    pub lift_type: LiftType,
    pub weight: String,
    pub plate_size: PlateSize,
    /// Backend URL override.
    pub url: Option<String>,
    pub placeholder_metrics: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Upload a video and show its results
    Analyze(AnalyzeArgs),
    /// Probe the backend
    Health { url: Option<String> },
    /// Print camera setup guidance
    Guide,
    /// Show version information
    Version,
    /// Show usage
    Help,
}

/// Parse command-line arguments, program name included.
///
/// # Examples
///
/// ```
/// use speedfit::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["speedfit".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()).unwrap(), CliCommand::Version);
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    // Skip the program name
    let mut args = args.skip(1);

    let Some(first) = args.next() else {
        return Ok(CliCommand::Help);
    };

    match first.as_str() {
        "--version" | "-V" => Ok(CliCommand::Version),
        "--help" | "-h" | "help" => Ok(CliCommand::Help),
        "guide" => {
            reject_extra(args)?;
            Ok(CliCommand::Guide)
        }
        "health" => parse_health(args),
        "analyze" => parse_analyze(args).map(CliCommand::Analyze),
        other if other.starts_with('-') => Err(ArgsError::UnknownOption(other.to_string())),
        other => Err(ArgsError::UnknownCommand(other.to_string())),
    }
}

fn parse_health<I>(mut args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut url = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--url" => url = Some(take_value(&mut args, &arg)?),
            "--help" | "-h" => return Ok(CliCommand::Help),
            other if other.starts_with('-') => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            other => return Err(ArgsError::UnexpectedArgument(other.to_string())),
        }
    }
    Ok(CliCommand::Health { url })
}

fn parse_analyze<I>(mut args: I) -> Result<AnalyzeArgs, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut parsed = AnalyzeArgs::default();
    let mut video = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--lift" => parsed.lift_type = take_value(&mut args, &arg)?.parse()?,
            "--weight" => parsed.weight = take_value(&mut args, &arg)?,
            "--plate" => parsed.plate_size = take_value(&mut args, &arg)?.parse()?,
            "--url" => parsed.url = Some(take_value(&mut args, &arg)?),
            "--placeholder-metrics" => parsed.placeholder_metrics = true,
            other if other.starts_with("--") => {
                return Err(ArgsError::UnknownOption(other.to_string()))
            }
            other => {
                if video.is_some() {
                    return Err(ArgsError::UnexpectedArgument(other.to_string()));
                }
                video = Some(PathBuf::from(other));
            }
        }
    }

    parsed.video = video.ok_or(ArgsError::MissingVideo)?;
    Ok(parsed)
}

fn take_value<I>(args: &mut I, flag: &str) -> Result<String, ArgsError>
where
    I: Iterator<Item = String>,
{
    args.next()
        .ok_or_else(|| ArgsError::MissingValue(flag.to_string()))
}

fn reject_extra<I>(mut args: I) -> Result<(), ArgsError>
where
    I: Iterator<Item = String>,
{
    match args.next() {
        Some(extra) => Err(ArgsError::UnexpectedArgument(extra)),
        None => Ok(()),
    }
}
