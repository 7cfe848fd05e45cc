//! CLI module for speedfit.
//!
//! - Argument parsing
//! - `analyze`, `health` and `guide` commands
//! - Version display
//!
//! # Usage
//!
//! ```ignore
//! use speedfit::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! match run_cli_command(command) {
//!     Ok(true) => std::process::exit(0),
//!     Ok(false) => std::process::exit(1),
//!     Err(e) => {
//!         eprintln!("Error: {}", e.user_message());
//!         std::process::exit(1);
//!     }
//! }
//! ```

pub mod analyze;
pub mod args;
pub mod guide;
pub mod health;
pub mod version;

pub use analyze::handle_analyze_command;
pub use args::{parse_args, AnalyzeArgs, ArgsError, CliCommand, USAGE};
pub use guide::handle_guide_command;
pub use health::handle_health_command;
pub use version::{handle_version_command, VERSION};

use crate::error::SpeedfitResult;

/// Run a parsed CLI command.
///
/// # Returns
///
/// * `Ok(true)` - The command succeeded
/// * `Ok(false)` - The command ran but reported a failure itself (e.g. an
///   unhealthy backend)
/// * `Err(e)` - The command failed; the caller reports `e.user_message()`
pub fn run_cli_command(command: CliCommand) -> SpeedfitResult<bool> {
    match command {
        CliCommand::Analyze(args) => handle_analyze_command(args),
        CliCommand::Health { url } => handle_health_command(url),
        CliCommand::Guide => {
            handle_guide_command();
            Ok(true)
        }
        CliCommand::Version => {
            handle_version_command();
            Ok(true)
        }
        CliCommand::Help => {
            print!("{}", USAGE);
            Ok(true)
        }
    }
}
