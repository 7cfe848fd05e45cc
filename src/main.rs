use speedfit::cli::{parse_args, run_cli_command};
use speedfit::cli_output::icons;
use speedfit::logging::init_tracing;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            let err = speedfit::error::SpeedfitError::from(e);
            eprintln!("{} {}", icons::FAILURE, err.user_message());
            std::process::exit(1);
        }
    };

    match run_cli_command(command) {
        Ok(true) => Ok(()),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            tracing::debug!("{} [{}]: {}", e.error_code(), e.category(), e);
            eprintln!("{} {}", icons::FAILURE, e.user_message());
            std::process::exit(1);
        }
    }
}
