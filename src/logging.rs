//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "SPEEDFIT_LOG";

/// Filter used when `SPEEDFIT_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "speedfit=warn";

/// Build the filter from `SPEEDFIT_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_default_filter() {
        std::env::remove_var(LOG_ENV);
        assert_eq!(env_filter().to_string(), DEFAULT_FILTER);
    }

    #[test]
    #[serial]
    fn test_filter_from_env() {
        std::env::set_var(LOG_ENV, "speedfit=debug");
        let filter = env_filter();
        std::env::remove_var(LOG_ENV);
        assert_eq!(filter.to_string(), "speedfit=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_tracing();
        init_tracing();
    }
}
