//! Backend configuration.
//!
//! Use the builder methods to customize, or [`BackendConfig::from_env`] to
//! pick up overrides from the environment.
//!
//! ```ignore
//! use speedfit::config::{BackendConfig, MetricsFallback};
//!
//! let config = BackendConfig::default()
//!     .with_base_url("http://192.168.1.20:8000/")
//!     .with_metrics_fallback(MetricsFallback::Placeholder);
//! assert_eq!(config.base_url, "http://192.168.1.20:8000");
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::progress::ProgressConfig;

/// Development backend address baked into the mobile build.
pub const DEFAULT_BACKEND_URL: &str = "http://172.20.10.3:8000";

/// Overrides the backend base URL.
pub const BACKEND_URL_ENV: &str = "SPEEDFIT_BACKEND_URL";

/// Overrides the work directory for selected and processed videos.
pub const WORK_DIR_ENV: &str = "SPEEDFIT_WORK_DIR";

/// Set to `placeholder` to substitute fixture metrics when the fetch fails.
pub const METRICS_FALLBACK_ENV: &str = "SPEEDFIT_METRICS_FALLBACK";

/// Error type for configuration problems.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("backend URL '{0}' must start with http:// or https://")]
    InvalidBaseUrl(String),

    #[error("unknown metrics fallback '{0}' (expected 'placeholder' or 'disabled')")]
    UnknownFallback(String),
}

/// What to do when the metrics document cannot be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricsFallback {
    /// Report the fetch failure and leave metrics absent.
    #[default]
    Disabled,
    /// Substitute [`crate::models::SessionMetrics::placeholder`], flagged as such.
    Placeholder,
}

impl std::str::FromStr for MetricsFallback {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "disabled" | "off" | "none" => Ok(MetricsFallback::Disabled),
            "placeholder" | "mock" => Ok(MetricsFallback::Placeholder),
            other => Err(ConfigError::UnknownFallback(other.to_string())),
        }
    }
}

/// Configuration for talking to the analysis backend.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Private directory for the selected and processed videos.
    pub work_dir: PathBuf,
    pub metrics_fallback: MetricsFallback,
    pub progress: ProgressConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            work_dir: default_work_dir(),
            metrics_fallback: MetricsFallback::Disabled,
            progress: ProgressConfig::default(),
        }
    }
}

impl BackendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend base URL. Trailing slashes are trimmed.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn with_metrics_fallback(mut self, fallback: MetricsFallback) -> Self {
        self.metrics_fallback = fallback;
        self
    }

    pub fn with_progress(mut self, progress: ProgressConfig) -> Self {
        self.progress = progress;
        self
    }

    /// Build a config from the defaults plus any `SPEEDFIT_*` overrides.
    ///
    /// The base URL is not validated here; callers apply their own overrides
    /// first and then call [`BackendConfig::validate`].
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config = config.with_base_url(url);
            }
        }
        if let Ok(dir) = std::env::var(WORK_DIR_ENV) {
            if !dir.trim().is_empty() {
                config = config.with_work_dir(dir);
            }
        }
        if let Ok(fallback) = std::env::var(METRICS_FALLBACK_ENV) {
            config = config.with_metrics_fallback(fallback.parse()?);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }

    /// `{base_url}{path}`, where `path` starts with `/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// `<cache dir>/speedfit`, or `<temp dir>/speedfit` when there is no cache dir.
pub fn default_work_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("speedfit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(BACKEND_URL_ENV);
        std::env::remove_var(WORK_DIR_ENV);
        std::env::remove_var(METRICS_FALLBACK_ENV);
    }

    #[test]
    fn test_default_config() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.metrics_fallback, MetricsFallback::Disabled);
        assert!(config.work_dir.ends_with("speedfit"));
        assert_eq!(config.progress, ProgressConfig::default());
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = BackendConfig::default().with_base_url("http://localhost:8000/");
        assert_eq!(config.endpoint("/analyze-lift/"), "http://localhost:8000/analyze-lift/");
    }

    #[test]
    fn test_validate_rejects_missing_scheme() {
        let config = BackendConfig::default().with_base_url("localhost:8000");
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBaseUrl("localhost:8000".to_string()))
        );
    }

    #[test]
    fn test_parse_metrics_fallback() {
        assert_eq!("placeholder".parse::<MetricsFallback>(), Ok(MetricsFallback::Placeholder));
        assert_eq!("Disabled".parse::<MetricsFallback>(), Ok(MetricsFallback::Disabled));
        assert!("sometimes".parse::<MetricsFallback>().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = BackendConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.metrics_fallback, MetricsFallback::Disabled);
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        std::env::set_var(BACKEND_URL_ENV, "http://10.0.0.5:9000/");
        std::env::set_var(WORK_DIR_ENV, "/tmp/speedfit-test");
        std::env::set_var(METRICS_FALLBACK_ENV, "placeholder");

        let config = BackendConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.work_dir, PathBuf::from("/tmp/speedfit-test"));
        assert_eq!(config.metrics_fallback, MetricsFallback::Placeholder);
    }

    #[test]
    #[serial]
    fn test_from_env_defers_url_validation() {
        clear_env();
        std::env::set_var(BACKEND_URL_ENV, "localhost:8000");
        let config = BackendConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.base_url, "localhost:8000");
        assert!(matches!(config.validate(), Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_fallback() {
        clear_env();
        std::env::set_var(METRICS_FALLBACK_ENV, "sometimes");
        let result = BackendConfig::from_env();
        clear_env();
        assert!(matches!(result, Err(ConfigError::UnknownFallback(_))));
    }
}
