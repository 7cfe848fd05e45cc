//! Error category classification.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection refused, DNS failure, timeout.
    Network,

    /// Backend answered with a 5xx or an unusable payload.
    Server,

    /// Request the backend considered malformed. Indicates a bug here.
    Client,

    /// User action required (bad input file, nothing selected).
    User,

    /// Filesystem errors in the work directory.
    System,

    /// Invalid backend URL or environment settings.
    Configuration,
}

impl ErrorCategory {
    /// Whether the failure is transient, so trying again later may succeed.
    ///
    /// Nothing retries automatically; this only shapes the message.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::System => "system",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested next step for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check that the backend is running and reachable, then try again",
            ErrorCategory::Server => "The backend could not analyze this video. Please try again",
            ErrorCategory::Client => "This may be a bug. Please report this issue if it persists",
            ErrorCategory::User => "Please check the selected video and try again",
            ErrorCategory::System => "Check file permissions and available disk space",
            ErrorCategory::Configuration => "Check SPEEDFIT_BACKEND_URL and the other SPEEDFIT_* settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Network.is_retryable());
        assert!(ErrorCategory::Server.is_retryable());
        assert!(!ErrorCategory::Client.is_retryable());
        assert!(!ErrorCategory::User.is_retryable());
        assert!(!ErrorCategory::System.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Network), "network");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }

    #[test]
    fn test_recovery_hint() {
        assert!(ErrorCategory::Network.recovery_hint().contains("backend"));
        assert!(ErrorCategory::Configuration.recovery_hint().contains("SPEEDFIT_BACKEND_URL"));
    }
}
