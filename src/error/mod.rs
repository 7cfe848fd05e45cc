//! Unified error handling.
//!
//! Each component has its own `thiserror` enum ([`AcquisitionError`],
//! [`UploadError`], [`MetricsError`], [`ConfigError`], [`ArgsError`]). They
//! convert into [`SpeedfitError`], which adds a category, a user-facing message
//! and a short code for logs.
//!
//! | Category | Description | Retryable |
//! |----------|-------------|-----------|
//! | Network | Connection, DNS, timeout | Yes |
//! | Server | Backend errors (5xx) | Yes |
//! | Client | Rejected request | No |
//! | User | Bad or missing input | No |
//! | System | Work directory I/O | No |
//! | Configuration | Backend URL, env settings | No |
//!
//! [`AcquisitionError`]: crate::acquisition::AcquisitionError
//! [`UploadError`]: crate::client::UploadError
//! [`MetricsError`]: crate::client::MetricsError
//! [`ConfigError`]: crate::config::ConfigError
//! [`ArgsError`]: crate::cli::ArgsError

mod category;
mod result;
mod speedfit_error;

pub use category::ErrorCategory;
pub use result::SpeedfitResult;
pub use speedfit_error::SpeedfitError;
