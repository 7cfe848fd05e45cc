//! Result type alias for speedfit operations.

use super::speedfit_error::SpeedfitError;

/// Type alias for Results using [`SpeedfitError`].
pub type SpeedfitResult<T> = Result<T, SpeedfitError>;
