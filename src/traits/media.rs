//! Media source abstraction.
//!
//! Stands in for the platform media picker: something the user chose that
//! can be materialized into video bytes.

use async_trait::async_trait;
use bytes::Bytes;

use crate::acquisition::AcquisitionError;

#[async_trait]
pub trait MediaSource: Send + Sync {
    /// Load the full contents of the selected media.
    async fn materialize(&self) -> Result<Bytes, AcquisitionError>;

    /// Original file name or identifier, used for format checks and logging.
    fn describe(&self) -> String;

    /// Size hint in bytes, when known before materializing.
    async fn size_hint(&self) -> Option<u64> {
        None
    }
}
