//! In-memory media source for tests.

use async_trait::async_trait;
use bytes::Bytes;

use crate::acquisition::AcquisitionError;
use crate::traits::MediaSource;

/// Media source that hands out a fixed buffer, or fails like a picker item
/// whose bytes cannot be loaded.
#[derive(Debug, Clone)]
pub struct MemoryVideoSource {
    name: String,
    contents: Result<Bytes, String>,
}

impl MemoryVideoSource {
    pub fn new(name: &str, data: Vec<u8>) -> Self {
        Self {
            name: name.to_string(),
            contents: Ok(Bytes::from(data)),
        }
    }

    pub fn failing(name: &str, reason: &str) -> Self {
        Self {
            name: name.to_string(),
            contents: Err(reason.to_string()),
        }
    }
}

#[async_trait]
impl MediaSource for MemoryVideoSource {
    async fn materialize(&self) -> Result<Bytes, AcquisitionError> {
        self.contents
            .clone()
            .map_err(AcquisitionError::Unavailable)
    }

    fn describe(&self) -> String {
        self.name.clone()
    }
}
