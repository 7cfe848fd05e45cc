//! File-backed media source.
//!
//! The terminal front end has no media library; the user names a file.

use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};

use crate::acquisition::AcquisitionError;
use crate::traits::MediaSource;

/// Media source reading a video file from disk.
#[derive(Debug, Clone)]
pub struct FileVideoSource {
    path: PathBuf,
}

impl FileVideoSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl MediaSource for FileVideoSource {
    async fn materialize(&self) -> Result<Bytes, AcquisitionError> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AcquisitionError::NotFound {
                path: self.path.clone(),
            }),
            Err(e) => Err(AcquisitionError::Read(e)),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn size_hint(&self) -> Option<u64> {
        tokio::fs::metadata(&self.path).await.ok().map(|m| m.len())
    }
}
