//! Video acquisition.
//!
//! Materializes the media the user picked, validates it against what the
//! analysis backend accepts, and copies it into the private work directory.
//! The caller publishes the returned [`VideoRef`] into the session; on any
//! error nothing is published.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::VideoRef;
use crate::traits::MediaSource;

/// File name of the private copy of the selected video.
pub const SELECTED_VIDEO_FILE: &str = "selected_video.mov";

/// Staging name; the copy is renamed over [`SELECTED_VIDEO_FILE`] once complete.
const PARTIAL_VIDEO_FILE: &str = "selected_video.mov.part";

/// Container formats the backend accepts.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["mp4", "mov", "avi"];

/// Largest upload the backend accepts (100 MiB).
pub const MAX_VIDEO_BYTES: u64 = 100 * 1024 * 1024;

/// Error type for video acquisition.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("video not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported video format '{name}' (expected .mp4, .mov or .avi)")]
    UnsupportedFormat { name: String },

    #[error("video is {size} bytes, larger than the {limit} byte limit")]
    TooLarge { size: u64, limit: u64 },

    #[error("selected video is empty")]
    Empty,

    #[error("failed to read selected video: {0}")]
    Read(#[source] std::io::Error),

    #[error("failed to copy video into {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("media could not be loaded: {0}")]
    Unavailable(String),
}

/// Copies picked media into the work directory.
#[derive(Debug, Clone)]
pub struct VideoAcquirer {
    work_dir: PathBuf,
    max_bytes: u64,
}

impl VideoAcquirer {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            max_bytes: MAX_VIDEO_BYTES,
        }
    }

    /// Override the size limit.
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Path the private copy is written to.
    pub fn target_path(&self) -> PathBuf {
        self.work_dir.join(SELECTED_VIDEO_FILE)
    }

    /// Materialize `source` and write it to the work directory.
    pub async fn acquire(&self, source: &dyn MediaSource) -> Result<VideoRef, AcquisitionError> {
        let name = source.describe();
        check_extension(&name)?;

        if let Some(size) = source.size_hint().await {
            self.check_size(size)?;
        }

        let bytes = source.materialize().await?;
        if bytes.is_empty() {
            return Err(AcquisitionError::Empty);
        }
        self.check_size(bytes.len() as u64)?;

        let target = self.target_path();
        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .map_err(|source| AcquisitionError::Write {
                path: self.work_dir.clone(),
                source,
            })?;
        let partial = self.work_dir.join(PARTIAL_VIDEO_FILE);
        tokio::fs::write(&partial, &bytes)
            .await
            .map_err(|source| AcquisitionError::Write {
                path: partial.clone(),
                source,
            })?;
        if let Err(source) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(AcquisitionError::Write {
                path: target,
                source,
            });
        }

        tracing::info!("Acquired {} ({} bytes) into {}", name, bytes.len(), target.display());
        Ok(VideoRef::new(target))
    }

    fn check_size(&self, size: u64) -> Result<(), AcquisitionError> {
        if size > self.max_bytes {
            return Err(AcquisitionError::TooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}

fn check_extension(name: &str) -> Result<(), AcquisitionError> {
    let supported = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false);

    if supported {
        Ok(())
    } else {
        Err(AcquisitionError::UnsupportedFormat {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MemoryVideoSource;

    #[test]
    fn test_check_extension() {
        assert!(check_extension("lift.mov").is_ok());
        assert!(check_extension("lift.MP4").is_ok());
        assert!(check_extension("/videos/set1.avi").is_ok());
        assert!(matches!(
            check_extension("notes.txt"),
            Err(AcquisitionError::UnsupportedFormat { .. })
        ));
        assert!(check_extension("no_extension").is_err());
    }

    #[tokio::test]
    async fn test_acquire_writes_private_copy() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = VideoAcquirer::new(dir.path().join("work"));
        let source = MemoryVideoSource::new("squat.mov", b"fake-mov-bytes".to_vec());

        let video = acquirer.acquire(&source).await.unwrap();

        assert_eq!(video.path(), dir.path().join("work").join(SELECTED_VIDEO_FILE));
        let written = std::fs::read(video.path()).unwrap();
        assert_eq!(written, b"fake-mov-bytes");
    }

    #[tokio::test]
    async fn test_failed_write_keeps_previous_copy() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = VideoAcquirer::new(dir.path());
        let first = acquirer
            .acquire(&MemoryVideoSource::new("first.mov", b"first".to_vec()))
            .await
            .unwrap();

        // A directory in the staging spot makes the next write fail.
        std::fs::create_dir(dir.path().join(PARTIAL_VIDEO_FILE)).unwrap();
        let result = acquirer
            .acquire(&MemoryVideoSource::new("second.mov", b"second".to_vec()))
            .await;

        assert!(matches!(result, Err(AcquisitionError::Write { .. })));
        assert_eq!(std::fs::read(first.path()).unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_reimport_replaces_copy_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = VideoAcquirer::new(dir.path());
        for body in [&b"one"[..], &b"two"[..]] {
            acquirer
                .acquire(&MemoryVideoSource::new("lift.mp4", body.to_vec()))
                .await
                .unwrap();
        }

        assert_eq!(std::fs::read(acquirer.target_path()).unwrap(), b"two");
        assert!(!dir.path().join(PARTIAL_VIDEO_FILE).exists());
    }

    #[tokio::test]
    async fn test_acquire_rejects_empty_media() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = VideoAcquirer::new(dir.path());
        let source = MemoryVideoSource::new("empty.mp4", Vec::new());

        let result = acquirer.acquire(&source).await;
        assert!(matches!(result, Err(AcquisitionError::Empty)));
        assert!(!acquirer.target_path().exists());
    }

    #[tokio::test]
    async fn test_acquire_rejects_oversized_media() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = VideoAcquirer::new(dir.path()).with_max_bytes(4);
        let source = MemoryVideoSource::new("big.mp4", vec![0u8; 5]);

        let result = acquirer.acquire(&source).await;
        assert!(matches!(
            result,
            Err(AcquisitionError::TooLarge { size: 5, limit: 4 })
        ));
    }

    #[tokio::test]
    async fn test_acquire_propagates_source_failure() {
        let dir = tempfile::tempdir().unwrap();
        let acquirer = VideoAcquirer::new(dir.path());
        let source = MemoryVideoSource::failing("icloud.mov", "asset not downloaded");

        let result = acquirer.acquire(&source).await;
        assert!(matches!(result, Err(AcquisitionError::Unavailable(_))));
        assert!(!acquirer.target_path().exists());
    }
}
