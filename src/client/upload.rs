//! Upload client for `POST /analyze-lift/`.
//!
//! Sends the selected video and the calibration plate diameter as a
//! multipart form, and stores the annotated video the backend answers with.
//! Exactly one attempt is made per call; nothing is written to the session
//! here, so a failure leaves no partial state behind.

use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;

use super::multipart::MultipartBody;
use crate::models::{PlateSize, VideoRef, WorkoutSession};
use crate::traits::{Headers, HttpClient, HttpError};

/// Analysis endpoint path.
pub const ANALYZE_PATH: &str = "/analyze-lift/";

/// Response header carrying the backend-side metrics file path.
pub const METRICS_PATH_HEADER: &str = "X-Metrics-Path";

/// File name of the stored processed video.
pub const PROCESSED_VIDEO_FILE: &str = "processed_video.mp4";

const VIDEO_FIELD: &str = "video";
const VIDEO_FILENAME: &str = "video.mov";
const VIDEO_CONTENT_TYPE: &str = "video/quicktime";
const PLATE_FIELD: &str = "plate_diameter";

/// Error type for upload operations.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Submit was attempted without a selected video. No request was sent.
    #[error("no video selected")]
    NoVideo,

    /// Another upload is already in flight.
    #[error("an upload is already in progress")]
    Busy,

    #[error("failed to read {}: {source}", path.display())]
    ReadVideo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("upload failed: {0}")]
    Transport(#[from] HttpError),

    /// Anything but 200.
    #[error("backend rejected the upload (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("failed to save processed video to {}: {source}", path.display())]
    SaveProcessed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadOutcome {
    /// Local copy of the annotated mp4.
    pub processed_video: VideoRef,
    /// Value of `X-Metrics-Path`, when the backend sent one.
    pub metrics_path: Option<String>,
    pub bytes_sent: usize,
    pub bytes_received: usize,
}

/// Client for the analysis endpoint.
#[derive(Debug, Clone)]
pub struct UploadClient<C: HttpClient> {
    http: Arc<C>,
    base_url: String,
    work_dir: PathBuf,
}

impl<C: HttpClient> UploadClient<C> {
    pub fn new(http: Arc<C>, base_url: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, ANALYZE_PATH)
    }

    /// Where the processed video is written.
    pub fn processed_path(&self) -> PathBuf {
        self.work_dir.join(PROCESSED_VIDEO_FILE)
    }

    /// Upload the session's video and store the processed result.
    ///
    /// Returns [`UploadError::NoVideo`] without touching the network when no
    /// video has been selected.
    pub async fn submit(&self, session: &WorkoutSession) -> Result<UploadOutcome, UploadError> {
        let video = session.video.as_ref().ok_or(UploadError::NoVideo)?;

        let data = tokio::fs::read(video.path())
            .await
            .map_err(|source| UploadError::ReadVideo {
                path: video.path().to_path_buf(),
                source,
            })?;

        let body = build_body(&data, session.plate_size);
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), body.content_type());
        let payload = body.finish();
        let bytes_sent = payload.len();

        let url = self.endpoint();
        tracing::info!(
            "Uploading {} ({} bytes, plate {} m) to {}",
            video,
            data.len(),
            session.plate_size.diameter_text(),
            url
        );

        let response = self.http.post(&url, payload, &headers).await?;

        if !response.is_ok() {
            let message = response.text_lossy();
            tracing::warn!("Upload rejected with HTTP {}: {}", response.status, message);
            return Err(UploadError::Status {
                status: response.status,
                message,
            });
        }

        let metrics_path = response
            .header(METRICS_PATH_HEADER)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        let processed = self.save_processed(&response.body).await?;
        tracing::info!(
            "Processed video saved to {} ({} bytes)",
            processed,
            response.body.len()
        );

        Ok(UploadOutcome {
            processed_video: processed,
            metrics_path,
            bytes_sent,
            bytes_received: response.body.len(),
        })
    }

    async fn save_processed(&self, body: &Bytes) -> Result<VideoRef, UploadError> {
        let path = self.processed_path();
        tokio::fs::create_dir_all(&self.work_dir)
            .await
            .map_err(|source| UploadError::SaveProcessed {
                path: self.work_dir.clone(),
                source,
            })?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|source| UploadError::SaveProcessed {
                path: path.clone(),
                source,
            })?;
        Ok(VideoRef::new(path))
    }
}

/// Multipart body for the analysis request: the video part then the plate
/// diameter part.
pub fn build_body(video: &[u8], plate_size: PlateSize) -> MultipartBody {
    MultipartBody::new()
        .add_file(VIDEO_FIELD, VIDEO_FILENAME, VIDEO_CONTENT_TYPE, video)
        .add_text(PLATE_FIELD, &plate_size.diameter_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::Response;

    const BASE: &str = "http://backend.test";

    fn session_with_video(dir: &std::path::Path, plate: PlateSize) -> WorkoutSession {
        let path = dir.join("selected_video.mov");
        std::fs::write(&path, b"MOVDATA").unwrap();
        let mut session = WorkoutSession::new();
        session.select_video(VideoRef::new(path));
        session.plate_size = plate;
        session
    }

    #[test]
    fn test_build_body_parts() {
        let body = build_body(b"MOVDATA", PlateSize::Standard35);
        let boundary = body.boundary().to_string();
        let text = String::from_utf8(body.finish().to_vec()).unwrap();

        assert!(text.starts_with(&format!("--{}\r\n", boundary)));
        assert!(text.contains(
            "Content-Disposition: form-data; name=\"video\"; filename=\"video.mov\"\r\nContent-Type: video/quicktime\r\n\r\nMOVDATA\r\n"
        ));
        assert!(text.contains(
            "Content-Disposition: form-data; name=\"plate_diameter\"\r\n\r\n0.35\r\n"
        ));
        assert!(text.ends_with(&format!("--{}--\r\n", boundary)));
    }

    #[tokio::test]
    async fn test_submit_without_video_sends_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(MockHttpClient::new());
        let client = UploadClient::new(Arc::clone(&http), BASE, dir.path());

        let result = client.submit(&WorkoutSession::new()).await;

        assert!(matches!(result, Err(UploadError::NoVideo)));
        assert!(http.requests().is_empty());
    }

    #[tokio::test]
    async fn test_submit_success_saves_video_and_reads_header() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(MockHttpClient::new());
        http.set_response(
            &format!("{}{}", BASE, ANALYZE_PATH),
            MockResponse::Success(
                Response::new(200, Bytes::from_static(b"MP4OUT"))
                    .with_header("x-metrics-path", "/srv/out/run42_metrics.json"),
            ),
        );
        let client = UploadClient::new(Arc::clone(&http), BASE, dir.path().join("work"));
        let session = session_with_video(dir.path(), PlateSize::Olympic45);

        let outcome = client.submit(&session).await.unwrap();

        assert_eq!(outcome.metrics_path.as_deref(), Some("/srv/out/run42_metrics.json"));
        assert_eq!(outcome.bytes_received, 6);
        assert_eq!(std::fs::read(outcome.processed_video.path()).unwrap(), b"MP4OUT");

        let requests = http.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(requests[0].url, "http://backend.test/analyze-lift/");
        let content_type = requests[0].headers.get("Content-Type").unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        assert!(boundary.starts_with("Boundary-"));
        let body = requests[0].body_text();
        assert!(body.contains(&format!("--{}\r\n", boundary)));
        assert!(body.contains("MOVDATA"));
        assert!(body.contains("name=\"plate_diameter\"\r\n\r\n0.45\r\n"));
        assert_eq!(outcome.bytes_sent, requests[0].body.as_ref().unwrap().len());
    }

    #[tokio::test]
    async fn test_submit_without_metrics_header() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(MockHttpClient::new());
        http.set_default_response(MockResponse::Success(Response::new(
            200,
            Bytes::from_static(b"MP4"),
        )));
        let client = UploadClient::new(Arc::clone(&http), BASE, dir.path());

        let outcome = client
            .submit(&session_with_video(dir.path(), PlateSize::Small25))
            .await
            .unwrap();
        assert_eq!(outcome.metrics_path, None);
    }

    #[tokio::test]
    async fn test_non_200_is_failure_and_writes_nothing() {
        for status in [201u16, 400, 413, 500] {
            let dir = tempfile::tempdir().unwrap();
            let http = Arc::new(MockHttpClient::new());
            http.set_default_response(MockResponse::Success(Response::new(
                status,
                Bytes::from_static(b"{\"detail\":\"nope\"}"),
            )));
            let client = UploadClient::new(Arc::clone(&http), BASE, dir.path().join("work"));

            let result = client
                .submit(&session_with_video(dir.path(), PlateSize::Olympic45))
                .await;

            match result {
                Err(UploadError::Status { status: got, .. }) => assert_eq!(got, status),
                other => panic!("expected status error for {}, got {:?}", status, other),
            }
            assert!(!client.processed_path().exists());
        }
    }

    #[tokio::test]
    async fn test_transport_error() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(MockHttpClient::new());
        http.set_default_response(MockResponse::Error(HttpError::ConnectionFailed(
            "refused".to_string(),
        )));
        let client = UploadClient::new(Arc::clone(&http), BASE, dir.path());

        let result = client
            .submit(&session_with_video(dir.path(), PlateSize::Olympic45))
            .await;
        assert!(matches!(result, Err(UploadError::Transport(_))));
        assert_eq!(http.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_video_file() {
        let dir = tempfile::tempdir().unwrap();
        let http = Arc::new(MockHttpClient::new());
        let client = UploadClient::new(Arc::clone(&http), BASE, dir.path());
        let mut session = WorkoutSession::new();
        session.select_video(VideoRef::new(dir.path().join("gone.mov")));

        let result = client.submit(&session).await;
        assert!(matches!(result, Err(UploadError::ReadVideo { .. })));
        assert!(http.requests().is_empty());
    }
}
