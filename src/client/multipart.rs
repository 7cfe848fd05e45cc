//! multipart/form-data body encoding.
//!
//! The analysis backend expects a boundary of the form `Boundary-<UUID>` and
//! CRLF-delimited parts:
//!
//! ```text
//! --Boundary-<uuid>
//! Content-Disposition: form-data; name="video"; filename="video.mov"
//! Content-Type: video/quicktime
//!
//! <raw video bytes>
//! --Boundary-<uuid>
//! Content-Disposition: form-data; name="plate_diameter"
//!
//! 0.45
//! --Boundary-<uuid>--
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use uuid::Uuid;

/// Incrementally built multipart/form-data body.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    buf: BytesMut,
}

impl MultipartBody {
    /// Start a body with a freshly generated boundary.
    pub fn new() -> Self {
        Self::with_boundary(generate_boundary())
    }

    /// Start a body with a fixed boundary.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            buf: BytesMut::new(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Append a binary file part.
    pub fn add_file(mut self, name: &str, filename: &str, content_type: &str, data: &[u8]) -> Self {
        self.buf.reserve(data.len() + 256);
        self.put_delimiter();
        self.put_line(&format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"",
            name, filename
        ));
        self.put_line(&format!("Content-Type: {}", content_type));
        self.put_line("");
        self.buf.put_slice(data);
        self.put_line("");
        self
    }

    /// Append a plain text field.
    pub fn add_text(mut self, name: &str, value: &str) -> Self {
        self.put_delimiter();
        self.put_line(&format!("Content-Disposition: form-data; name=\"{}\"", name));
        self.put_line("");
        self.buf.put_slice(value.as_bytes());
        self.put_line("");
        self
    }

    /// Write the closing delimiter and return the encoded body.
    pub fn finish(mut self) -> Bytes {
        self.buf.put_slice(b"--");
        self.buf.put_slice(self.boundary.as_bytes());
        self.buf.put_slice(b"--\r\n");
        self.buf.freeze()
    }

    fn put_delimiter(&mut self) {
        self.buf.put_slice(b"--");
        self.buf.put_slice(self.boundary.as_bytes());
        self.buf.put_slice(b"\r\n");
    }

    fn put_line(&mut self, line: &str) {
        self.buf.put_slice(line.as_bytes());
        self.buf.put_slice(b"\r\n");
    }
}

impl Default for MultipartBody {
    fn default() -> Self {
        Self::new()
    }
}

/// `Boundary-` followed by an uppercase hyphenated v4 UUID.
pub fn generate_boundary() -> String {
    format!("Boundary-{}", Uuid::new_v4().to_string().to_uppercase())
}
