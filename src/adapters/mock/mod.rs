//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MemoryVideoSource`] - media source backed by an in-memory buffer

pub mod http;
pub mod media;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use media::MemoryVideoSource;
