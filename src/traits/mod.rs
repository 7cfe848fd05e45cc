//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST)
//! - [`MediaSource`] - where an input video's bytes come from

pub mod http;
pub mod media;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use media::MediaSource;
