//! Concrete implementations of trait abstractions.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileVideoSource`] - media source reading a file from disk
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses with request recording
//! - [`mock::MemoryVideoSource`] - In-memory media, optionally failing

pub mod file_media;
pub mod mock;
pub mod reqwest_http;

pub use file_media::FileVideoSource;
pub use mock::{MemoryVideoSource, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
