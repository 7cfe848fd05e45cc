//! Speedfit - barbell velocity analysis client
//!
//! Uploads a lift video to the analysis backend, stores the annotated video
//! it returns and fetches per-rep velocity metrics. This library exposes
//! modules for use by the `speedfit` binary and integration tests.

pub mod acquisition;
pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod progress;
pub mod results;
pub mod traits;
pub mod workflow;
