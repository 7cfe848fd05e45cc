//! Line-based terminal output for the `speedfit` commands.
//!
//! Progress and step lines go to stderr; the results report goes to stdout
//! so it can be redirected on its own.

mod boxes;

pub use boxes::*;
