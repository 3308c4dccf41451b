//! Output formatting module
//!
//! Renders suite results for the terminal or as JSON.

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
