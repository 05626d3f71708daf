//! Output formatting module
//!
//! Renders conformance results as tables, JSON, CSV or one-line summaries.

mod formatter;

pub use formatter::{write_results_to_file, OutputFormat, ResultFormatter};
