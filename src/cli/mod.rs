//! CLI support for olap-mdx
//!
//! Provides programmatic access to the `mdx` command functionality so other
//! tools can embed it.

mod convert;
mod docs;
mod region;
mod render;

pub use convert::json_to_query;
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use region::{RegionOptions, execute_region};
pub use render::{RenderOptions, execute_render};

use std::io;

use thiserror::Error;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Builder rejected the query description
    #[error(transparent)]
    Configuration(#[from] crate::ConfigurationError),
    /// Malformed member name
    #[error(transparent)]
    Parse(#[from] crate::ParseError),
    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Well-formed JSON that does not describe a query
    #[error("Invalid query document: {0}")]
    InvalidDocument(String),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No input provided
    #[error("No input provided. Use --file, --input or pipe JSON to stdin.")]
    NoInput,
    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'mdx docs' to see available categories.")]
    UnknownCategory(String),
}

impl From<crate::RegionError> for CliError {
    fn from(e: crate::RegionError) -> Self {
        match e {
            crate::RegionError::Configuration(e) => CliError::Configuration(e),
            crate::RegionError::Parse(e) => CliError::Parse(e),
        }
    }
}
