//! Render JSON query documents as MDX

use super::{CliError, json_to_query};

/// Options for the render command
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// JSON query document
    pub input: Option<String>,
}

/// Parse the query document and return its MDX text.
pub fn execute_render(options: &RenderOptions) -> Result<String, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;
    let doc: serde_json::Value = serde_json::from_str(json_str)?;
    let query = json_to_query(doc)?;
    Ok(query.to_mdx())
}
