//! Resolve cache regions from the command line

use super::CliError;
use crate::region::{CacheFlushRequest, Region, RegionCoordinate, resolve_full_name};

/// Options for the region command
#[derive(Debug, Clone, Default)]
pub struct RegionOptions {
    /// Cube the flush targets
    pub cube: String,
    /// Comma-separated tuples, e.g. `Time,2010,Q1`
    pub segments: Vec<String>,
    /// Fully-qualified names, e.g. `[Time].[2010].[Q1]`
    pub names: Vec<String>,
}

/// Resolve every coordinate into one region and describe the flush request.
pub fn execute_region(options: &RegionOptions) -> Result<serde_json::Value, CliError> {
    let mut coordinates = Vec::with_capacity(options.segments.len() + options.names.len());

    for tuple in &options.segments {
        let parts: Vec<&str> = tuple.split(',').map(str::trim).collect();
        coordinates.push(RegionCoordinate::from_tuple(&parts)?);
    }
    for name in &options.names {
        coordinates.push(resolve_full_name(name)?);
    }

    let region = Region::build(coordinates)?;
    Ok(CacheFlushRequest::new(options.cube.clone(), region).to_json())
}
