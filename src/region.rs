//! Cache regions for partial cache invalidation.
//!
//! A region constrains one or more hierarchies to a member path each. The
//! engine drops every cached segment that overlaps the path in *every*
//! constrained hierarchy: segments at or below the path, and aggregates
//! above it that include its cells. Hierarchies the region does not mention
//! are unconstrained.
//!
//! Coordinates are given either as path segments or as a fully-qualified
//! name. Both spellings resolve to the same value. In a full name a `]`
//! inside a segment is written doubled, as in `FROM` clauses:
//!
//! ```
//! use olap_mdx::region::{resolve_full_name, resolve_segments};
//!
//! let by_name = resolve_full_name("[Time].[2010].[Q1]").unwrap();
//! let by_segments = resolve_segments("Time", ["2010", "Q1"]);
//! assert_eq!(by_name, by_segments);
//! ```

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::{ConfigurationError, ParseError, RegionError};

static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[((?:[^\]]|\]\])+)\]").expect("segment pattern is valid"));

/// A hierarchy and a member path within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionCoordinate {
    pub hierarchy: String,
    pub path: Vec<String>,
}

impl RegionCoordinate {
    /// True if `other` lies in the same hierarchy at or below this path.
    pub fn contains(&self, other: &RegionCoordinate) -> bool {
        self.hierarchy == other.hierarchy && other.path.starts_with(&self.path)
    }

    /// True if the two coordinates share cells: same hierarchy and one path
    /// is a prefix of the other.
    pub fn overlaps(&self, other: &RegionCoordinate) -> bool {
        self.hierarchy == other.hierarchy
            && (other.path.starts_with(&self.path) || self.path.starts_with(&other.path))
    }

    /// Coordinate from a tuple whose first element is the hierarchy.
    pub fn from_tuple<S: AsRef<str>>(tuple: &[S]) -> Result<Self, ConfigurationError> {
        match tuple.split_first() {
            Some((hierarchy, path)) if !hierarchy.as_ref().is_empty() => Ok(resolve_segments(
                hierarchy.as_ref(),
                path.iter().map(|s| s.as_ref().to_string()),
            )),
            _ => Err(ConfigurationError::new(
                "region coordinate needs a hierarchy name as its first segment",
            )),
        }
    }
}

/// Renders the fully-qualified name, e.g. `[Time].[2010].[Q1]`, with `]`
/// doubled inside segments.
impl fmt::Display for RegionCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.hierarchy.replace(']', "]]"))?;
        for segment in &self.path {
            write!(f, ".[{}]", segment.replace(']', "]]"))?;
        }
        Ok(())
    }
}

/// Coordinate from bare segment names, used verbatim.
pub fn resolve_segments<I, S>(hierarchy: impl Into<String>, path: I) -> RegionCoordinate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    RegionCoordinate {
        hierarchy: hierarchy.into(),
        path: path.into_iter().map(Into::into).collect(),
    }
}

/// Parse `[H].[s1].[s2]...` into a coordinate.
///
/// Each segment is `[`, one or more characters, then `]`; a `]` inside a
/// segment is written `]]`. Segments are separated by single dots.
pub fn resolve_full_name(name: &str) -> Result<RegionCoordinate, ParseError> {
    if name.is_empty() {
        return Err(ParseError::new(name, 0, "empty member name"));
    }

    let mut segments = Vec::new();
    let mut pos = 0;

    loop {
        let rest = &name[pos..];
        let caps = SEGMENT.captures(rest).ok_or_else(|| {
            let message = if rest.starts_with('[') {
                "unterminated or empty segment (expected ']')"
            } else {
                "expected '[' to open a segment"
            };
            ParseError::new(name, pos, message)
        })?;

        segments.push(caps[1].replace("]]", "]"));
        pos += caps[0].len();

        if pos == name.len() {
            break;
        }
        if !name[pos..].starts_with('.') {
            return Err(ParseError::new(name, pos, "expected '.' between segments"));
        }
        pos += 1;
        if pos == name.len() {
            return Err(ParseError::new(name, pos, "trailing '.' after last segment"));
        }
    }

    let hierarchy = segments.remove(0);
    Ok(RegionCoordinate {
        hierarchy,
        path: segments,
    })
}

/// Set of per-hierarchy constraints, at most one per hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    coordinates: Vec<RegionCoordinate>,
}

impl Region {
    /// Assemble a region, rejecting empty input and repeated hierarchies.
    pub fn build<I>(coordinates: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = RegionCoordinate>,
    {
        let coordinates: Vec<RegionCoordinate> = coordinates.into_iter().collect();
        if coordinates.is_empty() {
            return Err(ConfigurationError::new(
                "region needs at least one coordinate",
            ));
        }

        let mut seen = HashSet::new();
        for coordinate in &coordinates {
            if !seen.insert(coordinate.hierarchy.as_str()) {
                return Err(ConfigurationError::new(format!(
                    "hierarchy [{}] is constrained more than once in the same region",
                    coordinate.hierarchy
                )));
            }
        }

        Ok(Region { coordinates })
    }

    /// Region from tuples such as `["Time", "2010", "Q1"]`.
    pub fn from_segments<T, S>(tuples: &[T]) -> Result<Self, ConfigurationError>
    where
        T: AsRef<[S]>,
        S: AsRef<str>,
    {
        let coordinates = tuples
            .iter()
            .map(|t| RegionCoordinate::from_tuple(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Region::build(coordinates)
    }

    /// Region from fully-qualified names such as `[Time].[2010].[Q1]`.
    pub fn from_full_names<S: AsRef<str>>(names: &[S]) -> Result<Self, RegionError> {
        let coordinates = names
            .iter()
            .map(|n| resolve_full_name(n.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Region::build(coordinates)?)
    }

    pub fn coordinates(&self) -> &[RegionCoordinate] {
        &self.coordinates
    }

    pub fn constraint(&self, hierarchy: &str) -> Option<&RegionCoordinate> {
        self.coordinates.iter().find(|c| c.hierarchy == hierarchy)
    }

    /// Whether a cached segment with the given coordinates must be dropped.
    ///
    /// For every constrained hierarchy the segment's coordinate must overlap
    /// the constraint: at or below it, or an ancestor whose aggregate
    /// includes it (the all level `[H]` included). A segment with no
    /// coordinate on a constrained hierarchy rolls the whole hierarchy up and
    /// is covered the same way as `[H]`.
    pub fn covers(&self, segment: &[RegionCoordinate]) -> bool {
        self.coordinates.iter().all(|constraint| {
            match segment.iter().find(|c| c.hierarchy == constraint.hierarchy) {
                Some(coordinate) => constraint.overlaps(coordinate),
                None => true,
            }
        })
    }
}

/// Cache-flush call handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheFlushRequest {
    pub cube: String,
    pub region: Region,
}

impl CacheFlushRequest {
    pub fn new(cube: impl Into<String>, region: Region) -> Self {
        CacheFlushRequest {
            cube: cube.into(),
            region,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let constraints: Vec<serde_json::Value> = self
            .region
            .coordinates()
            .iter()
            .map(|c| {
                json!({
                    "hierarchy": c.hierarchy,
                    "path": c.path,
                    "full_name": c.to_string(),
                })
            })
            .collect();
        json!({ "cube": self.cube, "constraints": constraints })
    }
}
