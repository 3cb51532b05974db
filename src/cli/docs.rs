//! Documentation content for the mdx CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Axes,
    SetOperations,
    Members,
    Slicer,
    Regions,
    Documents,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "axes" | "axis" => Some(Self::Axes),
            "set_operations" | "sets" | "ops" => Some(Self::SetOperations),
            "members" | "with" | "calculated_members" => Some(Self::Members),
            "slicer" | "where" => Some(Self::Slicer),
            "regions" | "region" | "cache" => Some(Self::Regions),
            "documents" | "document" | "json" => Some(Self::Documents),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"MDX DOCUMENTATION

mdx renders JSON query documents as MDX text and resolves cache regions for
partial cache flushes.

DOCUMENTATION CATEGORIES

  axes              COLUMNS, ROWS, PAGES and positional axes
  set-operations    crossjoin, nonempty, hierarchize, except, order
  members           WITH MEMBER definitions and their options
  slicer            The WHERE tuple
  regions           Cache region coordinates and flush scoping
  documents         The JSON query document format

QUICK REFERENCE

  mdx render --file query.json          Print the MDX for a query document
  mdx region --names '[Time].[2010]'    Print the flush scope for a region
  mdx doc <category>                    Show one category

Run 'mdx doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_str(name) {
        Some(DocCategory::Axes) => Ok(AXES_DOC),
        Some(DocCategory::SetOperations) => Ok(SET_OPERATIONS_DOC),
        Some(DocCategory::Members) => Ok(MEMBERS_DOC),
        Some(DocCategory::Slicer) => Ok(SLICER_DOC),
        Some(DocCategory::Regions) => Ok(REGIONS_DOC),
        Some(DocCategory::Documents) => Ok(DOCUMENTS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const AXES_DOC: &str = r#"AXES - Query Output Axes

NAMED AXES
  columns    axis 0, rendered ON COLUMNS
  rows       axis 1, rendered ON ROWS
  pages      axis 2, rendered ON PAGES

POSITIONAL AXES
  Any non-negative position; 0, 1 and 2 are the named axes.

    "axes": {"3": ["[Store].children"]}
    =>  [Store].children ON 3

SET RENDERING
  One expression renders bare, several render as a braced set.

    "rows": ["[Product].children"]
    =>  [Product].children ON ROWS

    "columns": ["[Measures].[Unit Sales]", "[Measures].[Store Sales]"]
    =>  {[Measures].[Unit Sales], [Measures].[Store Sales]} ON COLUMNS

  Constraints:
    - Unknown axis names and negative positions are rejected
    - Axes render in position order
"#;

const SET_OPERATIONS_DOC: &str = r#"SET OPERATIONS - Rewriting an Axis

Operations apply to the axis most recently set.

CROSSJOIN
  {"crossjoin": ["[Customers].[Canada]", "[Customers].[USA]"]}
  =>  CROSSJOIN([Product].children, {[Customers].[Canada], [Customers].[USA]})

  Repeated crossjoins nest to the left:
  =>  CROSSJOIN(CROSSJOIN(a, b), c)

NONEMPTY
  "nonempty"
  =>  NON EMPTY <set> ON ROWS

HIERARCHIZE
  "hierarchize"                 last crossjoined factor, or the whole set
  "hierarchize_all"             the whole axis
  {"hierarchize": "post"}       HIERARCHIZE(<set>, POST)

EXCEPT
  {"except": ["[Customers].[USA]"]}
  =>  EXCEPT([Customers].[Country].Members, [Customers].[USA])
  After a crossjoin only the last factor is reduced.

ORDER
  {"order": {"key": "[Measures].[Unit Sales]", "direction": "bdesc"}}
  =>  ORDER([Product].children, [Measures].[Unit Sales], BDESC)

  A list key renders as a tuple: ([Measures].[Unit Sales], [Customers].[USA])
  ASC, DESC, BASC and BDESC are matched case-insensitively; other
  directions are passed through as written.
"#;

const MEMBERS_DOC: &str = r#"MEMBERS - Calculated Members

  "with": [
    {"name": "[Measures].[ProfitPct]",
     "as": "Val((Measures.[Store Sales] - Measures.[Store Cost]) / Measures.[Store Sales])",
     "solve_order": 1,
     "format_string": "Percent"}
  ]

  =>  WITH
      MEMBER [Measures].[ProfitPct] AS 'Val(...)', SOLVE_ORDER = 1, FORMAT_STRING = 'Percent'

  Constraints:
    - "as" (the formula) is required
    - Other options are emitted in the order given, names upper-cased
    - Strings are single-quoted, numbers and booleans are bare
"#;

const SLICER_DOC: &str = r#"SLICER - The WHERE Tuple

  "where": ["[Time].[1997].[Q1]", "[Customers].[USA].[CA]"]
  =>  WHERE ([Time].[1997].[Q1], [Customers].[USA].[CA])

  The tuple is parenthesized even for one member and omitted when empty.
"#;

const REGIONS_DOC: &str = r#"REGIONS - Cache Flush Scoping

COORDINATES
  Segments:   --segments Time,2010,Q1
  Full name:  --names '[Time].[2010].[Q1]'
  Both resolve to hierarchy Time, path [2010, Q1].

SCOPING
  A region drops every cached segment that overlaps the path in every
  constrained hierarchy: segments at or below it, and totals above it
  (such as [Time].[2010] or [Time]) that include its cells. Hierarchies
  not named are unconstrained.

    mdx region --cube Sales --segments Time,2010,Q1 --names '[Customers].[USA].[CA]'

  Constraints:
    - At most one coordinate per hierarchy
    - Names must be dot-separated [bracketed] segments
    - A ']' inside a segment is written ']]', e.g. '[Store].[A]]B]'
"#;

const DOCUMENTS_DOC: &str = r#"DOCUMENTS - JSON Query Format

  {
    "cube": "Sales",
    "with": [{"name": "...", "as": "...", "solve_order": 1}],
    "columns": ["..."],
    "rows": {"set": ["..."], "ops": [{"crossjoin": ["..."]}, "nonempty"]},
    "pages": ["..."],
    "axes": {"3": ["..."]},
    "where": ["..."]
  }

  An axis is a list of expressions, a single expression, or an object
  with a "set" and a list of "ops" (see 'mdx doc set-operations').
"#;
