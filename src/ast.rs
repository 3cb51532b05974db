//! # MDX Query Model
//!
//! Typed representation of the MDX queries assembled by
//! [`QueryBuilder`](crate::QueryBuilder) and rendered by [`output`](crate::output).
//!
//! ## Architecture Overview
//!
//! - **[node]** - Set expression tree held by each axis
//! - **[axis]** - Axis identity (`COLUMNS`, `ROWS`, `PAGES`, positions, slicer)
//! - **[order]** - Sort keys, sort directions and hierarchize modes
//! - **[member]** - Calculated member definitions and their options
//! - **[query]** - The finished query value
//!
//! ## Quick Start
//!
//! ```text
//! SELECT {[Measures].[Unit Sales], [Measures].[Store Sales]} ON COLUMNS,
//! CROSSJOIN([Product].children, {[Customers].[Canada], [Customers].[USA]}) ON ROWS
//! FROM [Sales]
//! WHERE ([Time].[1997].[Q1])
//! ```
//!
//! The rows axis above is held as
//!
//! ```text
//! CrossJoin(List([Raw("[Product].children")]),
//!           List([Raw("[Customers].[Canada]"), Raw("[Customers].[USA]")]))
//! ```
//!
//! ## Set Rendering
//!
//! - A list with one element renders unbraced: `[Product].children`
//! - Any other list renders braced: `{A, B}` or `{}`
//! - Operators render as MDX functions around their rendered operands,
//!   except an axis-level non-empty filter which becomes the `NON EMPTY`
//!   clause prefix
pub mod axis;
pub mod member;
pub mod node;
pub mod order;
pub mod query;

pub use axis::AxisId;
pub use member::{CalculatedMember, MemberOptions, OptionValue};
pub use node::Node;
pub use order::{HierarchizeMode, OrderDirection, OrderKey};
pub use query::Query;
