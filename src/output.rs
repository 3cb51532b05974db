//! MDX text rendering for built queries.
//!
//! Rendering is deterministic: the same [`Query`] always produces the same
//! text, and rendering never fails. Whether the text is meaningful to a cube
//! is only known once the engine executes it.
//!
//! # Statement Layout
//!
//! ```text
//! WITH
//! MEMBER <name> AS '<formula>'[, OPTION = value, ...]
//! SELECT <axis clause>,
//! <axis clause>
//! FROM [<cube>]
//! WHERE (<member>, ...)
//! ```
//!
//! The `WITH` block and the `WHERE` clause are omitted when empty.
//!
//! # Examples
//!
//! ```
//! use olap_mdx::ast::{AxisId, Node, Query};
//! use olap_mdx::output::to_mdx;
//!
//! let query = Query {
//!     cube: "Sales".to_string(),
//!     members: vec![],
//!     axes: vec![(AxisId::Rows, Node::list(["[Product].children"]))],
//!     slicer: None,
//! };
//!
//! assert_eq!(to_mdx(&query), "SELECT [Product].children ON ROWS\nFROM [Sales]");
//! ```

use crate::ast::{CalculatedMember, HierarchizeMode, Node, OptionValue, OrderKey, Query};

#[derive(Debug, Default, Clone, Copy)]
pub struct MdxPrinter;

impl MdxPrinter {
    pub fn new() -> Self {
        MdxPrinter
    }

    pub fn print(&self, query: &Query) -> String {
        let mut lines = Vec::new();

        if !query.members.is_empty() {
            lines.push("WITH".to_string());
            lines.extend(query.members.iter().map(|m| self.print_member(m)));
        }

        let clauses: Vec<String> = query
            .axes
            .iter()
            .map(|(axis, node)| format!("{} ON {}", self.print_axis_set(node), axis))
            .collect();
        if clauses.is_empty() {
            lines.push("SELECT".to_string());
        } else {
            lines.push(format!("SELECT {}", clauses.join(",\n")));
        }

        lines.push(format!("FROM [{}]", query.cube.replace(']', "]]")));

        if let Some(slicer) = query.slicer.as_ref().and_then(|s| self.print_slicer(s)) {
            lines.push(slicer);
        }

        lines.join("\n")
    }

    /// Render a set expression in operand position.
    pub fn print_node(&self, node: &Node) -> String {
        match node {
            Node::Raw(text) => text.clone(),
            Node::List(items) => self.print_list(items),
            Node::CrossJoin { left, right } => format!(
                "CROSSJOIN({}, {})",
                self.print_node(left),
                self.print_node(right)
            ),
            Node::NonEmpty(inner) => format!("NONEMPTY({})", self.print_node(inner)),
            Node::Hierarchize { inner, mode } => match mode {
                HierarchizeMode::Default => format!("HIERARCHIZE({})", self.print_node(inner)),
                HierarchizeMode::Post => format!("HIERARCHIZE({}, POST)", self.print_node(inner)),
            },
            Node::Except {
                minuend,
                subtrahend,
            } => format!(
                "EXCEPT({}, {})",
                self.print_node(minuend),
                self.print_node(subtrahend)
            ),
            Node::Order {
                inner,
                key,
                direction,
            } => format!(
                "ORDER({}, {}, {})",
                self.print_node(inner),
                self.print_order_key(key),
                direction
            ),
        }
    }

    /// Render the set part of an axis clause; an outermost non-empty filter
    /// becomes the `NON EMPTY` prefix.
    fn print_axis_set(&self, node: &Node) -> String {
        match node {
            Node::NonEmpty(inner) => format!("NON EMPTY {}", self.print_node(inner)),
            other => self.print_node(other),
        }
    }

    fn print_list(&self, items: &[Node]) -> String {
        match items {
            [single] => self.print_node(single),
            _ => {
                let parts: Vec<String> = items.iter().map(|n| self.print_node(n)).collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }

    fn print_order_key(&self, key: &OrderKey) -> String {
        match key {
            OrderKey::Single(expr) => expr.clone(),
            OrderKey::Tuple(exprs) => format!("({})", exprs.join(", ")),
        }
    }

    /// `WHERE (...)`, or `None` for an empty slicer.
    fn print_slicer(&self, node: &Node) -> Option<String> {
        let inner = match node {
            Node::List(items) if items.is_empty() => return None,
            Node::List(items) => items
                .iter()
                .map(|n| self.print_node(n))
                .collect::<Vec<_>>()
                .join(", "),
            other => self.print_node(other),
        };
        Some(format!("WHERE ({})", inner))
    }

    fn print_member(&self, member: &CalculatedMember) -> String {
        let mut line = format!(
            "MEMBER {} AS {}",
            member.name,
            quote(&member.formula)
        );
        for (key, value) in &member.options {
            line.push_str(", ");
            line.push_str(&key.to_ascii_uppercase());
            line.push_str(" = ");
            line.push_str(&self.print_option_value(value));
        }
        line
    }

    fn print_option_value(&self, value: &OptionValue) -> String {
        match value {
            OptionValue::String(s) => quote(s),
            OptionValue::Number(n) => n.to_string(),
            OptionValue::Boolean(true) => "TRUE".to_string(),
            OptionValue::Boolean(false) => "FALSE".to_string(),
        }
    }
}

/// Single-quote a string literal, doubling embedded quotes.
fn quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Renders a query as MDX text.
///
/// Pure and idempotent; see the module documentation for the layout.
pub fn to_mdx(query: &Query) -> String {
    let mdx = MdxPrinter::new().print(query);
    tracing::debug!(cube = %query.cube, mdx = %mdx, "rendered MDX");
    mdx
}

/// Renders a single set expression as it would appear inside a function call.
pub fn node_to_mdx(node: &Node) -> String {
    MdxPrinter::new().print_node(node)
}
