use crate::ast::{HierarchizeMode, OrderDirection, OrderKey};

/// Set expression tree held by a query axis.
///
/// A node is pure data: the builder produces it, the printer renders it, and
/// tests compare it structurally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal member or set expression, rendered verbatim
    ///
    /// # Examples
    /// ```text
    /// [Product].children
    /// [Measures].[Unit Sales]
    /// ```
    Raw(String),

    /// Explicit set of expressions, order preserved
    ///
    /// A single element renders unbraced, anything else as `{a, b, ...}`.
    List(Vec<Node>),

    /// `CROSSJOIN(left, right)`
    ///
    /// Chains are left-nested: `CrossJoin(CrossJoin(a, b), c)`.
    CrossJoin {
        left: Box<Node>,
        right: Box<Node>,
    },

    /// Non-empty filter over the inner set
    ///
    /// # Example
    /// ```text
    /// NON EMPTY CROSSJOIN([Product].children, [Customers].[USA]) ON ROWS
    /// ```
    NonEmpty(Box<Node>),

    /// `HIERARCHIZE(inner)` or `HIERARCHIZE(inner, POST)`
    Hierarchize {
        inner: Box<Node>,
        mode: HierarchizeMode,
    },

    /// `EXCEPT(minuend, subtrahend)`
    Except {
        minuend: Box<Node>,
        subtrahend: Box<Node>,
    },

    /// `ORDER(inner, key, direction)`
    Order {
        inner: Box<Node>,
        key: OrderKey,
        direction: OrderDirection,
    },
}

impl Node {
    pub fn raw(text: impl Into<String>) -> Self {
        Node::Raw(text.into())
    }

    /// Build a `List` of `Raw` nodes from expression texts.
    pub fn list<I, S>(exprs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Node::List(exprs.into_iter().map(|e| Node::Raw(e.into())).collect())
    }

    pub fn crossjoin(left: Node, right: Node) -> Self {
        Node::CrossJoin {
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn non_empty(inner: Node) -> Self {
        Node::NonEmpty(Box::new(inner))
    }

    pub fn hierarchize(inner: Node, mode: HierarchizeMode) -> Self {
        Node::Hierarchize {
            inner: Box::new(inner),
            mode,
        }
    }

    pub fn except(minuend: Node, subtrahend: Node) -> Self {
        Node::Except {
            minuend: Box::new(minuend),
            subtrahend: Box::new(subtrahend),
        }
    }

    pub fn order(inner: Node, key: OrderKey, direction: OrderDirection) -> Self {
        Node::Order {
            inner: Box::new(inner),
            key,
            direction,
        }
    }

    pub fn as_raw(&self) -> Option<&str> {
        match self {
            Node::Raw(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Node]> {
        match self {
            Node::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns `(left, right)` for a crossjoin node.
    pub fn as_crossjoin(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::CrossJoin { left, right } => Some((left, right)),
            _ => None,
        }
    }

    pub fn as_non_empty(&self) -> Option<&Node> {
        match self {
            Node::NonEmpty(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn as_hierarchize(&self) -> Option<(&Node, HierarchizeMode)> {
        match self {
            Node::Hierarchize { inner, mode } => Some((inner, *mode)),
            _ => None,
        }
    }

    pub fn as_except(&self) -> Option<(&Node, &Node)> {
        match self {
            Node::Except {
                minuend,
                subtrahend,
            } => Some((minuend, subtrahend)),
            _ => None,
        }
    }

    pub fn as_order(&self) -> Option<(&Node, &OrderKey, &OrderDirection)> {
        match self {
            Node::Order {
                inner,
                key,
                direction,
            } => Some((inner, key, direction)),
            _ => None,
        }
    }

    /// Expression texts of a flat list of raw expressions.
    ///
    /// Returns `None` as soon as the node carries any operator.
    pub fn expressions(&self) -> Option<Vec<&str>> {
        match self {
            Node::Raw(text) => Some(vec![text.as_str()]),
            Node::List(items) => items.iter().map(Node::as_raw).collect(),
            _ => None,
        }
    }
}
