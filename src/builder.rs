//! Fluent construction of MDX queries.
//!
//! A [`QueryBuilder`] keeps one [`AxisAccumulator`] per axis. Setters such as
//! [`QueryBuilder::rows`] select the *current* axis; the set operations that
//! follow (`crossjoin`, `nonempty`, `hierarchize`, `except`, `order`) rewrite
//! that axis's expression tree.
//!
//! ```
//! use olap_mdx::{OrderDirection, QueryBuilder};
//!
//! let mut query = QueryBuilder::new("Sales");
//! query
//!     .columns(["[Measures].[Unit Sales]", "[Measures].[Store Sales]"])
//!     .rows("[Product].children")
//!     .order("[Measures].[Unit Sales]", OrderDirection::BDesc)
//!     .unwrap();
//!
//! assert_eq!(
//!     query.to_mdx(),
//!     "SELECT {[Measures].[Unit Sales], [Measures].[Store Sales]} ON COLUMNS,\n\
//!      ORDER([Product].children, [Measures].[Unit Sales], BDESC) ON ROWS\n\
//!      FROM [Sales]"
//! );
//! ```

use std::collections::BTreeMap;

use crate::ast::{
    AxisId, CalculatedMember, HierarchizeMode, MemberOptions, Node, OrderDirection, OrderKey,
    Query,
};
use crate::engine::Engine;
use crate::error::ConfigurationError;
use crate::output::to_mdx;

/// Anything accepted where a list of set expressions is expected.
///
/// A single expression and a sequence of expressions normalize to the same
/// representation, so `rows("A")`, `rows(["A"])` and `rows(vec!["A"])` are
/// interchangeable.
pub trait IntoExprs {
    fn into_exprs(self) -> Vec<String>;
}

impl IntoExprs for &str {
    fn into_exprs(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl IntoExprs for String {
    fn into_exprs(self) -> Vec<String> {
        vec![self]
    }
}

impl IntoExprs for &String {
    fn into_exprs(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: Into<String>> IntoExprs for Vec<S> {
    fn into_exprs(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: Into<String>, const N: usize> IntoExprs for [S; N] {
    fn into_exprs(self) -> Vec<String> {
        self.into_iter().map(Into::into).collect()
    }
}

impl<S: AsRef<str>> IntoExprs for &[S] {
    fn into_exprs(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

/// Expression tree of one axis under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AxisAccumulator {
    node: Node,
}

impl Default for AxisAccumulator {
    fn default() -> Self {
        AxisAccumulator {
            node: Node::List(Vec::new()),
        }
    }
}

impl AxisAccumulator {
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_node(self) -> Node {
        self.node
    }

    /// Add expressions to a plain list, or start a new list if the axis
    /// already carries operators.
    pub fn append(&mut self, exprs: Vec<String>) {
        match &mut self.node {
            Node::List(items) => items.extend(exprs.into_iter().map(Node::Raw)),
            other => *other = Node::list(exprs),
        }
    }

    pub fn crossjoin(&mut self, exprs: Vec<String>) {
        self.wrap(|current| Node::crossjoin(current, Node::list(exprs)));
    }

    pub fn non_empty(&mut self) {
        self.wrap(Node::non_empty);
    }

    /// Hierarchize the most recently crossjoined factor, or the whole axis
    /// when it is not a crossjoin.
    pub fn hierarchize_last(&mut self, mode: HierarchizeMode) {
        self.wrap_last_factor(|factor| Node::hierarchize(factor, mode));
    }

    pub fn hierarchize_all(&mut self, mode: HierarchizeMode) {
        self.wrap(|current| Node::hierarchize(current, mode));
    }

    /// Subtract from the most recently crossjoined factor, or from the whole
    /// axis when it is not a crossjoin.
    pub fn except(&mut self, exprs: Vec<String>) {
        self.wrap_last_factor(|factor| Node::except(factor, Node::list(exprs)));
    }

    pub fn order(&mut self, key: OrderKey, direction: OrderDirection) {
        self.wrap(|current| Node::order(current, key, direction));
    }

    fn wrap(&mut self, f: impl FnOnce(Node) -> Node) {
        let current = std::mem::replace(&mut self.node, Node::List(Vec::new()));
        self.node = f(current);
    }

    fn wrap_last_factor(&mut self, f: impl FnOnce(Node) -> Node) {
        match &mut self.node {
            Node::CrossJoin { right, .. } => {
                let factor = std::mem::replace(right.as_mut(), Node::List(Vec::new()));
                **right = f(factor);
            }
            _ => self.wrap(f),
        }
    }
}

/// Fluent MDX query builder.
///
/// Each builder owns its axis state exclusively; cloning yields an
/// independent copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBuilder {
    cube: String,
    axes: BTreeMap<usize, AxisAccumulator>,
    slicer: Option<AxisAccumulator>,
    members: Vec<CalculatedMember>,
    current: Option<AxisId>,
}

impl QueryBuilder {
    pub fn new(cube: impl Into<String>) -> Self {
        QueryBuilder {
            cube: cube.into(),
            axes: BTreeMap::new(),
            slicer: None,
            members: Vec::new(),
            current: None,
        }
    }

    pub fn cube_name(&self) -> &str {
        &self.cube
    }

    // ------------------------------------------------------------------
    // Axis setters
    // ------------------------------------------------------------------

    /// Add expressions to an axis and make it the current axis.
    pub fn axis(&mut self, id: AxisId, exprs: impl IntoExprs) -> &mut Self {
        let id = id.canonical();
        self.accumulator_mut(id).append(exprs.into_exprs());
        self.current = Some(id);
        self
    }

    pub fn columns(&mut self, exprs: impl IntoExprs) -> &mut Self {
        self.axis(AxisId::Columns, exprs)
    }

    pub fn rows(&mut self, exprs: impl IntoExprs) -> &mut Self {
        self.axis(AxisId::Rows, exprs)
    }

    pub fn pages(&mut self, exprs: impl IntoExprs) -> &mut Self {
        self.axis(AxisId::Pages, exprs)
    }

    /// `WHERE` clause members; repeated calls accumulate.
    #[doc(alias = "where")]
    pub fn slicer(&mut self, exprs: impl IntoExprs) -> &mut Self {
        self.axis(AxisId::Slicer, exprs)
    }

    // ------------------------------------------------------------------
    // Set operations on the current axis
    // ------------------------------------------------------------------

    pub fn crossjoin(&mut self, exprs: impl IntoExprs) -> Result<&mut Self, ConfigurationError> {
        let exprs = exprs.into_exprs();
        self.current_mut("crossjoin")?.crossjoin(exprs);
        Ok(self)
    }

    pub fn nonempty(&mut self) -> Result<&mut Self, ConfigurationError> {
        self.current_mut("nonempty")?.non_empty();
        Ok(self)
    }

    /// Hierarchize the last crossjoined factor (or the whole plain set).
    ///
    /// `None` selects [`HierarchizeMode::Default`].
    pub fn hierarchize(
        &mut self,
        mode: impl Into<Option<HierarchizeMode>>,
    ) -> Result<&mut Self, ConfigurationError> {
        let mode = mode.into().unwrap_or_default();
        self.current_mut("hierarchize")?.hierarchize_last(mode);
        Ok(self)
    }

    /// Hierarchize the entire axis expression; `None` selects the default
    /// mode.
    pub fn hierarchize_all(
        &mut self,
        mode: impl Into<Option<HierarchizeMode>>,
    ) -> Result<&mut Self, ConfigurationError> {
        let mode = mode.into().unwrap_or_default();
        self.current_mut("hierarchize_all")?.hierarchize_all(mode);
        Ok(self)
    }

    pub fn except(&mut self, exprs: impl IntoExprs) -> Result<&mut Self, ConfigurationError> {
        let exprs = exprs.into_exprs();
        self.current_mut("except")?.except(exprs);
        Ok(self)
    }

    /// Sort the current axis. An empty key tuple is rejected.
    pub fn order(
        &mut self,
        key: impl Into<OrderKey>,
        direction: impl Into<OrderDirection>,
    ) -> Result<&mut Self, ConfigurationError> {
        let key = key.into();
        let direction = direction.into();
        if matches!(&key, OrderKey::Tuple(exprs) if exprs.is_empty()) {
            return Err(ConfigurationError::new("order needs at least one key expression"));
        }
        let axis = self.current_mut("order")?;
        if let OrderDirection::Other(token) = &direction {
            tracing::warn!("passing unrecognized order direction '{}' through verbatim", token);
        }
        axis.order(key, direction);
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Calculated members
    // ------------------------------------------------------------------

    pub fn with_member(
        &mut self,
        name: impl Into<String>,
        options: MemberOptions,
    ) -> Result<&mut Self, ConfigurationError> {
        let member = CalculatedMember::new(name, options)?;
        self.members.push(member);
        Ok(self)
    }

    /// Add several definitions at once; none is added if any is invalid.
    pub fn with_members<I, S>(&mut self, definitions: I) -> Result<&mut Self, ConfigurationError>
    where
        I: IntoIterator<Item = (S, MemberOptions)>,
        S: Into<String>,
    {
        let members = definitions
            .into_iter()
            .map(|(name, options)| CalculatedMember::new(name, options))
            .collect::<Result<Vec<_>, _>>()?;
        self.members.extend(members);
        Ok(self)
    }

    // ------------------------------------------------------------------
    // Read accessors
    // ------------------------------------------------------------------

    pub fn axis_node(&self, id: AxisId) -> Option<&Node> {
        match id.canonical() {
            AxisId::Slicer => self.slicer.as_ref().map(AxisAccumulator::node),
            other => other
                .position()
                .and_then(|pos| self.axes.get(&pos))
                .map(AxisAccumulator::node),
        }
    }

    pub fn columns_node(&self) -> Option<&Node> {
        self.axis_node(AxisId::Columns)
    }

    pub fn rows_node(&self) -> Option<&Node> {
        self.axis_node(AxisId::Rows)
    }

    pub fn pages_node(&self) -> Option<&Node> {
        self.axis_node(AxisId::Pages)
    }

    pub fn slicer_node(&self) -> Option<&Node> {
        self.axis_node(AxisId::Slicer)
    }

    /// Expression texts of an axis that is still a plain list.
    pub fn axis_expressions(&self, id: AxisId) -> Option<Vec<&str>> {
        self.axis_node(id).and_then(Node::expressions)
    }

    pub fn slicer_expressions(&self) -> Option<Vec<&str>> {
        self.axis_expressions(AxisId::Slicer)
    }

    pub fn calculated_members(&self) -> &[CalculatedMember] {
        &self.members
    }

    pub fn current_axis(&self) -> Option<AxisId> {
        self.current
    }

    // ------------------------------------------------------------------
    // Output
    // ------------------------------------------------------------------

    /// Snapshot the builder state as an immutable query.
    pub fn build(&self) -> Query {
        Query {
            cube: self.cube.clone(),
            members: self.members.clone(),
            axes: self
                .axes
                .iter()
                .map(|(pos, acc)| (AxisId::Positional(*pos).canonical(), acc.node().clone()))
                .collect(),
            slicer: self.slicer.as_ref().map(|acc| acc.node().clone()),
        }
    }

    pub fn to_mdx(&self) -> String {
        to_mdx(&self.build())
    }

    /// Render and submit the query; the engine's result or error is returned
    /// unchanged.
    pub fn execute<E: Engine>(&self, engine: &E) -> Result<E::ResultSet, E::Error> {
        let mdx = self.to_mdx();
        tracing::info!(cube = %self.cube, "executing MDX query");
        engine.execute(&mdx, &self.cube)
    }

    fn accumulator_mut(&mut self, id: AxisId) -> &mut AxisAccumulator {
        match id.position() {
            Some(pos) => self.axes.entry(pos).or_default(),
            None => self.slicer.get_or_insert_with(AxisAccumulator::default),
        }
    }

    fn current_mut(&mut self, operation: &str) -> Result<&mut AxisAccumulator, ConfigurationError> {
        let id = self.current.ok_or_else(|| {
            ConfigurationError::new(format!(
                "{} needs an axis; call columns, rows, pages, axis or slicer first",
                operation
            ))
        })?;
        Ok(self.accumulator_mut(id))
    }
}
