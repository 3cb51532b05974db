use crate::ast::{AxisId, CalculatedMember, Node};

/// Complete MDX query.
///
/// Produced by [`QueryBuilder::build`](crate::QueryBuilder::build) and
/// consumed by the printer; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Cube named in the `FROM` clause
    pub cube: String,

    /// Calculated members in definition order
    pub members: Vec<CalculatedMember>,

    /// Output axes ordered by position
    pub axes: Vec<(AxisId, Node)>,

    /// `WHERE` tuple, if any
    pub slicer: Option<Node>,
}

impl Query {
    pub fn axis(&self, id: AxisId) -> Option<&Node> {
        let id = id.canonical();
        self.axes
            .iter()
            .find(|(axis, _)| *axis == id)
            .map(|(_, node)| node)
    }
}
