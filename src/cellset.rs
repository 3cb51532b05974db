//! Engine-neutral query result.
//!
//! A [`CellSet`] holds the members of each axis and a flat vector of cells in
//! which axis 0 varies fastest: for a columns × rows result, cell
//! `(column c, row r)` is at `r * columns + c`.

use serde_json::json;

use crate::ast::AxisId;
use crate::error::ConfigurationError;
use crate::value::Value;

/// A member position on a result axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Caption-less short name, e.g. `Food`
    pub name: String,
    /// Unique name, e.g. `[Product].[Food]`
    pub full_name: String,
    /// Whether the member has children to drill into
    pub drillable: bool,
}

impl Member {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>, drillable: bool) -> Self {
        Member {
            name: name.into(),
            full_name: full_name.into(),
            drillable,
        }
    }
}

/// Cells nested by axis, outermost axis first.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    Cell(Value),
    Nested(Vec<Values>),
}

impl Values {
    /// Cells of a one-axis result.
    pub fn as_row(&self) -> Option<Vec<Value>> {
        match self {
            Values::Nested(items) => items
                .iter()
                .map(|v| match v {
                    Values::Cell(value) => Some(value.clone()),
                    Values::Nested(_) => None,
                })
                .collect(),
            Values::Cell(_) => None,
        }
    }

    /// Cells of a two-axis result.
    pub fn as_grid(&self) -> Option<Vec<Vec<Value>>> {
        match self {
            Values::Nested(rows) => rows.iter().map(Values::as_row).collect(),
            Values::Cell(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Values::Cell(value) => value_to_json(value),
            Values::Nested(items) => {
                serde_json::Value::Array(items.iter().map(Values::to_json).collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellSet {
    axes: Vec<Vec<Member>>,
    cells: Vec<Value>,
}

impl CellSet {
    /// Fails if the number of cells is not the product of the axis lengths.
    pub fn new(axes: Vec<Vec<Member>>, cells: Vec<Value>) -> Result<Self, ConfigurationError> {
        let expected: usize = axes.iter().map(Vec::len).product();
        if cells.len() != expected {
            return Err(ConfigurationError::new(format!(
                "cell set with axis lengths {:?} needs {} cells, got {}",
                axes.iter().map(Vec::len).collect::<Vec<_>>(),
                expected,
                cells.len()
            )));
        }
        Ok(CellSet { axes, cells })
    }

    pub fn axes_count(&self) -> usize {
        self.axes.len()
    }

    pub fn axis_members(&self, axis: AxisId) -> Option<&[Member]> {
        axis.position()
            .and_then(|pos| self.axes.get(pos))
            .map(Vec::as_slice)
    }

    pub fn axis_names(&self, axis: AxisId) -> Option<Vec<&str>> {
        self.axis_members(axis)
            .map(|members| members.iter().map(|m| m.name.as_str()).collect())
    }

    pub fn axis_full_names(&self, axis: AxisId) -> Option<Vec<&str>> {
        self.axis_members(axis)
            .map(|members| members.iter().map(|m| m.full_name.as_str()).collect())
    }

    pub fn column_members(&self) -> &[Member] {
        self.axis_members(AxisId::Columns).unwrap_or_default()
    }

    pub fn row_members(&self) -> &[Member] {
        self.axis_members(AxisId::Rows).unwrap_or_default()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.axis_names(AxisId::Columns).unwrap_or_default()
    }

    pub fn column_full_names(&self) -> Vec<&str> {
        self.axis_full_names(AxisId::Columns).unwrap_or_default()
    }

    pub fn row_names(&self) -> Vec<&str> {
        self.axis_names(AxisId::Rows).unwrap_or_default()
    }

    pub fn row_full_names(&self) -> Vec<&str> {
        self.axis_full_names(AxisId::Rows).unwrap_or_default()
    }

    /// Cell at one position per axis, in axis order.
    pub fn cell(&self, coordinates: &[usize]) -> Option<&Value> {
        if coordinates.len() != self.axes.len() {
            return None;
        }
        let mut offset = 0;
        let mut stride = 1;
        for (pos, len) in coordinates.iter().zip(self.axes.iter().map(Vec::len)) {
            if *pos >= len {
                return None;
            }
            offset += pos * stride;
            stride *= len;
        }
        self.cells.get(offset)
    }

    /// All cells, last axis outermost (rows, then columns).
    pub fn values(&self) -> Values {
        let order: Vec<usize> = (0..self.axes.len()).rev().collect();
        self.nest(&order, &mut vec![0; self.axes.len()])
    }

    /// All cells nested in the given axis order, outermost first.
    ///
    /// `order` must name every axis exactly once.
    pub fn values_by(&self, order: &[AxisId]) -> Result<Values, ConfigurationError> {
        let positions: Vec<usize> = order
            .iter()
            .map(|axis| {
                axis.position()
                    .filter(|pos| *pos < self.axes.len())
                    .ok_or_else(|| {
                        ConfigurationError::new(format!("result has no axis {}", axis))
                    })
            })
            .collect::<Result<_, _>>()?;

        let mut sorted = positions.clone();
        sorted.sort_unstable();
        if sorted != (0..self.axes.len()).collect::<Vec<_>>() {
            return Err(ConfigurationError::new(format!(
                "axis order must name each of the {} axes exactly once",
                self.axes.len()
            )));
        }

        Ok(self.nest(&positions, &mut vec![0; self.axes.len()]))
    }

    pub fn to_json(&self) -> serde_json::Value {
        let axes: Vec<serde_json::Value> = self
            .axes
            .iter()
            .map(|members| {
                members
                    .iter()
                    .map(|m| {
                        json!({
                            "name": m.name,
                            "full_name": m.full_name,
                            "drillable": m.drillable,
                        })
                    })
                    .collect()
            })
            .collect();
        json!({ "axes": axes, "values": self.values().to_json() })
    }

    fn nest(&self, order: &[usize], fixed: &mut Vec<usize>) -> Values {
        match order.split_first() {
            None => Values::Cell(self.cell(fixed).cloned().unwrap_or(Value::Null)),
            Some((axis, rest)) => {
                let mut items = Vec::with_capacity(self.axes[*axis].len());
                for i in 0..self.axes[*axis].len() {
                    fixed[*axis] = i;
                    items.push(self.nest(rest, fixed));
                }
                Values::Nested(items)
            }
        }
    }
}

fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Integer(i) => serde_json::Value::Number((*i).into()),
        Value::Float(f) => serde_json::Number::from_f64(*f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::String(s) => serde_json::Value::String(s.clone()),
    }
}
