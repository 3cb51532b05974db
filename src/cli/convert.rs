//! JSON query documents -> QueryBuilder
//!
//! ```json
//! {
//!   "cube": "Sales",
//!   "with": [{"name": "[Measures].[P]", "as": "1 + 1", "solve_order": 1}],
//!   "columns": ["[Measures].[Unit Sales]"],
//!   "rows": {"set": ["[Product].children"], "ops": [{"crossjoin": ["[Customers].[USA]"]}, "nonempty"]},
//!   "where": ["[Time].[1997].[Q1]"]
//! }
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::{Map, Value as Json};

use super::CliError;
use crate::ast::{AxisId, HierarchizeMode, MemberOptions, OptionValue, OrderKey};
use crate::builder::QueryBuilder;

/// Build a query from its JSON description.
pub fn json_to_query(doc: Json) -> Result<QueryBuilder, CliError> {
    let doc = match doc {
        Json::Object(map) => map,
        other => return Err(invalid(format!("expected an object, got {}", other))),
    };

    let cube = doc
        .get("cube")
        .and_then(Json::as_str)
        .ok_or_else(|| invalid("missing string field 'cube'"))?;
    let mut query = QueryBuilder::new(cube);

    if let Some(with) = doc.get("with") {
        apply_members(&mut query, with)?;
    }

    for (key, axis) in [
        ("columns", AxisId::Columns),
        ("rows", AxisId::Rows),
        ("pages", AxisId::Pages),
    ] {
        if let Some(value) = doc.get(key) {
            apply_axis(&mut query, axis, value)?;
        }
    }

    if let Some(axes) = doc.get("axes") {
        let axes = axes
            .as_object()
            .ok_or_else(|| invalid("'axes' must map axis names or positions to sets"))?;
        for (name, value) in axes {
            let axis = AxisId::from_str(name)?;
            apply_axis(&mut query, axis, value)?;
        }
    }

    if let Some(slicer) = doc.get("where") {
        query.slicer(expressions(slicer, "where")?);
    }

    Ok(query)
}

fn apply_members(query: &mut QueryBuilder, with: &Json) -> Result<(), CliError> {
    let entries = with
        .as_array()
        .ok_or_else(|| invalid("'with' must be a list of member definitions"))?;

    for entry in entries {
        let entry = entry
            .as_object()
            .ok_or_else(|| invalid("member definition must be an object"))?;
        let name = entry
            .get("name")
            .and_then(Json::as_str)
            .ok_or_else(|| invalid("member definition needs a string 'name'"))?;

        let mut options = MemberOptions::new();
        for (key, value) in entry.iter().filter(|(k, _)| k.as_str() != "name") {
            options = options.set(key.as_str(), option_value(key, value)?);
        }
        query.with_member(name, options)?;
    }
    Ok(())
}

fn apply_axis(query: &mut QueryBuilder, axis: AxisId, value: &Json) -> Result<(), CliError> {
    match value {
        Json::Object(body) => {
            let set = body
                .get("set")
                .ok_or_else(|| invalid(format!("axis {} needs a 'set'", axis)))?;
            query.axis(axis, expressions(set, "set")?);
            if let Some(ops) = body.get("ops") {
                let ops = ops
                    .as_array()
                    .ok_or_else(|| invalid("'ops' must be a list"))?;
                for op in ops {
                    apply_op(query, op)?;
                }
            }
        }
        other => {
            query.axis(axis, expressions(other, "axis")?);
        }
    }
    Ok(())
}

fn apply_op(query: &mut QueryBuilder, op: &Json) -> Result<(), CliError> {
    match op {
        Json::String(name) => match name.as_str() {
            "nonempty" => query.nonempty()?,
            "hierarchize" => query.hierarchize(HierarchizeMode::Default)?,
            "hierarchize_all" => query.hierarchize_all(HierarchizeMode::Default)?,
            other => return Err(invalid(format!("unknown operation '{}'", other))),
        },
        Json::Object(map) => {
            let (name, arg) = single_entry(map)?;
            match name {
                "crossjoin" => query.crossjoin(expressions(arg, name)?)?,
                "except" => query.except(expressions(arg, name)?)?,
                "hierarchize" => query.hierarchize(hierarchize_mode(arg)?)?,
                "hierarchize_all" => query.hierarchize_all(hierarchize_mode(arg)?)?,
                "order" => {
                    let key = arg
                        .get("key")
                        .ok_or_else(|| invalid("'order' needs a 'key'"))?;
                    let direction = arg
                        .get("direction")
                        .and_then(Json::as_str)
                        .unwrap_or("ASC");
                    query.order(OrderKey::from(expressions(key, "key")?), direction)?
                }
                other => return Err(invalid(format!("unknown operation '{}'", other))),
            }
        }
        other => return Err(invalid(format!("operation must be a string or object, got {}", other))),
    };
    Ok(())
}

fn single_entry(map: &Map<String, Json>) -> Result<(&str, &Json), CliError> {
    let mut iter = map.iter();
    match (iter.next(), iter.next()) {
        (Some((name, arg)), None) => Ok((name.as_str(), arg)),
        _ => Err(invalid("operation object must have exactly one key")),
    }
}

fn hierarchize_mode(arg: &Json) -> Result<HierarchizeMode, CliError> {
    match arg {
        Json::Null => Ok(HierarchizeMode::Default),
        Json::String(s) if s.eq_ignore_ascii_case("post") => Ok(HierarchizeMode::Post),
        Json::String(s) if s.eq_ignore_ascii_case("default") => Ok(HierarchizeMode::Default),
        other => Err(invalid(format!("unknown hierarchize mode {}", other))),
    }
}

fn expressions(value: &Json, context: &str) -> Result<Vec<String>, CliError> {
    match value {
        Json::String(s) => Ok(vec![s.clone()]),
        Json::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    invalid(format!("'{}' entries must be strings, got {}", context, item))
                })
            })
            .collect(),
        other => Err(invalid(format!(
            "'{}' must be a string or a list of strings, got {}",
            context, other
        ))),
    }
}

fn option_value(key: &str, value: &Json) -> Result<OptionValue, CliError> {
    match value {
        Json::String(s) => Ok(OptionValue::String(s.clone())),
        Json::Bool(b) => Ok(OptionValue::Boolean(*b)),
        Json::Number(n) => {
            let text = n.to_string();
            Decimal::from_str(&text)
                .or_else(|_| Decimal::from_scientific(&text))
                .map(OptionValue::Number)
                .map_err(|e| invalid(format!("option '{}': {}", key, e)))
        }
        other => Err(invalid(format!(
            "option '{}' must be a string, number or boolean, got {}",
            key, other
        ))),
    }
}

fn invalid(message: impl Into<String>) -> CliError {
    CliError::InvalidDocument(message.into())
}
