/// Value of a result cell.
///
/// Engines report numbers as integers or floats, formatted values as
/// strings, and empty cells as `Null`.
///
/// # Examples
///
/// ```
/// use olap_mdx::Value;
///
/// let empty = Value::Null;
/// let sales = Value::Float(11390.4);
/// assert!(empty.is_null());
/// assert_eq!(sales.as_float(), Some(11390.4));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Empty cell
    Null,

    Boolean(bool),

    Float(f64),

    Integer(i64),

    /// Text cell, or a value the engine only reports formatted
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            Value::Float(n) => Some(n.round() as i64),
            _ => None,
        }
    }

    pub fn as_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(n) => n.to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Null => String::new(),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}
