use rust_decimal::Decimal;

use crate::error::ConfigurationError;

/// Key of the mandatory formula entry in [`MemberOptions`].
pub const FORMULA_KEY: &str = "as";

/// Value of a calculated-member property such as `SOLVE_ORDER` or
/// `FORMAT_STRING`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Rendered single-quoted
    String(String),
    /// Rendered bare, exact decimal
    Number(Decimal),
    /// Rendered bare as `TRUE` / `FALSE`
    Boolean(bool),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::String(s)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        OptionValue::Number(Decimal::from(n))
    }
}

impl From<i32> for OptionValue {
    fn from(n: i32) -> Self {
        OptionValue::Number(Decimal::from(n))
    }
}

impl From<Decimal> for OptionValue {
    fn from(n: Decimal) -> Self {
        OptionValue::Number(n)
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Boolean(b)
    }
}

/// Ordered option mapping passed to `with_member`.
///
/// `as` carries the formula; every other key is forwarded to the rendered
/// member definition in insertion order. Setting a key twice keeps its first
/// position and replaces the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberOptions {
    entries: Vec<(String, OptionValue)>,
}

impl MemberOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for `MemberOptions::new().formula(formula)`.
    pub fn with_formula(formula: impl Into<String>) -> Self {
        Self::new().formula(formula)
    }

    pub fn formula(self, formula: impl Into<String>) -> Self {
        self.set(FORMULA_KEY, formula.into())
    }

    pub fn solve_order(self, order: i64) -> Self {
        self.set("solve_order", order)
    }

    pub fn format_string(self, format: impl Into<String>) -> Self {
        self.set("format_string", format.into())
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(String, OptionValue)] {
        &self.entries
    }
}

impl<K, V> FromIterator<(K, V)> for MemberOptions
where
    K: Into<String>,
    V: Into<OptionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(MemberOptions::new(), |opts, (k, v)| opts.set(k, v))
    }
}

/// A `WITH MEMBER` definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatedMember {
    /// Fully-qualified member name, e.g. `[Measures].[ProfitPct]`
    pub name: String,

    /// Formula text, rendered inside single quotes
    pub formula: String,

    /// Remaining options in call order, keys as given (e.g. `solve_order`)
    pub options: Vec<(String, OptionValue)>,
}

impl CalculatedMember {
    /// Split the formula out of `options`.
    ///
    /// Fails when `as` is missing or is not a string.
    pub fn new(name: impl Into<String>, options: MemberOptions) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let mut formula = None;
        let mut rest = Vec::with_capacity(options.entries.len());

        for (key, value) in options.entries {
            if key == FORMULA_KEY {
                match value {
                    OptionValue::String(text) => formula = Some(text),
                    other => {
                        return Err(ConfigurationError::new(format!(
                            "formula of calculated member {} must be a string, got {:?}",
                            name, other
                        )));
                    }
                }
            } else {
                rest.push((key, value));
            }
        }

        let formula = formula.ok_or_else(|| {
            ConfigurationError::new(format!(
                "calculated member {} is missing its formula (`{}` option)",
                name, FORMULA_KEY
            ))
        })?;

        Ok(CalculatedMember {
            name,
            formula,
            options: rest,
        })
    }

    pub fn option(&self, key: &str) -> Option<&OptionValue> {
        self.options.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}
