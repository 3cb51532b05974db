use std::fmt;

/// Sort key of an `ORDER` call: one expression, or a tuple rendered as
/// `(k1, k2, ...)`.
///
/// `QueryBuilder::order` rejects an empty tuple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderKey {
    Single(String),
    Tuple(Vec<String>),
}

impl OrderKey {
    /// Collapse a one-element sequence to a single key.
    pub fn from_exprs(mut exprs: Vec<String>) -> Self {
        if exprs.len() == 1 {
            OrderKey::Single(exprs.remove(0))
        } else {
            OrderKey::Tuple(exprs)
        }
    }
}

impl From<&str> for OrderKey {
    fn from(s: &str) -> Self {
        OrderKey::Single(s.to_string())
    }
}

impl From<String> for OrderKey {
    fn from(s: String) -> Self {
        OrderKey::Single(s)
    }
}

impl<S: Into<String>> From<Vec<S>> for OrderKey {
    fn from(exprs: Vec<S>) -> Self {
        OrderKey::from_exprs(exprs.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for OrderKey {
    fn from(exprs: [S; N]) -> Self {
        OrderKey::from_exprs(exprs.into_iter().map(Into::into).collect())
    }
}

/// Direction token of an `ORDER` call.
///
/// The four standard directions are matched case-insensitively; anything else
/// is kept verbatim in `Other` and handed to the engine as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderDirection {
    Asc,
    Desc,
    BAsc,
    BDesc,
    Other(String),
}

impl OrderDirection {
    pub fn parse(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().as_str() {
            "ASC" => OrderDirection::Asc,
            "DESC" => OrderDirection::Desc,
            "BASC" => OrderDirection::BAsc,
            "BDESC" => OrderDirection::BDesc,
            _ => OrderDirection::Other(token.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
            OrderDirection::BAsc => "BASC",
            OrderDirection::BDesc => "BDESC",
            OrderDirection::Other(token) => token,
        }
    }
}

impl From<&str> for OrderDirection {
    fn from(s: &str) -> Self {
        OrderDirection::parse(s)
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Placement mode of `HIERARCHIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchizeMode {
    /// Parents before children
    #[default]
    Default,
    /// Children before parents (`POST`)
    Post,
}
