use std::fmt;
use std::str::FromStr;

use crate::error::ConfigurationError;

/// Output axis of a query.
///
/// Named axes alias the first three positions: `Columns` is axis 0, `Rows`
/// axis 1 and `Pages` axis 2. `Slicer` is the `WHERE` axis and has no
/// position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisId {
    Columns,
    Rows,
    Pages,
    Slicer,
    Positional(usize),
}

impl AxisId {
    /// Normalize to a canonical id so `Positional(1)` and `Rows` address the
    /// same axis.
    pub fn canonical(self) -> Self {
        match self {
            AxisId::Positional(0) => AxisId::Columns,
            AxisId::Positional(1) => AxisId::Rows,
            AxisId::Positional(2) => AxisId::Pages,
            other => other,
        }
    }

    /// Zero-based position; `None` for the slicer.
    pub fn position(self) -> Option<usize> {
        match self {
            AxisId::Columns => Some(0),
            AxisId::Rows => Some(1),
            AxisId::Pages => Some(2),
            AxisId::Slicer => None,
            AxisId::Positional(n) => Some(n),
        }
    }

    /// Axis from a signed position, as received from dynamic callers.
    pub fn from_position(position: i64) -> Result<Self, ConfigurationError> {
        usize::try_from(position)
            .map(|n| AxisId::Positional(n).canonical())
            .map_err(|_| {
                ConfigurationError::new(format!(
                    "axis position must be non-negative, got {}",
                    position
                ))
            })
    }
}

impl FromStr for AxisId {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        match name.to_ascii_lowercase().as_str() {
            "columns" | "column" => Ok(AxisId::Columns),
            "rows" | "row" => Ok(AxisId::Rows),
            "pages" | "page" => Ok(AxisId::Pages),
            "slicer" | "where" | "filter" => Ok(AxisId::Slicer),
            _ => match name.parse::<i64>() {
                Ok(n) => AxisId::from_position(n),
                Err(_) => Err(ConfigurationError::new(format!(
                    "unknown axis '{}' (expected columns, rows, pages, slicer or a position)",
                    s
                ))),
            },
        }
    }
}

/// Renders the token used after `ON` in an axis clause.
impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.canonical() {
            AxisId::Columns => write!(f, "COLUMNS"),
            AxisId::Rows => write!(f, "ROWS"),
            AxisId::Pages => write!(f, "PAGES"),
            AxisId::Slicer => write!(f, "SLICER"),
            AxisId::Positional(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_positions_are_canonical() {
        assert_eq!(AxisId::Positional(0).canonical(), AxisId::Columns);
        assert_eq!(AxisId::Positional(2).canonical(), AxisId::Pages);
        assert_eq!(AxisId::Positional(4).canonical(), AxisId::Positional(4));
    }

    #[test]
    fn parses_names_and_positions() {
        assert_eq!("ROWS".parse::<AxisId>().unwrap(), AxisId::Rows);
        assert_eq!("0".parse::<AxisId>().unwrap(), AxisId::Columns);
        assert_eq!("5".parse::<AxisId>().unwrap(), AxisId::Positional(5));
    }

    #[test]
    fn rejects_unknown_and_negative() {
        assert!("chapters".parse::<AxisId>().is_err());
        assert!("-1".parse::<AxisId>().is_err());
        assert!(AxisId::from_position(-3).is_err());
    }
}
