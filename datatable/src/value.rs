//! Cell values

use std::cmp::Ordering;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// The value a column reads out of a row.
///
/// Rows are arbitrary caller types; accessors reduce each cell to one of
/// these so search, filtering, sorting and export can treat every column
/// the same way.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Anything structured (arrays, objects).
    Json(Value),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Converts a JSON value, keeping scalars as scalars.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map(Self::Number).unwrap_or(Self::Null),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Json(other.clone()),
        }
    }

    /// Case-insensitive substring test. `needle` must already be lowercase.
    ///
    /// Null never matches, not even the empty needle.
    pub fn contains_folded(&self, needle: &str) -> bool {
        match self {
            Self::Null => false,
            Self::Text(s) => s.to_lowercase().contains(needle),
            other => other.to_string().to_lowercase().contains(needle),
        }
    }

    /// A total order over all values, used for sorting.
    ///
    /// Values of different kinds order as
    /// `Bool < Number < Text < Json < Null`, so nulls sink to the end of an
    /// ascending sort. Numbers use IEEE total ordering.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Json(a), Self::Json(b)) => a.to_string().cmp(&b.to_string()),
            (Self::Null, Self::Null) => Ordering::Equal,
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Text(_) => 2,
            Self::Json(_) => 3,
            Self::Null => 4,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            // Whole numbers print without a trailing ".0".
            Self::Number(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                write!(f, "{}", *n as i64)
            }
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::Json(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&String> for CellValue {
    fn from(s: &String) -> Self {
        Self::Text(s.clone())
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

impl From<u32> for CellValue {
    fn from(n: u32) -> Self {
        Self::Number(n.into())
    }
}

impl From<usize> for CellValue {
    fn from(n: usize) -> Self {
        Self::Number(n as f64)
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        Self::from_json(&value)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Self::Null)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Null.to_string(), "");
        assert_eq!(CellValue::from(42).to_string(), "42");
        assert_eq!(CellValue::from(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from("نص").to_string(), "نص");
        assert_eq!(CellValue::from(json!({"a": 1})).to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn test_contains_folded() {
        assert!(CellValue::from("Mohammed Ali").contains_folded("moh"));
        assert!(CellValue::from(1001).contains_folded("100"));
        assert!(!CellValue::Null.contains_folded(""));
        assert!(CellValue::from(true).contains_folded("tru"));
    }

    #[test]
    fn test_total_cmp_mixed_kinds() {
        let mut values = vec![
            CellValue::Null,
            CellValue::from("b"),
            CellValue::from(3),
            CellValue::from("a"),
            CellValue::from(f64::NAN),
            CellValue::from(false),
            CellValue::from(-1),
        ];
        values.sort_by(CellValue::total_cmp);
        assert_eq!(
            values.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["false", "-1", "3", "NaN", "a", "b", ""]
        );
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(CellValue::from(None::<String>), CellValue::Null);
        assert_eq!(CellValue::from(Some("x")), CellValue::Text("x".to_string()));
    }
}
