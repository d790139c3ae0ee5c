//! Row keys

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::CellValue;
use crate::Column;

/// Identity of a row, used for selection membership.
///
/// Keys must be unique across the full data set and stable for the same
/// logical row. Duplicate keys make selection ambiguous.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Number(i64),
    Text(String),
}

impl Key {
    /// Derives a key from a cell value. Whole numbers become
    /// [`Key::Number`]; everything else is keyed by its text.
    pub fn from_cell(value: &CellValue) -> Self {
        match value {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 9.0e15 => Self::Number(*n as i64),
            other => Self::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Self::Number(n.into())
    }
}

type KeyFn<T> = dyn Fn(&T) -> Key + Send + Sync;

/// How to obtain a row's [`Key`].
pub enum RowKey<T> {
    /// Read the named column's accessor.
    Column(String),
    /// Compute the key from the row.
    Derive(Arc<KeyFn<T>>),
}

impl<T> RowKey<T> {
    pub fn column(key: impl Into<String>) -> Self {
        Self::Column(key.into())
    }

    pub fn derive<F>(f: F) -> Self
    where
        F: Fn(&T) -> Key + Send + Sync + 'static,
    {
        Self::Derive(Arc::new(f))
    }

    /// Resolves the key of `row`.
    ///
    /// A column key that names no column, or a column without an accessor,
    /// yields the empty text key.
    pub fn resolve(&self, row: &T, columns: &[Column<T>]) -> Key {
        match self {
            Self::Derive(f) => f(row),
            Self::Column(name) => columns
                .iter()
                .find(|c| c.key == *name)
                .map(|c| Key::from_cell(&c.value(row)))
                .unwrap_or_else(|| Key::Text(String::new())),
        }
    }
}

impl<T> Clone for RowKey<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Column(name) => Self::Column(name.clone()),
            Self::Derive(f) => Self::Derive(f.clone()),
        }
    }
}

impl<T> fmt::Debug for RowKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(name) => f.debug_tuple("Column").field(name).finish(),
            Self::Derive(_) => f.write_str("Derive(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_cell() {
        assert_eq!(Key::from_cell(&CellValue::from(7)), Key::Number(7));
        assert_eq!(Key::from_cell(&CellValue::from(7.5)), Key::Text("7.5".to_string()));
        assert_eq!(Key::from_cell(&CellValue::from("WO-1")), Key::from("WO-1"));
    }

    #[test]
    fn test_resolve() {
        let row = (5_i64, "x".to_string());
        let columns: Vec<Column<(i64, String)>> =
            vec![Column::new("id", "#").accessor(|r: &(i64, String)| r.0.into())];
        assert_eq!(RowKey::column("id").resolve(&row, &columns), Key::Number(5));
        assert_eq!(RowKey::column("nope").resolve(&row, &columns), Key::from(""));

        let derived = RowKey::derive(|r: &(i64, String)| Key::from(r.1.clone()));
        assert_eq!(derived.resolve(&row, &columns), Key::from("x"));
    }
}
