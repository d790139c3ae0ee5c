//! Column definitions

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

use crate::CellValue;
use crate::RenderError;
use crate::boundary::extract_panic_message;

/// Text shown for empty cells and cells whose renderer failed.
pub const PLACEHOLDER: &str = "-";

type Accessor<T> = dyn Fn(&T) -> CellValue + Send + Sync;
type Renderer<T> = dyn Fn(&CellValue, &T, usize) -> Result<String, RenderError> + Send + Sync;

/// Horizontal alignment hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

/// A table column.
///
/// Columns are searchable by default and neither sortable nor filterable
/// until enabled. A column without an accessor shows the placeholder and
/// never matches a search.
pub struct Column<T> {
    /// Unique identifier, also the name used by sort and filter state.
    pub key: String,
    /// Header text, also the CSV header.
    pub title: String,
    pub sortable: bool,
    pub searchable: bool,
    pub filterable: bool,
    pub align: Align,
    /// Preferred width in terminal cells.
    pub width: Option<u16>,
    accessor: Option<Arc<Accessor<T>>>,
    renderer: Option<Arc<Renderer<T>>>,
}

impl<T> Column<T> {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            searchable: true,
            filterable: false,
            align: Align::Start,
            width: None,
            accessor: None,
            renderer: None,
        }
    }

    /// Sets how the cell value is read from a row.
    pub fn accessor<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        self.accessor = Some(Arc::new(f));
        self
    }

    /// Sets a custom renderer. It receives the cell value, the row and the
    /// row's position on the current page.
    pub fn render<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, &T, usize) -> Result<String, RenderError> + Send + Sync + 'static,
    {
        self.renderer = Some(Arc::new(f));
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn has_accessor(&self) -> bool {
        self.accessor.is_some()
    }

    /// Reads the cell value. Missing accessor reads as null.
    pub fn value(&self, row: &T) -> CellValue {
        match &self.accessor {
            Some(accessor) => accessor(row),
            None => CellValue::Null,
        }
    }

    /// Reads the cell value, treating a panicking accessor as null.
    pub(crate) fn value_guarded(&self, row: &T) -> CellValue {
        catch_unwind(AssertUnwindSafe(|| self.value(row))).unwrap_or_else(|panic| {
            log::warn!(
                "accessor for column '{}' panicked: {}",
                self.key,
                extract_panic_message(&panic)
            );
            CellValue::Null
        })
    }

    /// Renders the cell as text. Never fails: null values, render errors
    /// and panics inside the renderer all produce [`PLACEHOLDER`].
    pub fn render_cell(&self, row: &T, index: usize) -> String {
        let result = catch_unwind(AssertUnwindSafe(|| {
            let value = self.value(row);
            match &self.renderer {
                Some(renderer) => renderer(&value, row, index),
                None if value.is_null() || self.accessor.is_none() => Ok(PLACEHOLDER.to_string()),
                None => Ok(value.to_string()),
            }
        }));

        match result {
            Ok(Ok(text)) => text,
            Ok(Err(error)) => {
                log::warn!("cell render error in column '{}' row {}: {}", self.key, index, error);
                PLACEHOLDER.to_string()
            }
            Err(panic) => {
                log::warn!(
                    "cell renderer for column '{}' panicked at row {}: {}",
                    self.key,
                    index,
                    extract_panic_message(&panic)
                );
                PLACEHOLDER.to_string()
            }
        }
    }
}

impl<T: Record> Column<T> {
    /// A column reading the record field named like the column key.
    pub fn field(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        let field = key.clone();
        Self::new(key, title).accessor(move |row: &T| row.field(&field))
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            searchable: self.searchable,
            filterable: self.filterable,
            align: self.align,
            width: self.width,
            accessor: self.accessor.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("searchable", &self.searchable)
            .field("filterable", &self.filterable)
            .field("has_accessor", &self.accessor.is_some())
            .field("has_renderer", &self.renderer.is_some())
            .finish()
    }
}

/// Rows addressable by field name, such as JSON documents.
pub trait Record {
    /// Returns the field value, or null when absent.
    fn field(&self, name: &str) -> CellValue;
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> CellValue {
        self.get(name).map(CellValue::from_json).unwrap_or_default()
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> CellValue {
        self.get(name).map(CellValue::from_json).unwrap_or_default()
    }
}
