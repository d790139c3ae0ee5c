//! Table configuration

use std::fmt;
use std::sync::Arc;

use crate::SelectionMode;

type SearchFn<T> = dyn Fn(&str, &T) -> bool + Send + Sync;

/// Search behaviour.
pub struct SearchConfig<T> {
    pub enabled: bool,
    /// Column keys to search. `None` searches every searchable column.
    pub columns: Option<Vec<String>>,
    /// Replaces the default column search. Receives the trimmed term.
    custom: Option<Arc<SearchFn<T>>>,
}

impl<T> SearchConfig<T> {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            columns: None,
            custom: None,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::enabled()
        }
    }

    /// Restricts search to the given column keys.
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Uses a custom predicate instead of column matching.
    pub fn custom<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &T) -> bool + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(predicate));
        self
    }

    pub(crate) fn predicate(&self) -> Option<&SearchFn<T>> {
        self.custom.as_deref()
    }
}

impl<T> Default for SearchConfig<T> {
    fn default() -> Self {
        Self::enabled()
    }
}

impl<T> Clone for SearchConfig<T> {
    fn clone(&self) -> Self {
        Self {
            enabled: self.enabled,
            columns: self.columns.clone(),
            custom: self.custom.clone(),
        }
    }
}

impl<T> fmt::Debug for SearchConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchConfig")
            .field("enabled", &self.enabled)
            .field("columns", &self.columns)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Default rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered to the user.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];

/// Pagination behaviour. When disabled, the page is the whole result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub enabled: bool,
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
        }
    }
}

impl PaginationConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

/// Row density. Determines the row height used by the virtual window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl RowSize {
    pub fn item_height(&self) -> u32 {
        match self {
            Self::Small => 48,
            Self::Medium => 60,
            Self::Large => 72,
        }
    }
}

/// Virtual scroll window parameters, in abstract height units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualConfig {
    pub item_height: u32,
    pub container_height: u32,
    /// Extra rows kept on each side of the visible range.
    pub overscan: usize,
}

impl VirtualConfig {
    pub const DEFAULT_CONTAINER_HEIGHT: u32 = 400;
    pub const DEFAULT_OVERSCAN: usize = 5;

    pub fn for_size(size: RowSize) -> Self {
        Self {
            item_height: size.item_height(),
            container_height: Self::DEFAULT_CONTAINER_HEIGHT,
            overscan: Self::DEFAULT_OVERSCAN,
        }
    }

    pub fn container_height(mut self, height: u32) -> Self {
        self.container_height = height;
        self
    }

    pub fn overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }
}

impl Default for VirtualConfig {
    fn default() -> Self {
        Self::for_size(RowSize::default())
    }
}

/// Export naming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// File name stem; the date and extension are appended.
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: "export".to_string(),
        }
    }
}

/// Everything that shapes a table besides its columns and data.
pub struct TableConfig<T> {
    pub search: SearchConfig<T>,
    pub pagination: PaginationConfig,
    pub selection: SelectionMode,
    /// `Some` turns on the virtual scroll window over the current page.
    pub virtualization: Option<VirtualConfig>,
    pub export: ExportConfig,
    pub size: RowSize,
}

impl<T> Default for TableConfig<T> {
    fn default() -> Self {
        Self {
            search: SearchConfig::default(),
            pagination: PaginationConfig::default(),
            selection: SelectionMode::None,
            virtualization: None,
            export: ExportConfig::default(),
            size: RowSize::default(),
        }
    }
}

impl<T> Clone for TableConfig<T> {
    fn clone(&self) -> Self {
        Self {
            search: self.search.clone(),
            pagination: self.pagination.clone(),
            selection: self.selection,
            virtualization: self.virtualization,
            export: self.export.clone(),
            size: self.size,
        }
    }
}

impl<T> fmt::Debug for TableConfig<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableConfig")
            .field("search", &self.search)
            .field("pagination", &self.pagination)
            .field("selection", &self.selection)
            .field("virtualization", &self.virtualization)
            .field("export", &self.export)
            .field("size", &self.size)
            .finish()
    }
}
