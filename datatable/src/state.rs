//! Serializable table state

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::CellValue;
use crate::DEFAULT_PAGE_SIZE;
use crate::Key;

// =============================================================================
// Sorting
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn reversed(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The active sort. Sorting applies only when both parts are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub field: Option<String>,
    pub order: Option<SortOrder>,
}

impl SortConfig {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: Some(field.into()),
            order: Some(order),
        }
    }

    /// Returns the field and order when sorting is active.
    pub fn active(&self) -> Option<(&str, SortOrder)> {
        match (&self.field, self.order) {
            (Some(field), Some(order)) => Some((field.as_str(), order)),
            _ => None,
        }
    }

    /// The config after a click on `field`'s header: the same field sorted
    /// ascending flips to descending, anything else starts ascending.
    pub fn toggled(&self, field: &str) -> Self {
        let order = match self.active() {
            Some((current, SortOrder::Asc)) if current == field => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        Self::new(field, order)
    }
}

// =============================================================================
// Column filters
// =============================================================================

/// A per-column filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Case-insensitive substring match on the cell text.
    Text(String),
    /// Cell equals one of the values.
    OneOf(Vec<CellValue>),
    /// Cell equals the value.
    Exact(CellValue),
}

impl FilterValue {
    /// Empty text, an empty list and an exact null filter nothing.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Text(text) => !text.is_empty(),
            Self::OneOf(values) => !values.is_empty(),
            Self::Exact(value) => !value.is_null(),
        }
    }

    pub fn matches(&self, value: &CellValue) -> bool {
        match self {
            Self::Text(text) => value.contains_folded(&text.to_lowercase()),
            Self::OneOf(values) => values.contains(value),
            Self::Exact(expected) => expected == value,
        }
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Selection mode for the table rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// Single row (radio-button style).
    Single,
    /// Multiple rows (checkbox style).
    Multi,
}

/// How much of the current page is selected, for a header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionState {
    None,
    Partial,
    All,
}

/// Tracks selected rows by key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub mode: SelectionMode,
    pub selected: BTreeSet<Key>,
}

impl Selection {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: BTreeSet::new(),
        }
    }

    /// Toggle selection for a key. Returns true if selection changed.
    pub fn toggle(&mut self, key: Key) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                let was_selected = self.selected.contains(&key);
                self.selected.clear();
                if !was_selected {
                    self.selected.insert(key);
                }
                true
            }
            SelectionMode::Multi => {
                if !self.selected.remove(&key) {
                    self.selected.insert(key);
                }
                true
            }
        }
    }

    /// Replaces the selection with `keys`. Only multi selection supports
    /// this; returns false otherwise.
    pub fn replace(&mut self, keys: impl IntoIterator<Item = Key>) -> bool {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        self.selected = keys.into_iter().collect();
        true
    }

    pub fn is_selected(&self, key: &Key) -> bool {
        self.selected.contains(key)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.selected.iter()
    }

    /// Selection state relative to the keys of the current page.
    pub fn state_for<'a>(&self, page_keys: impl IntoIterator<Item = &'a Key>) -> SelectionState {
        let mut total = 0;
        let mut hits = 0;
        for key in page_keys {
            total += 1;
            if self.selected.contains(key) {
                hits += 1;
            }
        }
        match hits {
            0 => SelectionState::None,
            n if n == total => SelectionState::All,
            _ => SelectionState::Partial,
        }
    }
}

// =============================================================================
// TableState
// =============================================================================

/// Everything the user can change about a table.
///
/// Plain data so it can be persisted or shared between views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub search_term: String,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub sort: SortConfig,
    pub filters: BTreeMap<String, FilterValue>,
    pub selection: Selection,
    /// Scroll offset of the virtual window.
    pub scroll_top: u32,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortConfig::default(),
            filters: BTreeMap::new(),
            selection: Selection::default(),
            scroll_top: 0,
        }
    }
}
