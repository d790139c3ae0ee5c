//! Stateful table

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::BulkAction;
use crate::Column;
use crate::ExportError;
use crate::FilterValue;
use crate::Key;
use crate::PLACEHOLDER;
use crate::PageInfo;
use crate::RowKey;
use crate::Selection;
use crate::SelectionMode;
use crate::SelectionState;
use crate::SortConfig;
use crate::TableConfig;
use crate::TableState;
use crate::View;
use crate::export;
use crate::pipeline;

/// A table over owned rows.
///
/// Holds the data, columns, configuration and [`TableState`], and keeps the
/// derived [`View`] current. Every setter that changes an input of the
/// pipeline re-derives the view right away; setters that change nothing
/// (same search term, same page) leave it alone, which
/// [`DataTable::generation`] makes observable.
#[derive(Debug)]
pub struct DataTable<T> {
    rows: Vec<T>,
    columns: Vec<Column<T>>,
    row_key: RowKey<T>,
    config: TableConfig<T>,
    state: TableState,
    view: View,
    generation: u64,
}

impl<T> DataTable<T> {
    pub fn new(columns: Vec<Column<T>>, row_key: RowKey<T>, config: TableConfig<T>) -> Self {
        let state = TableState {
            page_size: config.pagination.page_size,
            selection: Selection::new(config.selection),
            ..TableState::default()
        };
        let mut table = Self {
            rows: Vec::new(),
            columns,
            row_key,
            config,
            state,
            view: View::default(),
            generation: 0,
        };
        table.refresh();
        table
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key == key)
    }

    pub fn config(&self) -> &TableConfig<T> {
        &self.config
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Number of times the view has been derived.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn page_info(&self) -> &PageInfo {
        self.view.page_info()
    }

    /// Page numbers to offer, at most five around the current page.
    pub fn page_numbers(&self) -> Vec<usize> {
        let info = self.view.page_info();
        pipeline::page_numbers(info.page, info.total_pages)
    }

    /// Rows after search and filters, in display order, across all pages.
    pub fn filtered_rows(&self) -> Vec<&T> {
        self.resolve(self.view.filtered())
    }

    /// Rows on the current page.
    pub fn page_rows(&self) -> Vec<&T> {
        self.resolve(self.view.page())
    }

    /// Rows to render (the virtual window when enabled).
    pub fn visible_rows(&self) -> Vec<&T> {
        self.resolve(self.view.visible())
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&T> {
        indices.iter().map(|&i| &self.rows[i]).collect()
    }

    // =========================================================================
    // Inputs
    // =========================================================================

    /// Replaces the data. Clears the selection and returns to page 1.
    pub fn set_data(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.state.selection.clear();
        self.state.page = 1;
        self.refresh();
    }

    /// Sets the search term and returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.state.search_term {
            return;
        }
        self.state.search_term = term;
        self.state.page = 1;
        self.refresh();
    }

    /// Sets one column filter and returns to page 1.
    pub fn set_filter(&mut self, column: impl Into<String>, filter: FilterValue) {
        self.state.filters.insert(column.into(), filter);
        self.state.page = 1;
        self.refresh();
    }

    /// Clears every column filter and the search term.
    pub fn clear_filters(&mut self) {
        self.state.filters.clear();
        self.state.search_term.clear();
        self.state.page = 1;
        self.refresh();
    }

    /// Header click on `column`. Returns false (and changes nothing) for
    /// unknown or non-sortable columns.
    pub fn toggle_sort(&mut self, column: &str) -> bool {
        if !self.column(column).is_some_and(|c| c.sortable) {
            return false;
        }
        self.state.sort = self.state.sort.toggled(column);
        self.refresh();
        true
    }

    pub fn set_sort(&mut self, sort: SortConfig) {
        if sort != self.state.sort {
            self.state.sort = sort;
            self.refresh();
        }
    }

    /// Moves to a 1-based page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: usize) {
        let page = page.max(1);
        if page != self.state.page {
            self.state.page = page;
            self.refresh();
        }
    }

    /// Changes the page size and returns to page 1. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 || page_size == self.state.page_size {
            return;
        }
        self.state.page_size = page_size;
        self.state.page = 1;
        self.refresh();
    }

    /// Scrolls the virtual window.
    pub fn scroll_to(&mut self, scroll_top: u32) {
        if scroll_top != self.state.scroll_top {
            self.state.scroll_top = scroll_top;
            if self.config.virtualization.is_some() {
                self.refresh();
            }
        }
    }

    fn refresh(&mut self) {
        let previous_page_len = self.view.page().len();
        self.derive();

        // The window starts over whenever the page holds a different number
        // of rows.
        if self.view.page().len() != previous_page_len && self.state.scroll_top != 0 {
            self.state.scroll_top = 0;
            if self.config.virtualization.is_some() {
                self.derive();
            }
        }
    }

    fn derive(&mut self) {
        self.view = pipeline::derive(&self.rows, &self.columns, &self.config, &self.state);
        self.generation += 1;
    }

    // =========================================================================
    // Keys and cells
    // =========================================================================

    pub fn row_key(&self, row: &T) -> Key {
        self.row_key.resolve(row, &self.columns)
    }

    /// Renders one cell. Unknown columns, nulls and failing renderers all
    /// give the placeholder.
    pub fn render_cell(&self, column: &str, row: &T, index: usize) -> String {
        match self.column(column) {
            Some(column) => column.render_cell(row, index),
            None => PLACEHOLDER.to_string(),
        }
    }

    /// Distinct values of a column over the full data, for filter menus.
    pub fn unique_values(&self, column: &str) -> Vec<String> {
        match self.column(column) {
            Some(column) => pipeline::unique_values(&self.rows, column),
            None => Vec::new(),
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection.mode
    }

    pub fn toggle_row(&mut self, key: Key) -> bool {
        self.state.selection.toggle(key)
    }

    pub fn is_selected(&self, key: &Key) -> bool {
        self.state.selection.is_selected(key)
    }

    /// Replaces the selection with the rows of the current page.
    pub fn select_all_on_page(&mut self) -> bool {
        let keys: Vec<Key> = self.page_rows().into_iter().map(|row| self.row_key(row)).collect();
        self.state.selection.replace(keys)
    }

    pub fn clear_selection(&mut self) {
        self.state.selection.clear();
    }

    /// How much of the current page is selected.
    pub fn selection_state(&self) -> SelectionState {
        let keys: Vec<Key> = self.page_rows().into_iter().map(|row| self.row_key(row)).collect();
        self.state.selection.state_for(&keys)
    }

    pub fn selected_keys(&self) -> Vec<Key> {
        self.state.selection.keys().cloned().collect()
    }

    /// Selected rows from the full data, in source order. Rows selected on
    /// other pages are included.
    pub fn selected_rows(&self) -> Vec<&T> {
        if self.state.selection.is_empty() {
            return Vec::new();
        }
        self.rows
            .iter()
            .filter(|row| self.state.selection.is_selected(&self.row_key(row)))
            .collect()
    }

    /// Runs a bulk action over the selection. Returns `None` when nothing
    /// is selected or the action is disabled for the selection.
    pub fn run_bulk_action<R>(&self, action: &BulkAction<T, R>) -> Option<R> {
        let rows = self.selected_rows();
        if rows.is_empty() || action.is_disabled(&rows) {
            return None;
        }
        let keys: Vec<Key> = rows.iter().map(|row| self.row_key(row)).collect();
        log::debug!("running bulk action '{}' on {} rows", action.key, rows.len());
        Some(action.invoke(&rows, &keys))
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Writes the filtered rows (all pages, display order) as CSV.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        export::export_csv(writer, &self.columns, self.filtered_rows())
    }

    /// `<configured name>_YYYY-MM-DD.<extension>`
    pub fn export_filename(&self, extension: &str, date: NaiveDate) -> String {
        export::export_filename(&self.config.export.filename, extension, date)
    }
}

impl<T: Serialize> DataTable<T> {
    /// Writes the filtered rows (all pages, display order) as JSON.
    pub fn export_json<W: Write>(&self, writer: W) -> Result<(), ExportError> {
        export::export_json(writer, self.filtered_rows())
    }
}
