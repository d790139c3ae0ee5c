//! The derived-data pipeline
//!
//! `rows → search → column filters → sort → page → virtual window`.
//! Every stage works on row indices, so the source slice is never copied
//! or reordered, and every run starts again from the full source.

mod filter;
mod paginate;
mod search;
mod sort;
mod virtualize;

use std::ops::Range;

pub use filter::*;
pub use paginate::*;
pub use search::*;
pub use sort::*;
pub use virtualize::*;

use crate::Column;
use crate::TableConfig;
use crate::TableState;

/// Pagination bookkeeping for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageInfo {
    /// 1-based current page.
    pub page: usize,
    pub page_size: usize,
    /// Rows after search and filters.
    pub total: usize,
    pub total_pages: usize,
    /// 1-based position of the first row on the page, 0 when empty.
    pub start: usize,
    /// 1-based position of the last row on the page, 0 when empty.
    pub end: usize,
}

impl PageInfo {
    fn new(page: usize, page_size: usize, total: usize, range: &Range<usize>) -> Self {
        let (start, end) = if range.is_empty() {
            (0, 0)
        } else {
            (range.start + 1, range.end)
        };
        Self {
            page,
            page_size,
            total,
            total_pages: total_pages(total, page_size),
            start,
            end,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing X to Y of Z records" line.
    pub fn summary(&self) -> String {
        format!("عرض {} إلى {} من أصل {} سجل", self.start, self.end, self.total)
    }
}

/// Output of one pipeline run.
///
/// All indices point into the source rows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    filtered: Vec<usize>,
    page: Range<usize>,
    visible: Option<VisibleRange>,
    page_info: PageInfo,
}

impl View {
    /// Rows surviving search and filters, in display order.
    pub fn filtered(&self) -> &[usize] {
        &self.filtered
    }

    /// Rows on the current page.
    pub fn page(&self) -> &[usize] {
        &self.filtered[self.page.clone()]
    }

    /// Rows to render: the virtual window of the page when virtual
    /// scrolling is on, the whole page otherwise.
    pub fn visible(&self) -> &[usize] {
        let page = self.page();
        match &self.visible {
            Some(window) => &page[window.range()],
            None => page,
        }
    }

    /// The virtual window, relative to the page.
    pub fn window(&self) -> Option<&VisibleRange> {
        self.visible.as_ref()
    }

    pub fn total(&self) -> usize {
        self.filtered.len()
    }

    pub fn page_info(&self) -> &PageInfo {
        &self.page_info
    }
}

/// Runs the whole pipeline.
pub fn derive<T>(rows: &[T], columns: &[Column<T>], config: &TableConfig<T>, state: &TableState) -> View {
    let indices = search(rows, columns, &config.search, &state.search_term);
    let indices = apply_filters(rows, columns, indices, &state.filters);
    let filtered = sort(rows, columns, indices, &state.sort);

    let (page, page_size) = if config.pagination.enabled {
        (paginate(filtered.len(), state.page, state.page_size), state.page_size)
    } else {
        (0..filtered.len(), filtered.len())
    };

    let visible = config
        .virtualization
        .map(|virt| virt.compute(page.len(), state.scroll_top));

    let page_info = PageInfo::new(state.page.max(1), page_size, filtered.len(), &page);

    View {
        filtered,
        page,
        visible,
        page_info,
    }
}
