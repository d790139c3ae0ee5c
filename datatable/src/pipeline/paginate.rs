//! Stage 3: pagination

use std::ops::Range;

/// Maximum number of page buttons shown at once.
pub const MAX_VISIBLE_PAGES: usize = 5;

/// The slice of a `len`-row result shown on 1-based `page`.
///
/// Pages past the end give an empty range. Page 0 is treated as page 1.
pub fn paginate(len: usize, page: usize, page_size: usize) -> Range<usize> {
    if page_size == 0 {
        return 0..len;
    }
    let start = page.max(1).saturating_sub(1).saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// Number of pages for `len` rows. Zero rows means zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return usize::from(len > 0);
    }
    len.div_ceil(page_size)
}

/// Up to [`MAX_VISIBLE_PAGES`] page numbers centred on `current` where
/// possible.
pub fn page_numbers(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    let mut start = current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
    let end = (start + MAX_VISIBLE_PAGES - 1).min(total_pages);
    if end - start < MAX_VISIBLE_PAGES - 1 {
        start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
    }
    (start..=end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        assert_eq!(paginate(25, 1, 10), 0..10);
        assert_eq!(paginate(25, 3, 10), 20..25);
        assert_eq!(paginate(25, 4, 10), 25..25);
        assert_eq!(paginate(0, 1, 10), 0..0);
        assert_eq!(paginate(5, 0, 10), 0..5);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(20, 10), 2);
        assert_eq!(total_pages(0, 10), 0);
    }

    #[test]
    fn test_page_numbers_window() {
        assert_eq!(page_numbers(1, 3), vec![1, 2, 3]);
        assert_eq!(page_numbers(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_numbers(6, 10), vec![4, 5, 6, 7, 8]);
        assert_eq!(page_numbers(10, 10), vec![6, 7, 8, 9, 10]);
        assert!(page_numbers(1, 0).is_empty());
    }
}
