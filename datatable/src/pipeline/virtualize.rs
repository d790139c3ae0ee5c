//! Stage 4: virtual scroll window

use std::ops::Range;

use crate::VirtualConfig;

/// The rows of the current page that should actually be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibleRange {
    /// First rendered row (inclusive).
    pub start: usize,
    /// One past the last rendered row.
    pub end: usize,
    /// Height of the spacer standing in for the skipped leading rows.
    pub offset_y: u64,
    /// Height of all rows together.
    pub total_height: u64,
}

impl VisibleRange {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl VirtualConfig {
    /// Computes the rendered window for `total` rows scrolled to `scroll_top`.
    ///
    /// The window covers the rows intersecting the container plus
    /// `overscan` rows on each side, clamped to the data.
    pub fn compute(&self, total: usize, scroll_top: u32) -> VisibleRange {
        if total == 0 || self.item_height == 0 {
            return VisibleRange::default();
        }

        let item_height = self.item_height as usize;
        let first_visible = scroll_top as usize / item_height;
        let visible_count = (self.container_height as usize).div_ceil(item_height);
        let last_visible = (first_visible + visible_count).min(total - 1);

        let start = first_visible.saturating_sub(self.overscan).min(total - 1);
        let last = (last_visible + self.overscan).min(total - 1);

        VisibleRange {
            start,
            end: last + 1,
            offset_y: start as u64 * u64::from(self.item_height),
            total_height: total as u64 * u64::from(self.item_height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RowSize;

    #[test]
    fn test_top_of_list() {
        let config = VirtualConfig::for_size(RowSize::Medium);
        let range = config.compute(100, 0);
        // 400 / 60 rounds up to 7 rows, plus 5 overscan below.
        assert_eq!(range.range(), 0..13);
        assert_eq!(range.offset_y, 0);
        assert_eq!(range.total_height, 6000);
    }

    #[test]
    fn test_scrolled_window() {
        let config = VirtualConfig::for_size(RowSize::Small);
        let range = config.compute(1000, 4800);
        // first visible row 100, 9 rows fit in 400.
        assert_eq!(range.range(), 95..115);
        assert_eq!(range.offset_y, 95 * 48);
    }

    #[test]
    fn test_clamped_at_end_and_empty() {
        let config = VirtualConfig::for_size(RowSize::Large);
        let range = config.compute(10, 10_000);
        assert_eq!(range.end, 10);
        assert!(range.start <= 9);
        assert!(config.compute(0, 0).is_empty());
    }
}
