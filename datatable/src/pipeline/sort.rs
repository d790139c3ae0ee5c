//! Stage 2: sorting

use crate::CellValue;
use crate::Column;
use crate::SortConfig;
use crate::SortOrder;

/// Sorts `indices` by the configured column. Stable: rows with equal
/// values keep their relative order in both directions.
///
/// Inactive sort config, an unknown column or a column without an
/// accessor leave the order untouched.
pub fn sort<T>(rows: &[T], columns: &[Column<T>], mut indices: Vec<usize>, config: &SortConfig) -> Vec<usize> {
    let Some((field, order)) = config.active() else {
        return indices;
    };
    let Some(column) = columns.iter().find(|c| c.key == field && c.has_accessor()) else {
        return indices;
    };

    // Read each value once.
    let mut keyed: Vec<(usize, CellValue)> = indices
        .drain(..)
        .map(|index| (index, column.value_guarded(&rows[index])))
        .collect();

    keyed.sort_by(|(_, a), (_, b)| {
        let ordering = a.total_cmp(b);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(index, _)| index).collect()
}
