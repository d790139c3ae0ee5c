//! Column filters

use std::collections::BTreeMap;

use crate::Column;
use crate::FilterValue;

/// Keeps the indices whose rows pass every active column filter.
///
/// Filters naming an unknown column, or a column without an accessor, are
/// ignored.
pub fn apply_filters<T>(
    rows: &[T],
    columns: &[Column<T>],
    indices: Vec<usize>,
    filters: &BTreeMap<String, FilterValue>,
) -> Vec<usize> {
    let active: Vec<(&Column<T>, &FilterValue)> = filters
        .iter()
        .filter(|(_, filter)| filter.is_active())
        .filter_map(|(key, filter)| {
            columns
                .iter()
                .find(|c| c.key == *key && c.has_accessor())
                .map(|column| (column, filter))
        })
        .collect();

    if active.is_empty() {
        return indices;
    }

    indices
        .into_iter()
        .filter(|&index| {
            active
                .iter()
                .all(|(column, filter)| filter.matches(&column.value_guarded(&rows[index])))
        })
        .collect()
}

/// Sorted, de-duplicated display values of a column, skipping nulls.
pub fn unique_values<T>(rows: &[T], column: &Column<T>) -> Vec<String> {
    let mut values: Vec<String> = rows
        .iter()
        .map(|row| column.value_guarded(row))
        .filter(|value| !value.is_null())
        .map(|value| value.to_string())
        .collect();
    values.sort();
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use serde_json::json;

    use super::*;
    use crate::CellValue;

    fn rows() -> Vec<Value> {
        vec![
            json!({"type": "بناء", "district": "North"}),
            json!({"type": "هدم", "district": "South"}),
            json!({"type": "بناء", "district": null}),
        ]
    }

    fn columns() -> Vec<Column<Value>> {
        vec![Column::field("type", "Type"), Column::field("district", "District")]
    }

    #[test]
    fn test_filters_combine() {
        let mut filters = BTreeMap::new();
        filters.insert("type".to_string(), FilterValue::Exact(CellValue::from("بناء")));
        assert_eq!(apply_filters(&rows(), &columns(), vec![0, 1, 2], &filters), vec![0, 2]);

        filters.insert("district".to_string(), FilterValue::Text("nor".into()));
        assert_eq!(apply_filters(&rows(), &columns(), vec![0, 1, 2], &filters), vec![0]);
    }

    #[test]
    fn test_inactive_and_unknown_filters() {
        let mut filters = BTreeMap::new();
        filters.insert("type".to_string(), FilterValue::Text(String::new()));
        filters.insert("missing".to_string(), FilterValue::Text("x".into()));
        assert_eq!(apply_filters(&rows(), &columns(), vec![2, 0], &filters), vec![2, 0]);
    }

    #[test]
    fn test_unique_values() {
        let columns = columns();
        assert_eq!(unique_values(&rows(), &columns[0]), vec!["بناء", "هدم"]);
        assert_eq!(unique_values(&rows(), &columns[1]), vec!["North", "South"]);
    }
}
