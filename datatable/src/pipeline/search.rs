//! Stage 1: free-text search

use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;

use crate::Column;
use crate::SearchConfig;
use crate::boundary::extract_panic_message;

/// Returns the indices of rows matching `term`, in source order.
///
/// An empty or whitespace-only term, or disabled search, keeps every row.
/// With a custom predicate, the predicate alone decides. Otherwise a row
/// matches when any searched column's value contains the term, ignoring
/// case. A predicate or accessor that panics for a row drops that row.
pub fn search<T>(rows: &[T], columns: &[Column<T>], config: &SearchConfig<T>, term: &str) -> Vec<usize> {
    let term = term.trim();
    if !config.enabled || term.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = term.to_lowercase();
    let searched: Vec<&Column<T>> = match &config.columns {
        Some(keys) => keys
            .iter()
            .filter_map(|key| columns.iter().find(|c| c.key == *key))
            .collect(),
        None => columns.iter().filter(|c| c.searchable).collect(),
    };

    rows.iter()
        .enumerate()
        .filter(|&(index, row)| {
            let matched = catch_unwind(AssertUnwindSafe(|| match config.predicate() {
                Some(predicate) => predicate(term, row),
                None => searched
                    .iter()
                    .any(|column| column.has_accessor() && column.value(row).contains_folded(&needle)),
            }));
            matched.unwrap_or_else(|panic| {
                log::warn!("search failed for row {}: {}", index, extract_panic_message(&panic));
                false
            })
        })
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use serde_json::json;

    use super::*;

    fn rows() -> Vec<Value> {
        vec![
            json!({"name": "Mohammed", "city": "Riyadh"}),
            json!({"name": "Sara", "city": null}),
            json!({"name": "Ali", "city": "Mohayil"}),
        ]
    }

    fn columns() -> Vec<Column<Value>> {
        vec![Column::field("name", "Name"), Column::field("city", "City")]
    }

    #[test]
    fn test_blank_term_keeps_all() {
        assert_eq!(search(&rows(), &columns(), &SearchConfig::enabled(), "   "), vec![0, 1, 2]);
        assert_eq!(search(&rows(), &columns(), &SearchConfig::disabled(), "moh"), vec![0, 1, 2]);
    }

    #[test]
    fn test_default_search() {
        assert_eq!(search(&rows(), &columns(), &SearchConfig::enabled(), " MOH "), vec![0, 2]);
        let only_name = SearchConfig::enabled().columns(["name"]);
        assert_eq!(search(&rows(), &columns(), &only_name, "moh"), vec![0]);
    }

    #[test]
    fn test_unsearchable_and_unknown_columns() {
        let columns = vec![
            Column::field("name", "Name").searchable(false),
            Column::field("city", "City"),
        ];
        assert_eq!(search(&rows(), &columns, &SearchConfig::enabled(), "sara"), Vec::<usize>::new());
        let unknown = SearchConfig::enabled().columns(["missing"]);
        assert!(search(&rows(), &columns, &unknown, "a").is_empty());
    }

    #[test]
    fn test_custom_predicate_gets_trimmed_term() {
        let config = SearchConfig::enabled().custom(|term: &str, row: &Value| {
            assert_eq!(term, "Sara");
            row["name"] == term
        });
        assert_eq!(search(&rows(), &columns(), &config, "  Sara "), vec![1]);
    }

    #[test]
    fn test_panicking_predicate_drops_row() {
        let config = SearchConfig::enabled().custom(|_: &str, row: &Value| {
            if row["name"] == "Sara" {
                panic!("bad row");
            }
            true
        });
        assert_eq!(search(&rows(), &columns(), &config, "x"), vec![0, 2]);
    }

    #[test]
    fn test_panicking_accessor_drops_row() {
        let columns = vec![
            Column::new("name", "Name").accessor(|row: &Value| {
                let name = row["name"].as_str().unwrap_or_default();
                if name == "Sara" {
                    panic!("no accessor for {}", name);
                }
                name.into()
            }),
            Column::field("city", "City"),
        ];
        assert_eq!(search(&rows(), &columns, &SearchConfig::enabled(), "a"), vec![0, 2]);
        assert_eq!(search(&rows(), &columns, &SearchConfig::enabled(), "riyadh"), vec![0]);
    }
}
