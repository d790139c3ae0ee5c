//! The projects table: columns, configuration and actions.

use chrono::NaiveDateTime;
use datatable::ActionVariant;
use datatable::Align;
use datatable::BulkAction;
use datatable::CellValue;
use datatable::Column;
use datatable::DataTable;
use datatable::ExportConfig;
use datatable::Key;
use datatable::PaginationConfig;
use datatable::RenderError;
use datatable::RowAction;
use datatable::RowKey;
use datatable::RowSize;
use datatable::SearchConfig;
use datatable::SelectionMode;
use datatable::TableConfig;
use datatable::VirtualConfig;

use super::constants::EXPORT_BASENAME;
use super::model::WorkOrder;

/// Status of cancelled work orders; they can no longer be edited.
const CANCELLED: &str = "ملغي";

/// Layout choices for building the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    pub page_size: usize,
    pub size: RowSize,
    /// Enables the virtual window with the given container height.
    pub virtual_height: Option<u32>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: datatable::DEFAULT_PAGE_SIZE,
            size: RowSize::default(),
            virtual_height: None,
        }
    }
}

fn text(value: &Option<String>) -> CellValue {
    value.as_deref().into()
}

/// Column set of the projects table, in display order.
pub fn columns() -> Vec<Column<WorkOrder>> {
    vec![
        Column::new("wo_num1", "رقم أمر العمل")
            .accessor(|o: &WorkOrder| o.number().into())
            .sortable(true)
            .width(14),
        Column::new("company", "الشركة")
            .accessor(|o: &WorkOrder| text(&o.company))
            .filterable(true)
            .width(18),
        Column::new("acc_name1", "العميل")
            .accessor(|o: &WorkOrder| text(&o.acc_name1))
            .sortable(true)
            .width(20),
        Column::new("job_type1", "نوع العمل")
            .accessor(|o: &WorkOrder| text(&o.job_type1))
            .filterable(true)
            .align(Align::Center)
            .width(10),
        Column::new("district_name", "المنطقة")
            .accessor(|o: &WorkOrder| text(&o.district_name))
            .filterable(true)
            .width(14),
        Column::new("create_date1", "تاريخ الإنشاء")
            .accessor(|o: &WorkOrder| text(&o.create_date1))
            .sortable(true)
            .searchable(false)
            .align(Align::Center)
            .width(12),
        Column::new("status", "الحالة")
            .accessor(|o: &WorkOrder| o.status().into())
            .sortable(true)
            .filterable(true)
            .width(20),
        Column::new("modified", "آخر تحديث")
            .accessor(|o: &WorkOrder| text(&o.modified))
            .render(render_modified)
            .sortable(true)
            .searchable(false)
            .align(Align::Center)
            .width(16),
    ]
}

/// Shows `modified` to the minute.
fn render_modified(value: &CellValue, _: &WorkOrder, _: usize) -> Result<String, RenderError> {
    let Some(raw) = value.as_text() else {
        return Ok(value.to_string());
    };
    // Frappe writes "2026-02-01 10:00:00.123456".
    let trimmed = raw.split('.').next().unwrap_or(raw);
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .map_err(|e| RenderError::new(format!("bad timestamp {:?}: {}", raw, e)))
}

pub fn row_key() -> RowKey<WorkOrder> {
    RowKey::derive(|o: &WorkOrder| Key::from(o.name.as_str()))
}

pub fn config(options: TableOptions) -> TableConfig<WorkOrder> {
    TableConfig {
        search: SearchConfig::enabled(),
        pagination: PaginationConfig {
            page_size: options.page_size,
            ..PaginationConfig::default()
        },
        selection: SelectionMode::Multi,
        virtualization: options
            .virtual_height
            .map(|height| VirtualConfig::for_size(options.size).container_height(height)),
        export: ExportConfig {
            filename: EXPORT_BASENAME.to_string(),
        },
        size: options.size,
    }
}

/// A table over `rows`, ready for search and paging.
pub fn work_order_table(rows: Vec<WorkOrder>, options: TableOptions) -> DataTable<WorkOrder> {
    let mut table = DataTable::new(columns(), row_key(), config(options));
    table.set_data(rows);
    table
}

// =============================================================================
// Actions
// =============================================================================

/// "Delete selected": yields the document names to delete.
pub fn bulk_delete() -> BulkAction<WorkOrder, Vec<String>> {
    BulkAction::new("delete-selected", "حذف المحدد", |rows: &[&WorkOrder], _: &[Key]| {
        rows.iter().map(|o| o.name.clone()).collect()
    })
    .variant(ActionVariant::Danger)
}

/// "Export selected": yields the selected rows.
pub fn bulk_export() -> BulkAction<WorkOrder, Vec<WorkOrder>> {
    BulkAction::new("export-selected", "تصدير المحدد", |rows: &[&WorkOrder], _: &[Key]| {
        rows.iter().map(|o| (*o).clone()).collect()
    })
    .variant(ActionVariant::Primary)
}

fn target(o: &WorkOrder, _: usize) -> String {
    o.name.clone()
}

/// Per-row actions. Running one yields the document it applies to.
pub fn row_actions() -> Vec<RowAction<WorkOrder, String>> {
    vec![
        RowAction::new("view", "عرض", target),
        RowAction::new("edit", "تعديل", target)
            .variant(ActionVariant::Primary)
            .disabled_when(|o: &WorkOrder| o.status() == Some(CANCELLED)),
        RowAction::new("delete", "حذف", target).variant(ActionVariant::Danger),
    ]
}

/// Runs the row action `key` on `order`; `None` when it is unknown or
/// disabled for this row.
pub fn run_row_action(key: &str, order: &WorkOrder) -> Option<String> {
    row_actions()
        .into_iter()
        .find(|action| action.key == key)
        .and_then(|action| action.run(order, 0))
}

#[cfg(test)]
mod tests {
    use datatable::FilterValue;
    use datatable::PLACEHOLDER;
    use datatable::visible_actions;

    use super::*;

    fn order(name: &str, customer: &str, status: &str) -> WorkOrder {
        WorkOrder {
            name: name.to_string(),
            wo_num1: Some(name.trim_start_matches("WO-").to_string()),
            acc_name1: Some(customer.to_string()),
            work_order_status1: Some(status.to_string()),
            modified: Some("2026-02-01 10:05:09.000123".to_string()),
            ..WorkOrder::default()
        }
    }

    fn sample() -> Vec<WorkOrder> {
        vec![
            order("WO-3", "محمد", "مكتمل"),
            order("WO-1", "سارة", "تحت التنفيذ"),
            order("WO-2", "محمود", "مكتمل"),
        ]
    }

    #[test]
    fn test_column_titles() {
        let titles: Vec<String> = columns().into_iter().map(|c| c.title).collect();
        assert_eq!(
            titles,
            vec![
                "رقم أمر العمل",
                "الشركة",
                "العميل",
                "نوع العمل",
                "المنطقة",
                "تاريخ الإنشاء",
                "الحالة",
                "آخر تحديث"
            ]
        );
    }

    #[test]
    fn test_search_and_status_filter() {
        let mut table = work_order_table(sample(), TableOptions::default());
        table.set_search("مح");
        assert_eq!(table.view().total(), 2);

        table.set_filter("status", FilterValue::OneOf(vec!["مكتمل".into()]));
        table.set_search("");
        let names: Vec<&str> = table.page_rows().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["WO-3", "WO-2"]);
    }

    #[test]
    fn test_modified_rendering() {
        let table = work_order_table(sample(), TableOptions::default());
        let row = table.page_rows()[0];
        assert_eq!(table.render_cell("modified", row, 0), "2026-02-01 10:05");

        let mut broken = order("WO-9", "x", "مكتمل");
        broken.modified = Some("yesterday".to_string());
        assert_eq!(table.render_cell("modified", &broken, 0), PLACEHOLDER);
    }

    #[test]
    fn test_bulk_delete_collects_names() {
        let mut table = work_order_table(sample(), TableOptions::default());
        table.toggle_row(Key::from("WO-1"));
        table.toggle_row(Key::from("WO-2"));

        let names = table.run_bulk_action(&bulk_delete()).unwrap();
        assert_eq!(names, vec!["WO-1", "WO-2"]);

        let exported = table.run_bulk_action(&bulk_export()).unwrap();
        assert_eq!(exported.len(), 2);
    }

    #[test]
    fn test_edit_disabled_for_cancelled() {
        let actions = row_actions();
        let cancelled = order("WO-5", "x", CANCELLED);
        assert_eq!(visible_actions(&actions, &cancelled).len(), 3);
        assert_eq!(run_row_action("edit", &cancelled), None);
        assert_eq!(run_row_action("delete", &cancelled).as_deref(), Some("WO-5"));
        assert_eq!(run_row_action("archive", &cancelled), None);
    }

    #[test]
    fn test_virtual_window_option() {
        let options = TableOptions {
            virtual_height: Some(120),
            size: RowSize::Small,
            ..TableOptions::default()
        };
        let config = config(options);
        let window = config.virtualization.unwrap();
        assert_eq!(window.item_height, 48);
        assert_eq!(window.container_height, 120);
    }
}
