//! `projects`: the work order table and its actions.

use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use chrono::Local;
use chrono::NaiveDate;
use datatable::CellValue;
use datatable::DataTable;
use datatable::ExportError;
use datatable::FilterValue;
use datatable::Key;
use datatable::PAGE_SIZE_OPTIONS;
use datatable::RowSize;
use datatable::SortConfig;
use datatable::SortOrder;
use datatable::visible_actions;
use frappe_lib::error::FieldError;
use frappe_lib::error::FieldValidationError;
use frappe_lib::model::Document;

use super::Context;
use super::confirm;
use crate::cli::CreateArgs;
use crate::cli::ExportArgs;
use crate::cli::ExportFormat;
use crate::cli::ListArgs;
use crate::cli::ProjectsCommand;
use crate::cli::UpdateArgs;
use crate::cli::ViewArgs;
use crate::error::AppError;
use crate::projects::DeleteReport;
use crate::projects::ProjectService;
use crate::projects::TableOptions;
use crate::projects::WorkItem;
use crate::projects::WorkOrder;
use crate::projects::WorkOrderForm;
use crate::projects::WorkOrderUpdate;
use crate::projects::bulk_delete;
use crate::projects::bulk_export;
use crate::projects::constants::ITEMS_FIELD;
use crate::projects::constants::messages;
use crate::projects::row_actions;
use crate::projects::run_row_action;
use crate::projects::work_order_table;
use crate::render;

const CANCELLED_EDIT: &str = "لا يمكن تعديل أمر عمل ملغي";
const DELETE_CANCELLED: &str = "تم إلغاء الحذف";

pub async fn run(ctx: &Context, command: &ProjectsCommand) -> Result<(), AppError> {
    ctx.require_session().await?;
    let service = ProjectService::new(ctx.client());

    match command {
        ProjectsCommand::List(args) => list(ctx, &service, args).await,
        ProjectsCommand::Show { name } => show(&service, name).await,
        ProjectsCommand::Create(args) => create(ctx, &service, args).await,
        ProjectsCommand::Update(args) => update(ctx, &service, args).await,
        ProjectsCommand::Delete { names, yes } => delete(ctx, &service, names, *yes).await,
        ProjectsCommand::Export(args) => export(ctx, &service, args).await,
    }
}

async fn fetch(service: &ProjectService) -> Result<Vec<WorkOrder>, AppError> {
    service
        .list()
        .await
        .map_err(AppError::request(messages::FETCH_FAILED))
}

// =============================================================================
// Table view
// =============================================================================

/// Groups repeated `KEY=VALUE` filters into one filter per column.
///
/// Every key must name a filterable column.
pub fn build_filters(
    table: &DataTable<WorkOrder>,
    pairs: &[(String, String)],
) -> Result<Vec<(String, FilterValue)>, AppError> {
    let mut grouped: Vec<(String, Vec<CellValue>)> = Vec::new();
    for (key, value) in pairs {
        if !table.column(key).is_some_and(|c| c.filterable) {
            return Err(AppError::Usage(format!("cannot filter on column {:?}", key)));
        }
        let value = CellValue::from(value.as_str());
        match grouped.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => grouped.push((key.clone(), vec![value])),
        }
    }
    Ok(grouped
        .into_iter()
        .map(|(key, values)| (key, FilterValue::OneOf(values)))
        .collect())
}

/// Applies search, filters and sort from the command line.
pub fn apply_view(table: &mut DataTable<WorkOrder>, view: &ViewArgs) -> Result<(), AppError> {
    for (key, filter) in build_filters(table, &view.filters)? {
        table.set_filter(key, filter);
    }
    if let Some(search) = &view.search {
        table.set_search(search);
    }
    if let Some(field) = &view.sort {
        if !table.column(field).is_some_and(|c| c.sortable) {
            return Err(AppError::Usage(format!("cannot sort on column {:?}", field)));
        }
        let order = if view.desc { SortOrder::Desc } else { SortOrder::Asc };
        table.set_sort(SortConfig::new(field, order));
    }
    Ok(())
}

/// Selects the rows with the given document names. Returns the names that
/// are not in the table.
pub fn select_names(table: &mut DataTable<WorkOrder>, names: &[String]) -> Vec<String> {
    let mut missing = Vec::new();
    for name in names {
        let key = Key::from(name.as_str());
        if !table.rows().iter().any(|o| o.name == *name) {
            missing.push(name.clone());
        } else if !table.is_selected(&key) {
            table.toggle_row(key);
        }
    }
    missing
}

async fn page_size(ctx: &Context, requested: Option<usize>) -> Result<usize, AppError> {
    match requested {
        Some(size) if !PAGE_SIZE_OPTIONS.contains(&size) => Err(AppError::Usage(format!(
            "page size must be one of {:?}",
            PAGE_SIZE_OPTIONS
        ))),
        Some(size) => {
            ctx.settings.set_page_size(size).await?;
            Ok(size)
        }
        None => Ok(ctx
            .settings
            .page_size()
            .await?
            .unwrap_or(datatable::DEFAULT_PAGE_SIZE)),
    }
}

/// The search to apply: the given term, remembered for the next run, or
/// else the remembered one. An empty term forgets it.
async fn search_term(ctx: &Context, given: Option<&str>) -> Result<Option<String>, AppError> {
    match given {
        Some(term) => {
            ctx.settings.remember_search(term).await?;
            Ok(Some(term.to_string()))
        }
        None => {
            let saved = ctx.settings.last_search().await?;
            if let Some(term) = &saved {
                log::debug!("using remembered search {:?}", term);
            }
            Ok(saved)
        }
    }
}

async fn list(ctx: &Context, service: &ProjectService, args: &ListArgs) -> Result<(), AppError> {
    let options = TableOptions {
        page_size: page_size(ctx, args.page_size).await?,
        size: RowSize::default(),
        virtual_height: args.virtual_window.then_some(args.height),
    };
    let mut table = work_order_table(fetch(service).await?, options);

    let view = ViewArgs {
        search: search_term(ctx, args.view.search.as_deref()).await?,
        ..args.view.clone()
    };
    apply_view(&mut table, &view)?;

    let last_page = table.page_info().total_pages.max(1);
    if args.page > last_page {
        log::debug!("page {} past the end, showing {}", args.page, last_page);
    }
    table.set_page(args.page.min(last_page));

    if args.select_page {
        table.select_all_on_page();
    } else {
        for name in select_names(&mut table, &args.select) {
            ctx.toaster.warning(messages::NO_SELECTION, name);
        }
    }
    if args.virtual_window {
        table.scroll_to(args.scroll);
    }

    print!("{}", render::guarded_table(&table));

    if args.delete_selected {
        let Some(names) = table.run_bulk_action(&bulk_delete()) else {
            ctx.toaster.warning(messages::NO_SELECTION, String::new());
            return Ok(());
        };
        return delete(ctx, service, &names, false).await;
    }
    Ok(())
}

// =============================================================================
// Single work order
// =============================================================================

async fn show(service: &ProjectService, name: &str) -> Result<(), AppError> {
    let doc = service
        .get(name)
        .await
        .map_err(AppError::request(messages::FETCH_FAILED))?;
    let items = line_items(&doc);
    let order = WorkOrder::from_document(doc)?;

    print!("{}", format_order(&order, &items));
    Ok(())
}

/// The parseable line items of a work order document. Rows that do not
/// parse are logged and left out.
fn line_items(doc: &Document) -> Vec<WorkItem> {
    let rows = match doc.get_table(ITEMS_FIELD) {
        Ok(Some(rows)) => rows,
        Ok(None) | Err(FieldError::Missing { .. }) => return Vec::new(),
        Err(e) => {
            log::warn!("{}: unreadable {}: {}", doc.name().unwrap_or("-"), ITEMS_FIELD, e);
            return Vec::new();
        }
    };
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value(row.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                log::warn!("{}: skipping line item {}: {}", doc.name().unwrap_or("-"), index + 1, e);
                None
            }
        })
        .collect()
}

/// Labels of the row actions the user may run on `order`.
fn available_actions(order: &WorkOrder) -> Vec<String> {
    let actions = row_actions();
    visible_actions(&actions, order)
        .into_iter()
        .filter(|action| !action.is_disabled(order))
        .map(|action| action.label.clone())
        .collect()
}

fn format_order(order: &WorkOrder, items: &[WorkItem]) -> String {
    let dash = |value: &Option<String>| value.clone().unwrap_or_else(|| "-".to_string());
    let mut out = render::pairs(&[
        ("رقم أمر العمل", order.number().to_string()),
        ("المعرف", order.name.clone()),
        ("الشركة", dash(&order.company)),
        ("العميل", dash(&order.acc_name1)),
        ("نوع العمل", dash(&order.job_type1)),
        ("المنطقة", dash(&order.district_name)),
        ("تاريخ الإنشاء", dash(&order.create_date1)),
        ("الحالة", order.status().unwrap_or("-").to_string()),
        ("آخر تحديث", dash(&order.modified)),
        ("الإجراءات", available_actions(order).join("، ")),
    ]);
    if !items.is_empty() {
        out.push('\n');
        let rows: Vec<(&str, String)> = items
            .iter()
            .map(|item| {
                (
                    item.item_name.as_str(),
                    format!(
                        "{} {} × {:.2} = {:.2}",
                        item.quantity, item.unit, item.unit_price, item.total_amount
                    ),
                )
            })
            .collect();
        out.push_str(&render::pairs(&rows));
        let total: f64 = items.iter().map(|item| item.total_amount).sum();
        out.push_str(&format!("الإجمالي: {:.2}\n", total));
    }
    out
}

/// Builds the create form, collecting every problem instead of stopping at
/// the first.
pub fn build_form(args: &CreateArgs, today: NaiveDate) -> Result<WorkOrderForm, Vec<FieldValidationError>> {
    let mut form = WorkOrderForm::new(today);
    form.wo_num1 = args.wo_num.trim().to_string();
    form.acc_name1 = args.customer.trim().to_string();
    if let Some(company) = &args.company {
        form.company = company.trim().to_string();
    }
    form.job_type1 = args.job_type.clone();
    form.district_name = args.district.clone();
    form.team_la = args.team.clone();
    if let Some(date) = &args.create_date {
        form.create_date1 = date.trim().to_string();
    }
    if let Some(date) = &args.index_date {
        form.indx_date = date.trim().to_string();
    }

    let mut errors = Vec::new();
    for raw in &args.items {
        match WorkItem::parse(raw) {
            Some(item) => form.add_item(item),
            None => errors.push(FieldValidationError::new(
                ITEMS_FIELD,
                format!("{}: {}", messages::INVALID_ITEM, raw),
            )),
        }
    }
    if let Err(mut invalid) = form.validate() {
        errors.append(&mut invalid);
    }

    if errors.is_empty() { Ok(form) } else { Err(errors) }
}

async fn create(ctx: &Context, service: &ProjectService, args: &CreateArgs) -> Result<(), AppError> {
    let form = build_form(args, Local::now().date_naive()).map_err(AppError::Validation)?;
    let created = service
        .create(&form)
        .await
        .map_err(AppError::request(messages::CREATE_FAILED))?;

    ctx.toaster.success(
        messages::CREATE_SUCCESS,
        format!("{} ({:.2})", created.number(), form.total_amount()),
    );
    Ok(())
}

pub fn build_update(args: &UpdateArgs) -> WorkOrderUpdate {
    WorkOrderUpdate {
        work_order_status1: args.status.clone(),
        acc_name1: args.customer.clone(),
        company: args.company.clone(),
        job_type1: args.job_type.clone(),
        district_name: args.district.clone(),
        team_la: args.team.clone(),
    }
}

async fn update(ctx: &Context, service: &ProjectService, args: &UpdateArgs) -> Result<(), AppError> {
    let changes = build_update(args);
    changes.validate().map_err(AppError::Validation)?;

    let current = service
        .get(&args.name)
        .await
        .map_err(AppError::request(messages::FETCH_FAILED))?;
    let current = WorkOrder::from_document(current)?;

    let Some(name) = run_row_action("edit", &current) else {
        return Err(AppError::Usage(CANCELLED_EDIT.to_string()));
    };

    let updated = service
        .update(&name, &changes)
        .await
        .map_err(AppError::request(messages::SAVE_FAILED))?;
    ctx.toaster
        .success(messages::UPDATE_SUCCESS, updated.number().to_string());
    Ok(())
}

// =============================================================================
// Delete
// =============================================================================

/// Names to delete: the selected rows through the bulk action, then any
/// name the table does not hold.
pub fn delete_targets(table: &mut DataTable<WorkOrder>, names: &[String]) -> Vec<String> {
    table.clear_selection();
    let missing = select_names(table, names);
    let mut targets = table.run_bulk_action(&bulk_delete()).unwrap_or_default();
    targets.extend(missing);
    targets
}

fn report_deletes(ctx: &Context, report: &DeleteReport) {
    if !report.deleted.is_empty() {
        ctx.toaster
            .success(messages::DELETE_SUCCESS, report.deleted.join("، "));
    }
    for (name, err) in &report.failed {
        let title = if err.is_permission_error() {
            messages::PERMISSION_ERROR
        } else {
            messages::DELETE_FAILED
        };
        ctx.toaster.error(title, format!("{}: {}", name, err));
    }
}

async fn delete(ctx: &Context, service: &ProjectService, names: &[String], yes: bool) -> Result<(), AppError> {
    let mut table = work_order_table(fetch(service).await?, TableOptions::default());
    let targets = delete_targets(&mut table, names);
    if targets.is_empty() {
        ctx.toaster.warning(messages::NO_SELECTION, String::new());
        return Ok(());
    }

    if !yes && !confirm(&format!("حذف {} ({})؟", targets.len(), targets.join("، ")))? {
        ctx.toaster.info(DELETE_CANCELLED, String::new());
        return Ok(());
    }

    let report = service.delete_many(&targets).await;
    report_deletes(ctx, &report);

    let remaining = work_order_table(fetch(service).await?, TableOptions::default());
    print!("{}", render::guarded_table(&remaining));

    if report.is_complete() {
        Ok(())
    } else {
        Err(AppError::Incomplete(report.failed.len()))
    }
}

// =============================================================================
// Export
// =============================================================================

/// Outcome of [`write_export`].
#[derive(Debug)]
pub struct Exported {
    pub path: PathBuf,
    pub count: usize,
    /// Selected names that are not in the table.
    pub missing: Vec<String>,
}

/// Writes the filtered rows, or only `selected` when given, into `dir`.
pub fn write_export(
    table: &mut DataTable<WorkOrder>,
    format: ExportFormat,
    selected: &[String],
    dir: &Path,
    today: NaiveDate,
) -> Result<Exported, AppError> {
    let mut missing = Vec::new();
    let rows = if selected.is_empty() {
        None
    } else {
        table.clear_selection();
        missing = select_names(table, selected);
        let rows = table
            .run_bulk_action(&bulk_export())
            .ok_or_else(|| AppError::Usage(messages::NO_SELECTION.to_string()))?;
        Some(rows)
    };

    std::fs::create_dir_all(dir).map_err(ExportError::from)?;
    let path = dir.join(table.export_filename(format.extension(), today));
    let mut out = BufWriter::new(std::fs::File::create(&path).map_err(ExportError::from)?);

    let count = match (&rows, format) {
        (None, ExportFormat::Csv) => table.export_csv(&mut out).map(|_| table.view().total()),
        (None, ExportFormat::Json) => table.export_json(&mut out).map(|_| table.view().total()),
        (Some(rows), ExportFormat::Csv) => datatable::export_csv(&mut out, table.columns(), rows).map(|_| rows.len()),
        (Some(rows), ExportFormat::Json) => datatable::export_json(&mut out, rows).map(|_| rows.len()),
    }?;
    out.flush().map_err(ExportError::from)?;

    log::info!("exported {} work orders to {}", count, path.display());
    Ok(Exported { path, count, missing })
}

async fn export(ctx: &Context, service: &ProjectService, args: &ExportArgs) -> Result<(), AppError> {
    let mut table = work_order_table(fetch(service).await?, TableOptions::default());
    apply_view(&mut table, &args.view)?;

    let dir = match &args.out {
        Some(dir) => dir.clone(),
        None => ctx
            .settings
            .export_dir()
            .await?
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let exported = write_export(&mut table, args.format, &args.select, &dir, Local::now().date_naive())?;

    if let Some(dir) = &args.out {
        ctx.settings.set_export_dir(dir).await?;
    }
    for name in &exported.missing {
        ctx.toaster.warning(messages::NO_SELECTION, name.clone());
    }
    ctx.toaster.success(
        messages::EXPORT_SUCCESS,
        format!("{} ({})", exported.path.display(), exported.count),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::testing;

    fn order(name: &str, customer: &str, status: &str, company: &str) -> WorkOrder {
        WorkOrder {
            name: name.to_string(),
            acc_name1: Some(customer.to_string()),
            company: Some(company.to_string()),
            work_order_status1: Some(status.to_string()),
            ..WorkOrder::default()
        }
    }

    fn table() -> DataTable<WorkOrder> {
        work_order_table(
            vec![
                order("WO-1", "محمد", "مكتمل", "مؤسسة قساور"),
                order("WO-2", "سارة", "تحت التنفيذ", "مؤسسة قساور"),
                order("WO-3", "خالد", "مدفوع", "شركة أخرى"),
                order("WO-4", "محمود", "مكتمل", "شركة أخرى"),
            ],
            TableOptions::default(),
        )
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_repeated_filters_are_grouped() {
        let table = table();
        let filters = build_filters(
            &table,
            &pairs(&[("status", "مكتمل"), ("company", "شركة أخرى"), ("status", "مدفوع")]),
        )
        .unwrap();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0].0, "status");
        assert_eq!(
            filters[0].1,
            FilterValue::OneOf(vec!["مكتمل".into(), "مدفوع".into()])
        );
    }

    #[test]
    fn test_unknown_filter_column_is_a_usage_error() {
        let table = table();
        let err = build_filters(&table, &pairs(&[("acc_name1", "محمد")])).unwrap_err();
        assert!(matches!(err, AppError::Usage(_)));
    }

    #[test]
    fn test_apply_view() {
        let mut table = table();
        let view = ViewArgs {
            search: None,
            filters: pairs(&[("status", "مكتمل"), ("status", "مدفوع")]),
            sort: Some("acc_name1".to_string()),
            desc: true,
        };
        apply_view(&mut table, &view).unwrap();
        let names: Vec<&str> = table.page_rows().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["WO-4", "WO-1", "WO-3"]);

        let unsortable = ViewArgs {
            sort: Some("company".to_string()),
            ..ViewArgs::default()
        };
        assert!(apply_view(&mut table, &unsortable).is_err());
    }

    #[test]
    fn test_delete_targets_use_selection_then_missing() {
        let mut table = table();
        let targets = delete_targets(
            &mut table,
            &["WO-3".to_string(), "WO-99".to_string(), "WO-1".to_string()],
        );
        // Selected rows come back in table order.
        assert_eq!(targets, vec!["WO-1", "WO-3", "WO-99"]);
    }

    #[test]
    fn test_build_form_reports_every_problem() {
        let args = CreateArgs {
            wo_num: " ".to_string(),
            customer: "محمد".to_string(),
            company: None,
            job_type: Some("بناء".to_string()),
            district: None,
            create_date: None,
            team: None,
            index_date: None,
            items: vec!["كابل:x:م:10".to_string()],
        };
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let errors = build_form(&args, today).unwrap_err();
        let shown: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert!(shown[0].starts_with(messages::INVALID_ITEM));
        assert!(shown.contains(&messages::WO_NUM_REQUIRED));
        assert!(shown.contains(&messages::ITEM_REQUIRED));

        let args = CreateArgs {
            wo_num: "1450".to_string(),
            items: vec!["كابل:3:م:10".to_string()],
            ..args
        };
        let form = build_form(&args, today).unwrap();
        assert_eq!(form.create_date1, "2026-02-01");
        assert_eq!(form.total_amount(), 30.0);
    }

    #[test]
    fn test_export_filtered_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table();
        table.set_search("مح");
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let exported = write_export(&mut table, ExportFormat::Csv, &[], dir.path(), today).unwrap();
        assert_eq!(exported.count, 2);
        assert!(exported.missing.is_empty());
        assert_eq!(exported.path.file_name().unwrap(), "work_orders_2026-02-01.csv");

        let bytes = std::fs::read(&exported.path).unwrap();
        assert!(bytes.starts_with(datatable::UTF8_BOM));
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_export_selection_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table();
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let exported =
            write_export(&mut table, ExportFormat::Json, &["WO-2".to_string()], dir.path(), today).unwrap();
        assert_eq!(exported.count, 1);
        let rows: Vec<WorkOrder> = serde_json::from_slice(&std::fs::read(exported.path).unwrap()).unwrap();
        assert_eq!(rows[0].name, "WO-2");

        let err = write_export(&mut table, ExportFormat::Json, &["WO-99".to_string()], dir.path(), today);
        assert!(matches!(err, Err(AppError::Usage(_))));
    }

    #[test]
    fn test_export_selection_reports_unknown_names() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = table();
        let today = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        let selected = ["WO-2".to_string(), "WO-99".to_string(), "WO-4".to_string()];
        let exported = write_export(&mut table, ExportFormat::Csv, &selected, dir.path(), today).unwrap();
        assert_eq!(exported.count, 2);
        assert_eq!(exported.missing, vec!["WO-99"]);
        let text = std::fs::read_to_string(&exported.path).unwrap();
        assert_eq!(text.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_search_is_remembered_until_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = testing::context(&dir).await;

        assert_eq!(search_term(&ctx, None).await.unwrap(), None);
        assert_eq!(search_term(&ctx, Some("محمد")).await.unwrap().as_deref(), Some("محمد"));
        assert_eq!(search_term(&ctx, None).await.unwrap().as_deref(), Some("محمد"));

        // An empty search shows everything and forgets the saved term.
        assert_eq!(search_term(&ctx, Some("")).await.unwrap().as_deref(), Some(""));
        assert_eq!(search_term(&ctx, None).await.unwrap(), None);
    }

    #[test]
    fn test_malformed_line_items_are_skipped() {
        let doc: Document = serde_json::from_value(json!({
            "name": "WO-1",
            ITEMS_FIELD: [
                {"item_name": "كابل", "quantity": 3.0, "unit": "م", "unit_price": 10.0, "total_amount": 30.0},
                {"item_name": "حفر", "quantity": "كثير"},
                {"item_name": "أنبوب", "quantity": 1.0, "unit": "م", "unit_price": 5.0, "total_amount": 5.0}
            ]
        }))
        .unwrap();
        let items = line_items(&doc);
        let names: Vec<&str> = items.iter().map(|item| item.item_name.as_str()).collect();
        assert_eq!(names, vec!["كابل", "أنبوب"]);
    }

    #[test]
    fn test_order_details() {
        let items = vec![WorkItem::new("كابل", 3.0, "م", 10.0)];
        let text = format_order(&order("WO-1", "محمد", "مكتمل", "مؤسسة قساور"), &items);
        assert!(text.contains("WO-1"));
        assert!(text.contains("الإجمالي: 30.00"));
        assert!(text.contains("عرض، تعديل، حذف"));

        let cancelled = order("WO-2", "سارة", "ملغي", "مؤسسة قساور");
        assert_eq!(available_actions(&cancelled), vec!["عرض", "حذف"]);
    }
}
