//! Plain-text rendering of tables for the terminal.
//!
//! Widths are measured in terminal cells, so Arabic text and wide glyphs
//! line up with ASCII columns.

use std::fmt::Write;

use datatable::Align;
use datatable::Boundary;
use datatable::BoundaryFailure;
use datatable::DataTable;
use datatable::ErrorBoundary;
use datatable::SelectionMode;
use datatable::SelectionState;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: char = '…';
const SEPARATOR: &str = " │ ";
const DEFAULT_WIDTH: usize = 16;

/// Pads or truncates `text` to exactly `width` cells.
pub fn fit(text: &str, width: usize, align: Align) -> String {
    let text = text.replace(['\n', '\r', '\t'], " ");
    let text = truncate(&text, width);
    let gap = width.saturating_sub(text.width());
    let (left, right) = match align {
        Align::Start => (0, gap),
        Align::End => (gap, 0),
        Align::Center => (gap / 2, gap - gap / 2),
    };
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push(ELLIPSIS);
    out
}

fn selection_mark(selected: bool) -> &'static str {
    if selected { "[x]" } else { "[ ]" }
}

fn header_mark(state: SelectionState) -> &'static str {
    match state {
        SelectionState::All => "[x]",
        SelectionState::Partial => "[-]",
        SelectionState::None => "[ ]",
    }
}

/// Renders the rows to show, with header, selection marks and the
/// pagination footer.
pub fn table<T>(table: &DataTable<T>) -> String {
    let columns = table.columns();
    let widths: Vec<usize> = columns
        .iter()
        .map(|c| usize::from(c.width.unwrap_or(DEFAULT_WIDTH as u16)).max(3))
        .collect();
    let selectable = table.selection_mode() != SelectionMode::None;

    let mut out = String::new();

    let mut header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(c, &w)| fit(&c.title, w, c.align))
        .collect();
    if selectable {
        header.insert(0, header_mark(table.selection_state()).to_string());
    }
    let header = header.join(SEPARATOR);
    let _ = writeln!(out, "{}", header.trim_end());
    let _ = writeln!(out, "{}", "─".repeat(header.width()));

    let offset = table.view().window().map_or(0, |window| window.start);
    let rows = table.visible_rows();
    if rows.is_empty() {
        let _ = writeln!(out, "لا توجد بيانات");
    }
    for (i, row) in rows.into_iter().enumerate() {
        let index = offset + i;
        let mut cells: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| fit(&table.render_cell(&c.key, row, index), w, c.align))
            .collect();
        if selectable {
            cells.insert(0, selection_mark(table.is_selected(&table.row_key(row))).to_string());
        }
        let _ = writeln!(out, "{}", cells.join(SEPARATOR).trim_end());
    }

    out.push_str(&footer(table));
    out
}

fn footer<T>(table: &DataTable<T>) -> String {
    let info = table.page_info();
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", info.summary());

    if table.config().pagination.enabled && info.total_pages > 1 {
        let pages: Vec<String> = table
            .page_numbers()
            .into_iter()
            .map(|p| if p == info.page { format!("[{}]", p) } else { p.to_string() })
            .collect();
        let previous = if info.has_previous() { "السابق" } else { "" };
        let next = if info.has_next() { "التالي" } else { "" };
        let _ = writeln!(out, "{} {} {}", previous, pages.join(" "), next);
    }

    if let Some(window) = table.view().window() {
        let _ = writeln!(
            out,
            "النافذة {}-{} (إزاحة {}، الارتفاع الكلي {})",
            window.start + 1,
            window.end,
            window.offset_y,
            window.total_height
        );
    }

    let selected = table.selected_keys().len();
    if selected > 0 {
        let _ = writeln!(out, "المحدد: {}", selected);
    }
    out
}

/// Renders inside an [`ErrorBoundary`]; a panic shows the fallback box.
pub fn guarded_table<T>(data: &DataTable<T>) -> String {
    match ErrorBoundary::render_mut(|| table(data)) {
        Boundary::Rendered(text) => text,
        Boundary::Failed(failure) => fallback(&failure),
    }
}

pub fn fallback(failure: &BoundaryFailure) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "⚠ {}", failure.title);
    let _ = writeln!(out, "{}", failure.message);
    if let Some(detail) = &failure.detail {
        let _ = writeln!(out, "{}", detail);
    }
    let _ = writeln!(out, "{}", failure.retry_hint);
    out
}

/// Two-column key/value listing.
pub fn pairs(rows: &[(&str, String)]) -> String {
    let width = rows.iter().map(|(k, _)| k.width()).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in rows {
        let _ = writeln!(out, "{}  {}", fit(key, width, Align::Start), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use datatable::CellValue;
    use datatable::Column;
    use datatable::Key;
    use datatable::RowKey;
    use datatable::TableConfig;

    use super::*;

    #[test]
    fn test_fit_measures_cells() {
        assert_eq!(fit("ab", 4, Align::Start), "ab  ");
        assert_eq!(fit("ab", 4, Align::End), "  ab");
        assert_eq!(fit("ab", 5, Align::Center), " ab  ");
        assert_eq!(fit("abcdef", 4, Align::Start), "abc…");
        // Wide glyphs take two cells.
        assert_eq!(fit("日本語", 5, Align::Start), "日本…");
        assert_eq!(fit("مكتمل", 7, Align::Start).width(), 7);
    }

    struct Row {
        id: i64,
        label: &'static str,
    }

    fn sample(selection: SelectionMode) -> DataTable<Row> {
        let columns = vec![
            Column::new("id", "#").accessor(|r: &Row| r.id.into()).width(4),
            Column::new("label", "الاسم")
                .accessor(|r: &Row| r.label.into())
                .render(|value: &CellValue, row: &Row, _| {
                    if row.id == 3 {
                        panic!("renderer bug");
                    }
                    Ok(value.to_string())
                })
                .width(8),
        ];
        let config = TableConfig {
            selection,
            ..TableConfig::default()
        };
        let mut table = DataTable::new(columns, RowKey::column("id"), config);
        table.set_data(vec![
            Row { id: 1, label: "أحمد" },
            Row { id: 2, label: "سارة" },
            Row { id: 3, label: "خالد" },
        ]);
        table
    }

    #[test]
    fn test_table_output() {
        let mut data = sample(SelectionMode::Multi);
        data.toggle_row(Key::from(2));
        let text = guarded_table(&data);

        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("[-]"));
        assert!(lines[3].starts_with("[x]"));
        assert!(lines[3].contains("سارة"));
        // The panicking renderer only costs its own cell.
        assert!(lines[4].ends_with("-"));
        assert!(text.contains("عرض 1 إلى 3 من أصل 3 سجل"));
        assert!(text.contains("المحدد: 1"));
    }

    #[test]
    fn test_unselectable_table_has_no_marks() {
        let text = table(&sample(SelectionMode::None));
        assert!(!text.contains("[ ]"));
    }

    #[test]
    fn test_fallback_lists_retry_hint() {
        let failure = match ErrorBoundary::render(|| -> String { panic!("boom") }) {
            Boundary::Failed(failure) => failure,
            Boundary::Rendered(_) => unreachable!(),
        };
        let text = fallback(&failure);
        assert!(text.contains(datatable::BOUNDARY_TITLE));
        assert!(text.ends_with(&format!("{}\n", datatable::BOUNDARY_RETRY)));
    }

    #[test]
    fn test_pairs_align_keys() {
        let text = pairs(&[("a", "1".to_string()), ("long", "2".to_string())]);
        assert_eq!(text, "a     1\nlong  2\n");
    }
}
