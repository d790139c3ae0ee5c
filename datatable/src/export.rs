//! CSV and JSON export

use std::io::Write;

use chrono::NaiveDate;
use serde::Serialize;

use crate::CellValue;
use crate::Column;
use crate::ExportError;

/// UTF-8 byte order mark. Spreadsheet tools need it to detect UTF-8 and
/// show Arabic text correctly.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes `rows` as CSV: a BOM, a header of column titles, then one line
/// per row.
///
/// Cells hold the raw column values, not rendered text: nulls and columns
/// without an accessor are empty, structured values are JSON. Fields are
/// quoted only when they contain a comma, quote or line break, with
/// quotes doubled. Lines end with `\n`.
pub fn export_csv<'a, T, W, I>(mut writer: W, columns: &[Column<T>], rows: I) -> Result<(), ExportError>
where
    T: 'a,
    W: Write,
    I: IntoIterator<Item = &'a T>,
{
    writer.write_all(UTF8_BOM)?;

    let mut csv = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(columns.iter().map(|c| c.title.as_str()))?;

    let mut count = 0;
    for row in rows {
        csv.write_record(columns.iter().map(|column| export_cell(&column.value_guarded(row))))?;
        count += 1;
    }
    csv.flush()?;

    log::debug!("exported {} rows as CSV", count);
    Ok(())
}

fn export_cell(value: &CellValue) -> String {
    match value {
        CellValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Writes `rows` as a pretty-printed JSON array.
pub fn export_json<'a, T, W, I>(writer: W, rows: I) -> Result<(), ExportError>
where
    T: Serialize + 'a,
    W: Write,
    I: IntoIterator<Item = &'a T>,
{
    let rows: Vec<&T> = rows.into_iter().collect();
    serde_json::to_writer_pretty(writer, &rows)?;
    log::debug!("exported {} rows as JSON", rows.len());
    Ok(())
}

/// `base_YYYY-MM-DD.ext`
pub fn export_filename(base: &str, extension: &str, date: NaiveDate) -> String {
    format!("{}_{}.{}", base, date.format("%Y-%m-%d"), extension)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use serde_json::json;

    use super::*;

    fn columns() -> Vec<Column<Value>> {
        vec![
            Column::field("name", "الاسم"),
            Column::field("note", "ملاحظة"),
            Column::field("items", "Items"),
            Column::new("actions", "Actions"),
        ]
    }

    #[test]
    fn test_csv_layout_and_quoting() {
        let rows = vec![
            json!({"name": "Ali", "note": "a, b", "items": [1, 2]}),
            json!({"name": "Sara \"S\"", "note": null, "items": 3}),
        ];
        let mut out = Vec::new();
        export_csv(&mut out, &columns(), &rows).unwrap();

        assert!(out.starts_with(UTF8_BOM));
        let text = String::from_utf8(out[UTF8_BOM.len()..].to_vec()).unwrap();
        assert_eq!(
            text,
            "الاسم,ملاحظة,Items,Actions\nAli,\"a, b\",\"[1,2]\",\n\"Sara \"\"S\"\"\",,3,\n"
        );
    }

    #[test]
    fn test_json_export() {
        let rows = vec![json!({"a": 1})];
        let mut out = Vec::new();
        export_json(&mut out, &rows).unwrap();
        let back: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(back, json!([{"a": 1}]));
    }

    #[test]
    fn test_filename() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(export_filename("work_orders", "csv", date), "work_orders_2025-03-09.csv");
    }
}
