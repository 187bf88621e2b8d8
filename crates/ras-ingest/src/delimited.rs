//! Delimited-text parsing.
//!
//! Both upload paths end here: CSV uploads directly, spreadsheet sheets
//! after serialization to comma-separated text. Parsing is two-pass: a first
//! pass reads raw rows for header detection, a second pass re-reads with the
//! resolved header decision to build the dataset preview.

use csv::ReaderBuilder;

use ras_model::{CellValue, PreviewRow};

use crate::error::{IngestError, Result};
use crate::header::HeaderDetector;

/// Maximum number of data rows kept in the preview.
pub const PREVIEW_ROWS: usize = 10;

/// Output of the delimited-text path.
#[derive(Debug, Clone)]
pub struct ParsedTable {
    /// Resolved column names, in source order.
    pub columns: Vec<String>,
    /// Whether the first raw row was consumed as a header.
    pub has_headers: bool,
    /// Up to [`PREVIEW_ROWS`] data rows, type-inferred.
    pub preview: Vec<PreviewRow>,
    /// The first data row, verbatim.
    pub first_row: Vec<String>,
}

/// Parses delimited text into a bounded preview table.
///
/// `header_override`, when present, takes precedence over the detection
/// heuristic. `name` only labels errors.
pub fn parse_delimited(
    name: &str,
    text: &str,
    header_override: Option<bool>,
    detector: &HeaderDetector,
) -> Result<ParsedTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // Pass 1: raw rows, no header assumption, enough for detection plus a
    // full preview.
    let raw_rows = read_rows(name, text, PREVIEW_ROWS + 1)?;
    let Some(first_raw) = raw_rows.first() else {
        return Err(IngestError::EmptyDataset {
            name: name.to_string(),
        });
    };

    let has_headers = match header_override {
        Some(flag) => flag,
        None => detector.detect(first_raw),
    };
    tracing::debug!(name, has_headers, overridden = header_override.is_some(), "resolved header decision");

    let columns: Vec<String> = if has_headers {
        first_raw.iter().map(|cell| cell.trim().to_string()).collect()
    } else {
        (1..=first_raw.len()).map(|i| format!("Column {i}")).collect()
    };
    if columns.is_empty() || columns.iter().all(String::is_empty) {
        return Err(IngestError::NoColumnsFound {
            name: name.to_string(),
        });
    }

    // Pass 2: re-read with the resolved decision.
    let data_rows = if has_headers {
        let mut rows = read_rows(name, text, PREVIEW_ROWS + 1)?;
        rows.remove(0);
        rows
    } else {
        raw_rows
    };
    if data_rows.is_empty() {
        return Err(IngestError::EmptyDataset {
            name: name.to_string(),
        });
    }

    let first_row = data_rows[0].clone();
    let preview = data_rows
        .into_iter()
        .take(PREVIEW_ROWS)
        .map(|row| build_preview_row(&columns, &row))
        .collect();

    Ok(ParsedTable {
        columns,
        has_headers,
        preview,
        first_row,
    })
}

/// Reads up to `limit` raw records.
fn read_rows(name: &str, text: &str, limit: usize) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records().take(limit) {
        let record = record.map_err(|e| IngestError::Parse {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        // csv already skips fully empty lines; guard against whitespace rows.
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Zips one raw row onto the resolved columns, inferring cell types.
///
/// Short rows pad with `Null`; surplus cells beyond the column count are
/// dropped.
fn build_preview_row(columns: &[String], row: &[String]) -> PreviewRow {
    columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            let value = row.get(idx).map_or(CellValue::Null, |raw| CellValue::infer(raw));
            (column.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<ParsedTable> {
        parse_delimited("test.csv", text, None, &HeaderDetector::default())
    }

    #[test]
    fn header_row_becomes_columns() {
        let table = parse("cacs,age,gender\n120,54,male\n0,61,female\n").unwrap();
        assert!(table.has_headers);
        assert_eq!(table.columns, vec!["cacs", "age", "gender"]);
        assert_eq!(table.preview.len(), 2);
        assert_eq!(table.first_row, vec!["120", "54", "male"]);
        assert_eq!(table.preview[0]["age"], CellValue::Number(54.0));
        assert_eq!(
            table.preview[0]["gender"],
            CellValue::Text("male".to_string())
        );
    }

    #[test]
    fn headerless_input_synthesizes_column_names() {
        let table = parse("120,54,male\n0,61,female\n").unwrap();
        assert!(!table.has_headers);
        assert_eq!(table.columns, vec!["Column 1", "Column 2", "Column 3"]);
        // The original first row is the first preview row, verbatim.
        assert_eq!(table.first_row, vec!["120", "54", "male"]);
        assert_eq!(table.preview[0]["Column 1"], CellValue::Number(120.0));
        assert_eq!(table.preview.len(), 2);
    }

    #[test]
    fn override_beats_heuristic() {
        // Looks like data, but the user says it is a header.
        let table = parse_delimited(
            "t.csv",
            "120,54,male\n0,61,female\n",
            Some(true),
            &HeaderDetector::default(),
        )
        .unwrap();
        assert!(table.has_headers);
        assert_eq!(table.columns, vec!["120", "54", "male"]);
        assert_eq!(table.preview.len(), 1);
    }

    #[test]
    fn preview_is_bounded() {
        let mut text = String::from("value\n");
        for i in 0..25 {
            text.push_str(&format!("{i}\n"));
        }
        let table = parse(&text).unwrap();
        assert_eq!(table.preview.len(), PREVIEW_ROWS);
    }

    #[test]
    fn quoted_fields_and_embedded_commas() {
        let table = parse("name,notes\nalice,\"likes, commas\"\n").unwrap();
        assert_eq!(
            table.preview[0]["notes"],
            CellValue::Text("likes, commas".to_string())
        );
    }

    #[test]
    fn empty_input_is_empty_dataset() {
        assert!(matches!(parse(""), Err(IngestError::EmptyDataset { .. })));
        assert!(matches!(parse("\n\n"), Err(IngestError::EmptyDataset { .. })));
    }

    #[test]
    fn header_only_input_is_empty_dataset() {
        assert!(matches!(
            parse("cacs,age,gender\n"),
            Err(IngestError::EmptyDataset { .. })
        ));
    }

    #[test]
    fn short_rows_pad_with_null() {
        let table = parse("cacs,age,gender\n120,54\n").unwrap();
        assert_eq!(table.preview[0]["gender"], CellValue::Null);
    }

    #[test]
    fn bom_is_stripped() {
        let table = parse("\u{feff}cacs,age\n1,2\n").unwrap();
        assert_eq!(table.columns[0], "cacs");
    }
}
