//! The parsed upload handed from ingestion to the mapping stage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A preview cell, type-inferred where unambiguous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Null,
}

impl CellValue {
    /// Infers a value from a raw cell.
    ///
    /// Empty (after trimming) becomes `Null`; anything that parses as a
    /// finite number becomes `Number`; everything else stays text verbatim.
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Self::Number(n),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The cell rendered back to a display string.
    pub fn display(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Null => String::new(),
        }
    }
}

/// One preview row as field-name-to-value records.
pub type PreviewRow = BTreeMap<String, CellValue>;

/// A successfully ingested dataset.
///
/// Created wholesale by the ingestion pipeline and replaced wholesale on
/// re-upload; later stages only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDataset {
    /// Source file name as uploaded.
    pub name: String,
    /// Public storage URL returned by the upload service.
    pub url: String,
    /// Resolved column names, in dataset order.
    pub columns: Vec<String>,
    /// Whether the first raw row was a header row.
    pub has_headers: bool,
    /// Up to the first ten data rows.
    pub preview: Vec<PreviewRow>,
    /// The literal first data row, for display back to the user.
    pub first_row: Vec<String>,
    /// Upload size in bytes.
    pub size_bytes: u64,
    /// Sheet names, for multi-sheet spreadsheet sources only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheet_names: Option<Vec<String>>,
}

impl UploadedDataset {
    /// Position of `column` in the dataset's column order.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    /// Preview values of one column, in row order.
    pub fn preview_column<'a>(&'a self, column: &'a str) -> impl Iterator<Item = &'a CellValue> {
        self.preview.iter().filter_map(move |row| row.get(column))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_classifies_cells() {
        assert_eq!(CellValue::infer("42"), CellValue::Number(42.0));
        assert_eq!(CellValue::infer(" 3.5 "), CellValue::Number(3.5));
        assert_eq!(CellValue::infer("abc"), CellValue::Text("abc".to_string()));
        assert_eq!(CellValue::infer("  "), CellValue::Null);
        // NaN/inf spellings stay text rather than becoming non-finite numbers.
        assert_eq!(CellValue::infer("NaN"), CellValue::Text("NaN".to_string()));
    }

    #[test]
    fn untagged_serialization() {
        assert_eq!(serde_json::to_string(&CellValue::Number(1.5)).unwrap(), "1.5");
        assert_eq!(serde_json::to_string(&CellValue::Text("x".into())).unwrap(), "\"x\"");
        assert_eq!(serde_json::to_string(&CellValue::Null).unwrap(), "null");
    }

    #[test]
    fn preview_column_follows_row_order() {
        let dataset = UploadedDataset {
            name: "d.csv".to_string(),
            url: "https://files.example/d.csv".to_string(),
            columns: vec!["a".to_string()],
            has_headers: true,
            preview: vec![
                BTreeMap::from([("a".to_string(), CellValue::Number(1.0))]),
                BTreeMap::from([("a".to_string(), CellValue::Number(2.0))]),
            ],
            first_row: vec!["1".to_string()],
            size_bytes: 10,
            sheet_names: None,
        };
        let values: Vec<f64> = dataset
            .preview_column("a")
            .filter_map(CellValue::as_number)
            .collect();
        assert_eq!(values, vec![1.0, 2.0]);
        assert_eq!(dataset.column_index("a"), Some(0));
        assert_eq!(dataset.column_index("b"), None);
    }
}
