//! Error types for upload ingestion.

use thiserror::Error;

/// Errors that can occur while turning an upload into a dataset.
///
/// Every failure aborts the pipeline before any dataset state is replaced,
/// so a failed re-upload leaves the previously ingested dataset intact.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    /// File extension is not one of the accepted formats.
    #[error("unsupported file format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// Upload exceeds the size limit.
    #[error("file is {size} bytes, limit is {limit}")]
    FileTooLarge { size: u64, limit: u64 },

    /// Parsing produced no data rows.
    #[error("no data found in {name}")]
    EmptyDataset { name: String },

    /// Parsing resolved zero columns.
    #[error("no columns found in {name}")]
    NoColumnsFound { name: String },

    /// The selected sheet is not in the workbook.
    #[error("sheet '{sheet}' not found in workbook")]
    SheetNotFound { sheet: String },

    /// The workbook has several sheets and none was selected.
    #[error("workbook has {available} sheets, a sheet selection is required")]
    SheetSelectionRequired { available: usize },

    /// Delimited-text parsing failed.
    #[error("failed to parse {name}: {message}")]
    Parse { name: String, message: String },

    /// The spreadsheet container could not be read.
    #[error("invalid workbook {name}: {message}")]
    WorkbookInvalid { name: String, message: String },

    /// The upload could not be read from disk.
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    /// A short message suitable for display in the upload step.
    pub fn user_message(&self) -> String {
        match self {
            Self::UnsupportedFormat { .. } => {
                "Please upload a CSV or Excel file (.csv, .xlsx, .xls).".to_string()
            }
            Self::FileTooLarge { limit, .. } => {
                format!("File size must be less than {} MB.", limit / (1024 * 1024))
            }
            Self::EmptyDataset { .. } => "No data found in the file.".to_string(),
            Self::NoColumnsFound { .. } => "No columns found in the file.".to_string(),
            Self::SheetNotFound { sheet } => {
                format!("The workbook has no sheet named '{sheet}'.")
            }
            Self::SheetSelectionRequired { .. } => {
                "Please choose which sheet to import.".to_string()
            }
            Self::Parse { message, .. } => format!("Could not parse the file: {message}"),
            Self::WorkbookInvalid { .. } => {
                "Could not read the workbook. Converting it to .xlsx or .csv may help.".to_string()
            }
            Self::Read { .. } => "Could not read the file.".to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_context() {
        let err = IngestError::SheetNotFound {
            sheet: "Cohort B".to_string(),
        };
        assert_eq!(err.to_string(), "sheet 'Cohort B' not found in workbook");
    }

    #[test]
    fn size_limit_message_is_in_megabytes() {
        let err = IngestError::FileTooLarge {
            size: 60 * 1024 * 1024,
            limit: 50 * 1024 * 1024,
        };
        assert_eq!(err.user_message(), "File size must be less than 50 MB.");
    }
}
