//! The ingestion pipeline entry points.
//!
//! Turns raw upload bytes into an [`UploadedDataset`]: extension dispatch,
//! optional sheet extraction, delimited parsing with header resolution, and
//! preview assembly. Any failure returns before a dataset is produced, so
//! callers never observe a partially replaced upload.

use std::path::Path;

use ras_model::UploadedDataset;

use crate::delimited::parse_delimited;
use crate::error::{IngestError, Result};
use crate::header::HeaderDetector;
use crate::workbook::Workbook;

/// Upload size limit shared with the storage service.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// Extensions the pipeline accepts.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "xls"];

/// Knobs for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    /// Sheet to extract from a multi-sheet workbook.
    pub sheet: Option<String>,
    /// Explicit header decision; overrides the heuristic when set.
    pub header_override: Option<bool>,
    /// Header detector configuration.
    pub detector: HeaderDetector,
    /// Upload size limit in bytes.
    pub max_size: u64,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            sheet: None,
            header_override: None,
            detector: HeaderDetector::default(),
            max_size: MAX_UPLOAD_BYTES,
        }
    }
}

/// Lowercased extension of an upload name.
fn extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_lowercase()
}

/// Enumerates the sheet names of a workbook upload.
///
/// Used by the upload step to prompt for a selection before conversion.
pub fn list_sheets(name: &str, bytes: Vec<u8>) -> Result<Vec<String>> {
    Ok(Workbook::open(name, bytes)?.sheet_names())
}

/// Ingests one upload into a dataset.
///
/// `url` is the storage reference returned by the upload service; it is
/// carried through untouched.
pub fn ingest_upload(
    name: &str,
    url: &str,
    bytes: &[u8],
    options: &IngestOptions,
) -> Result<UploadedDataset> {
    let size = bytes.len() as u64;
    if size > options.max_size {
        return Err(IngestError::FileTooLarge {
            size,
            limit: options.max_size,
        });
    }

    let ext = extension(name);
    let (text, sheet_names) = match ext.as_str() {
        "csv" => {
            let text = String::from_utf8(bytes.to_vec()).map_err(|e| IngestError::Parse {
                name: name.to_string(),
                message: e.to_string(),
            })?;
            (text, None)
        }
        "xlsx" | "xls" => {
            let mut workbook = Workbook::open(name, bytes.to_vec())?;
            let names = workbook.sheet_names();
            let selected = match (&options.sheet, names.len()) {
                (Some(sheet), _) => sheet.clone(),
                (None, 1) => names[0].clone(),
                (None, 0) => {
                    return Err(IngestError::EmptyDataset {
                        name: name.to_string(),
                    });
                }
                (None, available) => {
                    return Err(IngestError::SheetSelectionRequired { available });
                }
            };
            let text = workbook.sheet_to_csv(&selected)?;
            // Only multi-sheet sources carry the sheet list forward.
            let sheet_names = (names.len() > 1).then_some(names);
            (text, sheet_names)
        }
        _ => {
            return Err(IngestError::UnsupportedFormat { extension: ext });
        }
    };

    let table = parse_delimited(name, &text, options.header_override, &options.detector)?;
    tracing::info!(
        name,
        columns = table.columns.len(),
        rows = table.preview.len(),
        has_headers = table.has_headers,
        "ingested upload"
    );

    Ok(UploadedDataset {
        name: name.to_string(),
        url: url.to_string(),
        columns: table.columns,
        has_headers: table.has_headers,
        preview: table.preview,
        first_row: table.first_row,
        size_bytes: size,
        sheet_names,
    })
}

/// Reads an upload from disk and ingests it.
pub fn ingest_file(path: &Path, url: &str, options: &IngestOptions) -> Result<UploadedDataset> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let bytes = std::fs::read(path).map_err(|e| IngestError::Read {
        name: name.clone(),
        source: e,
    })?;
    ingest_upload(&name, url, &bytes, options)
}
