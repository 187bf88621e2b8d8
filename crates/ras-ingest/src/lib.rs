//! Upload ingestion for the resilience analysis workflow.
//!
//! Turns a raw uploaded file into the canonical [`ras_model::UploadedDataset`]
//! the mapping stage consumes:
//!
//! - **Dispatch**: `.csv` goes straight to the delimited path; `.xlsx`/`.xls`
//!   workbooks first enumerate sheets, and the selected sheet is serialized
//!   to comma-separated text feeding the same path
//! - **Header detection**: a first-row heuristic with an explicit user
//!   override (`header`)
//! - **Preview**: bounded, type-inferred rows plus the literal first data row
//!   (`delimited`)
//!
//! # Example
//!
//! ```ignore
//! use ras_ingest::{IngestOptions, ingest_upload};
//!
//! let dataset = ingest_upload("cohort.csv", &url, &bytes, &IngestOptions::default())?;
//! assert!(!dataset.columns.is_empty());
//! ```

mod delimited;
mod error;
mod header;
mod pipeline;
mod workbook;

pub use delimited::{PREVIEW_ROWS, ParsedTable, parse_delimited};
pub use error::{IngestError, Result};
pub use header::{BOOLEAN_TOKENS, HeaderDetector};
pub use pipeline::{
    ACCEPTED_EXTENSIONS, IngestOptions, MAX_UPLOAD_BYTES, ingest_file, ingest_upload, list_sheets,
};
pub use workbook::Workbook;
