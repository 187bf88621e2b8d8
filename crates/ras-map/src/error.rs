//! Error types for mapping operations.

use thiserror::Error;

/// Errors from explicit mapping edits.
///
/// Incompleteness is not an error: unmapped required fields only keep the
/// step from completing and are reported through the wizard's blockers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MappingError {
    /// The chosen column does not exist in the dataset.
    #[error("column '{column}' not found in dataset")]
    UnknownColumn { column: String },
}
