//! Column-mapping state and auto-suggestion.

use ras_model::{ColumnMapping, FieldKey, UploadedDataset};

use crate::error::MappingError;
use crate::patterns::keywords_for;

/// Whether suggestions have run for the current dataset.
///
/// An explicit one-shot transition: a fresh state is `Pending`, the first
/// call to [`MappingState::apply_suggestions`] moves it to `Applied`, and it
/// stays there until the dataset is replaced. User edits are therefore never
/// overwritten by a second suggestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SuggestionPhase {
    #[default]
    Pending,
    Applied,
}

/// Suggests a column for a field, scanning columns in dataset order.
///
/// The match is a case-insensitive substring check; the first matching
/// column wins, which makes ties deterministic by construction.
pub fn suggest_column<'a>(key: FieldKey, columns: &'a [String]) -> Option<&'a str> {
    let keywords = keywords_for(key);
    columns
        .iter()
        .find(|column| {
            let lowered = column.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword))
        })
        .map(String::as_str)
}

/// The mapping step's working state.
#[derive(Debug, Clone, Default)]
pub struct MappingState {
    mapping: ColumnMapping,
    phase: SuggestionPhase,
}

impl MappingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current bindings.
    pub fn mapping(&self) -> &ColumnMapping {
        &self.mapping
    }

    pub fn phase(&self) -> SuggestionPhase {
        self.phase
    }

    /// Discards all bindings and re-arms suggestion.
    ///
    /// Called when a new dataset replaces the old one.
    pub fn reset(&mut self) {
        self.mapping = ColumnMapping::default();
        self.phase = SuggestionPhase::Pending;
    }

    /// Runs the suggestion pass once per dataset.
    ///
    /// Returns the fields that received a suggestion. A second call is a
    /// no-op, as is a dataset without a header row (synthesized `Column N`
    /// names carry no signal worth matching).
    pub fn apply_suggestions(&mut self, dataset: &UploadedDataset) -> Vec<FieldKey> {
        if self.phase == SuggestionPhase::Applied {
            return Vec::new();
        }
        self.phase = SuggestionPhase::Applied;

        if !dataset.has_headers {
            tracing::debug!("dataset has no headers, skipping suggestions");
            return Vec::new();
        }

        let mut suggested = Vec::new();
        for key in FieldKey::ALL {
            if !self.mapping.get(key).is_empty() {
                continue;
            }
            if let Some(column) = suggest_column(key, &dataset.columns) {
                self.mapping.set(key, column);
                suggested.push(key);
            }
        }
        tracing::debug!(count = suggested.len(), "applied column suggestions");
        suggested
    }

    /// Binds a field to a dataset column.
    ///
    /// An empty column name clears the binding; anything else must name an
    /// existing column.
    pub fn set_field(
        &mut self,
        dataset: &UploadedDataset,
        key: FieldKey,
        column: &str,
    ) -> Result<(), MappingError> {
        if !column.is_empty() && dataset.column_index(column).is_none() {
            return Err(MappingError::UnknownColumn {
                column: column.to_string(),
            });
        }
        self.mapping.set(key, column);
        Ok(())
    }

    /// Clears a field's binding.
    pub fn clear_field(&mut self, key: FieldKey) {
        self.mapping.clear(key);
    }

    /// True when every required field is bound.
    pub fn is_complete(&self) -> bool {
        self.mapping.is_complete()
    }
}
