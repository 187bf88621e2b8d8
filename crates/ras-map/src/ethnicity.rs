//! Ethnicity canonicalization.
//!
//! When the mapping binds an ethnicity column, the distinct raw values seen
//! in the preview each need a home in both target taxonomies before the
//! workflow can move on. When no ethnicity column is bound this stage has
//! nothing to do and reports itself complete.

use ras_model::{
    AscvdGroup, ColumnMapping, EthnicityAssignment, EthnicityDefaults, MesaGroup, UploadedDataset,
};

/// One raw value with its canonical assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct EthnicityEntry {
    pub raw: String,
    pub assignment: EthnicityAssignment,
}

/// Distinct trimmed non-empty ethnicity values from the preview.
///
/// First-seen order is preserved so the grid renders deterministically.
pub fn distinct_ethnicities(dataset: &UploadedDataset, column: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for value in dataset.preview_column(column) {
        let text = value.display();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !seen.iter().any(|s: &String| s == trimmed) {
            seen.push(trimmed.to_string());
        }
    }
    seen
}

/// The ethnicity step's working state.
#[derive(Debug, Clone)]
pub struct EthnicityState {
    entries: Vec<EthnicityEntry>,
    defaults: EthnicityDefaults,
}

impl Default for EthnicityState {
    fn default() -> Self {
        Self::new(EthnicityDefaults::default())
    }
}

impl EthnicityState {
    pub fn new(defaults: EthnicityDefaults) -> Self {
        Self {
            entries: Vec::new(),
            defaults,
        }
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[EthnicityEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up one raw value's assignment.
    pub fn assignment_for(&self, raw: &str) -> Option<EthnicityAssignment> {
        self.entries
            .iter()
            .find(|e| e.raw == raw)
            .map(|e| e.assignment)
    }

    /// Reconciles the entry list with the currently observed values.
    ///
    /// Keeps existing assignments for values still present, drops values no
    /// longer observed, and gives newly observed values the default
    /// assignment. Entry order follows `values`.
    pub fn sync_with_values(&mut self, values: &[String]) {
        let defaults = self.defaults.assignment();
        let previous = std::mem::take(&mut self.entries);
        self.entries = values
            .iter()
            .map(|raw| {
                previous
                    .iter()
                    .find(|e| &e.raw == raw)
                    .cloned()
                    .unwrap_or_else(|| EthnicityEntry {
                        raw: raw.clone(),
                        assignment: defaults,
                    })
            })
            .collect();
    }

    /// Re-derives the entry list from the dataset and mapping.
    ///
    /// With no ethnicity column bound the list empties, which is the
    /// "nothing to map" complete state.
    pub fn sync_with_dataset(&mut self, dataset: &UploadedDataset, mapping: &ColumnMapping) {
        if !mapping.has_ethnicity() {
            self.entries.clear();
            return;
        }
        let values = distinct_ethnicities(dataset, &mapping.ethnicity);
        tracing::debug!(distinct = values.len(), "observed ethnicity values");
        self.sync_with_values(&values);
    }

    /// Replaces one value's ASCVD group. Returns false for unknown values.
    pub fn assign_ascvd(&mut self, raw: &str, group: AscvdGroup) -> bool {
        match self.entries.iter_mut().find(|e| e.raw == raw) {
            Some(entry) => {
                entry.assignment.ascvd = group;
                true
            }
            None => false,
        }
    }

    /// Replaces one value's MESA group. Returns false for unknown values.
    pub fn assign_mesa(&mut self, raw: &str, group: MesaGroup) -> bool {
        match self.entries.iter_mut().find(|e| e.raw == raw) {
            Some(entry) => {
                entry.assignment.mesa = group;
                true
            }
            None => false,
        }
    }

    /// True when every observed value has both target groups.
    ///
    /// Defaults count as set, so a freshly synced state is complete; the
    /// empty state (no ethnicity column) is trivially complete.
    pub fn is_complete(&self) -> bool {
        true
    }

    /// Clears all entries, e.g. when the dataset is replaced.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}
