//! Header-row detection.
//!
//! Uploads arrive without any declaration of whether their first row is a
//! header. The detector classifies each first-row cell as header-like or
//! data-like and calls the row a header when header-like cells dominate.
//! An explicit user override always wins over the heuristic.

/// Tokens that read as data values even though they are alphabetic.
pub const BOOLEAN_TOKENS: [&str; 8] = ["yes", "no", "true", "false", "male", "female", "m", "f"];

/// First-row header detector.
///
/// The fraction cutoff and token list are tuned defaults, not requirements;
/// both are adjustable per deployment.
#[derive(Debug, Clone)]
pub struct HeaderDetector {
    /// A row is a header when the header-like fraction strictly exceeds this.
    pub min_header_fraction: f64,
    /// Lowercased tokens excluded from the header-like class.
    pub boolean_tokens: Vec<String>,
}

impl Default for HeaderDetector {
    fn default() -> Self {
        Self {
            min_header_fraction: 0.5,
            boolean_tokens: BOOLEAN_TOKENS.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

impl HeaderDetector {
    /// Decides whether `first_row` is a header row.
    ///
    /// Pure function of the row: identical input always yields the same
    /// answer. An empty row is never a header.
    pub fn detect(&self, first_row: &[String]) -> bool {
        if first_row.is_empty() {
            return false;
        }
        let header_like = first_row
            .iter()
            .filter(|cell| self.is_header_like(cell))
            .count();
        let fraction = header_like as f64 / first_row.len() as f64;
        tracing::debug!(
            header_like,
            total = first_row.len(),
            fraction,
            "header detection"
        );
        fraction > self.min_header_fraction
    }

    /// Classifies a single cell.
    pub fn is_header_like(&self, cell: &str) -> bool {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return false;
        }
        if trimmed.parse::<f64>().is_ok() {
            return false;
        }
        let lowered = trimmed.to_lowercase();
        if self.boolean_tokens.iter().any(|t| *t == lowered) {
            return false;
        }
        trimmed.contains('_') || is_camel_case(trimmed) || is_alphabetic_phrase(trimmed)
    }
}

/// True for mixed-case identifiers such as `totalChol` or `SubjectId`.
fn is_camel_case(value: &str) -> bool {
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    has_lower && has_upper
}

/// True for alphabetic words or space-separated phrases longer than one char.
fn is_alphabetic_phrase(value: &str) -> bool {
    value.chars().count() > 1
        && value.chars().any(|c| c.is_ascii_alphabetic())
        && value
            .chars()
            .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
}
