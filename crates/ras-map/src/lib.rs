//! Column-mapping suggestions and ethnicity canonicalization.
//!
//! Two stages of the workflow live here:
//!
//! - **Resolver** (`resolver`): keyword-driven suggestions binding dataset
//!   columns to canonical fields, applied exactly once per dataset
//! - **Ethnicity** (`ethnicity`): canonicalization of the raw ethnicity
//!   values observed in the preview onto the two target taxonomies

mod error;
mod ethnicity;
mod patterns;
mod resolver;

pub use error::MappingError;
pub use ethnicity::{EthnicityEntry, EthnicityState, distinct_ethnicities};
pub use patterns::keywords_for;
pub use resolver::{MappingState, SuggestionPhase, suggest_column};
