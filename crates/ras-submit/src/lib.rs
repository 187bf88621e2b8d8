//! Analysis submission for the resilience analysis workflow.
//!
//! Everything downstream of the wizard's final gate lives here:
//!
//! - **Builder** (`builder`): gate-checked assembly of the analyse payload
//! - **Contract** (`request`, `response`): the service's wire types
//! - **Client** (`client`): async upload and analyse calls
//! - **Cache** (`cache`): keyed response caching with supersede semantics
//!
//! # Error handling
//!
//! Transport and service failures are [`SubmitError`]s carrying a
//! [`SubmitError::is_retryable`] classification for the results boundary;
//! incomplete session state never errors, it comes back as the wizard's
//! blocker values from [`SubmissionInputs::gather`].

mod builder;
mod cache;
mod client;
mod error;
mod request;
mod response;

pub use builder::SubmissionInputs;
pub use cache::{AnalysisService, Completion, Dispatch, RequestKey};
pub use client::{AnalysisClient, FileUploadResponse, MAX_UPLOAD_BYTES};
pub use error::{Result, SubmitError};
pub use request::{AnalyseRequest, RequestSettings};
pub use response::{
    AnalysisData, AnalysisResponse, AnalysisSummary, ClassificationCounts, SubjectResult,
};
