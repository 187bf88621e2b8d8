//! Error types for submission operations.

use thiserror::Error;

/// Errors from the upload and analyse calls.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SubmitError {
    /// The file upload request failed in transit.
    #[error("upload failed: {message}")]
    UploadTransport { message: String },

    /// The analyse request failed in transit.
    #[error("analysis request failed: {message}")]
    AnalysisTransport { message: String },

    /// The upload exceeds the service's size limit.
    #[error("file is {size} bytes, limit is {limit}")]
    FileTooLarge { size: u64, limit: u64 },

    /// The service answered with something other than the expected contract.
    #[error("unexpected response: {message}")]
    InvalidResponse { message: String },

    /// The service processed the request and reported failure.
    #[error("analysis failed: {message}")]
    ServiceFailure { message: String },

    /// The request payload could not be encoded.
    #[error("failed to encode request: {message}")]
    Encode { message: String },
}

impl SubmitError {
    /// Whether re-issuing the same request is worth offering.
    ///
    /// The results boundary offers retry for transport glitches and for
    /// service-side failures; local problems (size, encoding) need a
    /// different fix first.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::UploadTransport { .. }
                | Self::AnalysisTransport { .. }
                | Self::ServiceFailure { .. }
        )
    }

    /// A short message suitable for display.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::UploadTransport { .. } => {
                "Upload failed. Please check your connection and try again.".to_string()
            }
            Self::AnalysisTransport { .. } => {
                "Could not reach the analysis service. Please try again.".to_string()
            }
            Self::FileTooLarge { limit, .. } => {
                format!("File size must be less than {} MB.", limit / (1024 * 1024))
            }
            Self::InvalidResponse { .. } => {
                "The analysis service returned an unexpected response.".to_string()
            }
            Self::ServiceFailure { message } => format!("Analysis failed: {message}"),
            Self::Encode { .. } => "Could not prepare the analysis request.".to_string(),
        }
    }
}

/// Result type for submission operations.
pub type Result<T> = std::result::Result<T, SubmitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_service_failures_are_retryable() {
        assert!(
            SubmitError::AnalysisTransport {
                message: "timeout".to_string()
            }
            .is_retryable()
        );
        assert!(
            SubmitError::ServiceFailure {
                message: "too few complete subjects".to_string()
            }
            .is_retryable()
        );
        assert!(
            !SubmitError::FileTooLarge {
                size: 1,
                limit: 0
            }
            .is_retryable()
        );
    }
}
