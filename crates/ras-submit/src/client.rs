//! HTTP client for the upload and analysis services.

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SubmitError};
use crate::request::AnalyseRequest;
use crate::response::AnalysisResponse;

/// Upload size limit accepted by the storage service.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("resilience-analysis-studio/", env!("CARGO_PKG_VERSION"));

/// Response of the file upload call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileUploadResponse {
    /// Publicly retrievable URL, used as `file_url` downstream.
    pub url: String,
    /// Storage path within the bucket.
    pub path: String,
}

/// Client for the upload and analyse endpoints.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: String,
}

impl AnalysisClient {
    /// Creates a client for the service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| SubmitError::AnalysisTransport {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Uploads a file, returning its public URL.
    ///
    /// The size gate runs before any bytes leave the machine.
    pub async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<FileUploadResponse> {
        let size = bytes.len() as u64;
        if size > MAX_UPLOAD_BYTES {
            return Err(SubmitError::FileTooLarge {
                size,
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let url = format!("{}/api/upload", self.base_url);
        tracing::debug!(file_name, size, "uploading file");

        let response = self
            .client
            .post(&url)
            .query(&[("filename", file_name)])
            .body(bytes)
            .send()
            .await
            .map_err(|e| SubmitError::UploadTransport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::UploadTransport {
                message: format!("upload service returned {status}"),
            });
        }

        response
            .json::<FileUploadResponse>()
            .await
            .map_err(|e| SubmitError::InvalidResponse {
                message: e.to_string(),
            })
    }

    /// Issues the analyse call.
    ///
    /// Transport problems become [`SubmitError::AnalysisTransport`]; a
    /// well-formed envelope is returned as-is, including `success: false`
    /// (see [`AnalysisResponse::into_result`]).
    pub async fn analyse(&self, request: &AnalyseRequest) -> Result<AnalysisResponse> {
        let url = format!("{}/api/analyse", self.base_url);
        tracing::debug!(file_url = %request.file_url, "requesting analysis");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| SubmitError::AnalysisTransport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::AnalysisTransport {
                message: format!("analysis service returned {status}"),
            });
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| SubmitError::InvalidResponse {
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = AnalysisClient::new("https://api.example/").unwrap();
        assert_eq!(client.base_url, "https://api.example");
    }

    #[tokio::test]
    async fn oversized_upload_fails_before_the_network() {
        let client = AnalysisClient::new("http://127.0.0.1:1").unwrap();
        let bytes = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
        let err = client.upload("big.csv", bytes).await.unwrap_err();
        assert!(matches!(err, SubmitError::FileTooLarge { .. }));
        assert!(!err.is_retryable());
    }
}
