//! Keyed caching of analysis responses.
//!
//! A response is cached under `(file_url, settings fingerprint)`. Asking
//! for a key that already has a response must not trigger another network
//! round-trip; any change to mapping or settings produces a new key. There
//! is no cancellation: a completion arriving for a key that is no longer
//! the latest one requested is simply discarded.

use std::collections::HashMap;

use sha2::{Digest, Sha256};

use crate::error::{Result, SubmitError};
use crate::request::AnalyseRequest;
use crate::response::AnalysisResponse;

/// Identity of one analysis request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestKey {
    pub file_url: String,
    /// SHA-256 over the serialized request body, hex-encoded.
    pub fingerprint: String,
}

impl RequestKey {
    /// Derives the key for a request.
    pub fn for_request(request: &AnalyseRequest) -> Result<Self> {
        let bytes = serde_json::to_vec(request).map_err(|e| SubmitError::Encode {
            message: e.to_string(),
        })?;
        let digest = Sha256::digest(&bytes);
        Ok(Self {
            file_url: request.file_url.clone(),
            fingerprint: hex::encode(digest),
        })
    }
}

/// What to do about a request, given the cache.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// A response for this exact key is already cached.
    Cached(AnalysisResponse),
    /// No cached response; the caller should issue the network call and
    /// feed the outcome back through [`AnalysisService::complete`].
    Fetch(RequestKey),
}

/// Outcome of feeding a completion back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Stored and now served from cache.
    Stored,
    /// A newer request key superseded this one; the response was dropped.
    Superseded,
}

/// Session-local analysis dispatcher.
///
/// Single-writer, like the rest of the session state: `begin` and
/// `complete` are called from discrete UI and completion events, never
/// concurrently.
#[derive(Debug, Default)]
pub struct AnalysisService {
    cache: HashMap<RequestKey, AnalysisResponse>,
    latest: Option<RequestKey>,
}

impl AnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or short-circuits) a request.
    ///
    /// Records the key as the latest one in flight when a fetch is needed.
    pub fn begin(&mut self, request: &AnalyseRequest) -> Result<Dispatch> {
        let key = RequestKey::for_request(request)?;
        if let Some(response) = self.cache.get(&key) {
            tracing::debug!(file_url = %key.file_url, "analysis served from cache");
            return Ok(Dispatch::Cached(response.clone()));
        }
        self.latest = Some(key.clone());
        Ok(Dispatch::Fetch(key))
    }

    /// Feeds a finished network call back in.
    ///
    /// Late completions for superseded keys are dropped so an old request
    /// can never overwrite the response of a newer one.
    pub fn complete(&mut self, key: RequestKey, response: AnalysisResponse) -> Completion {
        if self.latest.as_ref() != Some(&key) {
            tracing::debug!(file_url = %key.file_url, "dropping superseded analysis response");
            return Completion::Superseded;
        }
        self.cache.insert(key, response);
        Completion::Stored
    }

    /// Cached response for a key, if any.
    pub fn cached(&self, key: &RequestKey) -> Option<&AnalysisResponse> {
        self.cache.get(key)
    }

    /// Number of cached responses.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use ras_model::{
        CholesterolUnit, ColumnMapping, PercentileThresholds, RiskRegion, RiskScore,
    };

    use crate::request::RequestSettings;

    use super::*;

    fn request(url: &str, min_scores: u8) -> AnalyseRequest {
        AnalyseRequest {
            file_url: url.to_string(),
            column_mappings: ColumnMapping::default(),
            cholesterol_unit: CholesterolUnit::MmolPerL,
            settings: RequestSettings {
                risk_scores: vec![RiskScore::Frs],
                risk_region: RiskRegion::Low,
                ethnicity_mappings: BTreeMap::new(),
                percentile_thresholds: PercentileThresholds::default(),
                min_scores,
            },
        }
    }

    fn ok_response() -> AnalysisResponse {
        AnalysisResponse {
            success: true,
            data: None,
            error: None,
        }
    }

    #[test]
    fn identical_requests_share_a_key() {
        let a = RequestKey::for_request(&request("u", 1)).unwrap();
        let b = RequestKey::for_request(&request("u", 1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn settings_changes_produce_new_keys() {
        let a = RequestKey::for_request(&request("u", 1)).unwrap();
        let b = RequestKey::for_request(&request("u", 2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn cached_key_skips_the_fetch() {
        let mut service = AnalysisService::new();
        let req = request("u", 1);

        let Dispatch::Fetch(key) = service.begin(&req).unwrap() else {
            panic!("first request must fetch");
        };
        assert_eq!(service.complete(key, ok_response()), Completion::Stored);

        match service.begin(&req).unwrap() {
            Dispatch::Cached(response) => assert!(response.success),
            Dispatch::Fetch(_) => panic!("second identical request must hit the cache"),
        }
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn superseded_completion_is_dropped() {
        let mut service = AnalysisService::new();

        let Dispatch::Fetch(old_key) = service.begin(&request("u", 1)).unwrap() else {
            panic!("must fetch");
        };
        // The user changed settings before the first call finished.
        let Dispatch::Fetch(new_key) = service.begin(&request("u", 2)).unwrap() else {
            panic!("must fetch");
        };

        assert_eq!(
            service.complete(old_key, ok_response()),
            Completion::Superseded
        );
        assert!(service.is_empty());
        assert_eq!(service.complete(new_key, ok_response()), Completion::Stored);
    }
}
