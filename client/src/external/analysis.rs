//! Analysis service client
//!
//! Sends the request payload to `POST /api/calculate-probability` and decodes
//! the per-condition response.

use async_trait::async_trait;
use reqwest::Client;
use spacerain_shared::{AnalysisResponse, RequestPayload};

use crate::error::{ClientError, ClientResult};

/// Remote probability computation
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Perform exactly one analysis request
    async fn calculate(&self, payload: &RequestPayload) -> ClientResult<AnalysisResponse>;
}

/// HTTP client for the analysis service
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,
    endpoint: String,
}

impl AnalysisClient {
    /// Create a client posting to the given endpoint URL
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn calculate(&self, payload: &RequestPayload) -> ClientResult<AnalysisResponse> {
        tracing::debug!(endpoint = %self.endpoint, "posting analysis request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| ClientError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            // The body of a failed response is not assumed to be parseable.
            return Err(ClientError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        response
            .json::<AnalysisResponse>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}
