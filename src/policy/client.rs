//! HTTP client for the remote policy resolver.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{GetConfigRequest, PolicyDecision, PolicyGateway};
use crate::error::{AppError, Result};

/// Calls `POST {base_url}/config` once per resolve. No retries.
#[derive(Debug, Clone)]
pub struct HttpPolicyClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpPolicyClient {
    /// Builds a client whose every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::PolicyUnavailable(e.to_string()))?;
        Ok(Self {
            http,
            endpoint: format!("{}/config", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PolicyGateway for HttpPolicyClient {
    async fn resolve(&self, client_version: &str) -> Result<PolicyDecision> {
        let request = GetConfigRequest {
            version: client_version.to_string(),
        };

        let decision = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| AppError::PolicyUnavailable(e.to_string()))?
            .json::<PolicyDecision>()
            .await
            .map_err(|e| AppError::PolicyUnavailable(format!("bad resolver response: {}", e)))?;

        debug!(
            "Policy for version '{}': use_cache={}",
            client_version, decision.use_cache
        );
        Ok(decision)
    }
}
