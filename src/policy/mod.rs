//! Policy Module
//!
//! Resolves, per read, whether the caller's data may be served from and
//! written to the single-item cache.
//!
//! # Wire format
//! - Request: `POST /config` with `{"version": "<token>"}`
//! - Response: `{"useCache": <bool>}`

mod client;
mod rule;
pub mod server;
mod static_gateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use client::HttpPolicyClient;
pub use rule::VersionRule;
pub use static_gateway::StaticPolicy;

/// Decision applied when the resolver errors or times out: bypass the cache.
pub const FALLBACK_DECISION: PolicyDecision = PolicyDecision { use_cache: false };

/// Body of a resolve request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetConfigRequest {
    pub version: String,
}

/// Outcome of a resolve call. Never cached across calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyDecision {
    pub use_cache: bool,
}

impl PolicyDecision {
    pub fn new(use_cache: bool) -> Self {
        Self { use_cache }
    }
}

/// Source of per-call caching decisions.
///
/// Failures come back as `AppError::PolicyUnavailable`; callers must pick a
/// decision for that branch before reading one.
#[async_trait]
pub trait PolicyGateway: Send + Sync {
    async fn resolve(&self, client_version: &str) -> Result<PolicyDecision>;
}
