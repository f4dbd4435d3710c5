use async_trait::async_trait;

use super::{PolicyDecision, PolicyGateway};
use crate::error::Result;

/// Gateway that answers every call with the same decision.
///
/// Used when no resolver address is configured.
#[derive(Debug, Clone, Copy)]
pub struct StaticPolicy {
    decision: PolicyDecision,
}

impl StaticPolicy {
    pub fn new(use_cache: bool) -> Self {
        Self {
            decision: PolicyDecision::new(use_cache),
        }
    }
}

#[async_trait]
impl PolicyGateway for StaticPolicy {
    async fn resolve(&self, _client_version: &str) -> Result<PolicyDecision> {
        Ok(self.decision)
    }
}
