//! Authorization evaluator
//!
//! The only component request gating talks to. A principal lacking access is
//! `Ok(false)`; `Err` is reserved for the store failing or timing out.

use crate::config::FailurePolicy;
use crate::core::traits::RbacRepository;
use crate::utils::error::{ApiError, Result};
use crate::utils::normalize_key;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Outcome of a gating check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
    /// No decision could be reached
    InfrastructureError(String),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Whether the request may proceed under `policy`
    pub fn permits(&self, policy: FailurePolicy) -> bool {
        match self {
            Decision::Allow => true,
            Decision::Deny => false,
            Decision::InfrastructureError(_) => policy == FailurePolicy::Open,
        }
    }
}

impl From<Result<bool>> for Decision {
    fn from(result: Result<bool>) -> Self {
        match result {
            Ok(true) => Decision::Allow,
            Ok(false) => Decision::Deny,
            Err(e) => Decision::InfrastructureError(e.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct AuthorizationEvaluator {
    rbac: Arc<dyn RbacRepository>,
    timeout: Duration,
}

impl AuthorizationEvaluator {
    pub fn new(rbac: Arc<dyn RbacRepository>, timeout: Duration) -> Self {
        Self { rbac, timeout }
    }

    async fn bounded<F>(&self, query: F) -> Result<bool>
    where
        F: Future<Output = Result<bool>>,
    {
        tokio::time::timeout(self.timeout, query)
            .await
            .map_err(|_| {
                ApiError::timeout(format!(
                    "Authorization decision exceeded {}ms",
                    self.timeout.as_millis()
                ))
            })?
    }

    pub async fn has_role(&self, user_id: i32, role_name: &str) -> Result<bool> {
        let role_name = normalize_key(role_name);
        if role_name.is_empty() {
            return Ok(false);
        }
        self.bounded(self.rbac.user_has_role(user_id, &role_name))
            .await
    }

    pub async fn has_permission(&self, user_id: i32, permission_name: &str) -> Result<bool> {
        let permission_name = normalize_key(permission_name);
        if permission_name.is_empty() {
            return Ok(false);
        }
        self.bounded(self.rbac.user_has_permission(user_id, &permission_name))
            .await
    }

    pub async fn check_role(&self, user_id: i32, role_name: &str) -> Decision {
        let decision = Decision::from(self.has_role(user_id, role_name).await);
        debug!("Role check {} for user {}: {:?}", role_name, user_id, decision);
        decision
    }

    pub async fn check_permission(&self, user_id: i32, permission_name: &str) -> Decision {
        let decision = Decision::from(self.has_permission(user_id, permission_name).await);
        debug!(
            "Permission check {} for user {}: {:?}",
            permission_name, user_id, decision
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::MockRbacRepository;

    #[tokio::test]
    async fn test_slow_store_becomes_timeout() {
        let evaluator =
            AuthorizationEvaluator::new(Arc::new(MockRbacRepository::new()), Duration::from_millis(10));

        let result = evaluator
            .bounded(std::future::pending::<Result<bool>>())
            .await;

        assert!(matches!(result, Err(ApiError::Timeout(_))));
    }

    #[test]
    fn test_decision_under_policies() {
        let infra = Decision::InfrastructureError("down".to_string());

        assert!(Decision::Allow.permits(FailurePolicy::Closed));
        assert!(!Decision::Deny.permits(FailurePolicy::Open));
        assert!(!infra.permits(FailurePolicy::Closed));
        assert!(infra.permits(FailurePolicy::Open));
    }
}
