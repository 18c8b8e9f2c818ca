//! Role and permission gating
//!
//! Runs after [`super::AuthMiddleware`]: the principal comes from request
//! extensions, the decision from the evaluator in [`AppState`].

use crate::auth::{AuthenticatedUser, Decision};
use crate::config::FailurePolicy;
use crate::server::AppState;
use crate::utils::error::ApiError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::{HttpMessage, web};
use futures::future::{Ready, ready};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, error, warn};

/// What a gated scope demands of the principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Role(String),
    Permission(String),
}

impl Requirement {
    async fn decide(&self, state: &AppState, user_id: i32) -> Decision {
        match self {
            Requirement::Role(role) => state.rbac.evaluator.check_role(user_id, role).await,
            Requirement::Permission(permission) => {
                state
                    .rbac
                    .evaluator
                    .check_permission(user_id, permission)
                    .await
            }
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Role(role) => write!(f, "role '{}'", role),
            Requirement::Permission(permission) => write!(f, "permission '{}'", permission),
        }
    }
}

/// Require the authenticated principal to hold a role
pub struct RequireRole(Requirement);

impl RequireRole {
    pub fn new(role: impl Into<String>) -> Self {
        Self(Requirement::Role(role.into()))
    }
}

/// Require the authenticated principal to hold a permission through any role
pub struct RequirePermission(Requirement);

impl RequirePermission {
    pub fn new(permission: impl Into<String>) -> Self {
        Self(Requirement::Permission(permission.into()))
    }
}

macro_rules! requirement_transform {
    ($gate:ty) => {
        impl<S, B> Transform<S, ServiceRequest> for $gate
        where
            S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>
                + 'static,
            S::Future: 'static,
            B: 'static,
        {
            type Response = ServiceResponse<B>;
            type Error = actix_web::Error;
            type InitError = ();
            type Transform = RequirementService<S>;
            type Future = Ready<Result<Self::Transform, Self::InitError>>;

            fn new_transform(&self, service: S) -> Self::Future {
                ready(Ok(RequirementService {
                    service: Rc::new(service),
                    requirement: Rc::new(self.0.clone()),
                }))
            }
        }
    };
}

requirement_transform!(RequireRole);
requirement_transform!(RequirePermission);

/// Service implementation shared by both gates
pub struct RequirementService<S> {
    service: Rc<S>,
    requirement: Rc<Requirement>,
}

impl<S, B> Service<ServiceRequest> for RequirementService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let requirement = Rc::clone(&self.requirement);
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let user = req.extensions().get::<AuthenticatedUser>().copied();

        Box::pin(async move {
            let Some(user) = user else {
                return Err(ApiError::unauthorized("Authentication required").into());
            };
            let Some(state) = state else {
                return Err(ApiError::internal("Application state is not configured").into());
            };

            let policy = state.rbac.config().failure_policy;
            let decision = requirement.decide(&state, user.user_id).await;
            admit(&decision, policy, user.user_id, &requirement)?;

            service.call(req).await
        })
    }
}

/// Turn a decision into pass-or-403 under the configured failure policy
pub(super) fn admit(
    decision: &Decision,
    policy: FailurePolicy,
    user_id: i32,
    requirement: &Requirement,
) -> Result<(), ApiError> {
    match decision {
        Decision::Allow => {
            debug!("User {} satisfies {}", user_id, requirement);
            Ok(())
        }
        Decision::Deny => {
            warn!("User {} lacks {}", user_id, requirement);
            Err(ApiError::forbidden(format!("Requires {}", requirement)))
        }
        Decision::InfrastructureError(reason) if decision.permits(policy) => {
            error!(
                "Authorization check for user {} on {} failed, admitting under fail-open policy: {}",
                user_id, requirement, reason
            );
            Ok(())
        }
        Decision::InfrastructureError(reason) => {
            error!(
                "Authorization check for user {} on {} failed: {}",
                user_id, requirement, reason
            );
            Err(ApiError::forbidden(format!("Requires {}", requirement)))
        }
    }
}
