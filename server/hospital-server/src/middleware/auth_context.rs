//! Authentication context extraction
//!
//! [`AuthContext`] is an extractor: any handler that takes it as an argument
//! rejects requests without a valid bearer token with 401 before the handler
//! body runs. Handlers then call [`AuthContext::require`] with the permission
//! guarding the operation.

use async_trait::async_trait;
use auth_identity::{IdentityError, Permission, Role, TokenService};
use axum::extract::{FromRef, FromRequestParts};
use axum::http::{header::AUTHORIZATION, request::Parts};
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;

/// Identity of the caller, taken from verified token claims
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub email: String,
    pub role: Role,
}

impl AuthContext {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// Require permission - returns 403 if the caller's role does not grant it
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Authorization`] when the role lacks `permission`.
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.role.allows(permission) {
            Ok(())
        } else {
            debug!(role = %self.role, ?permission, "Permission denied");
            Err(ApiError::authorization(format!(
                "{} may not perform this operation",
                self.role
            )))
        }
    }

    pub fn is(&self, role: Role) -> bool {
        self.role == role
    }
}

/// Extract the bearer token from the Authorization header
fn extract_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::missing_token("Missing Authorization header"))?;

    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::invalid_token("Invalid Authorization header format. Expected: Bearer <token>")
        })
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts)?;
        let tokens = Arc::<TokenService>::from_ref(state);

        let claims = tokens.validate(token).map_err(|e| match e {
            IdentityError::TokenExpired => ApiError::invalid_token("Token expired"),
            _ => ApiError::invalid_token("Invalid or expired token"),
        })?;

        Ok(AuthContext {
            email: claims.sub,
            role: claims.role,
        })
    }
}
