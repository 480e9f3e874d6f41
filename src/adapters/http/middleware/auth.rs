//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` - validates Bearer tokens and injects the user into extensions
//! - `RequireAuth` - extractor that requires an authenticated user
//! - `RequireAdmin` - extractor that also requires the configured admin role
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser + AdminRole into extensions
//!                                      ↓
//!                              Handler → RequireAuth / RequireAdmin read them back
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::envelope::ApiResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::SessionValidator;

/// Middleware state: the validator plus the role title that marks admins.
#[derive(Clone)]
pub struct AuthState {
    pub validator: Arc<dyn SessionValidator>,
    pub admin_role: Arc<str>,
}

impl AuthState {
    pub fn new(validator: Arc<dyn SessionValidator>, admin_role: impl Into<Arc<str>>) -> Self {
        Self {
            validator,
            admin_role: admin_role.into(),
        }
    }
}

/// Admin role title, made available to extractors.
#[derive(Debug, Clone)]
struct AdminRole(Arc<str>);

/// Validates `Authorization: Bearer <token>` when present.
///
/// A missing header passes through untouched so public routes keep working;
/// handlers opt in with `RequireAuth` or `RequireAdmin`. A present but
/// invalid token is rejected here.
pub async fn auth_middleware(
    State(auth): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    request
        .extensions_mut()
        .insert(AdminRole(auth.admin_role.clone()));

    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return next.run(request).await;
    };

    match auth.validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => {
            if let AuthError::ServiceUnavailable(reason) = &err {
                tracing::error!(reason = %reason, "Auth service unavailable");
            }
            AuthRejection::from(err).into_response()
        }
    }
}

/// Extractor that requires authentication.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(RequireAuth)
            .ok_or(AuthRejection::Unauthenticated)
    }
}

/// Extractor that requires the admin role.
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub AuthenticatedUser);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAuth(user) = RequireAuth::from_request_parts(parts, state).await?;
        let admin = parts
            .extensions
            .get::<AdminRole>()
            .map(|role| user.has_any_role(&[&role.0]))
            .unwrap_or(false);

        if admin {
            Ok(RequireAdmin(user))
        } else {
            tracing::warn!(user_id = %user.id, "Admin route refused");
            Err(AuthRejection::Forbidden)
        }
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    Unauthenticated,
    InvalidToken,
    TokenExpired,
    Forbidden,
    Unavailable,
}

impl From<AuthError> for AuthRejection {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenExpired => AuthRejection::TokenExpired,
            AuthError::InvalidToken => AuthRejection::InvalidToken,
            AuthError::InsufficientPermissions => AuthRejection::Forbidden,
            AuthError::ServiceUnavailable(_) => AuthRejection::Unavailable,
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthRejection::Unauthenticated => {
                (StatusCode::UNAUTHORIZED, "Authentication credentials were not provided.")
            }
            AuthRejection::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
            AuthRejection::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AuthRejection::Forbidden => (
                StatusCode::FORBIDDEN,
                "You do not have the required role to access this page",
            ),
            AuthRejection::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Authentication service unavailable",
            ),
        };

        ApiResponse::failure(message)
            .with_status(status)
            .into_response()
    }
}
