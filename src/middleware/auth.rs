//! Bearer token gate for Axum routes.
//!
//! [`require_bearer`] runs as a `from_fn_with_state` layer in front of the
//! analytics routes; [`Identity`] gives handlers behind it the verified claims.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::errors::AppError;
use crate::services::auth::{Claims, KeyRing};

/// Verified claims of the caller, inserted by [`require_bearer`].
///
/// ```ignore
/// async fn handler(Identity(claims): Identity) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct Identity(pub Claims);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(Identity)
            .ok_or(AppError::AccessDenied)
    }
}

/// Reject requests without a verifiable token; otherwise attach its claims.
pub async fn require_bearer(
    State(keys): State<KeyRing>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        tracing::warn!(path = %req.uri().path(), "request without credential");
        AppError::AccessDenied
    })?;

    let claims = keys.verify(token).map_err(|e| {
        tracing::warn!(path = %req.uri().path(), error = %e, "credential rejected");
        AppError::InvalidToken
    })?;

    tracing::debug!(sub = claims.sub().unwrap_or("-"), "credential accepted");
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Token part of `Authorization: <scheme> <token>`.
///
/// Only the position is significant: the second space-separated segment is
/// the token whatever the scheme word says. An empty segment counts as absent.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(' ').nth(1))
        .filter(|t| !t.is_empty())
}
