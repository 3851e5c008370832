//! Identity introspection for authenticated callers.

use axum::Json;

use crate::middleware::auth::Identity;
use crate::services::auth::Claims;

/// GET /app/me — the verified claims the gate attached to this request.
pub async fn me(Identity(claims): Identity) -> Json<Claims> {
    Json(claims)
}
