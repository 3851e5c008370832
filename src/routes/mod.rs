//! Route definitions for the learnboard API.

pub mod analytics;
pub mod auth;
pub mod health;

use axum::{
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::middleware::auth::require_bearer;
use crate::AppState;

/// Request bodies are never expected; anything larger than this is refused.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Build the full application router.
///
/// Everything under `/app` sits behind the bearer token gate; health probes
/// stay open for orchestrators.
pub fn router(state: AppState) -> Router {
    let gated = Router::new()
        .route("/employee", get(analytics::employees))
        .route("/course-count", get(analytics::course_counts))
        .route("/avg-completion", get(analytics::average_completion))
        .route("/me", get(auth::me))
        .layer(from_fn_with_state(state.keys.clone(), require_bearer));

    Router::new()
        .nest("/app", gated)
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready))
        .layer(cors_layer(&state.config.frontend_url))
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(frontend_url: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    match HeaderValue::from_str(frontend_url) {
        Ok(origin) => cors.allow_origin(AllowOrigin::exact(origin)),
        Err(_) => {
            tracing::warn!(frontend_url, "FRONTEND_URL is not a valid origin; CORS disabled");
            cors
        }
    }
}
