mod handlers;
mod models;

use std::sync::Arc;

use axum::{routing::post, Router};

use crate::AppState;

pub use handlers::{generate_script, method_not_allowed, not_found};
pub use models::{ErrorResponse, GenerateRequest, GenerateResult, ScriptMetadata, ScriptResponse};

/// Routes only; CORS and content-type layers are added by [`crate::build_app`].
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/generate-script",
            post(generate_script).fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
}
