pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod upstream;

use std::sync::Arc;

use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method,
    },
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
};
use tracing::info;

pub use config::AppConfig;
pub use error::RelayError;
pub use upstream::ClaudeClient;

pub struct AppState {
    pub config: AppConfig,
    pub client: ClaudeClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let client = ClaudeClient::new(config.api_url.clone());
        Self { config, client }
    }
}

/// Preflight requests are answered by the CORS layer with 200 and an empty body.
/// Every other response also advertises the allowed headers and methods.
pub fn build_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::POST, Method::OPTIONS]);

    api::router(state)
        .layer(cors)
        .layer(SetResponseHeaderLayer::if_not_present(
            CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
}

pub async fn run_server(app: Router, port: u16) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!(port, "script relay listening");

    axum::serve(listener, app).await
}
