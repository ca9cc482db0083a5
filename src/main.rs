use std::sync::Arc;

use script_relay::{build_app, logging::init_logging, run_server, AppConfig, AppState};
use tracing::warn;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let config = AppConfig::from_env();
    if config.api_key.is_none() {
        warn!("CLAUDE_API_KEY is not set; /generate-script will answer 500 until it is");
    }
    let port = config.port;

    let app = build_app(Arc::new(AppState::new(config)));
    run_server(app, port).await
}
