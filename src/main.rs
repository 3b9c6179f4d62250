use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use saraldocs::api::router::api_router;
use saraldocs::api::AppState;
use saraldocs::config::AppConfig;
use saraldocs::pipeline::extraction::build_engine;
use saraldocs::pipeline::simplify::GroqClient;
use saraldocs::storage;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("saraldocs=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env();
    if config.groq_api_key.is_none() {
        tracing::warn!("GROQ_API_KEY not set, simplify requests will fail until configured");
    }

    let storage = storage::from_config(&config)?;
    let ocr = build_engine();
    let chat = Arc::new(GroqClient::from_config(&config)?);

    let state = AppState {
        config: Arc::new(config.clone()),
        storage,
        ocr,
        chat,
    };

    let app = api_router(state);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "saraldocs listening");
    axum::serve(listener, app).await?;
    Ok(())
}
