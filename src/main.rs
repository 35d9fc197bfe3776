use anyhow::Result;
use gptoss_chat::{web, AppState, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gptoss_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting GPT-OSS-20B chat interface");

    // Load configuration
    let config = Config::from_env()?;

    tracing::info!("📋 Instructions:");
    tracing::info!("  1. Make sure your model server is running on {}", config.model_server_url);
    tracing::info!("  2. Open the chat interface in your browser");
    tracing::info!("  3. Start chatting!");

    let app_state = AppState::new(config)?;

    let status = app_state.client.check_status().await;
    if status.is_online() {
        tracing::info!("Model server is online");
    } else {
        tracing::warn!("Model server not ready: {}", status);
    }

    // Start web server
    web::start_server(app_state).await?;

    Ok(())
}
