use crate::config::Config;
use crate::services::template::TemplateEngine;
use crate::services::{ChatSession, ConversationClient};
use crate::types::GenerationParams;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: Arc<ConversationClient>,
    pub session: Arc<RwLock<ChatSession>>,
    /// Held for the whole of a chat submission so turns are appended one at a time.
    pub dispatch: Arc<Mutex<()>>,
    pub templates: Arc<TemplateEngine>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        tracing::info!("[STATE] Initializing AppState...");
        tracing::info!("[STATE]   Model server: {}", config.model_server_url);
        tracing::info!("[STATE]   Model: {}", config.model_name);
        tracing::info!(
            "[STATE]   Timeouts: chat {:?}, status {:?}",
            config.chat_timeout,
            config.status_timeout
        );

        let client = ConversationClient::new(&config)?;
        let templates = TemplateEngine::new()?;
        let session = ChatSession::new(GenerationParams {
            temperature: config.default_temperature,
            max_tokens: config.default_max_tokens,
        });

        Ok(Self {
            config: Arc::new(config),
            client: Arc::new(client),
            session: Arc::new(RwLock::new(session)),
            dispatch: Arc::new(Mutex::new(())),
            templates: Arc::new(templates),
        })
    }
}
