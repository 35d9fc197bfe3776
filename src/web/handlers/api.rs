//! API endpoint handlers

use crate::services::ConversationClient;
use crate::state::AppState;
use crate::types::{AppError, Conversation, GenerationParams};
use axum::{
    extract::{Form, State},
    response::{Html, Json},
};
use chrono::Local;
use serde::Deserialize;
use uuid::Uuid;

/// Chat form plus the settings panel fields pulled in with `hx-include`.
#[derive(Debug, Deserialize)]
pub struct ChatForm {
    #[serde(default)]
    message: String,
    #[serde(default)]
    system_prompt: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

/// Handle chat message submission
pub async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<ChatForm>,
) -> Result<Html<String>, AppError> {
    let request_id = Uuid::now_v7();

    // One submission at a time against the shared conversation
    let _dispatch = state.dispatch.lock().await;

    let (conversation, params) = {
        let mut session = state.session.write().await;
        let params = GenerationParams {
            temperature: form.temperature.unwrap_or(session.params.temperature),
            max_tokens: form.max_tokens.unwrap_or(session.params.max_tokens),
        };
        session.update_settings(&form.system_prompt, params);
        (session.snapshot(), params)
    };

    tracing::info!(
        %request_id,
        turns = conversation.len(),
        "Received message ({} chars)",
        form.message.chars().count()
    );

    let (display_text, conversation) = state
        .client
        .send_message(&form.message, conversation, &form.system_prompt, params)
        .await;

    tracing::debug!(%request_id, turns = conversation.len(), "Conversation updated");

    state.session.write().await.store(conversation.clone());

    let html = state
        .templates
        .render_send_result(&display_text, &conversation)?;

    Ok(Html(html))
}

/// Reset the conversation
pub async fn clear_chat(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let conversation = ConversationClient::clear();
    state.session.write().await.store(conversation.clone());
    tracing::info!("Conversation cleared");

    Ok(Html(state.templates.render_conversation(&conversation)?))
}

/// Check the model server and render the status line
pub async fn server_status(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let status = state.client.check_status().await;
    let checked_at = Local::now().format("%H:%M:%S").to_string();

    Ok(Html(state.templates.render_status(&status, &checked_at)?))
}

/// Current conversation as `[[user, assistant], ...]`
pub async fn export_conversation(State(state): State<AppState>) -> Json<Conversation> {
    Json(state.session.read().await.snapshot())
}
