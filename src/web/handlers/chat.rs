use crate::state::AppState;
use crate::types::AppError;
use axum::{extract::State, response::Html};

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let session = state.session.read().await;
    let html = state
        .templates
        .render_chat_page(&session, state.client.model())?;

    Ok(Html(html))
}
