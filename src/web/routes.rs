use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Pages
        .route("/", get(super::handlers::chat::index))

        // API endpoints
        .route("/api/chat", post(super::handlers::api::send_message))
        .route("/api/clear", post(super::handlers::api::clear_chat))
        .route("/api/status", get(super::handlers::api::server_status))
        .route("/api/conversation", get(super::handlers::api::export_conversation))

        // Health check
        .route("/health", get(super::handlers::health::health_check))

        .with_state(state)
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::state::AppState;
    use crate::types::Turn;
    use crate::web::create_app;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};
    use std::time::Duration;
    use tower::ServiceExt;

    async fn spawn_model_server() -> String {
        let app = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                let last = body["messages"]
                    .as_array()
                    .and_then(|messages| messages.last())
                    .and_then(|message| message["content"].as_str())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({"choices": [{"message": {"content": format!("echo: {last}")}}]}))
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn unreachable_url() -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{}", addr)
    }

    fn state_for(model_server_url: String) -> AppState {
        AppState::new(Config {
            model_server_url,
            chat_timeout: Duration::from_secs(2),
            status_timeout: Duration::from_millis(500),
            ..Config::default()
        })
        .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn form_post(uri: &str, body: &'static str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn index_renders_chat_page() {
        let state = state_for(unreachable_url());
        let response = create_app(state)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("GPT-OSS-20B Chat Interface"));
        assert!(html.contains(r#"hx-post="/api/chat""#));
    }

    #[tokio::test]
    async fn chat_submission_appends_turn_and_clears_input() {
        let state = state_for(spawn_model_server().await);

        let response = create_app(state.clone())
            .oneshot(form_post(
                "/api/chat",
                "message=hi&system_prompt=Be+kind&temperature=0.3&max_tokens=64",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("echo: hi"));
        assert!(html.contains(r#"hx-swap-oob="true""#));

        let session = state.session.read().await;
        assert_eq!(session.conversation.turns(), &[Turn::new("hi", "echo: hi")]);
        assert_eq!(session.system_prompt, "Be kind");
        assert_eq!(session.params.max_tokens, 64);
    }

    #[tokio::test]
    async fn blank_submission_leaves_conversation_alone() {
        let state = state_for(unreachable_url());

        let response = create_app(state.clone())
            .oneshot(form_post("/api/chat", "message=+++&system_prompt="))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(state.session.read().await.conversation.is_empty());
    }

    #[tokio::test]
    async fn unreachable_server_shows_connection_error_in_chat() {
        let state = state_for(unreachable_url());

        let response = create_app(state.clone())
            .oneshot(form_post("/api/chat", "message=hello"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Connection Error"));
        assert_eq!(state.session.read().await.conversation.len(), 1);
    }

    #[tokio::test]
    async fn clear_and_export() {
        let state = state_for(spawn_model_server().await);
        create_app(state.clone())
            .oneshot(form_post("/api/chat", "message=one"))
            .await
            .unwrap();

        let response = create_app(state.clone())
            .oneshot(Request::get("/api/conversation").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let exported: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(exported, json!([["one", "echo: one"]]));

        for _ in 0..2 {
            let response = create_app(state.clone())
                .oneshot(Request::post("/api/clear").body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
            assert!(body_text(response).await.contains("No messages yet"));
            assert!(state.session.read().await.conversation.is_empty());
        }
    }

    #[tokio::test]
    async fn status_line_reports_offline_server() {
        let state = state_for(unreachable_url());
        let response = create_app(state)
            .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Offline"));
        assert!(html.contains("status--offline"));
    }

    #[tokio::test]
    async fn health_reports_service() {
        let state = state_for(unreachable_url());
        let response = create_app(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "gptoss-chat");
        assert_eq!(body["model"], "openai/gpt-oss-20b");
        assert!(body["model_server"]
            .as_str()
            .is_some_and(|url| url.starts_with("http://127.0.0.1:")));
    }
}
