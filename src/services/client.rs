//! Conversation client for an OpenAI-compatible model server

use crate::config::Config;
use crate::types::{
    ChatCompletionRequest, ChatCompletionResponse, ClientError, Conversation, GenerationParams,
    ServerStatus, Turn,
};
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

pub struct ConversationClient {
    http: Client,
    base_url: String,
    chat_url: String,
    models_url: String,
    model: String,
    chat_timeout: Duration,
    status_timeout: Duration,
}

impl ConversationClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder().build()?;

        Ok(Self {
            http,
            base_url: config.model_server_url.clone(),
            chat_url: config.chat_completions_url(),
            models_url: config.models_url(),
            model: config.model_name.clone(),
            chat_timeout: config.chat_timeout,
            status_timeout: config.status_timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `message` with the full history and return the cleared input text
    /// together with the conversation extended by one turn.
    ///
    /// Failures become the assistant side of the new turn; nothing is
    /// returned as an error. Blank messages leave the conversation untouched
    /// and make no request.
    pub async fn send_message(
        &self,
        message: &str,
        conversation: Conversation,
        system_prompt: &str,
        params: GenerationParams,
    ) -> (String, Conversation) {
        if message.trim().is_empty() {
            return (String::new(), conversation);
        }

        let reply = match self.complete(message, &conversation, system_prompt, params).await {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(kind = err.kind(), "Chat completion failed: {}", err);
                err.to_string()
            }
        };

        (String::new(), conversation.with_turn(Turn::new(message, reply)))
    }

    /// One chat-completions round trip.
    pub async fn complete(
        &self,
        message: &str,
        conversation: &Conversation,
        system_prompt: &str,
        params: GenerationParams,
    ) -> Result<String, ClientError> {
        let payload =
            ChatCompletionRequest::new(&self.model, conversation, message, system_prompt, params);

        tracing::debug!(
            "POST {} ({} messages, temperature={}, max_tokens={})",
            self.chat_url,
            payload.messages.len(),
            payload.temperature,
            payload.max_tokens
        );

        let response = self
            .http
            .post(&self.chat_url)
            .header(header::CONTENT_TYPE, "application/json")
            .json(&payload)
            .timeout(self.chat_timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.map_err(|e| self.classify(e))?;
            return Err(ClientError::HttpStatus {
                code: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| self.classify(e))?;

        completion
            .first_content()
            .ok_or_else(|| ClientError::Unclassified("response contained no choices".to_string()))
    }

    pub async fn check_status(&self) -> ServerStatus {
        let result = self
            .http
            .get(&self.models_url)
            .timeout(self.status_timeout)
            .send()
            .await;

        let status = match result {
            Ok(response) if response.status() == StatusCode::OK => ServerStatus::Online,
            Ok(response) => ServerStatus::Degraded(response.status().as_u16()),
            Err(e) if e.is_connect() || e.is_timeout() => ServerStatus::Offline,
            Err(e) => ServerStatus::Unknown(e.to_string()),
        };

        tracing::debug!("Model server status: {:?}", status);
        status
    }

    /// Fresh, empty history.
    pub fn clear() -> Conversation {
        Conversation::new()
    }

    fn classify(&self, err: reqwest::Error) -> ClientError {
        if err.is_connect() {
            ClientError::Connection {
                base_url: self.base_url.clone(),
            }
        } else if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Unclassified(err.to_string())
        }
    }
}
