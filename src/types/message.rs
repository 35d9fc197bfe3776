//! OpenAI-compatible chat-completions wire types

use super::conversation::Conversation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Sampling parameters taken from the settings sliders.
///
/// Values are passed through to the server as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 512,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

impl ChatCompletionRequest {
    /// Build the payload for `message`, replaying the whole history after an
    /// optional system prompt.
    pub fn new(
        model: &str,
        conversation: &Conversation,
        message: &str,
        system_prompt: &str,
        params: GenerationParams,
    ) -> Self {
        let mut messages = Vec::with_capacity(conversation.len() * 2 + 2);

        if !system_prompt.trim().is_empty() {
            messages.push(ChatMessage::system(system_prompt));
        }

        for turn in conversation.turns() {
            messages.push(ChatMessage::user(turn.user()));
            messages.push(ChatMessage::assistant(turn.assistant()));
        }

        messages.push(ChatMessage::user(message));

        Self {
            model: model.to_string(),
            messages,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            stream: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// `null` when the model spent its whole budget on reasoning.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    pub fn first_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
    }
}
