use crate::types::{Conversation, GenerationParams};
use serde::Serialize;

/// UI state cells for the single chat session.
#[derive(Debug, Clone, Serialize)]
pub struct ChatSession {
    pub conversation: Conversation,
    pub system_prompt: String,
    pub params: GenerationParams,
}

impl ChatSession {
    pub fn new(params: GenerationParams) -> Self {
        Self {
            conversation: Conversation::new(),
            system_prompt: String::new(),
            params,
        }
    }

    /// Remember the settings panel values from the latest submission.
    pub fn update_settings(&mut self, system_prompt: &str, params: GenerationParams) {
        self.system_prompt = system_prompt.to_string();
        self.params = params;
    }

    /// Copy of the history to hand to the client; the cell keeps serving
    /// page renders while a request is in flight.
    pub fn snapshot(&self) -> Conversation {
        self.conversation.clone()
    }

    pub fn store(&mut self, conversation: Conversation) {
        self.conversation = conversation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Turn;

    #[test]
    fn snapshot_and_store() {
        let mut session = ChatSession::new(GenerationParams::default());
        session.store(Conversation::new().with_turn(Turn::new("hi", "hello")));

        let conversation = session.snapshot();
        assert_eq!(conversation.len(), 1);
        assert_eq!(session.conversation.len(), 1);

        session.store(conversation.with_turn(Turn::new("bye", "see you")));
        assert_eq!(session.conversation.len(), 2);
    }

    #[test]
    fn settings_are_remembered() {
        let mut session = ChatSession::new(GenerationParams::default());
        session.update_settings(
            "Be brief.",
            GenerationParams {
                temperature: 0.1,
                max_tokens: 32,
            },
        );
        assert_eq!(session.system_prompt, "Be brief.");
        assert_eq!(session.params.max_tokens, 32);
    }
}
