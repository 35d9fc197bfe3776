//! Conversation history types

use serde::{Deserialize, Serialize};

/// One exchange: the user's message and the reply shown for it.
///
/// Serializes as a `[user, assistant]` pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn(String, String);

impl Turn {
    pub fn new(user: impl Into<String>, assistant: impl Into<String>) -> Self {
        Self(user.into(), assistant.into())
    }

    pub fn user(&self) -> &str {
        &self.0
    }

    pub fn assistant(&self) -> &str {
        &self.1
    }
}

/// Ordered chat history. Only ever grows by appending a turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the conversation and return it with `turn` appended.
    pub fn with_turn(mut self, turn: Turn) -> Self {
        self.turns.push(turn);
        self
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

impl FromIterator<Turn> for Conversation {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}
