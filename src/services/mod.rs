pub mod client;
mod session;
pub mod template;

pub use client::ConversationClient;
pub use session::ChatSession;
