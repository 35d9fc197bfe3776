pub mod conversation;
pub mod errors;
pub mod message;
pub mod status;

pub use conversation::{Conversation, Turn};
pub use errors::{AppError, ClientError};
pub use message::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, GenerationParams, Role};
pub use status::ServerStatus;
