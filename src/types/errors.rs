//! Error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Failures talking to the model server.
///
/// `Display` is the text shown in place of the assistant's reply.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("❌ **Error**: Error {code}: {body}")]
    HttpStatus { code: u16, body: String },

    #[error("❌ **Connection Error**: Could not connect to the model server. Make sure it's running on {base_url}")]
    Connection { base_url: String },

    #[error("❌ **Timeout Error**: The model took too long to respond")]
    Timeout,

    #[error("❌ **Unexpected Error**: {0}")]
    Unclassified(String),
}

impl ClientError {
    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::HttpStatus { .. } => "http_status",
            Self::Connection { .. } => "connection",
            Self::Timeout => "timeout",
            Self::Unclassified(_) => "unclassified",
        }
    }
}

/// Handler error: logged and turned into a 500.
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", self.0),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
