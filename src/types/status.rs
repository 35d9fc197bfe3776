use serde::Serialize;
use std::fmt;

/// Result of probing the model server's models endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum ServerStatus {
    Online,
    Degraded(u16),
    Offline,
    Unknown(String),
}

impl ServerStatus {
    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// CSS modifier for the status line.
    pub fn level(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Degraded(_) | Self::Unknown(_) => "warning",
            Self::Offline => "offline",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "✅ **Server Status**: Online and ready"),
            Self::Degraded(code) => {
                write!(f, "⚠️ **Server Status**: Server responded with status {code}")
            }
            Self::Offline => write!(
                f,
                "❌ **Server Status**: Offline - Make sure to start your model server first"
            ),
            Self::Unknown(detail) => write!(f, "⚠️ **Server Status**: Unknown error - {detail}"),
        }
    }
}
