use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub host: String,
    pub port: u16,

    // Model server configuration
    pub model_server_url: String,
    pub model_name: String,
    pub chat_timeout: Duration,
    pub status_timeout: Duration,

    // Generation defaults shown in the settings panel
    pub default_temperature: f32,
    pub default_max_tokens: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7860,
            model_server_url: "http://localhost:8000".to_string(),
            model_name: "openai/gpt-oss-20b".to_string(),
            chat_timeout: Duration::from_secs(60),
            status_timeout: Duration::from_secs(5),
            default_temperature: 0.7,
            default_max_tokens: 512,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()?,

            model_server_url: normalize_base_url(
                &env::var("MODEL_SERVER_URL").unwrap_or(defaults.model_server_url),
            ),
            model_name: env::var("MODEL_NAME").unwrap_or(defaults.model_name),
            chat_timeout: secs_from_env("CHAT_TIMEOUT_SECS", defaults.chat_timeout)?,
            status_timeout: secs_from_env("STATUS_TIMEOUT_SECS", defaults.status_timeout)?,

            default_temperature: defaults.default_temperature,
            default_max_tokens: defaults.default_max_tokens,
        })
    }

    pub fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.model_server_url)
    }

    pub fn models_url(&self) -> String {
        format!("{}/v1/models", self.model_server_url)
    }
}

fn secs_from_env(key: &str, default: Duration) -> anyhow::Result<Duration> {
    match env::var(key) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .map_err(|e| anyhow::anyhow!("{key} must be a whole number of seconds: {e}"))?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(default),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
