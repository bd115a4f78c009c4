use std::env;

pub const DEFAULT_BIND: &str = "0.0.0.0:8080";
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1";
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";
pub const DEFAULT_ENDPOINT_URL: &str = "http://127.0.0.1:8080";

/// Upstream chat-completion gateway settings.
#[derive(Debug, Clone)]
pub struct AiSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

impl AiSettings {
    pub fn from_env() -> Self {
        AiSettings {
            api_key: env::var("AI_GATEWAY_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            base_url: env_or("AI_GATEWAY_URL", DEFAULT_GATEWAY_URL),
            model: env_or("AI_MODEL", DEFAULT_MODEL),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_address: String,
    pub ai: AiSettings,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            bind_address: env_or("QUIZMASTER_BIND", DEFAULT_BIND),
            ai: AiSettings::from_env(),
        }
    }
}

/// Base URL of the generation endpoint, as seen by the terminal front end.
pub fn endpoint_url() -> String {
    env_or("QUIZMASTER_URL", DEFAULT_ENDPOINT_URL)
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
