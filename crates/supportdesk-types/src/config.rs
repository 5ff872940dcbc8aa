//! Application configuration types for Supportdesk.
//!
//! `AppConfig` represents the top-level `config.toml` that controls the
//! completion provider, the context window, the system prompt, and how
//! completion failures are reported to the widget.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of prior turns replayed to the completion service.
pub const DEFAULT_HISTORY_WINDOW: u32 = 10;

/// Default system instruction: support-agent persona plus store policy.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful e-commerce support assistant for an online store. \
Answer questions about orders, shipping, returns and products concisely and politely.

Store policy:
- Orders ship within 1-2 business days; standard delivery takes 3-7 business days.
- Unused items can be returned within 30 days of delivery for a full refund.
- Refunds go back to the original payment method within 5-10 business days of receiving the return.
- Never invent order details. Ask for the order number when you need it, and offer to hand over to a human agent when you cannot help.";

/// Default apology used by [`CompletionFailurePolicy::Fallback`].
pub const DEFAULT_FALLBACK_REPLY: &str =
    "Sorry, I'm having trouble answering right now. Please try again in a moment.";

/// Top-level configuration for the Supportdesk server.
///
/// Loaded from `~/.supportdesk/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Explicit database URL; defaults to `{data_dir}/supportdesk.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_url: Option<String>,

    /// Directory to serve the widget from instead of the embedded page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_dir: Option<String>,

    /// Maximum number of prior turns included in each prompt.
    #[serde(default = "default_history_window")]
    pub history_window: u32,

    /// Serialize turns within one session behind a per-session mutex.
    #[serde(default = "default_serialize_sessions")]
    pub serialize_sessions: bool,

    /// How a failed completion call is reported.
    #[serde(default)]
    pub completion_failure: CompletionFailurePolicy,

    /// Reply text used when `completion_failure = "fallback"`.
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,

    /// System instruction placed ahead of every prompt.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Completion provider settings.
    #[serde(default)]
    pub provider: ProviderSettings,
}

fn default_history_window() -> u32 {
    DEFAULT_HISTORY_WINDOW
}

fn default_serialize_sessions() -> bool {
    true
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            web_dir: None,
            history_window: default_history_window(),
            serialize_sessions: default_serialize_sessions(),
            completion_failure: CompletionFailurePolicy::default(),
            fallback_reply: default_fallback_reply(),
            system_prompt: default_system_prompt(),
            provider: ProviderSettings::default(),
        }
    }
}

/// What the orchestrator does when the completion service errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionFailurePolicy {
    /// Return an explicit upstream-unavailable error (HTTP 502).
    #[default]
    Error,
    /// Return a 200 carrying the static `fallback_reply`.
    Fallback,
}

impl fmt::Display for CompletionFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompletionFailurePolicy::Error => write!(f, "error"),
            CompletionFailurePolicy::Fallback => write!(f, "fallback"),
        }
    }
}

/// Which OpenAI-compatible backend to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    #[serde(rename = "openai")]
    OpenAi,
    /// Any other OpenAI-compatible endpoint; `base_url` is required.
    Custom,
}

impl ProviderKind {
    /// Base URL used when the config does not override it.
    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Groq => Some("https://api.groq.com/openai/v1"),
            ProviderKind::OpenAi => Some("https://api.openai.com/v1"),
            ProviderKind::Custom => None,
        }
    }

    /// Environment variable holding the API key when the config does not name one.
    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "GROQ_API_KEY",
            ProviderKind::OpenAi => "OPENAI_API_KEY",
            ProviderKind::Custom => "SUPPORTDESK_API_KEY",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Groq => write!(f, "groq"),
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Custom => write!(f, "custom"),
        }
    }
}

/// Completion provider section of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub kind: ProviderKind,

    /// Overrides [`ProviderKind::default_base_url`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Overrides [`ProviderKind::default_api_key_env`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            base_url: None,
            model: default_model(),
            api_key_env: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ProviderSettings {
    /// Effective base URL, if one is known.
    pub fn resolved_base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .or_else(|| self.kind.default_base_url())
    }

    /// Effective name of the API key environment variable.
    pub fn resolved_api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .unwrap_or_else(|| self.kind.default_api_key_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.history_window, 10);
        assert!(config.serialize_sessions);
        assert_eq!(config.completion_failure, CompletionFailurePolicy::Error);
        assert!(config.system_prompt.contains("e-commerce support assistant"));
        assert_eq!(config.provider.kind, ProviderKind::Groq);
        assert_eq!(config.provider.model, "llama-3.3-70b-versatile");
        assert_eq!(config.provider.max_tokens, 500);
        assert!((config.provider.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_app_config_deserialize_empty_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.history_window, DEFAULT_HISTORY_WINDOW);
        assert_eq!(config.fallback_reply, DEFAULT_FALLBACK_REPLY);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
history_window = 6
serialize_sessions = false
completion_failure = "fallback"
fallback_reply = "We'll be right back."

[provider]
kind = "openai"
model = "gpt-4o-mini"
max_tokens = 256
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.history_window, 6);
        assert!(!config.serialize_sessions);
        assert_eq!(config.completion_failure, CompletionFailurePolicy::Fallback);
        assert_eq!(config.fallback_reply, "We'll be right back.");
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.provider.max_tokens, 256);
        // Unset provider fields keep their defaults.
        assert!((config.provider.temperature - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_provider_settings_resolution() {
        let groq = ProviderSettings::default();
        assert_eq!(groq.resolved_base_url(), Some("https://api.groq.com/openai/v1"));
        assert_eq!(groq.resolved_api_key_env(), "GROQ_API_KEY");

        let custom = ProviderSettings {
            kind: ProviderKind::Custom,
            ..ProviderSettings::default()
        };
        assert_eq!(custom.resolved_base_url(), None);

        let overridden = ProviderSettings {
            base_url: Some("http://localhost:8080/v1".to_string()),
            api_key_env: Some("MY_KEY".to_string()),
            ..ProviderSettings::default()
        };
        assert_eq!(overridden.resolved_base_url(), Some("http://localhost:8080/v1"));
        assert_eq!(overridden.resolved_api_key_env(), "MY_KEY");
    }

    #[test]
    fn test_provider_kind_display_matches_config_value() {
        for kind in [ProviderKind::Groq, ProviderKind::OpenAi, ProviderKind::Custom] {
            let toml_str = format!("[provider]\nkind = \"{kind}\"\n");
            let config: AppConfig = toml::from_str(&toml_str).unwrap();
            assert_eq!(config.provider.kind, kind);
        }
    }

    #[test]
    fn test_config_serializes_back_to_toml() {
        let config = AppConfig::default();
        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("history_window = 10"));
        assert!(rendered.contains("[provider]"));
        let parsed: AppConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.provider.model, config.provider.model);
    }
}
