//! LLM provider implementations.
//!
//! Contains the OpenAI-compatible implementation of the [`LlmProvider`] trait
//! defined in `supportdesk-core`, a factory ([`create_provider`]) that builds
//! it from [`ProviderSettings`], and a connectivity probe
//! ([`test_provider_connection`]).
//!
//! [`LlmProvider`]: supportdesk_core::llm::provider::LlmProvider

pub mod openai_compat;

use secrecy::SecretString;
use supportdesk_core::llm::box_provider::BoxLlmProvider;
use supportdesk_types::config::{ProviderKind, ProviderSettings};
use supportdesk_types::llm::{CompletionRequest, LlmError, Message};

use self::openai_compat::OpenAiCompatibleProvider;

/// Create a [`BoxLlmProvider`] from [`ProviderSettings`].
///
/// An explicit `base_url` wins over the kind's well-known endpoint.
///
/// # Errors
///
/// Returns [`LlmError::InvalidRequest`] for a `custom` provider without a base URL.
pub fn create_provider(
    settings: &ProviderSettings,
    api_key: SecretString,
) -> Result<BoxLlmProvider, LlmError> {
    let provider = match (settings.kind, settings.base_url.as_deref()) {
        (ProviderKind::Custom, None) => {
            return Err(LlmError::InvalidRequest(
                "provider.kind = \"custom\" requires provider.base_url".to_string(),
            ));
        }
        (ProviderKind::Custom, Some(base_url)) => {
            OpenAiCompatibleProvider::custom(api_key, base_url, &settings.model)
        }
        (kind, Some(base_url)) => {
            OpenAiCompatibleProvider::new(openai_compat::config::OpenAiCompatConfig {
                provider_name: kind.to_string(),
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key,
                model: settings.model.clone(),
            })
        }
        (ProviderKind::Groq, None) => OpenAiCompatibleProvider::groq(api_key, &settings.model),
        (ProviderKind::OpenAi, None) => OpenAiCompatibleProvider::openai(api_key, &settings.model),
    };

    tracing::info!(
        provider = %settings.kind,
        base_url = %provider.base_url(),
        model = %settings.model,
        "Completion provider configured"
    );
    Ok(BoxLlmProvider::new(provider))
}

/// Test provider connectivity by sending a minimal completion request.
///
/// Sends a tiny "Hello" message with a minimal token budget; the provider's
/// configured model is used.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<(), LlmError> {
    let request = CompletionRequest {
        model: String::new(),
        messages: vec![Message::user("Hello")],
        system: None,
        max_tokens: 10,
        temperature: Some(0.0),
    };
    provider.complete(&request).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_groq_default() {
        let provider =
            create_provider(&ProviderSettings::default(), SecretString::from("gsk-test")).unwrap();
        assert_eq!(provider.name(), "groq");
    }

    #[test]
    fn test_create_provider_openai() {
        let settings = ProviderSettings {
            kind: ProviderKind::OpenAi,
            model: "gpt-4o-mini".to_string(),
            ..ProviderSettings::default()
        };
        let provider = create_provider(&settings, SecretString::from("sk-test")).unwrap();
        assert_eq!(provider.name(), "openai");
    }

    #[test]
    fn test_create_provider_custom_requires_base_url() {
        let settings = ProviderSettings {
            kind: ProviderKind::Custom,
            ..ProviderSettings::default()
        };
        let result = create_provider(&settings, SecretString::from("k"));
        assert!(matches!(result, Err(LlmError::InvalidRequest(_))));
    }

    #[test]
    fn test_create_provider_custom_with_base_url() {
        let settings = ProviderSettings {
            kind: ProviderKind::Custom,
            base_url: Some("http://localhost:8000/v1".to_string()),
            ..ProviderSettings::default()
        };
        let provider = create_provider(&settings, SecretString::from("k")).unwrap();
        assert_eq!(provider.name(), "custom");
    }

    #[test]
    fn test_create_provider_base_url_override_keeps_kind_name() {
        let settings = ProviderSettings {
            base_url: Some("https://proxy.internal/groq/v1/".to_string()),
            ..ProviderSettings::default()
        };
        let provider = create_provider(&settings, SecretString::from("k")).unwrap();
        assert_eq!(provider.name(), "groq");
    }
}
