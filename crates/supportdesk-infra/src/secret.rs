//! API key lookup.
//!
//! The completion API key is read from the environment variable named by
//! `provider.api_key_env` and wrapped in a [`SecretString`] immediately, so it
//! never reaches a `Debug` impl or a log line.

use secrecy::SecretString;

/// Read an API key from the environment.
///
/// Unset, empty, and non-Unicode values all count as "not configured".
pub fn resolve_api_key(env_var: &str) -> Option<SecretString> {
    match std::env::var(env_var) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val.trim().to_string())),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(env_var, "API key variable is not valid Unicode, ignoring");
            None
        }
    }
}
