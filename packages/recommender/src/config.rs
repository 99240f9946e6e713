//! Pipeline configuration with secure credential handling.
//!
//! Uses the `secrecy` crate to prevent accidental logging of API keys.
//! The library reads plain `std::env`; loading `.env` files (dotenvy) is
//! the caller's concern.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::locale::Locale;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use.
    ///
    /// Only call this when actually using the secret (e.g., in an API
    /// request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Environment-level configuration consumed by the pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Completion service credential. Required for live recommendations;
    /// its absence is the pipeline's only hard failure.
    pub openrouter_api_key: Option<SecretString>,

    /// Primary search provider credential (optional; search degrades to
    /// the secondary provider without it).
    pub serper_api_key: Option<SecretString>,

    /// Locale applied when the caller does not specify one.
    pub default_locale: Locale,

    /// Country assigned to extracted locations and appended to search
    /// queries.
    pub default_country: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            openrouter_api_key: None,
            serper_api_key: None,
            default_locale: Locale::En,
            default_country: "Pakistan".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Read configuration from the environment.
    ///
    /// Recognized variables: `OPENROUTER_API_KEY`, `SERPER_API_KEY`,
    /// `DEFAULT_LOCALE` (en/ur), `DEFAULT_COUNTRY`. Missing variables fall
    /// back to defaults; this never fails, since missing credentials are a
    /// runtime degradation, not a startup error.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = std::env::var("OPENROUTER_API_KEY") {
            if !key.is_empty() {
                config.openrouter_api_key = Some(SecretString::new(key));
            }
        }
        if let Ok(key) = std::env::var("SERPER_API_KEY") {
            if !key.is_empty() {
                config.serper_api_key = Some(SecretString::new(key));
            }
        }
        if let Ok(locale) = std::env::var("DEFAULT_LOCALE") {
            config.default_locale = Locale::from_code(&locale);
        }
        if let Ok(country) = std::env::var("DEFAULT_COUNTRY") {
            if !country.is_empty() {
                config.default_country = country;
            }
        }

        config
    }

    /// Set the completion credential.
    pub fn with_openrouter_key(mut self, key: impl Into<SecretString>) -> Self {
        self.openrouter_api_key = Some(key.into());
        self
    }

    /// Set the primary search provider credential.
    pub fn with_serper_key(mut self, key: impl Into<SecretString>) -> Self {
        self.serper_api_key = Some(key.into());
        self
    }

    /// Set the default country.
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.default_country = country.into();
        self
    }

    /// Whether the completion service credential is present.
    pub fn has_completion_credentials(&self) -> bool {
        self.openrouter_api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_never_leaks_in_debug() {
        let secret = SecretString::new("sk-or-very-secret");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(secret.expose(), "sk-or-very-secret");
    }

    #[test]
    fn test_config_defaults() {
        let config = PipelineConfig::default();
        assert!(!config.has_completion_credentials());
        assert_eq!(config.default_country, "Pakistan");
        assert_eq!(config.default_locale, Locale::En);
    }

    #[test]
    fn test_config_builders() {
        let config = PipelineConfig::default()
            .with_openrouter_key("sk-or-test")
            .with_country("Canada");
        assert!(config.has_completion_credentials());
        assert_eq!(config.default_country, "Canada");
    }
}
