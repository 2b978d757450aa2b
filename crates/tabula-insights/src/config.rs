//! Settings for the provider client and the insight normalizer.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default Generative Language API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-pro";

/// Connection settings for the external insight provider.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// API key. Enhancement falls back immediately when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_output_tokens: 1024,
            timeout_secs: 60,
        }
    }
}

impl ProviderSettings {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the API key if one is set and non-blank.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

// Hand-written so the key never reaches logs.
impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Bounds applied to every final insight list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightLimits {
    pub min_insights: usize,
    pub max_insights: usize,
}

impl Default for InsightLimits {
    fn default() -> Self {
        Self {
            min_insights: 3,
            max_insights: 8,
        }
    }
}

impl InsightLimits {
    /// Returns limits with `min <= max` and `max >= 1`.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let max_insights = self.max_insights.max(1);
        Self {
            min_insights: self.min_insights.min(max_insights),
            max_insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_api_key() {
        let settings = ProviderSettings {
            api_key: Some("secret-key".to_string()),
            ..Default::default()
        };
        let rendered = format!("{settings:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let settings = ProviderSettings {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(settings.api_key(), None);
    }

    #[test]
    fn limits_are_sanitized() {
        let limits = InsightLimits {
            min_insights: 10,
            max_insights: 0,
        }
        .sanitized();
        assert_eq!(limits.max_insights, 1);
        assert_eq!(limits.min_insights, 1);
    }
}
