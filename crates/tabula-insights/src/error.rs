//! Errors raised while talking to the external insight provider.

use thiserror::Error;

/// Failures of the external provider path.
///
/// None of these are fatal: the caller always falls back to the
/// deterministic fallback list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProviderError {
    /// No API key was configured.
    #[error("no API key configured for the insight provider")]
    MissingCredential,

    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("provider returned HTTP {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly truncated.
        body: String,
    },

    /// The response body did not have the expected shape.
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    /// No parsing strategy produced any insight from the response text.
    #[error("could not extract insights from provider response")]
    Unparsable,
}

impl ProviderError {
    /// Returns a short message suitable for end users.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredential => "AI insights are not configured. Showing standard insights.",
            Self::Network(_) => {
                "Could not reach the AI service. Please check your internet connection."
            }
            Self::Status { status, .. } if *status == 429 => {
                "The AI service is busy. Please try again later."
            }
            Self::Status { .. } | Self::InvalidResponse(_) | Self::Unparsable => {
                "The AI service returned an unexpected answer. Showing standard insights."
            }
        }
    }

    /// Returns whether retrying the same request might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::MissingCredential | Self::InvalidResponse(_) | Self::Unparsable => false,
        }
    }

    /// Short machine-readable reason recorded with a fallback outcome.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::Network(_) => "network",
            Self::Status { .. } => "status",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Unparsable => "unparsable",
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type alias for provider calls.
pub type Result<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert!(
            ProviderError::Network("refused".to_string())
                .user_message()
                .contains("internet connection")
        );
        let busy = ProviderError::Status {
            status: 429,
            body: String::new(),
        };
        assert!(busy.user_message().contains("busy"));
        assert!(
            ProviderError::MissingCredential
                .user_message()
                .contains("not configured")
        );
    }

    #[test]
    fn test_retryable() {
        assert!(ProviderError::Network("timeout".to_string()).is_retryable());
        assert!(
            ProviderError::Status {
                status: 503,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::Status {
                status: 400,
                body: String::new()
            }
            .is_retryable()
        );
        assert!(!ProviderError::MissingCredential.is_retryable());
        assert!(!ProviderError::Unparsable.is_retryable());
    }
}
