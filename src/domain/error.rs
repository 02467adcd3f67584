use thiserror::Error;

/// Core domain errors
#[derive(Debug, Clone, Error)]
pub enum DomainError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("No results: {message}")]
    NoResults { message: String },

    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Provider unavailable: {message}")]
    ProviderUnavailable { message: String },

    /// Raw failure reported by an external collaborator. `status` is the HTTP
    /// status when one was received, `None` when the provider was unreachable.
    #[error("Upstream error: {provider} - {message}")]
    Upstream {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn no_results(message: impl Into<String>) -> Self {
        Self::NoResults {
            message: message.into(),
        }
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    pub fn provider_unavailable(message: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            message: message.into(),
        }
    }

    pub fn upstream(
        provider: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Rate-limited (429) and server-error (5xx) upstream responses may be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Upstream { status: Some(status), .. } if *status == 429 || (500..=599).contains(status)
        )
    }

    /// The provider could not be reached at all (connect failure, DNS, transport timeout)
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Upstream { status: None, .. })
    }
}
