use ocgen_core::constraints::ConstraintViolation;
use ocgen_core::provider::ProviderKind;

/// Errors from a provider adapter.
///
/// Nothing here is retried automatically; callers decide using
/// [`is_retryable`](Self::is_retryable).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The request cannot be sent to this provider as specified.
    #[error(transparent)]
    Constraint(#[from] ConstraintViolation),

    /// The provider understood the request and refused it.
    #[error("{provider} rejected the request ({code}): {message}")]
    Business {
        provider: ProviderKind,
        code: i64,
        message: String,
    },

    /// The provider answered with something we cannot interpret.
    #[error("{provider} returned an unexpected response: {detail}")]
    Contract {
        provider: ProviderKind,
        detail: String,
        raw: String,
    },

    /// Network failure, TLS failure, or timeout.
    #[error("{provider} request failed: {source}")]
    Transport {
        provider: ProviderKind,
        #[source]
        source: reqwest::Error,
    },
}

impl ProviderError {
    pub fn provider(&self) -> Option<ProviderKind> {
        match self {
            Self::Constraint(_) => None,
            Self::Business { provider, .. }
            | Self::Contract { provider, .. }
            | Self::Transport { provider, .. } => Some(*provider),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport { source, .. } if source.is_timeout())
    }

    /// Transport failures and upstream 5xx/429 answers may succeed later.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Business { code, .. } => *code == 429 || (500..600).contains(code),
            Self::Constraint(_) | Self::Contract { .. } => false,
        }
    }
}
