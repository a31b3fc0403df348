//! Error types shared by every layer of the strategy.

use thiserror::Error;

/// Error a host verify callback may return.
pub type VerifyError = Box<dyn std::error::Error + Send + Sync>;

/// Configuration problems, reported while building a strategy or its engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option is missing or blank.
    #[error("missing required option: {0}")]
    MissingField(&'static str),

    /// An option holds a URL that does not parse.
    #[error("invalid URL in {field}: {message}")]
    InvalidUrl {
        /// Option name.
        field: &'static str,
        /// Parser message.
        message: String,
    },

    /// Options could not be loaded from their sources.
    #[error("failed to load options: {0}")]
    Load(String),
}

/// Failure reported by the OAuth2 engine while exchanging a code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The token endpoint answered with an OAuth2 error (`invalid_grant`, ...).
    #[error("token endpoint rejected the code: {error}")]
    Rejected {
        /// OAuth2 error code.
        error: String,
        /// Human readable description, if any.
        description: Option<String>,
    },

    /// The token endpoint could not be reached.
    #[error("token request failed: {0}")]
    Transport(String),

    /// The token endpoint answered with something unreadable.
    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

/// Failure reported by the provider API client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderApiError {
    /// The access token was refused.
    #[error("invalid access token: {message}")]
    InvalidToken {
        /// Provider message.
        message: String,
    },

    /// The provider answered with an API error.
    #[error("provider API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error type reported by the provider, e.g. `invalid_request_error`.
        kind: Option<String>,
        /// Machine readable error code, if any.
        code: Option<String>,
        /// Provider message.
        message: String,
    },

    /// The HTTP client could not be set up.
    #[error("HTTP client setup failed: {message}")]
    Client {
        /// Builder message.
        message: String,
    },

    /// The request never produced a response.
    #[error("network error: {message}")]
    Network {
        /// Transport message.
        message: String,
    },

    /// The response body was not a JSON record.
    #[error("invalid response: {message}")]
    InvalidResponse {
        /// Parser message.
        message: String,
    },
}

/// Account lookup failed after a successful code exchange.
///
/// Always carries the client's error as its source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to fetch user account")]
pub struct ProfileFetchError {
    #[source]
    source: ProviderApiError,
}

impl ProfileFetchError {
    /// Wraps a provider API failure.
    #[must_use]
    pub const fn new(source: ProviderApiError) -> Self {
        Self { source }
    }

    /// The underlying provider API failure.
    #[must_use]
    pub const fn cause(&self) -> &ProviderApiError {
        &self.source
    }

    /// Unwraps the underlying provider API failure.
    #[must_use]
    pub fn into_cause(self) -> ProviderApiError {
        self.source
    }
}

impl From<ProviderApiError> for ProfileFetchError {
    fn from(source: ProviderApiError) -> Self {
        Self::new(source)
    }
}

/// Everything that can end an authentication attempt with an error.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The strategy could not be built.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The callback request could not be understood.
    #[error("invalid callback request: {0}")]
    InvalidRequest(String),

    /// The provider redirected back with an error other than a denial.
    #[error("authorization failed: {error}")]
    Authorization {
        /// OAuth2 error code from the callback.
        error: String,
        /// Description from the callback, if any.
        description: Option<String>,
    },

    /// The OAuth2 engine failed to exchange the code.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    /// The account lookup failed.
    #[error(transparent)]
    ProfileFetch(#[from] ProfileFetchError),

    /// The verify callback returned an error.
    #[error("verify callback failed: {0}")]
    Verification(#[source] VerifyError),

    /// The verify callback panicked or was cancelled before finishing.
    #[error("verify callback aborted: {0}")]
    VerifyAborted(String),

    /// No strategy is registered under the requested name.
    #[error("unknown strategy: {0}")]
    UnknownStrategy(String),
}

/// Result type alias for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;
