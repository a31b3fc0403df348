//! OAuth2 engine port

use async_trait::async_trait;
use stripe_auth_domain::{
    AuthorizationCode, AuthorizationParams, ConfigError, ExchangeError, ProviderConfig,
    TokenGrant,
};
use url::Url;

/// Port for the generic authorization-code engine.
///
/// The engine owns the redirect and the code exchange. Strategies hold one
/// and add the provider-specific pieces around it.
#[async_trait]
pub trait OAuth2Engine: Send + Sync {
    /// Builds the engine from a resolved configuration.
    ///
    /// # Errors
    /// Returns whatever the engine considers invalid, typically a missing
    /// client id, client secret or callback URL.
    fn from_config(config: ProviderConfig) -> Result<Self, ConfigError>
    where
        Self: Sized;

    /// The configuration the engine was built with.
    fn config(&self) -> &ProviderConfig;

    /// Authorize redirect for the given extra parameters.
    ///
    /// # Errors
    /// Returns an error if the configured endpoint is not a valid URL.
    fn authorization_url(&self, params: &AuthorizationParams) -> Result<Url, ConfigError> {
        stripe_auth_domain::authorization_url(self.config(), params)
    }

    /// Exchanges an authorization code at the token endpoint.
    async fn exchange_code(&self, code: &AuthorizationCode) -> Result<TokenGrant, ExchangeError>;
}
