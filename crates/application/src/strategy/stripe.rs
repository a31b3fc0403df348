//! Stripe Connect strategy.

use std::sync::Arc;

use async_trait::async_trait;
use stripe_auth_domain::{
    AccessToken, AccountProfile, AuthError, AuthOutcome, AuthRequest, AuthorizationParams,
    ConfigError, ProfileFetchError, ProviderConfig, StrategyOptions,
};

use super::{ProviderStrategy, Strategy, flow};
use crate::ports::{AccountClient, AccountClientFactory, OAuth2Engine, Verify};

/// Name hosts route Stripe requests by.
pub const STRATEGY_NAME: &str = "stripe";

/// Override for [`ProviderStrategy::authorization_params`].
pub type AuthorizationParamsHook =
    Arc<dyn Fn(AuthorizationParams) -> AuthorizationParams + Send + Sync>;

/// Authenticates connected Stripe accounts through OAuth 2.0.
///
/// Holds the OAuth2 engine rather than extending it. The engine performs
/// the redirect and the code exchange; this type supplies the Stripe
/// endpoints and the account lookup.
pub struct StripeStrategy<E, C, V> {
    name: String,
    engine: E,
    account_clients: C,
    verify: Arc<V>,
    params_hook: Option<AuthorizationParamsHook>,
}

impl<E, C, V> StripeStrategy<E, C, V>
where
    E: OAuth2Engine,
    C: AccountClientFactory,
    V: Verify,
{
    /// Creates a strategy from host options.
    ///
    /// Missing authorize URL, token URL and scope separator are filled with
    /// the Stripe defaults; everything else is checked by the engine.
    ///
    /// # Errors
    /// Returns whatever the engine rejects while being built.
    pub fn new(options: StrategyOptions, account_clients: C, verify: V) -> Result<Self, ConfigError> {
        let engine = E::from_config(ProviderConfig::from_options(options))?;
        Ok(Self::with_engine(engine, account_clients, verify))
    }

    /// Creates a strategy around an engine that is already built.
    pub fn with_engine(engine: E, account_clients: C, verify: V) -> Self {
        Self {
            name: STRATEGY_NAME.to_string(),
            engine,
            account_clients,
            verify: Arc::new(verify),
            params_hook: None,
        }
    }

    /// Registers the strategy under another name, e.g. one per platform.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replaces the identity [`ProviderStrategy::authorization_params`].
    #[must_use]
    pub fn with_authorization_params<F>(mut self, hook: F) -> Self
    where
        F: Fn(AuthorizationParams) -> AuthorizationParams + Send + Sync + 'static,
    {
        self.params_hook = Some(Arc::new(hook));
        self
    }

    /// Resolved configuration.
    pub fn config(&self) -> &ProviderConfig {
        self.engine.config()
    }

    /// Authorize endpoint in use.
    pub fn authorization_url(&self) -> &str {
        self.config().authorization_url()
    }

    /// Token endpoint in use.
    pub fn token_url(&self) -> &str {
        self.config().token_url()
    }

    /// Scope separator in use.
    pub fn scope_separator(&self) -> &str {
        self.config().scope_separator()
    }

    /// The wrapped engine.
    pub const fn engine(&self) -> &E {
        &self.engine
    }
}

#[async_trait]
impl<E, C, V> ProviderStrategy for StripeStrategy<E, C, V>
where
    E: OAuth2Engine,
    C: AccountClientFactory,
    V: Verify,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn authorization_params(&self, options: AuthorizationParams) -> AuthorizationParams {
        match &self.params_hook {
            Some(hook) => hook(options),
            None => options,
        }
    }

    async fn fetch_profile(
        &self,
        access_token: &AccessToken,
    ) -> Result<AccountProfile, ProfileFetchError> {
        let client = self.account_clients.for_token(access_token);

        match client.retrieve_account().await {
            Ok(profile) => {
                tracing::debug!(
                    provider = %self.name,
                    account = profile.id().unwrap_or("unknown"),
                    "fetched connected account"
                );
                Ok(profile)
            }
            Err(cause) => {
                tracing::warn!(provider = %self.name, error = %cause, "failed to fetch user account");
                Err(ProfileFetchError::new(cause))
            }
        }
    }
}

#[async_trait]
impl<E, C, V> Strategy for StripeStrategy<E, C, V>
where
    E: OAuth2Engine,
    C: AccountClientFactory,
    V: Verify,
{
    type User = V::User;

    async fn authenticate(
        &self,
        request: AuthRequest,
    ) -> Result<AuthOutcome<Self::User>, AuthError> {
        flow::authenticate(self, &self.engine, &self.verify, request).await
    }
}
