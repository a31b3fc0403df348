//! Authentication strategies.
//!
//! This module provides:
//! - The plugin contract hosts dispatch through ([`ProviderStrategy`], [`Strategy`])
//! - The generic authorization-code flow runner ([`authenticate`])
//! - The Stripe Connect adapter ([`StripeStrategy`])
//! - A per-host registry keyed by strategy name ([`StrategyRegistry`])

mod flow;
mod registry;
mod stripe;
#[cfg(test)]
mod testing;

use async_trait::async_trait;
use stripe_auth_domain::{
    AccessToken, AccountProfile, AuthError, AuthOutcome, AuthRequest, AuthorizationParams,
    ProfileFetchError,
};

pub use flow::authenticate;
pub use registry::StrategyRegistry;
pub use stripe::{AuthorizationParamsHook, STRATEGY_NAME, StripeStrategy};

/// Capability interface every provider adapter implements.
#[async_trait]
pub trait ProviderStrategy: Send + Sync {
    /// Name the host routes requests by, e.g. `"stripe"`.
    fn name(&self) -> &str;

    /// Extra parameters for the authorize redirect.
    ///
    /// The default returns `options` unchanged.
    fn authorization_params(&self, options: AuthorizationParams) -> AuthorizationParams {
        options
    }

    /// Loads the account record for a freshly issued access token.
    async fn fetch_profile(
        &self,
        access_token: &AccessToken,
    ) -> Result<AccountProfile, ProfileFetchError>;
}

/// A provider adapter that can drive a whole request.
#[async_trait]
pub trait Strategy: ProviderStrategy {
    /// Application user produced on success.
    type User: Send + 'static;

    /// Handles one request: redirect, callback or error.
    async fn authenticate(&self, request: AuthRequest)
    -> Result<AuthOutcome<Self::User>, AuthError>;
}
