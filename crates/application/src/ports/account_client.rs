//! Provider API client port

use async_trait::async_trait;
use stripe_auth_domain::{AccessToken, AccountProfile, ProviderApiError};

/// A provider API handle bound to one access token.
#[async_trait]
pub trait AccountClient: Send + Sync {
    /// Retrieves the account the token belongs to.
    async fn retrieve_account(&self) -> Result<AccountProfile, ProviderApiError>;
}

/// Builds [`AccountClient`]s from bare access tokens.
///
/// A fresh client is built for every profile fetch; nothing is cached
/// between tokens.
pub trait AccountClientFactory: Send + Sync {
    /// Client type produced by this factory.
    type Client: AccountClient;

    /// Returns a client scoped to `access_token`.
    fn for_token(&self, access_token: &AccessToken) -> Self::Client;
}
