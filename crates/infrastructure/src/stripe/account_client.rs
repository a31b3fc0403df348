//! Stripe account client using reqwest.
//!
//! Implements the `AccountClient` port against `GET /v1/account`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use stripe_auth_application::{AccountClient, AccountClientFactory};
use stripe_auth_domain::{AccessToken, AccountProfile, ProviderApiError};

/// Stripe API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Account endpoint, relative to the API base.
const ACCOUNT_PATH: &str = "/v1/account";

/// Stripe error envelope: `{"error": {"type": ..., "code": ..., "message": ...}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Builds [`StripeAccountClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct StripeAccountClients {
    http_client: Client,
    api_base: String,
    api_version: Option<String>,
}

impl StripeAccountClients {
    /// Creates a factory talking to the public Stripe API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderApiError::Client`] if the HTTP client cannot be created.
    pub fn new() -> Result<Self, ProviderApiError> {
        let http_client = Client::builder()
            .user_agent(concat!("stripe-auth/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderApiError::Client {
                message: e.to_string(),
            })?;

        Ok(Self::with_client(http_client))
    }

    /// Creates a factory around a custom reqwest client.
    #[must_use]
    pub fn with_client(http_client: Client) -> Self {
        Self {
            http_client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_version: None,
        }
    }

    /// Points the clients at another API base, e.g. a local mock.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Pins the `Stripe-Version` header.
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    /// API base in use.
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }
}

impl AccountClientFactory for StripeAccountClients {
    type Client = StripeAccountClient;

    fn for_token(&self, access_token: &AccessToken) -> StripeAccountClient {
        StripeAccountClient {
            http_client: self.http_client.clone(),
            account_url: format!("{}{ACCOUNT_PATH}", self.api_base.trim_end_matches('/')),
            api_version: self.api_version.clone(),
            access_token: access_token.clone(),
        }
    }
}

/// Stripe API handle bound to one connected account's access token.
#[derive(Debug, Clone)]
pub struct StripeAccountClient {
    http_client: Client,
    account_url: String,
    api_version: Option<String>,
    access_token: AccessToken,
}

impl StripeAccountClient {
    /// Creates a client for the public Stripe API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderApiError::Client`] if the HTTP client cannot be created.
    pub fn new(access_token: &AccessToken) -> Result<Self, ProviderApiError> {
        Ok(StripeAccountClients::new()?.for_token(access_token))
    }

    /// Maps a non-success response to [`ProviderApiError`].
    fn map_error(status: StatusCode, body: &str) -> ProviderApiError {
        let parsed = serde_json::from_str::<ErrorEnvelope>(body).ok().map(|e| e.error);
        let (kind, code, message) = match parsed {
            Some(ErrorBody {
                kind,
                code,
                message,
            }) => (kind, code, message),
            None => (None, None, None),
        };
        let message = message
            .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            });

        if status == StatusCode::UNAUTHORIZED {
            return ProviderApiError::InvalidToken { message };
        }

        ProviderApiError::Api {
            status: status.as_u16(),
            kind,
            code,
            message,
        }
    }
}

#[async_trait]
impl AccountClient for StripeAccountClient {
    async fn retrieve_account(&self) -> Result<AccountProfile, ProviderApiError> {
        tracing::debug!(
            url = %self.account_url,
            token = %self.access_token.preview(),
            "retrieving connected account"
        );

        let mut request = self
            .http_client
            .get(&self.account_url)
            .bearer_auth(self.access_token.secret());
        if let Some(version) = &self.api_version {
            request = request.header("Stripe-Version", version.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e: reqwest::Error| ProviderApiError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e: reqwest::Error| ProviderApiError::Network {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            let error = Self::map_error(status, &body);
            tracing::debug!(status = status.as_u16(), error = %error, "account request failed");
            return Err(error);
        }

        serde_json::from_str::<Value>(&body)
            .map(AccountProfile::new)
            .map_err(|e| ProviderApiError::InvalidResponse {
                message: format!("failed to parse account response: {e}"),
            })
    }
}
