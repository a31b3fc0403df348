//! Credentials produced by the authorization-code exchange.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Shortens a secret for logs: first 8 chars + `...`.
fn preview(secret: &str) -> String {
    if secret.len() > 12 {
        secret
            .get(..8)
            .map_or_else(|| "...".to_string(), |head| format!("{head}..."))
    } else {
        "***".to_string()
    }
}

macro_rules! secret_string {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a raw value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// The raw value.
            #[must_use]
            pub fn secret(&self) -> &str {
                &self.0
            }

            /// A log-safe preview of the value.
            #[must_use]
            pub fn preview(&self) -> String {
                preview(&self.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name)).field(&self.preview()).finish()
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

secret_string!(
    /// Bearer credential for calls on behalf of the connected account.
    AccessToken
);

secret_string!(
    /// Credential for minting new access tokens. Handed to the verify callback untouched.
    RefreshToken
);

secret_string!(
    /// Short-lived code Stripe appends to the callback URL.
    AuthorizationCode
);

/// Token endpoint result as reported by the OAuth2 engine.
///
/// Stripe adds the connected account id, its publishable key and the
/// live-mode flag to the standard fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    /// The access token.
    pub access_token: AccessToken,
    /// Refresh token, if one was issued.
    #[serde(default)]
    pub refresh_token: Option<RefreshToken>,
    /// Token type, normally `bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Granted scope as returned by the provider.
    #[serde(default)]
    pub scope: Option<String>,
    /// Connected account id (`acct_...`).
    #[serde(default)]
    pub stripe_user_id: Option<String>,
    /// Publishable key of the connected account.
    #[serde(default)]
    pub stripe_publishable_key: Option<String>,
    /// Whether the grant is for live mode.
    #[serde(default)]
    pub livemode: bool,
    /// When the engine received the grant.
    #[serde(default = "Utc::now")]
    pub obtained_at: DateTime<Utc>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl TokenGrant {
    /// Creates a grant holding only an access token.
    #[must_use]
    pub fn new(access_token: impl Into<AccessToken>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            token_type: default_token_type(),
            scope: None,
            stripe_user_id: None,
            stripe_publishable_key: None,
            livemode: false,
            obtained_at: Utc::now(),
        }
    }

    /// Attaches a refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<RefreshToken>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Attaches the connected account id.
    #[must_use]
    pub fn with_stripe_user_id(mut self, account_id: impl Into<String>) -> Self {
        self.stripe_user_id = Some(account_id.into());
        self
    }

    /// Granted scopes split on the given separator.
    #[must_use]
    pub fn scopes(&self, separator: &str) -> Vec<String> {
        self.scope
            .as_deref()
            .map(|s| {
                s.split(separator)
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Splits the grant into what the verify callback receives.
    #[must_use]
    pub fn into_tokens(self) -> (AccessToken, Option<RefreshToken>) {
        (self.access_token, self.refresh_token)
    }
}
