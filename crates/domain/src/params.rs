//! Authorize-redirect parameters and the callback query Stripe sends back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ProviderConfig;
use crate::error::{AuthError, ConfigError};
use crate::token::AuthorizationCode;

/// Extra query parameters for the authorize redirect.
///
/// Keys are kept sorted so generated URLs are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorizationParams(BTreeMap<String, String>);

impl AuthorizationParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Looks up a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Removes a parameter.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Returns true if no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merges `other` into `self`, `other` winning on conflicts.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        self.0.extend(other.0);
        self
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AuthorizationParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Which Stripe page the user lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StripeLanding {
    /// Sign-in form for existing accounts.
    Login,
    /// Sign-up form for new accounts.
    Register,
}

impl StripeLanding {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
        }
    }
}

/// Typed builder for Stripe Connect's non-standard authorize parameters.
///
/// ```
/// use stripe_auth_domain::{StripeConnectParams, StripeLanding};
///
/// let params = StripeConnectParams::new()
///     .scope("read_write")
///     .landing(StripeLanding::Register)
///     .prefill("business_type", "company")
///     .into_params();
///
/// assert_eq!(params.get("stripe_landing"), Some("register"));
/// assert_eq!(params.get("stripe_user[business_type]"), Some("company"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StripeConnectParams {
    scope: Option<String>,
    state: Option<String>,
    landing: Option<StripeLanding>,
    always_prompt: bool,
    suggested_capabilities: Vec<String>,
    prefill: BTreeMap<String, String>,
}

impl StripeConnectParams {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested scope, `read_only` or `read_write`.
    #[must_use]
    pub fn scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Opaque value echoed back on the callback.
    #[must_use]
    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    /// Landing page.
    #[must_use]
    pub const fn landing(mut self, landing: StripeLanding) -> Self {
        self.landing = Some(landing);
        self
    }

    /// Forces the account picker even when the user is signed in.
    #[must_use]
    pub const fn always_prompt(mut self) -> Self {
        self.always_prompt = true;
        self
    }

    /// Capability to request for the connected account, e.g. `card_payments`.
    #[must_use]
    pub fn suggest_capability(mut self, capability: impl Into<String>) -> Self {
        self.suggested_capabilities.push(capability.into());
        self
    }

    /// Pre-fills a `stripe_user[...]` field of the onboarding form.
    #[must_use]
    pub fn prefill(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.prefill.insert(field.into(), value.into());
        self
    }

    /// Flattens the builder into query parameters.
    #[must_use]
    pub fn into_params(self) -> AuthorizationParams {
        let mut params = AuthorizationParams::new();
        if let Some(scope) = self.scope {
            params.insert("scope", scope);
        }
        if let Some(state) = self.state {
            params.insert("state", state);
        }
        if let Some(landing) = self.landing {
            params.insert("stripe_landing", landing.as_str());
        }
        if self.always_prompt {
            params.insert("always_prompt", "true");
        }
        for (index, capability) in self.suggested_capabilities.into_iter().enumerate() {
            params.insert(format!("suggested_capabilities[{index}]"), capability);
        }
        for (field, value) in self.prefill {
            params.insert(format!("stripe_user[{field}]"), value);
        }
        params
    }
}

impl From<StripeConnectParams> for AuthorizationParams {
    fn from(params: StripeConnectParams) -> Self {
        params.into_params()
    }
}

/// Builds the authorize redirect URL.
///
/// Standard fields come first (`response_type`, `client_id`, `redirect_uri`,
/// and `scope` joined with the configured separator), followed by `params`
/// in key order. A standard field the caller also supplies is written once,
/// with the caller's value.
///
/// # Errors
/// Returns [`ConfigError::InvalidUrl`] if the authorize endpoint does not parse.
pub fn authorization_url(
    config: &ProviderConfig,
    params: &AuthorizationParams,
) -> Result<Url, ConfigError> {
    let mut url = Url::parse(config.authorization_url()).map_err(|e| ConfigError::InvalidUrl {
        field: "authorization_url",
        message: e.to_string(),
    })?;

    {
        let mut query = url.query_pairs_mut();
        if params.get("response_type").is_none() {
            query.append_pair("response_type", "code");
        }
        if params.get("client_id").is_none() {
            query.append_pair("client_id", config.client_id());
        }
        if !config.callback_url().is_empty() && params.get("redirect_uri").is_none() {
            query.append_pair("redirect_uri", config.callback_url());
        }
        if params.get("scope").is_none() && !config.scope().is_empty() {
            query.append_pair("scope", &config.join_scopes(config.scope()));
        }
        for (key, value) in params.iter() {
            query.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Query parameters Stripe appends to the callback URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CallbackParams {
    /// Authorization code on success.
    pub code: Option<String>,
    /// State echoed back from the authorize request.
    pub state: Option<String>,
    /// Scope actually granted.
    pub scope: Option<String>,
    /// OAuth2 error code on failure.
    pub error: Option<String>,
    /// Human readable failure description.
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parses a raw query string (without the leading `?`).
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidRequest`] if the query is not form encoded.
    pub fn from_query(query: &str) -> Result<Self, AuthError> {
        serde_urlencoded::from_str(query.trim_start_matches('?'))
            .map_err(|e| AuthError::InvalidRequest(e.to_string()))
    }

    /// The authorization code, if present and non-empty.
    #[must_use]
    pub fn code(&self) -> Option<AuthorizationCode> {
        self.code
            .as_deref()
            .filter(|c| !c.is_empty())
            .map(AuthorizationCode::new)
    }
}

/// One incoming authentication request as seen by a strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthRequest {
    /// Callback parameters; empty on the initial request.
    pub callback: CallbackParams,
    /// Extra authorize parameters requested by the host route.
    pub options: AuthorizationParams,
}

impl AuthRequest {
    /// The initial request that starts the redirect.
    #[must_use]
    pub fn begin(options: AuthorizationParams) -> Self {
        Self {
            callback: CallbackParams::default(),
            options,
        }
    }

    /// A callback request built from the query string.
    ///
    /// # Errors
    /// Returns [`AuthError::InvalidRequest`] if the query is malformed.
    pub fn from_query(query: &str) -> Result<Self, AuthError> {
        Ok(Self {
            callback: CallbackParams::from_query(query)?,
            options: AuthorizationParams::new(),
        })
    }
}
