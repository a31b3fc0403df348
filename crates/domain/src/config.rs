//! Strategy configuration and Stripe Connect endpoint defaults.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

/// Stripe Connect authorize endpoint.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://connect.stripe.com/oauth/authorize";

/// Stripe Connect token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://connect.stripe.com/oauth/token";

/// Stripe joins requested scopes with a comma instead of a space.
pub const DEFAULT_SCOPE_SEPARATOR: &str = ",";

/// Options supplied by the host application when building a strategy.
///
/// Only the three Stripe endpoint settings have defaults. Everything else is
/// passed through to the OAuth2 engine, which decides what is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
    /// Client ID of the Connect platform (`ca_...`).
    pub client_id: String,
    /// Platform secret key used by the engine at the token endpoint.
    pub client_secret: String,
    /// URL Stripe redirects to after the user grants access.
    pub callback_url: String,
    /// Authorize endpoint override.
    pub authorization_url: Option<String>,
    /// Token endpoint override.
    pub token_url: Option<String>,
    /// Scope separator override.
    pub scope_separator: Option<String>,
    /// Scopes requested when the caller does not ask for any.
    pub scope: Vec<String>,
}

impl StrategyOptions {
    /// Creates options with the three values every engine needs.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
            ..Self::default()
        }
    }

    /// Overrides the authorize endpoint.
    #[must_use]
    pub fn with_authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    /// Overrides the token endpoint.
    #[must_use]
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Overrides the scope separator.
    #[must_use]
    pub fn with_scope_separator(mut self, separator: impl Into<String>) -> Self {
        self.scope_separator = Some(separator.into());
        self
    }

    /// Adds a default scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope.push(scope.into());
        self
    }
}

/// Resolved, immutable strategy configuration.
///
/// Built once from [`StrategyOptions`] with the Stripe defaults filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    client_id: String,
    client_secret: String,
    callback_url: String,
    authorization_url: String,
    token_url: String,
    scope_separator: String,
    scope: Vec<String>,
}

impl ProviderConfig {
    /// Fills in the Stripe defaults. Empty strings count as missing.
    #[must_use]
    pub fn from_options(options: StrategyOptions) -> Self {
        Self {
            client_id: options.client_id,
            client_secret: options.client_secret,
            callback_url: options.callback_url,
            authorization_url: or_default(options.authorization_url, DEFAULT_AUTHORIZATION_URL),
            token_url: or_default(options.token_url, DEFAULT_TOKEN_URL),
            scope_separator: or_default(options.scope_separator, DEFAULT_SCOPE_SEPARATOR),
            scope: options.scope,
        }
    }

    /// Checks what a standard authorization-code engine needs.
    ///
    /// The strategy never calls this itself; engines do, from
    /// their constructor.
    ///
    /// # Errors
    /// Returns the first missing or malformed value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_id.trim().is_empty() {
            return Err(ConfigError::MissingField("client_id"));
        }
        if self.client_secret.trim().is_empty() {
            return Err(ConfigError::MissingField("client_secret"));
        }
        if self.callback_url.trim().is_empty() {
            return Err(ConfigError::MissingField("callback_url"));
        }
        parse_url("callback_url", &self.callback_url)?;
        parse_url("authorization_url", &self.authorization_url)?;
        parse_url("token_url", &self.token_url)?;
        Ok(())
    }

    /// Client ID of the Connect platform.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Platform secret key.
    #[must_use]
    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Redirect target after authorization.
    #[must_use]
    pub fn callback_url(&self) -> &str {
        &self.callback_url
    }

    /// Authorize endpoint.
    #[must_use]
    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    /// Token endpoint.
    #[must_use]
    pub fn token_url(&self) -> &str {
        &self.token_url
    }

    /// Separator used when joining scopes.
    #[must_use]
    pub fn scope_separator(&self) -> &str {
        &self.scope_separator
    }

    /// Default scopes.
    #[must_use]
    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    /// Joins scopes with the configured separator.
    #[must_use]
    pub fn join_scopes<S: AsRef<str>>(&self, scopes: &[S]) -> String {
        scopes
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(&self.scope_separator)
    }
}

impl From<StrategyOptions> for ProviderConfig {
    fn from(options: StrategyOptions) -> Self {
        Self::from_options(options)
    }
}

fn or_default(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        message: e.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> StrategyOptions {
        StrategyOptions::new("abc", "xyz", "https://app.example/cb")
    }

    #[test]
    fn test_defaults_fill_missing_endpoints() {
        let config = ProviderConfig::from_options(options());

        assert_eq!(
            config.authorization_url(),
            "https://connect.stripe.com/oauth/authorize"
        );
        assert_eq!(config.token_url(), "https://connect.stripe.com/oauth/token");
        assert_eq!(config.scope_separator(), ",");
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let config = ProviderConfig::from_options(
            options()
                .with_authorization_url("https://auth.example/authorize")
                .with_token_url("https://auth.example/token")
                .with_scope_separator(" "),
        );

        assert_eq!(config.authorization_url(), "https://auth.example/authorize");
        assert_eq!(config.token_url(), "https://auth.example/token");
        assert_eq!(config.scope_separator(), " ");
        assert_eq!(config.client_id(), "abc");
        assert_eq!(config.client_secret(), "xyz");
        assert_eq!(config.callback_url(), "https://app.example/cb");
    }

    #[test]
    fn test_empty_override_falls_back_to_default() {
        let config = ProviderConfig::from_options(
            options()
                .with_authorization_url("")
                .with_scope_separator(""),
        );

        assert_eq!(config.authorization_url(), DEFAULT_AUTHORIZATION_URL);
        assert_eq!(config.scope_separator(), DEFAULT_SCOPE_SEPARATOR);
    }

    #[test]
    fn test_join_scopes_uses_separator() {
        let config = ProviderConfig::from_options(options());
        assert_eq!(config.join_scopes(&["read_write", "read_only"]), "read_write,read_only");

        let config = ProviderConfig::from_options(options().with_scope_separator(" "));
        assert_eq!(config.join_scopes(&["a", "b"]), "a b");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let config = ProviderConfig::from_options(StrategyOptions::new("", "xyz", "https://a/cb"));
        assert_eq!(config.validate(), Err(ConfigError::MissingField("client_id")));

        let config = ProviderConfig::from_options(StrategyOptions::new("abc", " ", "https://a/cb"));
        assert_eq!(config.validate(), Err(ConfigError::MissingField("client_secret")));

        let config = ProviderConfig::from_options(StrategyOptions::new("abc", "xyz", ""));
        assert_eq!(config.validate(), Err(ConfigError::MissingField("callback_url")));
    }

    #[test]
    fn test_validate_rejects_bad_urls() {
        let config = ProviderConfig::from_options(StrategyOptions::new("abc", "xyz", "not a url"));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl { field: "callback_url", .. })
        ));

        assert_eq!(ProviderConfig::from_options(options()).validate(), Ok(()));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let parsed: StrategyOptions = serde_json::from_str(
            r#"{"client_id":"abc","client_secret":"xyz","callback_url":"https://app.example/cb"}"#,
        )
        .unwrap();

        assert_eq!(parsed, options());
        assert!(parsed.scope.is_empty());
    }
}
