//! Name-keyed strategy registry owned by the host.

use std::collections::HashMap;
use std::sync::Arc;

use stripe_auth_domain::{AuthError, AuthOutcome, AuthRequest};

use super::Strategy;

/// Strategies a host can route requests to, keyed by [`Strategy`] name.
pub struct StrategyRegistry<U> {
    strategies: HashMap<String, Arc<dyn Strategy<User = U>>>,
}

impl<U: Send + 'static> StrategyRegistry<U> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Registers a strategy under its own name, replacing any previous one.
    pub fn register<S>(&mut self, strategy: S) -> &mut Self
    where
        S: Strategy<User = U> + 'static,
    {
        let name = strategy.name().to_string();
        tracing::debug!(strategy = %name, "registering strategy");
        self.strategies.insert(name, Arc::new(strategy));
        self
    }

    /// Looks up a strategy.
    ///
    /// # Errors
    /// Returns [`AuthError::UnknownStrategy`] if nothing is registered under `name`.
    pub fn get(&self, name: &str) -> Result<&Arc<dyn Strategy<User = U>>, AuthError> {
        self.strategies
            .get(name)
            .ok_or_else(|| AuthError::UnknownStrategy(name.to_string()))
    }

    /// Returns true if a strategy is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.strategies.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Routes a request to the named strategy.
    ///
    /// # Errors
    /// Returns [`AuthError::UnknownStrategy`] for unknown names, otherwise
    /// whatever the strategy returns.
    pub async fn authenticate(
        &self,
        name: &str,
        request: AuthRequest,
    ) -> Result<AuthOutcome<U>, AuthError> {
        let strategy = self.get(name)?;
        strategy.authenticate(request).await
    }
}

impl<U: Send + 'static> Default for StrategyRegistry<U> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::strategy::testing::{RecordingVerify, StubAccounts, TestStrategy, options, strategy};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = StrategyRegistry::new();
        registry.register(strategy());

        assert!(registry.contains("stripe"));
        assert!(registry.get("stripe").is_ok());
        assert!(matches!(
            registry.get("github"),
            Err(AuthError::UnknownStrategy(ref name)) if name == "github"
        ));
    }

    #[test]
    fn test_register_several_platforms() {
        let mut registry = StrategyRegistry::new();
        registry
            .register(strategy())
            .register(
                TestStrategy::new(options(), StubAccounts::default(), RecordingVerify::default())
                    .unwrap()
                    .named("stripe-eu"),
            );

        assert_eq!(registry.names(), vec!["stripe", "stripe-eu"]);
    }

    #[tokio::test]
    async fn test_authenticate_routes_by_name() {
        let verify = RecordingVerify::default();
        let mut registry = StrategyRegistry::new();
        registry.register(
            TestStrategy::new(options(), StubAccounts::default(), verify.clone()).unwrap(),
        );

        let outcome = registry
            .authenticate("stripe", AuthRequest::from_query("code=ac_1").unwrap())
            .await
            .unwrap();

        assert_eq!(outcome.into_user(), Some("user:acct_1".to_string()));
        assert_eq!(verify.calls(), 1);

        let error = registry
            .authenticate("paypal", AuthRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(error, AuthError::UnknownStrategy(_)));
    }
}
