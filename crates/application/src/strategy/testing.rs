//! Stub ports shared by the strategy tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use stripe_auth_domain::{
    AccessToken, AccountProfile, AuthorizationCode, ConfigError, ExchangeError, ProviderApiError,
    ProviderConfig, RefreshToken, StrategyOptions, TokenGrant, Verified, VerifyError,
};

use super::StripeStrategy;
use crate::ports::{AccountClient, AccountClientFactory, OAuth2Engine, Verify};

pub type TestStrategy = StripeStrategy<StubEngine, StubAccounts, RecordingVerify>;

pub fn options() -> StrategyOptions {
    StrategyOptions::new("abc", "xyz", "https://app.example/cb")
}

pub fn strategy() -> TestStrategy {
    TestStrategy::new(options(), StubAccounts::default(), RecordingVerify::default()).unwrap()
}

/// Engine that hands out a fixed token for any code except `bad_code`.
pub struct StubEngine {
    config: ProviderConfig,
    token: String,
}

impl StubEngine {
    pub fn with_token(token: &str) -> Self {
        Self {
            config: ProviderConfig::from_options(options()),
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl OAuth2Engine for StubEngine {
    fn from_config(config: ProviderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            token: "tok_live_1".to_string(),
        })
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }

    async fn exchange_code(&self, code: &AuthorizationCode) -> Result<TokenGrant, ExchangeError> {
        if code.secret() == "bad_code" {
            return Err(ExchangeError::Rejected {
                error: "invalid_grant".to_string(),
                description: Some(format!("Authorization code does not exist: {}", code.secret())),
            });
        }
        Ok(TokenGrant::new(self.token.as_str())
            .with_refresh_token("rt_live_1")
            .with_stripe_user_id("acct_1"))
    }
}

/// Account client factory answering from a fixed table of tokens.
#[derive(Clone, Default)]
pub struct StubAccounts {
    tokens: Arc<Mutex<Vec<String>>>,
    retrievals: Arc<AtomicUsize>,
}

impl StubAccounts {
    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().expect("Lock poisoned").clone()
    }

    pub fn retrievals(&self) -> usize {
        self.retrievals.load(Ordering::SeqCst)
    }
}

pub struct StubAccountClient {
    token: String,
    retrievals: Arc<AtomicUsize>,
}

impl AccountClientFactory for StubAccounts {
    type Client = StubAccountClient;

    fn for_token(&self, access_token: &AccessToken) -> StubAccountClient {
        self.tokens
            .lock()
            .expect("Lock poisoned")
            .push(access_token.secret().to_string());
        StubAccountClient {
            token: access_token.secret().to_string(),
            retrievals: Arc::clone(&self.retrievals),
        }
    }
}

#[async_trait]
impl AccountClient for StubAccountClient {
    async fn retrieve_account(&self) -> Result<AccountProfile, ProviderApiError> {
        self.retrievals.fetch_add(1, Ordering::SeqCst);
        match self.token.as_str() {
            "tok_live_1" => Ok(AccountProfile::new(
                json!({"id": "acct_1", "business_name": "Acme"}),
            )),
            "tok_restricted" => Ok(AccountProfile::new(json!({"id": "acct_restricted"}))),
            "tok_broken_verify" => Ok(AccountProfile::new(json!({"id": "acct_broken"}))),
            "tok_expired" => Err(ProviderApiError::InvalidToken {
                message: "invalid_token".to_string(),
            }),
            other => Err(ProviderApiError::Api {
                status: 404,
                kind: Some("invalid_request_error".to_string()),
                code: Some("resource_missing".to_string()),
                message: format!("No such token: {other}"),
            }),
        }
    }
}

/// Verify callback that records every call.
#[derive(Clone, Default)]
pub struct RecordingVerify {
    calls: Arc<AtomicUsize>,
    last: Arc<Mutex<Option<(String, Option<String>)>>>,
}

impl RecordingVerify {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_tokens(&self) -> Option<(String, Option<String>)> {
        self.last.lock().expect("Lock poisoned").clone()
    }
}

#[async_trait]
impl Verify for RecordingVerify {
    type User = String;

    async fn verify(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        profile: AccountProfile,
    ) -> Result<Verified<String>, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().expect("Lock poisoned") = Some((
            access_token.secret().to_string(),
            refresh_token.map(|t| t.secret().to_string()),
        ));

        match profile.id() {
            Some("acct_broken") => Err("user store unavailable".into()),
            Some(id @ "acct_restricted") => {
                Ok(Verified::rejected(format!("account {id} is not allowed")))
            }
            Some(id) => Ok(Verified::user(format!("user:{id}"))),
            None => Ok(Verified::rejected("account has no id")),
        }
    }
}

/// Verify callback with a bug in it.
#[derive(Clone, Default)]
pub struct PanickingVerify {
    calls: Arc<AtomicUsize>,
}

impl PanickingVerify {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Verify for PanickingVerify {
    type User = String;

    async fn verify(
        &self,
        _access_token: AccessToken,
        _refresh_token: Option<RefreshToken>,
        _profile: AccountProfile,
    ) -> Result<Verified<String>, VerifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("bug in host user lookup");
    }
}
