//! Stripe Auth Domain - Core types
//!
//! This crate defines the configuration, credentials, account record and
//! error types of the Stripe Connect authentication strategy.
//! All types here are pure Rust with no I/O dependencies.

pub mod account;
pub mod config;
pub mod error;
pub mod outcome;
pub mod params;
pub mod token;

pub use account::AccountProfile;
pub use config::{
    DEFAULT_AUTHORIZATION_URL, DEFAULT_SCOPE_SEPARATOR, DEFAULT_TOKEN_URL, ProviderConfig,
    StrategyOptions,
};
pub use error::{
    AuthError, AuthResult, ConfigError, ExchangeError, ProfileFetchError, ProviderApiError,
    VerifyError,
};
pub use outcome::{AuthOutcome, Verified};
pub use params::{
    AuthRequest, AuthorizationParams, CallbackParams, StripeConnectParams, StripeLanding,
    authorization_url,
};
pub use token::{AccessToken, AuthorizationCode, RefreshToken, TokenGrant};
