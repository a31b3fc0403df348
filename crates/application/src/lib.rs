//! Stripe Auth Application - Strategy and ports
//!
//! This crate wires the Stripe Connect strategy to its collaborators:
//! - Ports for the OAuth2 engine, the provider API client and the verify callback
//! - The host plugin contract and the generic authorization-code flow
//! - The Stripe Connect strategy and a name-keyed registry

pub mod ports;
pub mod strategy;

pub use ports::{AccountClient, AccountClientFactory, OAuth2Engine, Verify, VerifyFn, verify_fn};
pub use strategy::{
    AuthorizationParamsHook, ProviderStrategy, STRATEGY_NAME, Strategy, StrategyRegistry,
    StripeStrategy, authenticate,
};
