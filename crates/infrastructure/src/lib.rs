//! Stripe Auth Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus an options loader.

pub mod settings;
pub mod stripe;

pub use settings::OptionsLoader;
pub use stripe::{DEFAULT_API_BASE, StripeAccountClient, StripeAccountClients};
