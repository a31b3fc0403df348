//! Stripe API adapters

mod account_client;

pub use account_client::{DEFAULT_API_BASE, StripeAccountClient, StripeAccountClients};
