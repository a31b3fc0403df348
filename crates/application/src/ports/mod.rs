//! Port definitions (interfaces)
//!
//! Ports are the collaborators the strategy delegates to: the OAuth2
//! engine, the provider API client and the host's verify callback.

mod account_client;
mod oauth2_engine;
mod verify;

pub use account_client::{AccountClient, AccountClientFactory};
pub use oauth2_engine::OAuth2Engine;
pub use verify::{Verify, VerifyFn, verify_fn};
