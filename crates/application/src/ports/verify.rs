//! Verify callback port

use std::future::Future;

use async_trait::async_trait;
use stripe_auth_domain::{AccessToken, AccountProfile, RefreshToken, Verified, VerifyError};

/// Host callback that maps a connected account to an application user.
///
/// Runs in its own task, so implementations must be `'static` and the user
/// type must be sendable across threads.
#[async_trait]
pub trait Verify: Send + Sync + 'static {
    /// Application user type.
    type User: Send + 'static;

    /// Decides who the account belongs to.
    async fn verify(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        profile: AccountProfile,
    ) -> Result<Verified<Self::User>, VerifyError>;
}

/// Adapts an async closure to [`Verify`].
pub struct VerifyFn<F> {
    f: F,
}

/// Wraps an async closure as a verify callback.
///
/// ```
/// use stripe_auth_application::ports::{Verify, verify_fn};
/// use stripe_auth_domain::{AccessToken, AccountProfile, RefreshToken, Verified, VerifyError};
///
/// let verify = verify_fn(
///     |_access: AccessToken, _refresh: Option<RefreshToken>, profile: AccountProfile| async move {
///         Ok::<_, VerifyError>(Verified::user(profile.id().unwrap_or_default().to_string()))
///     },
/// );
///
/// fn assert_verify<V: Verify>(_: &V) {}
/// assert_verify(&verify);
/// ```
pub const fn verify_fn<F>(f: F) -> VerifyFn<F> {
    VerifyFn { f }
}

#[async_trait]
impl<F, Fut, U> Verify for VerifyFn<F>
where
    F: Fn(AccessToken, Option<RefreshToken>, AccountProfile) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Verified<U>, VerifyError>> + Send,
    U: Send + 'static,
{
    type User = U;

    async fn verify(
        &self,
        access_token: AccessToken,
        refresh_token: Option<RefreshToken>,
        profile: AccountProfile,
    ) -> Result<Verified<U>, VerifyError> {
        (self.f)(access_token, refresh_token, profile).await
    }
}
