//! Generic authorization-code flow runner.

use std::sync::Arc;

use stripe_auth_domain::{
    AccessToken, AccountProfile, AuthError, AuthOutcome, AuthRequest, RefreshToken,
};

use super::ProviderStrategy;
use crate::ports::{OAuth2Engine, Verify};

/// Error code providers send when the user declines the authorization.
const ACCESS_DENIED: &str = "access_denied";

/// Drives one request through the authorization-code flow.
///
/// - Callback with a non-empty `error`: a denial becomes [`AuthOutcome::Fail`], any other
///   error becomes [`AuthError::Authorization`].
/// - Callback with `code`: exchange through `engine`, fetch the profile
///   through `strategy`, then hand everything to `verify`.
/// - Otherwise: redirect to the authorize URL built from
///   `strategy.authorization_params(options)`.
///
/// # Errors
/// Exchange and profile errors are returned as they were raised. Verify
/// errors are wrapped in [`AuthError::Verification`]. A verify callback that
/// panics is reported once as [`AuthError::VerifyAborted`].
pub async fn authenticate<S, E, V>(
    strategy: &S,
    engine: &E,
    verify: &Arc<V>,
    request: AuthRequest,
) -> Result<AuthOutcome<V::User>, AuthError>
where
    S: ProviderStrategy + ?Sized,
    E: OAuth2Engine + ?Sized,
    V: Verify,
{
    let AuthRequest {
        mut callback,
        options,
    } = request;
    let provider = strategy.name();

    if let Some(error) = callback.error.take().filter(|e| !e.is_empty()) {
        if error == ACCESS_DENIED {
            tracing::info!(provider, "authorization denied by user");
            let message = callback
                .error_description
                .unwrap_or_else(|| "access denied".to_string());
            return Ok(AuthOutcome::Fail { message });
        }
        tracing::warn!(provider, error = %error, "provider returned an authorization error");
        return Err(AuthError::Authorization {
            error,
            description: callback.error_description,
        });
    }

    if let Some(code) = callback.code() {
        let grant = engine
            .exchange_code(&code)
            .await
            .inspect_err(|e| tracing::warn!(provider, error = %e, "code exchange failed"))?;
        tracing::debug!(provider, token = %grant.access_token.preview(), "code exchanged");

        let profile = strategy.fetch_profile(&grant.access_token).await?;
        let (access_token, refresh_token) = grant.into_tokens();
        return run_verify(provider, verify, access_token, refresh_token, profile).await;
    }

    let params = strategy.authorization_params(options);
    let url = engine.authorization_url(&params)?;
    tracing::debug!(provider, %url, "redirecting to provider");
    Ok(AuthOutcome::Redirect { url })
}

/// Runs the verify callback in its own task so a panic in host code stays
/// on that task. The callback is invoked exactly once.
async fn run_verify<V: Verify>(
    provider: &str,
    verify: &Arc<V>,
    access_token: AccessToken,
    refresh_token: Option<RefreshToken>,
    profile: AccountProfile,
) -> Result<AuthOutcome<V::User>, AuthError> {
    let verify = Arc::clone(verify);
    let task =
        tokio::spawn(async move { verify.verify(access_token, refresh_token, profile).await });

    match task.await {
        Ok(Ok(verified)) => Ok(verified.into()),
        Ok(Err(e)) => {
            tracing::debug!(provider, error = %e, "verify callback returned an error");
            Err(AuthError::Verification(e))
        }
        Err(join_error) => {
            let reason = if join_error.is_panic() {
                "verify callback panicked"
            } else {
                "verify callback was cancelled"
            };
            tracing::error!(provider, "{reason}");
            Err(AuthError::VerifyAborted(reason.to_string()))
        }
    }
}
