//! Results handed back to the host framework.

use url::Url;

/// Decision of a verify callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verified<U> {
    /// The account maps to this application user.
    User {
        /// Application user.
        user: U,
        /// Optional message for the host, e.g. "welcome back".
        info: Option<String>,
    },
    /// The account is valid but not allowed in.
    Rejected {
        /// Reason shown to the end user.
        message: String,
    },
}

impl<U> Verified<U> {
    /// Accepts the account as `user`.
    pub const fn user(user: U) -> Self {
        Self::User { user, info: None }
    }

    /// Rejects the account.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// What the host should do with the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome<U> {
    /// Send the browser to the provider.
    Redirect {
        /// Authorize URL.
        url: Url,
    },
    /// Authentication succeeded.
    Success {
        /// Application user returned by the verify callback.
        user: U,
        /// Optional message from the verify callback.
        info: Option<String>,
    },
    /// Authentication failed in an expected way (denied, rejected).
    Fail {
        /// Reason shown to the end user.
        message: String,
    },
}

impl<U> AuthOutcome<U> {
    /// Returns true for [`AuthOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn into_user(self) -> Option<U> {
        match self {
            Self::Success { user, .. } => Some(user),
            Self::Redirect { .. } | Self::Fail { .. } => None,
        }
    }
}

impl<U> From<Verified<U>> for AuthOutcome<U> {
    fn from(verified: Verified<U>) -> Self {
        match verified {
            Verified::User { user, info } => Self::Success { user, info },
            Verified::Rejected { message } => Self::Fail { message },
        }
    }
}
