//! The connected account record returned by `GET /v1/account`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw account record, passed to the verify callback exactly as received.
///
/// No schema is enforced. The accessors only read well-known Stripe fields
/// and never modify the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountProfile(Value);

impl AccountProfile {
    /// Wraps a raw record.
    #[must_use]
    pub const fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The record as received.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// Takes the record out.
    #[must_use]
    pub fn into_raw(self) -> Value {
        self.0
    }

    /// Account id (`acct_...`).
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.str_field(&["id"])
    }

    /// Business name, from `business_profile.name` or the legacy top-level field.
    #[must_use]
    pub fn business_name(&self) -> Option<&str> {
        self.str_field(&["business_profile", "name"])
            .or_else(|| self.str_field(&["business_name"]))
    }

    /// Account email.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.str_field(&["email"])
    }

    /// Two-letter country code.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.str_field(&["country"])
    }

    /// Looks up a nested field by path.
    #[must_use]
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter().try_fold(&self.0, |value, key| value.get(key))
    }

    fn str_field(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }
}

impl From<Value> for AccountProfile {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}
