//! Validated newtype wrappers for configuration values.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated credential prefix.
///
/// The prefix groups the properties of one credential, so a single property
/// source can configure several APIs side by side:
///
/// ```text
/// credential.default.clientId=...
/// credential.billing.clientId=...
/// ```
///
/// # Example
///
/// ```rust
/// use restapi_client::CredentialPrefix;
///
/// let prefix = CredentialPrefix::new("billing").unwrap();
/// assert_eq!(prefix.as_ref(), "billing");
/// assert!(CredentialPrefix::new("").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CredentialPrefix(String);

impl CredentialPrefix {
    /// The prefix used when none is given.
    pub const DEFAULT: &'static str = "default";

    /// The prefix of request-scoped credentials.
    pub const REQUEST_SCOPE: &'static str = "request-scope";

    /// Creates a new validated prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPrefix`] if the prefix is empty.
    pub fn new(prefix: impl Into<String>) -> Result<Self, ConfigError> {
        let prefix = prefix.into();
        if prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        Ok(Self(prefix))
    }

    /// Returns the prefix used for request-scoped credentials.
    #[must_use]
    pub fn request_scope() -> Self {
        Self(Self::REQUEST_SCOPE.to_string())
    }

    /// Returns the fully qualified property key, `credential.{prefix}.{property}`.
    #[must_use]
    pub fn qualify(&self, property: &str) -> String {
        format!("credential.{}.{property}", self.0)
    }
}

impl Default for CredentialPrefix {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl AsRef<str> for CredentialPrefix {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CredentialPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CredentialPrefix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for CredentialPrefix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
