//! Credentials scoped to a single request.

use super::{property, ApiCredential, CredentialPrefix};
use serde_json::{Map, Value};
use std::ops::{Deref, DerefMut};

/// Properties a request may carry in its parameter map.
const REQUEST_PROPERTIES: &[&str] = &[
    property::PROJECT_ID,
    property::CLIENT_ID,
    property::DISABLE_GZIP_CONTENT,
    property::SERVICE_ACCOUNT_EMAIL,
    property::APPLICATION_NAME,
    property::FILE_NAME,
    property::FILE_NAME_JSON,
    property::API_KEY,
    property::ENDPOINT_URL,
    property::CREDENTIAL_ON,
    property::NUMBER_OF_RETRIES,
    property::READ_TIMEOUT,
];

/// An [`ApiCredential`] under the `request-scope` prefix.
///
/// Request parameters may carry credential overrides next to ordinary
/// parameters. [`fill_in_from`](Self::fill_in_from) picks those out so the
/// remaining map can be sent as query parameters.
///
/// `RequestCredential` dereferences to [`ApiCredential`] for all setters and
/// getters.
///
/// # Example
///
/// ```rust
/// use restapi_client::RequestCredential;
/// use serde_json::{json, Map, Value};
///
/// let mut params: Map<String, Value> = serde_json::from_value(json!({
///     "credential.request-scope.apiKey": "key-123",
///     "maxResults": 10,
/// }))
/// .unwrap();
///
/// let mut credential = RequestCredential::new();
/// let removed = credential.fill_in_from(&mut params, true);
///
/// assert_eq!(credential.api_key(), Some("key-123"));
/// assert_eq!(removed.len(), 1);
/// assert!(params.contains_key("maxResults"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestCredential {
    inner: ApiCredential,
}

impl RequestCredential {
    /// Creates an empty request-scoped credential.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: ApiCredential::with_prefix(CredentialPrefix::request_scope()),
        }
    }

    /// Creates a request-scoped credential seeded with fully qualified properties.
    #[must_use]
    pub fn from_properties<K, V>(properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            inner: ApiCredential::from_properties(CredentialPrefix::request_scope(), properties),
        }
    }

    /// Copies request-scoped credential properties out of `source`.
    ///
    /// Only string values of known properties are taken. With `remove` set,
    /// the taken entries are removed from `source` and returned.
    pub fn fill_in_from(&mut self, source: &mut Map<String, Value>, remove: bool) -> Map<String, Value> {
        let mut removed = Map::new();

        for property in REQUEST_PROPERTIES {
            let key = self.inner.prefix().qualify(property);
            let Some(Value::String(value)) = source.get(&key) else {
                continue;
            };
            self.inner.set_property(key.clone(), value.clone());

            if remove {
                if let Some(value) = source.remove(&key) {
                    removed.insert(key, value);
                }
            }
        }

        removed
    }

    /// Copies every property of this credential into `target` as strings.
    pub fn populate(&self, target: &mut Map<String, Value>) {
        for (key, value) in self.inner.properties() {
            target.insert(key.to_string(), Value::String(value.to_string()));
        }
    }

    /// Returns the wrapped credential.
    #[must_use]
    pub fn into_inner(self) -> ApiCredential {
        self.inner
    }
}

impl Default for RequestCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for RequestCredential {
    type Target = ApiCredential;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for RequestCredential {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
