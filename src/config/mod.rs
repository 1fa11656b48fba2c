//! Credential configuration for REST API clients.
//!
//! This module provides the credential holder that concrete API clients read
//! their settings from.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiCredential`]: A property map of credential settings under a prefix
//! - [`RequestCredential`]: Credentials scoped to a single request
//! - [`CredentialPrefix`]: A validated prefix grouping one credential's properties
//!
//! Properties are stored under fully qualified keys of the form
//! `credential.{prefix}.{property}`, so one properties file can hold the
//! credentials of several APIs.
//!
//! # Example
//!
//! ```rust
//! use restapi_client::ApiCredential;
//! use std::time::Duration;
//!
//! let mut credential = ApiCredential::new();
//! credential
//!     .set_project_id("my-project")
//!     .set_client_id("client-123")
//!     .set_number_of_retries(3);
//!
//! assert_eq!(credential.project_id(), Some("my-project"));
//! assert_eq!(credential.application_name(), Some("ctoolkit:facade-api"));
//! assert_eq!(credential.number_of_retries(), Ok(3));
//! assert_eq!(credential.read_timeout(), Ok(Duration::from_millis(20_000)));
//! ```

mod newtypes;
mod properties;
mod request;

pub use newtypes::CredentialPrefix;
pub use request::RequestCredential;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Application name used when none is configured.
pub const DEFAULT_APP_NAME: &str = "ctoolkit:facade-api";

/// Number of retries used when none is configured.
pub const DEFAULT_NUMBER_OF_RETRIES: u32 = 1;

/// Read timeout in milliseconds used when none is configured.
pub const DEFAULT_READ_TIMEOUT: u64 = 20_000;

/// Property names, without the `credential.{prefix}.` qualifier.
pub mod property {
    /// Cloud project identifier.
    pub const PROJECT_ID: &str = "projectId";
    /// OAuth client identifier.
    pub const CLIENT_ID: &str = "clientId";
    /// OAuth client secret.
    pub const CLIENT_SECRET: &str = "clientSecret";
    /// Comma separated OAuth scopes.
    pub const SCOPES: &str = "scopes";
    /// Whether gzip content encoding is disabled.
    pub const DISABLE_GZIP_CONTENT: &str = "disableGZipContent";
    /// Service account e-mail.
    pub const SERVICE_ACCOUNT_EMAIL: &str = "serviceAccountEmail";
    /// Application name reported to the API.
    pub const APPLICATION_NAME: &str = "appName";
    /// Path of a P12 key file.
    pub const FILE_NAME: &str = "fileName";
    /// Path of a JSON key file.
    pub const FILE_NAME_JSON: &str = "fileNameJson";
    /// API key.
    pub const API_KEY: &str = "apiKey";
    /// API endpoint URL override.
    pub const ENDPOINT_URL: &str = "endpointUrl";
    /// Whether the credential is switched on.
    pub const CREDENTIAL_ON: &str = "on";
    /// Number of retries of a failed call.
    pub const NUMBER_OF_RETRIES: &str = "numberOfRetries";
    /// Read timeout in milliseconds.
    pub const READ_TIMEOUT: &str = "readTimeout";
}

const MASKED: &[&str] = &[property::CLIENT_SECRET, property::API_KEY];

/// Credential settings of one API client.
///
/// `ApiCredential` is a property map. Setters ignore empty input so that
/// optional values can be passed through unchecked; the application name
/// falls back to [`DEFAULT_APP_NAME`].
///
/// # Security
///
/// The `Debug` implementation masks the client secret and the API key.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiCredential {
    prefix: CredentialPrefix,
    properties: BTreeMap<String, String>,
}

impl ApiCredential {
    /// Creates a credential under the `default` prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(CredentialPrefix::default())
    }

    /// Creates a credential under the given prefix.
    #[must_use]
    pub fn with_prefix(prefix: CredentialPrefix) -> Self {
        let mut credential = Self {
            prefix,
            properties: BTreeMap::new(),
        };
        credential.set_application_name("");
        credential
    }

    /// Creates a credential under the given prefix, seeded with fully
    /// qualified properties.
    #[must_use]
    pub fn from_properties<K, V>(
        prefix: CredentialPrefix,
        properties: impl IntoIterator<Item = (K, V)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut credential = Self::with_prefix(prefix);
        for (key, value) in properties {
            credential.set_property(key, value);
        }
        credential
    }

    /// Returns the prefix of this credential.
    #[must_use]
    pub const fn prefix(&self) -> &CredentialPrefix {
        &self.prefix
    }

    /// Loads fully qualified properties from `.properties` text.
    ///
    /// Existing properties with the same key are overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MalformedPropertyLine`] if a line has no key.
    pub fn load_str(&mut self, source: &str) -> Result<&mut Self, ConfigError> {
        let pairs = properties::parse(source)?;
        tracing::debug!(
            prefix = %self.prefix,
            count = pairs.len(),
            "Loaded credential properties"
        );
        for (key, value) in pairs {
            self.set_property(key, value);
        }
        Ok(self)
    }

    /// Loads fully qualified properties from a `.properties` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::PropertiesNotFound`] if the file does not exist,
    /// [`ConfigError::PropertiesRead`] if it cannot be read, and
    /// [`ConfigError::MalformedPropertyLine`] if its content is malformed.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, ConfigError> {
        let path = path.as_ref();
        let shown = path.display().to_string();
        let source = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::PropertiesNotFound { path: shown.clone() }
            } else {
                ConfigError::PropertiesRead {
                    path: shown.clone(),
                    reason: e.to_string(),
                }
            }
        })?;
        tracing::debug!(path = %shown, "Reading credential properties file");
        self.load_str(&source)
    }

    /// Sets a raw, fully qualified property.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Returns a raw, fully qualified property.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Iterates over all fully qualified properties in key order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the value of an unqualified property under this prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProperty`] if `property` is empty.
    pub fn string_value(&self, property: &str) -> Result<Option<&str>, ConfigError> {
        if property.is_empty() {
            return Err(ConfigError::EmptyProperty);
        }
        Ok(self.property(&self.prefix.qualify(property)))
    }

    fn get(&self, property: &str) -> Option<&str> {
        self.property(&self.prefix.qualify(property))
    }

    fn set_non_empty(&mut self, property: &str, value: &str) -> &mut Self {
        if !value.is_empty() {
            let key = self.prefix.qualify(property);
            self.set_property(key, value);
        }
        self
    }

    fn set_flag(&mut self, property: &str, value: bool) -> &mut Self {
        let key = self.prefix.qualify(property);
        self.set_property(key, value.to_string())
    }

    fn flag(&self, property: &str) -> bool {
        self.get(property)
            .is_some_and(|value| value.eq_ignore_ascii_case("true"))
    }

    /// Sets the project id. Empty input is ignored.
    pub fn set_project_id(&mut self, project_id: &str) -> &mut Self {
        self.set_non_empty(property::PROJECT_ID, project_id)
    }

    /// Sets the client id. Empty input is ignored.
    pub fn set_client_id(&mut self, client_id: &str) -> &mut Self {
        self.set_non_empty(property::CLIENT_ID, client_id)
    }

    /// Sets the client secret. Empty input is ignored.
    pub fn set_client_secret(&mut self, client_secret: &str) -> &mut Self {
        self.set_non_empty(property::CLIENT_SECRET, client_secret)
    }

    /// Sets the comma separated scopes. Empty input is ignored.
    pub fn set_scopes(&mut self, scopes: &str) -> &mut Self {
        self.set_non_empty(property::SCOPES, scopes)
    }

    /// Sets whether gzip content encoding is disabled.
    pub fn set_disable_gzip_content(&mut self, disable: bool) -> &mut Self {
        self.set_flag(property::DISABLE_GZIP_CONTENT, disable)
    }

    /// Sets the service account e-mail. Empty input is ignored.
    pub fn set_service_account_email(&mut self, email: &str) -> &mut Self {
        self.set_non_empty(property::SERVICE_ACCOUNT_EMAIL, email)
    }

    /// Sets the application name; empty input restores [`DEFAULT_APP_NAME`].
    pub fn set_application_name(&mut self, name: &str) -> &mut Self {
        let name = if name.is_empty() { DEFAULT_APP_NAME } else { name };
        self.set_non_empty(property::APPLICATION_NAME, name)
    }

    /// Sets the P12 key file name. Empty input is ignored.
    pub fn set_file_name(&mut self, file_name: &str) -> &mut Self {
        self.set_non_empty(property::FILE_NAME, file_name)
    }

    /// Sets the JSON key file name. Empty input is ignored.
    pub fn set_file_name_json(&mut self, file_name: &str) -> &mut Self {
        self.set_non_empty(property::FILE_NAME_JSON, file_name)
    }

    /// Sets the API key. Empty input is ignored.
    pub fn set_api_key(&mut self, api_key: &str) -> &mut Self {
        self.set_non_empty(property::API_KEY, api_key)
    }

    /// Sets the endpoint URL. Empty input is ignored.
    pub fn set_endpoint_url(&mut self, endpoint_url: &str) -> &mut Self {
        self.set_non_empty(property::ENDPOINT_URL, endpoint_url)
    }

    /// Switches the credential on or off.
    pub fn set_credential_on(&mut self, on: bool) -> &mut Self {
        self.set_flag(property::CREDENTIAL_ON, on)
    }

    /// Sets the number of retries. A negative count is replaced by `1`.
    pub fn set_number_of_retries(&mut self, retries: i32) -> &mut Self {
        let retries = u32::try_from(retries).unwrap_or_else(|_| {
            tracing::warn!(retries, "Negative number of retries, using 1");
            DEFAULT_NUMBER_OF_RETRIES
        });
        let key = self.prefix.qualify(property::NUMBER_OF_RETRIES);
        self.set_property(key, retries.to_string())
    }

    /// Sets the read timeout in milliseconds. A negative timeout is replaced by `0`.
    pub fn set_read_timeout(&mut self, millis: i64) -> &mut Self {
        let millis = u64::try_from(millis).unwrap_or_else(|_| {
            tracing::warn!(millis, "Negative read timeout, using 0");
            0
        });
        let key = self.prefix.qualify(property::READ_TIMEOUT);
        self.set_property(key, millis.to_string())
    }

    /// Returns the project id.
    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.get(property::PROJECT_ID)
    }

    /// Returns the client id.
    #[must_use]
    pub fn client_id(&self) -> Option<&str> {
        self.get(property::CLIENT_ID)
    }

    /// Returns the client secret.
    #[must_use]
    pub fn client_secret(&self) -> Option<&str> {
        self.get(property::CLIENT_SECRET)
    }

    /// Returns the comma separated scopes.
    #[must_use]
    pub fn scopes(&self) -> Option<&str> {
        self.get(property::SCOPES)
    }

    /// Returns the scopes split on commas, trimmed, empty entries dropped.
    #[must_use]
    pub fn scope_list(&self) -> Vec<&str> {
        self.scopes()
            .map(|scopes| {
                scopes
                    .split(',')
                    .map(str::trim)
                    .filter(|scope| !scope.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns whether gzip content encoding is disabled; `false` if unset.
    #[must_use]
    pub fn is_disable_gzip_content(&self) -> bool {
        self.flag(property::DISABLE_GZIP_CONTENT)
    }

    /// Returns the service account e-mail.
    #[must_use]
    pub fn service_account_email(&self) -> Option<&str> {
        self.get(property::SERVICE_ACCOUNT_EMAIL)
    }

    /// Returns the application name.
    #[must_use]
    pub fn application_name(&self) -> Option<&str> {
        self.get(property::APPLICATION_NAME)
    }

    /// Returns the P12 key file name.
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.get(property::FILE_NAME)
    }

    /// Returns the JSON key file name.
    #[must_use]
    pub fn file_name_json(&self) -> Option<&str> {
        self.get(property::FILE_NAME_JSON)
    }

    /// Returns the API key.
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.get(property::API_KEY)
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub fn endpoint_url(&self) -> Option<&str> {
        self.get(property::ENDPOINT_URL)
    }

    /// Returns whether the credential is switched on; `false` if unset.
    #[must_use]
    pub fn is_credential_on(&self) -> bool {
        self.flag(property::CREDENTIAL_ON)
    }

    /// Returns the number of retries, [`DEFAULT_NUMBER_OF_RETRIES`] if unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPropertyValue`] if the stored value is not
    /// a non-negative integer.
    pub fn number_of_retries(&self) -> Result<u32, ConfigError> {
        self.get(property::NUMBER_OF_RETRIES)
            .map_or(Ok(DEFAULT_NUMBER_OF_RETRIES), |value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPropertyValue {
                        property: property::NUMBER_OF_RETRIES,
                        value: value.to_string(),
                    })
            })
    }

    /// Returns the read timeout, [`DEFAULT_READ_TIMEOUT`] milliseconds if unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPropertyValue`] if the stored value is not
    /// a non-negative integer.
    pub fn read_timeout(&self) -> Result<Duration, ConfigError> {
        self.get(property::READ_TIMEOUT)
            .map_or(Ok(DEFAULT_READ_TIMEOUT), |value| {
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidPropertyValue {
                        property: property::READ_TIMEOUT,
                        value: value.to_string(),
                    })
            })
            .map(Duration::from_millis)
    }
}

impl Default for ApiCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked: BTreeMap<&str, &str> = self
            .properties
            .iter()
            .map(|(key, value)| {
                let secret = MASKED
                    .iter()
                    .any(|property| key == &self.prefix.qualify(property));
                (key.as_str(), if secret { "*****" } else { value.as_str() })
            })
            .collect();

        f.debug_struct("ApiCredential")
            .field("prefix", &self.prefix)
            .field("properties", &masked)
            .finish()
    }
}

// Verify credential types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiCredential>();
    assert_send_sync::<RequestCredential>();
};
