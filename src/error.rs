//! Error types for the REST API client facade.
//!
//! This module contains the error types raised while building resource
//! identifiers and while assembling API credentials.
//!
//! # Error Handling
//!
//! Every failure here is a local, synchronous precondition violation. Nothing
//! is retried and no partially built value is ever handed back: either the
//! constructor succeeds or the caller gets an error and nothing else.
//!
//! # Example
//!
//! ```rust
//! use restapi_client::{Identifier, IdentifierError};
//!
//! let result = Identifier::new(["abc", ""]);
//! assert!(matches!(
//!     result,
//!     Err(IdentifierError::MissingValue { position: 1, .. })
//! ));
//! ```

use thiserror::Error;

/// Errors that can occur while building or traversing an [`Identifier`].
///
/// [`Identifier`]: crate::Identifier
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// A required identifier value is absent or empty.
    ///
    /// Raised when the value sequence itself is empty (position `0`), or when
    /// any element is absent or an empty string.
    #[error("Identifier value at position {position} is missing or empty during {operation}. Every identifier value must be present and non-empty.")]
    MissingValue {
        /// The operation that was being performed (`construction` or `add`).
        operation: &'static str,
        /// Zero-based position of the offending value in the input.
        position: usize,
    },

    /// The controller text starts with a path separator.
    #[error("Invalid controller '{controller}'. A controller must not start with '/'.")]
    InvalidArgument {
        /// The rejected controller text, trimmed.
        controller: String,
    },

    /// A parent or child link was dereferenced without being present.
    #[error("Identifier has no {link}. Check has_{link}() before accessing it.")]
    NullReference {
        /// The link that was requested (`parent` or `child`).
        link: &'static str,
    },
}

impl IdentifierError {
    /// Returns true if this error reports a missing or empty value.
    #[must_use]
    pub const fn is_missing_value(&self) -> bool {
        matches!(self, Self::MissingValue { .. })
    }

    /// Returns true if this error reports a rejected controller.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    /// Returns true if this error reports an absent parent or child.
    #[must_use]
    pub const fn is_null_reference(&self) -> bool {
        matches!(self, Self::NullReference { .. })
    }
}

/// Errors that can occur while configuring API credentials.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Credential prefix cannot be empty.
    #[error("Credential prefix cannot be empty. Please provide a prefix such as 'default'.")]
    EmptyPrefix,

    /// Property name cannot be empty.
    #[error("Property name cannot be empty. The property is a mandatory input.")]
    EmptyProperty,

    /// The properties file does not exist.
    #[error("The properties file at '{path}' has not been found.")]
    PropertiesNotFound {
        /// The path that was looked up.
        path: String,
    },

    /// The properties file could not be read.
    #[error("Reading from the properties file '{path}' has failed: {reason}")]
    PropertiesRead {
        /// The path that was read.
        path: String,
        /// The underlying I/O failure.
        reason: String,
    },

    /// A properties line has no key.
    #[error("Malformed properties line: '{line}'. Expected 'key=value' or 'key: value'.")]
    MalformedPropertyLine {
        /// The offending line, trimmed.
        line: String,
    },

    /// A stored property value cannot be parsed into its expected type.
    #[error("Invalid value '{value}' for property '{property}'.")]
    InvalidPropertyValue {
        /// The unprefixed property name.
        property: &'static str,
        /// The stored raw value.
        value: String,
    },
}
