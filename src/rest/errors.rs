//! HTTP failure and resource error types.
//!
//! The facade maps non-successful HTTP status codes to semantic failure
//! variants so callers can match on the kind of failure instead of the raw
//! code:
//!
//! - **400**: [`HttpFailure::BadRequest`]
//! - **401**: [`HttpFailure::Unauthorized`]
//! - **403**: [`HttpFailure::Forbidden`]
//! - **404**: [`HttpFailure::NotFound`]
//! - **408**: [`HttpFailure::RequestTimeout`]
//! - **409**: [`HttpFailure::Conflict`]
//! - **Other 4xx**: [`HttpFailure::ClientError`]
//! - **500**: [`HttpFailure::InternalServerError`]
//! - **503**: [`HttpFailure::ServiceUnavailable`]
//! - **Anything else**: [`HttpFailure::RemoteServerError`]
//!
//! # Example
//!
//! ```rust
//! use restapi_client::rest::HttpFailure;
//! use serde_json::json;
//!
//! let failure = HttpFailure::from_http_response(404, &json!({"error": "Order not found"}));
//! assert!(matches!(failure, HttpFailure::NotFound { .. }));
//! assert_eq!(failure.message(), Some("Order not found"));
//! assert!(failure.is_client_error());
//! ```

use crate::error::IdentifierError;
use thiserror::Error;

/// A non-successful HTTP response, classified by status code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HttpFailure {
    /// The request was malformed (HTTP 400).
    #[error("Bad request (400){}", detail(.message.as_deref()))]
    BadRequest {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The request lacks valid authentication (HTTP 401).
    #[error("Unauthorized (401){}", detail(.message.as_deref()))]
    Unauthorized {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The authenticated caller may not access the resource (HTTP 403).
    #[error("Forbidden (403){}", detail(.message.as_deref()))]
    Forbidden {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The resource does not exist (HTTP 404).
    #[error("Not found (404){}", detail(.message.as_deref()))]
    NotFound {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The server timed out waiting for the request (HTTP 408).
    #[error("Request timeout (408){}", detail(.message.as_deref()))]
    RequestTimeout {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The request conflicts with the current resource state (HTTP 409).
    #[error("Conflict (409){}", detail(.message.as_deref()))]
    Conflict {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// Any other client error (HTTP 4xx).
    #[error("Client error ({code}){}", detail(.message.as_deref()))]
    ClientError {
        /// The HTTP status code.
        code: u16,
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The server failed to process the request (HTTP 500).
    #[error("Internal server error (500){}", detail(.message.as_deref()))]
    InternalServerError {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// The server is temporarily unable to handle the request (HTTP 503).
    #[error("Service unavailable (503){}", detail(.message.as_deref()))]
    ServiceUnavailable {
        /// Message returned by the remote server.
        message: Option<String>,
    },

    /// Any other remote failure (HTTP 5xx or an unexpected code).
    #[error("Remote server error ({code}){}", detail(.message.as_deref()))]
    RemoteServerError {
        /// The HTTP status code.
        code: u16,
        /// Message returned by the remote server.
        message: Option<String>,
    },
}

fn detail(message: Option<&str>) -> String {
    message.map_or_else(String::new, |message| format!(": {message}"))
}

impl HttpFailure {
    /// Classifies a status code.
    #[must_use]
    pub fn from_status(code: u16, message: Option<String>) -> Self {
        match code {
            400 => Self::BadRequest { message },
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            408 => Self::RequestTimeout { message },
            409 => Self::Conflict { message },
            400..=499 => Self::ClientError { code, message },
            500 => Self::InternalServerError { message },
            503 => Self::ServiceUnavailable { message },
            _ => Self::RemoteServerError { code, message },
        }
    }

    /// Classifies a status code, taking the message from a JSON error body.
    ///
    /// The message is read from `error` or `message`. An `error` object is
    /// searched for a nested `message`, as returned by Google-style APIs:
    ///
    /// ```json
    /// { "error": { "code": 409, "message": "Already exists" } }
    /// ```
    #[must_use]
    pub fn from_http_response(code: u16, body: &serde_json::Value) -> Self {
        Self::from_status(code, parse_error_message(body))
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest { .. } => 400,
            Self::Unauthorized { .. } => 401,
            Self::Forbidden { .. } => 403,
            Self::NotFound { .. } => 404,
            Self::RequestTimeout { .. } => 408,
            Self::Conflict { .. } => 409,
            Self::InternalServerError { .. } => 500,
            Self::ServiceUnavailable { .. } => 503,
            Self::ClientError { code, .. } | Self::RemoteServerError { code, .. } => *code,
        }
    }

    /// Returns the message returned by the remote server, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::BadRequest { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::NotFound { message }
            | Self::RequestTimeout { message }
            | Self::Conflict { message }
            | Self::InternalServerError { message }
            | Self::ServiceUnavailable { message }
            | Self::ClientError { message, .. }
            | Self::RemoteServerError { message, .. } => message.as_deref(),
        }
    }

    /// Returns true for 4xx failures.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self.status_code(), 400..=499)
    }

    /// Returns true for every failure that is not a client error.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

fn parse_error_message(body: &serde_json::Value) -> Option<String> {
    let field = body.get("error").or_else(|| body.get("message"))?;
    match field {
        serde_json::Value::String(message) => Some(message.clone()),
        serde_json::Value::Object(map) => map
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(ToString::to_string),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Errors raised when binding an identifier to a resource path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No path of the operation takes as many ids as the identifier has
    /// segments.
    #[error("Cannot resolve path for operation '{operation}' with an identifier of depth {depth}")]
    PathResolutionFailed {
        /// The operation being attempted (e.g., "get", "list").
        operation: &'static str,
        /// Number of segments in the identifier.
        depth: usize,
    },

    /// The identifier itself was invalid.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The remote call failed.
    #[error(transparent)]
    Failure(#[from] HttpFailure),
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpFailure>();
    assert_send_sync::<ResourceError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_status_maps_known_codes() {
        assert!(matches!(
            HttpFailure::from_status(400, None),
            HttpFailure::BadRequest { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(401, None),
            HttpFailure::Unauthorized { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(403, None),
            HttpFailure::Forbidden { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(404, None),
            HttpFailure::NotFound { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(408, None),
            HttpFailure::RequestTimeout { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(409, None),
            HttpFailure::Conflict { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(500, None),
            HttpFailure::InternalServerError { .. }
        ));
        assert!(matches!(
            HttpFailure::from_status(503, None),
            HttpFailure::ServiceUnavailable { .. }
        ));
    }

    #[test]
    fn test_from_status_falls_back_by_class() {
        assert_eq!(
            HttpFailure::from_status(429, None),
            HttpFailure::ClientError {
                code: 429,
                message: None
            }
        );
        assert_eq!(
            HttpFailure::from_status(502, None),
            HttpFailure::RemoteServerError {
                code: 502,
                message: None
            }
        );
        assert!(HttpFailure::from_status(302, None).is_server_error());
    }

    #[test]
    fn test_status_code_round_trips_classification() {
        for code in [400, 401, 403, 404, 408, 409, 418, 500, 502, 503] {
            assert_eq!(HttpFailure::from_status(code, None).status_code(), code);
        }
    }

    #[test]
    fn test_from_http_response_reads_nested_message() {
        let body = json!({"error": {"code": 409, "message": "Already exists"}});
        let failure = HttpFailure::from_http_response(409, &body);

        assert_eq!(failure.message(), Some("Already exists"));
        assert_eq!(failure.to_string(), "Conflict (409): Already exists");
    }

    #[test]
    fn test_from_http_response_reads_top_level_message() {
        let failure = HttpFailure::from_http_response(500, &json!({"message": "boom"}));
        assert_eq!(failure.message(), Some("boom"));

        let failure = HttpFailure::from_http_response(500, &json!({}));
        assert_eq!(failure.message(), None);
        assert_eq!(failure.to_string(), "Internal server error (500)");
    }

    #[test]
    fn test_display_appends_message_only_when_present() {
        let failure = HttpFailure::from_status(429, Some("Slow down".to_string()));
        assert_eq!(failure.to_string(), "Client error (429): Slow down");

        let failure = HttpFailure::from_status(418, None);
        assert_eq!(failure.to_string(), "Client error (418)");
    }

    #[test]
    fn test_resource_error_wraps_sources() {
        let error: ResourceError = HttpFailure::from_status(404, None).into();
        assert!(matches!(error, ResourceError::Failure(_)));

        let error: ResourceError = IdentifierError::NullReference { link: "child" }.into();
        assert!(error.to_string().contains("has_child()"));

        let error = ResourceError::PathResolutionFailed {
            operation: "get",
            depth: 3,
        };
        assert!(error.to_string().contains("depth 3"));
    }
}
