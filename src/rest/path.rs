//! Path building for identified REST resources.
//!
//! A resource is usually reachable through more than one path depending on
//! how deeply it is nested. An `Order` might be addressed as:
//! - `accounts/{account_id}/orders/{id}` (nested under an account)
//! - `orders/{id}` (standalone)
//!
//! The depth of the [`Identifier`] chain decides which path applies: a
//! two-segment identifier binds to the nested path, a single-segment one to
//! the standalone path.
//!
//! # Example
//!
//! ```rust
//! use restapi_client::rest::{resolve_path, HttpMethod, ResourceOperation, ResourcePath};
//! use restapi_client::Identifier;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(
//!         HttpMethod::Get,
//!         ResourceOperation::Get,
//!         &["account_id", "id"],
//!         "accounts/{account_id}/orders/{id}",
//!     ),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Get, &["id"], "orders/{id}"),
//! ];
//!
//! let identifier = Identifier::new([10_i64, 20])?;
//! let (path, url) = resolve_path(PATHS, ResourceOperation::Get, &identifier)?;
//! assert_eq!(path.http_method, HttpMethod::Get);
//! assert_eq!(url, "accounts/10/orders/20");
//!
//! let identifier = Identifier::from(20_i64).controller("cancel")?;
//! let (_, url) = resolve_path(PATHS, ResourceOperation::Get, &identifier)?;
//! assert_eq!(url, "orders/20/cancel");
//! # Ok::<(), restapi_client::rest::ResourceError>(())
//! ```

use std::collections::HashMap;
use std::fmt::{self, Display};

use super::errors::ResourceError;
use crate::identifier::{Identifier, IdentifierValue};

/// HTTP methods used by resource operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating resources.
    Post,
    /// HTTP PUT method for replacing resources.
    Put,
    /// HTTP PATCH method for partially updating resources.
    Patch,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "get"),
            Self::Post => write!(f, "post"),
            Self::Put => write!(f, "put"),
            Self::Patch => write!(f, "patch"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Operations of the uniform resource contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Retrieve a default, not yet persisted instance (GET).
    New,
    /// Retrieve a single resource (GET /resources/{id}).
    Get,
    /// List resources (GET /resources).
    List,
    /// Create a resource (POST /resources).
    Insert,
    /// Replace a resource (PUT /resources/{id}).
    Update,
    /// Partially update a resource (PATCH /resources/{id}).
    Patch,
    /// Delete a resource (DELETE /resources/{id}).
    Delete,
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::New | Self::Get | Self::List => HttpMethod::Get,
            Self::Insert => HttpMethod::Post,
            Self::Update => HttpMethod::Put,
            Self::Patch => HttpMethod::Patch,
            Self::Delete => HttpMethod::Delete,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Get => "get",
            Self::List => "list",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }
}

/// A path configuration for one resource operation.
///
/// Templates use `{id_name}` placeholders. The `ids` are listed root first,
/// matching the order of the identifier chain they are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Placeholder names, root first (e.g., `["account_id", "id"]`).
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of ids this path binds.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Binds the identifier chain to this path.
    ///
    /// Segments are bound to `ids` from the root down. Text values are
    /// percent-encoded. A segment carrying a controller renders as
    /// `{value}/{controller}`, each `/`-separated part of the controller
    /// percent-encoded on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::PathResolutionFailed`] if the identifier depth
    /// differs from [`id_count`](Self::id_count).
    pub fn interpolate(&self, identifier: &Identifier) -> Result<String, ResourceError> {
        if identifier.len() != self.id_count() {
            return Err(ResourceError::PathResolutionFailed {
                operation: self.operation.as_str(),
                depth: identifier.len(),
            });
        }

        let ids: HashMap<&str, String> = self
            .ids
            .iter()
            .copied()
            .zip(identifier.iter())
            .map(|(name, node)| {
                let value = encode_value(node.value());
                let segment = match node.controller() {
                    Some(controller) => format!("{value}/{}", encode_controller(controller)),
                    None => value,
                };
                (name, segment)
            })
            .collect();

        Ok(build_path(self.template, &ids))
    }
}

fn encode_value(value: &IdentifierValue) -> String {
    match value {
        IdentifierValue::Text(text) => urlencoding::encode(text).into_owned(),
        IdentifierValue::Long(_) | IdentifierValue::Int(_) => value.to_string(),
    }
}

fn encode_controller(controller: &str) -> String {
    controller
        .split('/')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Selects the path for an operation that binds exactly `depth` ids.
///
/// # Example
///
/// ```rust
/// use restapi_client::rest::{get_path, HttpMethod, ResourceOperation, ResourcePath};
///
/// const PATHS: &[ResourcePath] = &[
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &["account_id"], "accounts/{account_id}/orders"),
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "orders"),
/// ];
///
/// let path = get_path(PATHS, ResourceOperation::List, 1);
/// assert_eq!(path.unwrap().template, "accounts/{account_id}/orders");
/// assert!(get_path(PATHS, ResourceOperation::Delete, 1).is_none());
/// ```
#[must_use]
pub fn get_path(
    paths: &[ResourcePath],
    operation: ResourceOperation,
    depth: usize,
) -> Option<&ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .find(|p| p.id_count() == depth)
}

/// Selects the path of an operation that binds no ids.
///
/// Top-level collections (`orders`) are addressed without an identifier,
/// which always has at least one segment.
///
/// ```rust
/// use restapi_client::rest::{resolve_root_path, HttpMethod, ResourceOperation, ResourcePath};
///
/// const PATHS: &[ResourcePath] = &[
///     ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "orders"),
/// ];
///
/// let (path, url) = resolve_root_path(PATHS, ResourceOperation::List)?;
/// assert_eq!(path.http_method, HttpMethod::Get);
/// assert_eq!(url, "orders");
/// # Ok::<(), restapi_client::rest::ResourceError>(())
/// ```
///
/// # Errors
///
/// Returns [`ResourceError::PathResolutionFailed`] with depth 0 if the
/// operation has no path without ids.
pub fn resolve_root_path(
    paths: &[ResourcePath],
    operation: ResourceOperation,
) -> Result<(&ResourcePath, String), ResourceError> {
    let Some(path) = get_path(paths, operation, 0) else {
        tracing::debug!(
            operation = operation.as_str(),
            "No top-level resource path for operation"
        );
        return Err(ResourceError::PathResolutionFailed {
            operation: operation.as_str(),
            depth: 0,
        });
    };

    let url = build_path::<&str>(path.template, &HashMap::new());
    tracing::debug!(
        operation = operation.as_str(),
        method = %path.http_method,
        url = %url,
        "Resolved resource path"
    );
    Ok((path, url))
}

/// Selects the path matching the identifier depth and binds the identifier.
///
/// # Errors
///
/// Returns [`ResourceError::PathResolutionFailed`] if no path of the
/// operation binds as many ids as the identifier has segments.
pub fn resolve_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    identifier: &Identifier,
) -> Result<(&'a ResourcePath, String), ResourceError> {
    let Some(path) = get_path(paths, operation, identifier.len()) else {
        tracing::debug!(
            operation = operation.as_str(),
            key = %identifier.key(),
            "No resource path matches identifier depth"
        );
        return Err(ResourceError::PathResolutionFailed {
            operation: operation.as_str(),
            depth: identifier.len(),
        });
    };

    let url = path.interpolate(identifier)?;
    tracing::debug!(
        operation = operation.as_str(),
        method = %path.http_method,
        url = %url,
        "Resolved resource path"
    );
    Ok((path, url))
}

/// Builds a URL from a template by interpolating ids.
///
/// The template is scanned once from left to right, so substituted values
/// are never searched for placeholders themselves. Placeholders without a
/// value in `ids` are left unchanged.
///
/// ```rust
/// use restapi_client::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("account_id", "10");
/// ids.insert("id", "20");
///
/// let url = build_path("accounts/{account_id}/orders/{id}", &ids);
/// assert_eq!(url, "accounts/10/orders/20");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let (literal, tail) = rest.split_at(open);
        result.push_str(literal);

        let Some(close) = tail.find('}') else {
            rest = tail;
            break;
        };
        let name = &tail[1..close];
        match ids.get(name) {
            Some(value) => result.push_str(&value.to_string()),
            None => result.push_str(&tail[..=close]),
        }
        rest = &tail[close + 1..];
    }

    result.push_str(rest);
    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpMethod>();
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};

#[cfg(test)]
mod tests {
    use super::*;

    const ORDER_PATHS: &[ResourcePath] = &[
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["account_id", "id"],
            "accounts/{account_id}/orders/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Get,
            ResourceOperation::Get,
            &["id"],
            "orders/{id}",
        ),
        ResourcePath::new(
            HttpMethod::Delete,
            ResourceOperation::Delete,
            &["id"],
            "orders/{id}",
        ),
    ];

    #[test]
    fn test_resource_operation_default_http_method() {
        assert_eq!(ResourceOperation::New.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::Get.default_http_method(), HttpMethod::Get);
        assert_eq!(ResourceOperation::List.default_http_method(), HttpMethod::Get);
        assert_eq!(
            ResourceOperation::Insert.default_http_method(),
            HttpMethod::Post
        );
        assert_eq!(
            ResourceOperation::Update.default_http_method(),
            HttpMethod::Put
        );
        assert_eq!(
            ResourceOperation::Patch.default_http_method(),
            HttpMethod::Patch
        );
        assert_eq!(
            ResourceOperation::Delete.default_http_method(),
            HttpMethod::Delete
        );
    }

    #[test]
    fn test_http_method_display_is_lowercase() {
        assert_eq!(HttpMethod::Patch.to_string(), "patch");
        assert_eq!(HttpMethod::Delete.to_string(), "delete");
    }

    #[test]
    fn test_get_path_filters_by_operation_and_depth() {
        let path = get_path(ORDER_PATHS, ResourceOperation::Get, 2).unwrap();
        assert_eq!(path.template, "accounts/{account_id}/orders/{id}");

        let path = get_path(ORDER_PATHS, ResourceOperation::Delete, 1).unwrap();
        assert_eq!(path.http_method, HttpMethod::Delete);

        assert!(get_path(ORDER_PATHS, ResourceOperation::Delete, 2).is_none());
        assert!(get_path(ORDER_PATHS, ResourceOperation::List, 0).is_none());
    }

    #[test]
    fn test_interpolate_encodes_text_values() {
        let identifier = Identifier::new(["my account", "a/b"]).unwrap();
        let url = ORDER_PATHS[0].interpolate(&identifier).unwrap();
        assert_eq!(url, "accounts/my%20account/orders/a%2Fb");
    }

    #[test]
    fn test_interpolate_places_controller_after_value() {
        let identifier = Identifier::from(10_i64)
            .controller("archive")
            .and_then(|id| id.add(20_i64))
            .unwrap();
        let url = ORDER_PATHS[0].interpolate(&identifier).unwrap();
        assert_eq!(url, "accounts/10/archive/orders/20");
    }

    #[test]
    fn test_interpolate_rejects_depth_mismatch() {
        let identifier = Identifier::new([1_i32, 2, 3]).unwrap();
        let result = ORDER_PATHS[1].interpolate(&identifier);
        assert_eq!(
            result,
            Err(ResourceError::PathResolutionFailed {
                operation: "get",
                depth: 3
            })
        );
    }

    #[test]
    fn test_resolve_path_reports_missing_path() {
        let identifier = Identifier::new([1_i32, 2]).unwrap();
        let result = resolve_path(ORDER_PATHS, ResourceOperation::Delete, &identifier);
        assert!(matches!(
            result,
            Err(ResourceError::PathResolutionFailed {
                operation: "delete",
                depth: 2
            })
        ));
    }

    #[test]
    fn test_build_path_handles_missing_ids() {
        let ids: HashMap<&str, &str> = HashMap::new();
        assert_eq!(build_path("orders/{id}", &ids), "orders/{id}");
    }

    #[test]
    fn test_build_path_does_not_rescan_substituted_values() {
        let mut ids = HashMap::new();
        ids.insert("account_id", "{id}");
        ids.insert("id", "20");

        for _ in 0..32 {
            assert_eq!(
                build_path("accounts/{account_id}/orders/{id}", &ids),
                "accounts/{id}/orders/20"
            );
        }
    }

    #[test]
    fn test_build_path_keeps_unterminated_brace() {
        let mut ids = HashMap::new();
        ids.insert("id", "20");
        assert_eq!(build_path("orders/{id}/{open", &ids), "orders/20/{open");
    }

    #[test]
    fn test_interpolate_encodes_controller_parts() {
        let identifier = Identifier::from(10_i64)
            .controller("a b?x=1")
            .and_then(|id| id.add(20_i64))
            .unwrap();
        let url = ORDER_PATHS[0].interpolate(&identifier).unwrap();
        assert_eq!(url, "accounts/10/a%20b%3Fx%3D1/orders/20");

        let identifier = Identifier::from(20_i64).controller("bulk/cancel").unwrap();
        let url = ORDER_PATHS[1].interpolate(&identifier).unwrap();
        assert_eq!(url, "orders/20/bulk/cancel");
    }

    #[test]
    fn test_interpolate_placeholder_in_controller_is_stable() {
        let identifier = Identifier::from(10_i64)
            .controller("{id}")
            .and_then(|id| id.add(20_i64))
            .unwrap();

        for _ in 0..32 {
            let url = ORDER_PATHS[0].interpolate(&identifier).unwrap();
            assert_eq!(url, "accounts/10/%7Bid%7D/orders/20");
        }
    }

    #[test]
    fn test_resolve_root_path_without_identifier() {
        const PATHS: &[ResourcePath] = &[
            ResourcePath::new(HttpMethod::Get, ResourceOperation::List, &[], "orders"),
            ResourcePath::new(HttpMethod::Post, ResourceOperation::Insert, &[], "orders"),
        ];

        let (path, url) = resolve_root_path(PATHS, ResourceOperation::Insert).unwrap();
        assert_eq!(path.http_method, HttpMethod::Post);
        assert_eq!(url, "orders");

        assert_eq!(
            resolve_root_path(ORDER_PATHS, ResourceOperation::List),
            Err(ResourceError::PathResolutionFailed {
                operation: "list",
                depth: 0
            })
        );
    }
}
