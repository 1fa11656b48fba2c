//! REST resource infrastructure.
//!
//! This module binds [`Identifier`](crate::Identifier) chains to resource
//! URL paths and classifies failed responses:
//!
//! - **Path building**: [`ResourcePath`] templates selected by identifier depth
//! - **[`ResourceOperation`]**: the uniform new/get/list/insert/update/patch/delete contract
//! - **[`HttpFailure`]**: HTTP status codes mapped to semantic failure variants
//! - **[`ResourceError`]**: errors raised while binding an identifier to a path
//!
//! Sending requests is left to the concrete API client; this module only
//! produces the path it should call and interprets the status it got back.
//!
//! # Example
//!
//! ```rust
//! use restapi_client::rest::{resolve_path, HttpFailure, HttpMethod, ResourceOperation, ResourcePath};
//! use restapi_client::Identifier;
//!
//! const PATHS: &[ResourcePath] = &[ResourcePath::new(
//!     HttpMethod::Patch,
//!     ResourceOperation::Patch,
//!     &["account_id", "id"],
//!     "accounts/{account_id}/orders/{id}",
//! )];
//!
//! let identifier = Identifier::new([10_i64, 20])?;
//! let (path, url) = resolve_path(PATHS, ResourceOperation::Patch, &identifier)?;
//! assert_eq!(path.http_method, HttpMethod::Patch);
//! assert_eq!(url, "accounts/10/orders/20");
//!
//! // The concrete client reports a failed call
//! let failure = HttpFailure::from_status(409, Some("Order is locked".to_string()));
//! assert_eq!(failure.status_code(), 409);
//! # Ok::<(), restapi_client::rest::ResourceError>(())
//! ```

mod errors;
mod path;

pub use errors::{HttpFailure, ResourceError};
pub use path::{
    build_path, get_path, resolve_path, resolve_root_path, HttpMethod, ResourceOperation,
    ResourcePath,
};
