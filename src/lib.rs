//! # REST API Client Facade
//!
//! A uniform, fluent client facade over heterogeneous REST APIs. Concrete
//! API clients plug into one CRUD-shaped contract and address their
//! resources through a shared, hierarchical identifier model.
//!
//! ## Overview
//!
//! This crate provides:
//! - Hierarchical resource identifiers via [`Identifier`] and [`Node`]
//! - Deterministic cache keys for identifier chains via [`Identifier::key`]
//! - Identifier-driven resource path resolution via [`rest`]
//! - HTTP status code classification via [`rest::HttpFailure`]
//! - Credential configuration built on property maps via [`ApiCredential`]
//!
//! ## Quick Start
//!
//! ```rust
//! use restapi_client::Identifier;
//!
//! // Order 20 of account 10, i.e. /accounts/10/orders/20
//! let identifier = Identifier::new([10_i64, 20])?;
//!
//! assert_eq!(identifier.key(), "10:20");
//! assert_eq!(identifier.leaf().value().as_long(), Some(20));
//! assert!(!identifier.leaf().has_child());
//! # Ok::<(), restapi_client::IdentifierError>(())
//! ```
//!
//! ## Nested Resources and Controllers
//!
//! Identifiers grow by appending to the leaf. A controller addresses a
//! sub-action of the segment it is set on:
//!
//! ```rust
//! use restapi_client::Identifier;
//!
//! let identifier = Identifier::new(["salma", "something"])?
//!     .add(45_i64)?
//!     .controller("control")?
//!     .add("last")?;
//!
//! assert_eq!(identifier.key(), "salma:something:/control:45:last");
//! assert_eq!(identifier.leaf().root().value().as_str(), Some("salma"));
//! # Ok::<(), restapi_client::IdentifierError>(())
//! ```
//!
//! ## Resolving Resource Paths
//!
//! ```rust
//! use restapi_client::rest::{resolve_path, HttpMethod, ResourceOperation, ResourcePath};
//! use restapi_client::Identifier;
//!
//! const PATHS: &[ResourcePath] = &[ResourcePath::new(
//!     HttpMethod::Delete,
//!     ResourceOperation::Delete,
//!     &["account_id", "id"],
//!     "accounts/{account_id}/orders/{id}",
//! )];
//!
//! let identifier = Identifier::new([10_i64, 20])?;
//! let (_, url) = resolve_path(PATHS, ResourceOperation::Delete, &identifier)?;
//! assert_eq!(url, "accounts/10/orders/20");
//! # Ok::<(), restapi_client::rest::ResourceError>(())
//! ```
//!
//! ## Credentials
//!
//! ```rust
//! use restapi_client::ApiCredential;
//!
//! let mut credential = ApiCredential::new();
//! credential.load_str("credential.default.projectId=my-project\ncredential.default.on=true")?;
//!
//! assert_eq!(credential.project_id(), Some("my-project"));
//! assert!(credential.is_credential_on());
//! # Ok::<(), restapi_client::ConfigError>(())
//! ```
//!
//! ## Design Principles
//!
//! - **Fail-fast validation**: identifiers and credentials validate on construction
//! - **No partial state**: a failed construction allocates nothing
//! - **Strict accessors**: absent links are reported, never silently `None`
//! - **No global state**: configuration is instance-based and passed explicitly
//! - **Thread-safe reads**: all types are `Send + Sync`; mutation needs `&mut`

pub mod config;
pub mod error;
pub mod identifier;
pub mod rest;

// Re-export public types at crate root for convenience
pub use config::{ApiCredential, CredentialPrefix, RequestCredential};
pub use error::{ConfigError, IdentifierError};
pub use identifier::{Identifier, IdentifierValue, IntoIdentifierValue, Node};
