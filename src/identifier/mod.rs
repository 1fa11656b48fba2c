//! Hierarchical resource identifiers.
//!
//! An [`Identifier`] addresses a resource that may be nested under one or
//! more parent resources, e.g. `/accounts/10/orders/20`. It is a chain of
//! segments: the first value is the root, every further value is the single
//! child of the one before it.
//!
//! # Storage
//!
//! The chain is stored as an arena of segments indexed by position. The
//! `child` link owns nothing, it is an index, and so is the `parent`
//! back-link. Dropping an [`Identifier`] drops the whole chain at once.
//! A [`Node`] is a borrowed cursor onto one segment of the chain and is what
//! traversal (`root`, `leaf`, `parent`, `child`) hands out.
//!
//! # Example
//!
//! ```rust
//! use restapi_client::Identifier;
//!
//! let identifier = Identifier::new(["salma", "something"])?
//!     .add(45_i64)?
//!     .add("last")?;
//!
//! assert_eq!(identifier.key(), "salma:something:45:last");
//! assert_eq!(identifier.leaf().to_string(), "Identifier: salma:something:45:[last]");
//! assert_eq!(identifier.to_string(), "Identifier: [salma]:something:45:last");
//! # Ok::<(), restapi_client::IdentifierError>(())
//! ```
//!
//! # Controllers
//!
//! A controller addresses a sub-action of a resource, such as
//! `/orders/{id}/cancel`. It is set on the current leaf:
//!
//! ```rust
//! use restapi_client::Identifier;
//!
//! let identifier = Identifier::new(["salma"])?
//!     .controller("control")?
//!     .add(45_i64)?
//!     .add("last")?;
//!
//! assert_eq!(identifier.key(), "/control:salma:45:last");
//! # Ok::<(), restapi_client::IdentifierError>(())
//! ```
//!
//! # Concurrency
//!
//! Build a chain on one thread, then share it read-only. Mutation requires
//! `&mut Identifier`, so concurrent appends are ruled out by the borrow
//! checker.

mod node;
mod value;

pub use node::Node;
pub use value::{IdentifierValue, IntoIdentifierValue};

use crate::error::IdentifierError;

const CONSTRUCTION: &str = "construction";
const ADD: &str = "add";

/// One segment of an identifier chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Segment {
    value: IdentifierValue,
    controller: Option<String>,
    parent: Option<usize>,
    child: Option<usize>,
}

/// A resource identifier with parent/child relations.
///
/// Construct it with [`Identifier::new`] from one or more values of the same
/// kind, then grow it with [`add`](Self::add). Values are never removed or
/// changed once appended.
///
/// # Example
///
/// ```rust
/// use restapi_client::Identifier;
///
/// let identifier = Identifier::new([10_i64, 20, 30])?;
///
/// assert_eq!(identifier.value().as_long(), Some(10));
/// assert_eq!(identifier.child()?.value().as_long(), Some(20));
/// assert_eq!(identifier.child()?.child()?.value().as_long(), Some(30));
/// assert!(!identifier.leaf().has_child());
/// # Ok::<(), restapi_client::IdentifierError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Identifier {
    segments: Vec<Segment>,
}

impl Identifier {
    /// Creates an identifier chain from one or more values.
    ///
    /// The first value becomes the root, each following value the child of
    /// the previous one. All values are checked before any segment is
    /// created.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::MissingValue`] if `values` is empty, or if
    /// any element is `None` or an empty string. `position` names the first
    /// offending element.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restapi_client::Identifier;
    ///
    /// assert!(Identifier::new(["abc", "ghb", "klf"]).is_ok());
    /// assert!(Identifier::new([Some(1_i64), None]).is_err());
    /// assert!(Identifier::new(Vec::<i32>::new()).is_err());
    /// ```
    pub fn new<I, V>(values: I) -> Result<Self, IdentifierError>
    where
        I: IntoIterator<Item = V>,
        V: IntoIdentifierValue,
    {
        let values = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| {
                value::validated(value).ok_or(IdentifierError::MissingValue {
                    operation: CONSTRUCTION,
                    position,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return Err(IdentifierError::MissingValue {
                operation: CONSTRUCTION,
                position: 0,
            });
        };

        let mut identifier = Self::root_only(first);
        for value in values {
            identifier.append(value);
        }
        Ok(identifier)
    }

    fn root_only(value: IdentifierValue) -> Self {
        Self {
            segments: vec![Segment {
                value,
                controller: None,
                parent: None,
                child: None,
            }],
        }
    }

    fn leaf_index(&self) -> usize {
        let mut index = 0;
        while let Some(child) = self.segments[index].child {
            index = child;
        }
        index
    }

    fn append(&mut self, value: IdentifierValue) {
        let parent = self.leaf_index();
        let index = self.segments.len();
        self.segments[parent].child = Some(index);
        self.segments.push(Segment {
            value,
            controller: None,
            parent: Some(parent),
            child: None,
        });
    }

    /// Appends a value as the child of the current leaf, in place.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::MissingValue`] if the value is `None` or an
    /// empty string. `position` is the position the value would have taken.
    pub fn push<V: IntoIdentifierValue>(&mut self, value: V) -> Result<&mut Self, IdentifierError> {
        let value = value::validated(value).ok_or(IdentifierError::MissingValue {
            operation: ADD,
            position: self.segments.len(),
        })?;
        self.append(value);
        Ok(self)
    }

    /// Appends a value as the child of the current leaf.
    ///
    /// Returns the same identifier so calls can be chained.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::MissingValue`] if the value is `None` or an
    /// empty string.
    pub fn add<V: IntoIdentifierValue>(mut self, value: V) -> Result<Self, IdentifierError> {
        self.push(value)?;
        Ok(self)
    }

    /// Sets the controller of the current leaf, in place.
    ///
    /// The text is trimmed. A text that is empty after trimming clears the
    /// controller.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidArgument`] if the trimmed text starts
    /// with `/`.
    pub fn set_controller(&mut self, controller: &str) -> Result<&mut Self, IdentifierError> {
        let controller = controller.trim();
        if controller.starts_with('/') {
            return Err(IdentifierError::InvalidArgument {
                controller: controller.to_string(),
            });
        }

        let leaf = self.leaf_index();
        self.segments[leaf].controller =
            (!controller.is_empty()).then(|| controller.to_string());
        Ok(self)
    }

    /// Sets the controller of the current leaf.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidArgument`] if the trimmed text starts
    /// with `/`.
    pub fn controller(mut self, controller: &str) -> Result<Self, IdentifierError> {
        self.set_controller(controller)?;
        Ok(self)
    }

    /// Removes the controller of the current leaf, if any.
    pub fn clear_controller(&mut self) -> &mut Self {
        let leaf = self.leaf_index();
        self.segments[leaf].controller = None;
        self
    }

    /// Returns the root segment.
    #[must_use]
    pub const fn root(&self) -> Node<'_> {
        Node::new(self, 0)
    }

    /// Returns the leaf segment, found by following child links from the root.
    #[must_use]
    pub fn leaf(&self) -> Node<'_> {
        self.root().leaf()
    }

    /// Returns the segment at `index`, counted from the root.
    #[must_use]
    pub fn node(&self, index: usize) -> Option<Node<'_>> {
        (index < self.segments.len()).then(|| Node::new(self, index))
    }

    /// Returns the root value.
    #[must_use]
    pub fn value(&self) -> &IdentifierValue {
        &self.segments[0].value
    }

    /// Returns true if the root has a child.
    #[must_use]
    pub fn has_child(&self) -> bool {
        self.root().has_child()
    }

    /// Returns the child of the root.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NullReference`] if the root has no child.
    /// Check [`has_child`](Self::has_child) first.
    pub fn child(&self) -> Result<Node<'_>, IdentifierError> {
        self.root().child()
    }

    /// Returns the number of segments in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if the chain has no segments. A constructed chain always
    /// has at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Iterates over the segments from root to leaf.
    pub fn iter(&self) -> impl Iterator<Item = Node<'_>> {
        std::iter::successors(Some(self.root()), Node::child_opt)
    }

    /// Returns the colon-delimited key of the whole chain.
    ///
    /// The key is deterministic for identical chains and is suitable as a
    /// cache or lookup key. Non-root controllers render as
    /// `:/{controller}:` before their segment's value. A root controller
    /// renders as a bare `/{controller}` prefix, followed by `:` only when
    /// the root has a child.
    ///
    /// # Example
    ///
    /// ```rust
    /// use restapi_client::Identifier;
    ///
    /// let identifier = Identifier::new(["salma", "something"])?
    ///     .add(45_i64)?
    ///     .controller("control")?
    ///     .add("last")?;
    ///
    /// assert_eq!(identifier.key(), "salma:something:/control:45:last");
    /// # Ok::<(), restapi_client::IdentifierError>(())
    /// ```
    #[must_use]
    pub fn key(&self) -> String {
        let root = &self.segments[0];
        let mut key = String::new();

        if let Some(controller) = &root.controller {
            key.push('/');
            key.push_str(controller);
            if root.child.is_some() {
                key.push(':');
            }
        }
        key.push_str(&root.value.to_string());

        let mut next = root.child;
        while let Some(index) = next {
            let segment = &self.segments[index];
            match &segment.controller {
                Some(controller) => {
                    key.push_str(":/");
                    key.push_str(controller);
                    key.push(':');
                }
                None => key.push(':'),
            }
            key.push_str(&segment.value.to_string());
            next = segment.child;
        }

        key
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.root(), f)
    }
}

impl From<i64> for Identifier {
    fn from(value: i64) -> Self {
        Self::root_only(IdentifierValue::Long(value))
    }
}

impl From<i32> for Identifier {
    fn from(value: i32) -> Self {
        Self::root_only(IdentifierValue::Int(value))
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new([value])
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new([value])
    }
}

// Verify identifier types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Identifier>();
    assert_send_sync::<Node<'static>>();
    assert_send_sync::<IdentifierValue>();
};

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Identifier {
        Identifier::new(["salma", "something"])
            .and_then(|id| id.add(45_i64))
            .and_then(|id| id.add("last"))
            .unwrap()
    }

    #[test]
    fn test_new_links_parent_and_child_indices() {
        let identifier = Identifier::new([10_i64, 20, 30]).unwrap();

        assert_eq!(identifier.segments.len(), 3);
        assert_eq!(identifier.segments[0].parent, None);
        assert_eq!(identifier.segments[0].child, Some(1));
        assert_eq!(identifier.segments[1].parent, Some(0));
        assert_eq!(identifier.segments[1].child, Some(2));
        assert_eq!(identifier.segments[2].parent, Some(1));
        assert_eq!(identifier.segments[2].child, None);
    }

    #[test]
    fn test_new_rejects_empty_sequence() {
        let result = Identifier::new(Vec::<&str>::new());
        assert_eq!(
            result,
            Err(IdentifierError::MissingValue {
                operation: "construction",
                position: 0
            })
        );
    }

    #[test]
    fn test_new_reports_first_offending_position() {
        let result = Identifier::new([Some("abc"), Some("def"), None]);
        assert_eq!(
            result,
            Err(IdentifierError::MissingValue {
                operation: "construction",
                position: 2
            })
        );
    }

    #[test]
    fn test_push_appends_after_leaf() {
        let mut identifier = Identifier::from(1_i32);
        identifier.push(2_i32).unwrap().push(3_i32).unwrap();

        assert_eq!(identifier.len(), 3);
        assert_eq!(identifier.leaf().value(), &IdentifierValue::Int(3));
        assert_eq!(identifier.segments[1].child, Some(2));
    }

    #[test]
    fn test_add_rejects_empty_text_with_add_operation() {
        let result = Identifier::from(1_i64).add("");
        assert_eq!(
            result,
            Err(IdentifierError::MissingValue {
                operation: "add",
                position: 1
            })
        );
    }

    #[test]
    fn test_set_controller_trims_and_targets_leaf() {
        let mut identifier = sample();
        identifier.set_controller("  action ").unwrap();

        assert_eq!(identifier.segments[3].controller.as_deref(), Some("action"));
        assert!(identifier.segments[..3].iter().all(|s| s.controller.is_none()));
    }

    #[test]
    fn test_set_controller_rejects_leading_separator_after_trim() {
        let mut identifier = sample();
        let result = identifier.set_controller("  /action");

        assert_eq!(
            result.unwrap_err(),
            IdentifierError::InvalidArgument {
                controller: "/action".to_string()
            }
        );
        assert_eq!(identifier.segments[3].controller, None);
    }

    #[test]
    fn test_blank_controller_clears() {
        let mut identifier = sample();
        identifier.set_controller("action").unwrap();
        identifier.set_controller("   ").unwrap();
        assert_eq!(identifier.leaf().controller(), None);

        identifier.set_controller("action").unwrap();
        identifier.clear_controller();
        assert_eq!(identifier.leaf().controller(), None);
    }

    #[test]
    fn test_key_single_root() {
        assert_eq!(Identifier::try_from("salma").unwrap().key(), "salma");
        assert_eq!(Identifier::from(45_i64).key(), "45");
    }

    #[test]
    fn test_key_root_controller_without_child_has_no_separator() {
        let identifier = Identifier::try_from("salma")
            .unwrap()
            .controller("control")
            .unwrap();
        assert_eq!(identifier.key(), "/controlsalma");
    }

    #[test]
    fn test_key_controller_on_leaf() {
        let identifier = sample().controller("control").unwrap();
        assert_eq!(identifier.key(), "salma:something:45:/control:last");
    }

    #[test]
    fn test_iter_visits_root_to_leaf() {
        let identifier = sample();
        let rendered: Vec<String> = identifier.iter().map(|n| n.value().to_string()).collect();
        assert_eq!(rendered, vec!["salma", "something", "45", "last"]);
    }

    #[test]
    fn test_node_out_of_range_is_none() {
        let identifier = sample();
        assert!(identifier.node(3).is_some());
        assert!(identifier.node(4).is_none());
        assert!(!identifier.is_empty());
    }
}
