//! Borrowed cursors onto identifier segments.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::{Identifier, IdentifierValue, Segment};
use crate::error::IdentifierError;

/// A reference to one segment of an [`Identifier`] chain.
///
/// `Node` is a cheap `Copy` handle; it borrows the chain and remembers a
/// position in it.
///
/// # Strict accessors
///
/// [`parent`](Self::parent) and [`child`](Self::child) fail with
/// [`IdentifierError::NullReference`] when the link is absent. Callers are
/// expected to check [`has_parent`](Self::has_parent) or
/// [`has_child`](Self::has_child) first; [`parent_opt`](Self::parent_opt) and
/// [`child_opt`](Self::child_opt) are available where absence is expected.
///
/// # Equality
///
/// Two nodes are equal when they sit at the same position of structurally
/// equal chains, i.e. their values, controllers, parents and children are all
/// equal. A root never equals one of its descendants.
///
/// ```rust
/// use restapi_client::Identifier;
///
/// let identifier = Identifier::new(["abc", "ghb"])?;
///
/// assert_ne!(identifier.root(), identifier.child()?);
/// assert_eq!(identifier.leaf(), identifier.child()?.leaf());
/// # Ok::<(), restapi_client::IdentifierError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Node<'a> {
    chain: &'a Identifier,
    index: usize,
}

impl<'a> Node<'a> {
    pub(super) const fn new(chain: &'a Identifier, index: usize) -> Self {
        Self { chain, index }
    }

    fn segment(&self) -> &'a Segment {
        &self.chain.segments[self.index]
    }

    /// Returns the position of this segment, counted from the root.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns the chain this segment belongs to.
    #[must_use]
    pub const fn identifier(&self) -> &'a Identifier {
        self.chain
    }

    /// Returns the value of this segment.
    #[must_use]
    pub fn value(&self) -> &'a IdentifierValue {
        &self.segment().value
    }

    /// Returns the controller of this segment, if any.
    #[must_use]
    pub fn controller(&self) -> Option<&'a str> {
        self.segment().controller.as_deref()
    }

    /// Returns true if this segment has a parent.
    #[must_use]
    pub fn has_parent(&self) -> bool {
        self.segment().parent.is_some()
    }

    /// Returns true if this segment has a child.
    #[must_use]
    pub fn has_child(&self) -> bool {
        self.segment().child.is_some()
    }

    /// Returns the parent segment, or `None` for the root.
    #[must_use]
    pub fn parent_opt(&self) -> Option<Self> {
        self.segment().parent.map(|index| Self::new(self.chain, index))
    }

    /// Returns the child segment, or `None` for the leaf.
    #[must_use]
    pub fn child_opt(&self) -> Option<Self> {
        self.segment().child.map(|index| Self::new(self.chain, index))
    }

    /// Returns the parent segment.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NullReference`] if this is the root.
    pub fn parent(&self) -> Result<Self, IdentifierError> {
        self.parent_opt()
            .ok_or(IdentifierError::NullReference { link: "parent" })
    }

    /// Returns the child segment.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::NullReference`] if this is the leaf.
    pub fn child(&self) -> Result<Self, IdentifierError> {
        self.child_opt()
            .ok_or(IdentifierError::NullReference { link: "child" })
    }

    /// Follows parent links up to the segment that has none.
    #[must_use]
    pub fn root(&self) -> Self {
        let mut node = *self;
        while let Some(parent) = node.parent_opt() {
            node = parent;
        }
        node
    }

    /// Follows child links down to the segment that has none.
    #[must_use]
    pub fn leaf(&self) -> Self {
        let mut node = *self;
        while let Some(child) = node.child_opt() {
            node = child;
        }
        node
    }

    /// Returns the key of the whole chain; see [`Identifier::key`].
    #[must_use]
    pub fn key(&self) -> String {
        self.chain.key()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && (std::ptr::eq(self.chain, other.chain) || self.chain == other.chain)
    }
}

impl Eq for Node<'_> {}

impl Hash for Node<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.chain.hash(state);
    }
}

/// Renders the whole chain from the root, bracketing this segment.
///
/// ```rust
/// use restapi_client::Identifier;
///
/// let identifier = Identifier::new(["salma", "something"])?
///     .add(45_i64)?
///     .add("last")?
///     .controller("action")?;
///
/// assert_eq!(identifier.leaf().to_string(), "Identifier: salma:something:45:[action:last]");
/// assert_eq!(identifier.root().to_string(), "Identifier: [salma]:something:45:action:last");
/// # Ok::<(), restapi_client::IdentifierError>(())
/// ```
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identifier: ")?;

        let mut next = Some(self.root());
        let mut first = true;
        while let Some(node) = next {
            if !first {
                f.write_str(":")?;
            }
            first = false;

            let current = node.index == self.index;
            if current {
                f.write_str("[")?;
            }
            if let Some(controller) = node.controller() {
                write!(f, "{controller}:")?;
            }
            write!(f, "{}", node.value())?;
            if current {
                f.write_str("]")?;
            }

            next = node.child_opt();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain() -> Identifier {
        Identifier::new(["abc", "ghb"])
            .and_then(|id| id.add(40_i64))
            .and_then(|id| id.add("xbbc"))
            .and_then(|id| id.controller("control"))
            .unwrap()
    }

    #[test]
    fn test_root_has_no_parent() {
        let identifier = Identifier::try_from("salma").unwrap();
        let root = identifier.root();

        assert!(!root.has_parent());
        assert_eq!(
            root.parent(),
            Err(IdentifierError::NullReference { link: "parent" })
        );
        assert_eq!(
            root.child(),
            Err(IdentifierError::NullReference { link: "child" })
        );
    }

    #[test]
    fn test_parent_of_child_is_self() {
        let identifier = chain();
        for node in identifier.iter().skip(1) {
            let parent = node.parent().unwrap();
            assert_eq!(parent.child().unwrap(), node);
        }
    }

    #[test]
    fn test_root_and_leaf_from_middle() {
        let identifier = chain();
        let middle = identifier.node(2).unwrap();

        assert_eq!(middle.root().value().as_str(), Some("abc"));
        assert_eq!(middle.leaf().value().as_str(), Some("xbbc"));
        assert_eq!(middle.leaf().controller(), Some("control"));
    }

    #[test]
    fn test_inequality_along_chain() {
        let identifier = chain();
        let root = identifier.root();
        let first = root.child().unwrap();
        let second = first.child().unwrap();
        let third = second.child().unwrap();

        assert_ne!(root, first);
        assert_ne!(first, second);
        assert_ne!(first, third);
        assert_eq!(identifier.leaf(), first.leaf());
    }

    #[test]
    fn test_equality_across_equal_chains() {
        let left = chain();
        let right = chain();
        assert_eq!(left.node(1), right.node(1));

        let other = Identifier::new(["abc", "ghb"])
            .and_then(|id| id.add(40_i64))
            .and_then(|id| id.add("xbbc"))
            .unwrap();
        assert_ne!(left.node(1), other.node(1));
    }

    #[test]
    fn test_display_brackets_middle_segment() {
        let identifier = chain();
        assert_eq!(
            identifier.node(2).unwrap().to_string(),
            "Identifier: abc:ghb:[40]:control:xbbc"
        );
    }
}
