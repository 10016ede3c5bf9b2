//! mdwcag DOM - Element tree
//!
//! Arena-allocated tree of tagged elements in the ElementTree shape:
//! every node is an element, character data lives in `text` (before the
//! first child) and `tail` (after the element, inside its parent).

mod attributes;
mod node;
mod tag;
mod tree;

pub use attributes::{Attr, Attributes};
pub use node::{Element, Node};
pub use tag::Tag;
pub use tree::{Children, DomTree, NodePath};

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Root node ID
    pub const ROOT: NodeId = NodeId(0);

    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    /// Raw arena index
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Tree manipulation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node {0:?} does not exist")]
    NotFound(NodeId),

    #[error("node {0:?} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("appending {child:?} to {parent:?} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

pub type DomResult<T> = Result<T, DomError>;
