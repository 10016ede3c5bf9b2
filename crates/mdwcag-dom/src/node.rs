//! Tree node and element data
//!
//! Links use [`NodeId`] indices instead of pointers; the arena in
//! [`DomTree`](crate::DomTree) owns every node.

use crate::{Attributes, NodeId, Tag};

/// Tree node - links plus element payload
#[derive(Debug)]
pub struct Node {
    /// Parent node (NONE if root or detached)
    pub parent: NodeId,
    /// First child
    pub first_child: NodeId,
    /// Last child (for O(1) append)
    pub last_child: NodeId,
    /// Previous sibling
    pub prev_sibling: NodeId,
    /// Next sibling
    pub next_sibling: NodeId,
    /// Element data
    pub element: Element,
}

impl Node {
    /// Create a detached node
    pub fn new(element: Element) -> Self {
        Self {
            parent: NodeId::NONE,
            first_child: NodeId::NONE,
            last_child: NodeId::NONE,
            prev_sibling: NodeId::NONE,
            next_sibling: NodeId::NONE,
            element,
        }
    }

    #[inline]
    pub fn has_children(&self) -> bool {
        self.first_child.is_valid()
    }
}

/// Element payload: tag, attributes and character data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: Tag,
    pub attrs: Attributes,
    /// Text before the first child
    pub text: Option<String>,
    /// Text after this element's end tag, inside the parent
    pub tail: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<Tag>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Attributes::new(),
            text: None,
            tail: None,
        }
    }

    /// Builder-style attribute setter
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.set(name, value);
        self
    }

    /// Builder-style text setter
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    #[inline]
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.set(name, value);
    }

    #[inline]
    pub fn has(&self, name: &str) -> bool {
        self.attrs.contains(name)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }
}
