//! Element tree (arena-based allocation)

use std::fmt;

use serde::{Serialize, Serializer};

use crate::{DomError, DomResult, Element, Node, NodeId, Tag};

/// Arena-based element tree. Node 0 is always the root.
#[derive(Debug)]
pub struct DomTree {
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a tree whose root is an empty `div`
    pub fn new() -> Self {
        Self::with_root(Element::new(Tag::Div))
    }

    /// Create a tree with a custom root element
    pub fn with_root(root: Element) -> Self {
        Self {
            nodes: vec![Node::new(root)],
        }
    }

    #[inline]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Number of nodes in the tree (detached nodes included)
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// A tree always holds its root
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).map(|n| &n.element)
    }

    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.get_mut(id).map(|n| &mut n.element)
    }

    /// Allocate a detached node
    pub fn create(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node::new(element));
        id
    }

    /// Allocate a detached element with no attributes
    pub fn create_element(&mut self, tag: impl Into<Tag>) -> NodeId {
        self.create(Element::new(tag))
    }

    /// Append a detached node as the last child of `parent`
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<()> {
        let child_node = self.get(child).ok_or(DomError::NotFound(child))?;
        if child_node.parent.is_valid() || child == NodeId::ROOT {
            return Err(DomError::AlreadyAttached(child));
        }
        if self.get(parent).is_none() {
            return Err(DomError::NotFound(parent));
        }
        if self.ancestors(parent).any(|a| a == child) {
            return Err(DomError::Cycle { parent, child });
        }

        let last = self.nodes[parent.index()].last_child;
        {
            let node = &mut self.nodes[child.index()];
            node.parent = parent;
            node.prev_sibling = last;
            node.next_sibling = NodeId::NONE;
        }
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        Ok(())
    }

    /// Create `element` and append it to `parent`
    pub fn append(&mut self, parent: NodeId, element: Element) -> DomResult<NodeId> {
        let id = self.create(element);
        self.append_child(parent, id)?;
        Ok(id)
    }

    /// Iterate the children of `id` in document order
    pub fn children(&self, id: NodeId) -> Children<'_> {
        let next = self.get(id).map_or(NodeId::NONE, |n| n.first_child);
        Children { tree: self, next }
    }

    /// Snapshot of the child ids, for walks that mutate the tree
    pub fn child_ids(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id).collect()
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).map(|n| n.parent).filter(|p| p.is_valid())
    }

    /// `id` itself, then each ancestor up to the root
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        let start = self.get(id).map(|_| id);
        std::iter::successors(start, move |&cur| self.parent(cur))
    }

    /// Zero-based position among siblings
    pub fn sibling_index(&self, id: NodeId) -> usize {
        let mut index = 0;
        let mut cur = self.get(id).map_or(NodeId::NONE, |n| n.prev_sibling);
        while cur.is_valid() {
            index += 1;
            cur = self.nodes[cur.index()].prev_sibling;
        }
        index
    }

    /// Sibling-index path from the root to `id`
    pub fn path(&self, id: NodeId) -> NodePath {
        let mut indices: Vec<usize> = self
            .ancestors(id)
            .filter(|&n| self.parent(n).is_some())
            .map(|n| self.sibling_index(n))
            .collect();
        indices.reverse();
        NodePath(indices)
    }

    /// Pre-order search below (and including) `from` for elements of `tag`
    pub fn find_all(&self, from: NodeId, tag: &Tag) -> Vec<NodeId> {
        let mut found = Vec::new();
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            if &node.element.tag == tag {
                found.push(id);
            }
            let mut kids = self.child_ids(id);
            kids.reverse();
            stack.extend(kids);
        }
        found
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, id: NodeId, depth: usize) -> fmt::Result {
        let Some(node) = self.get(id) else {
            return Ok(());
        };
        let element = &node.element;
        write!(f, "{:indent$}{}", "", element.tag, indent = depth * 2)?;
        for attr in element.attrs.iter() {
            write!(f, " {}={:?}", attr.name, attr.value)?;
        }
        if let Some(text) = element.text() {
            write!(f, " text={text:?}")?;
        }
        if let Some(tail) = element.tail() {
            write!(f, " tail={tail:?}")?;
        }
        writeln!(f)?;
        for child in self.children(id) {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Indented outline of the tree, one element per line
impl fmt::Display for DomTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root(), 0)
    }
}

/// Iterator over child ids
pub struct Children<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self.tree.get(current).map_or(NodeId::NONE, |n| n.next_sibling);
        Some(current)
    }
}

/// Location of a node as sibling indices from the root; `/` is the root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath(pub Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this node
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn last(&self) -> Option<usize> {
        self.0.last().copied()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for index in &self.0 {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (DomTree, NodeId, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let root = tree.root();
        let h1 = tree.append(root, Element::new("h1").with_text("Title")).unwrap();
        let p = tree.append(root, Element::new("p")).unwrap();
        let img = tree
            .append(p, Element::new("img").with_attr("src", "a.png"))
            .unwrap();
        (tree, h1, p, img)
    }

    #[test]
    fn test_append_and_children() {
        let (tree, h1, p, img) = sample();
        assert_eq!(tree.child_ids(tree.root()), vec![h1, p]);
        assert_eq!(tree.child_ids(p), vec![img]);
        assert_eq!(tree.parent(img), Some(p));
        assert_eq!(tree.parent(tree.root()), None);
        assert_eq!(tree.child_count(tree.root()), 2);
    }

    #[test]
    fn test_paths() {
        let (tree, h1, p, img) = sample();
        assert_eq!(tree.path(tree.root()).to_string(), "/");
        assert_eq!(tree.path(h1).to_string(), "/0");
        assert_eq!(tree.path(p).to_string(), "/1");
        assert_eq!(tree.path(img).to_string(), "/1/0");
        assert_eq!(NodePath::root().child(1).child(0), tree.path(img));
    }

    #[test]
    fn test_append_rejects_attached_and_cycles() {
        let (mut tree, h1, p, _) = sample();
        assert_eq!(tree.append_child(p, h1), Err(DomError::AlreadyAttached(h1)));

        let detached = tree.create_element("div");
        let inner = tree.append(detached, Element::new("span")).unwrap();
        assert_eq!(
            tree.append_child(inner, detached),
            Err(DomError::Cycle { parent: inner, child: detached })
        );
        assert_eq!(
            tree.append_child(NodeId(999), detached),
            Err(DomError::NotFound(NodeId(999)))
        );
    }

    #[test]
    fn test_find_all_document_order() {
        let mut tree = DomTree::new();
        let root = tree.root();
        let p1 = tree.append(root, Element::new("p")).unwrap();
        let a = tree.append(p1, Element::new("img")).unwrap();
        let p2 = tree.append(root, Element::new("p")).unwrap();
        let b = tree.append(p2, Element::new("img")).unwrap();
        assert_eq!(tree.find_all(root, &Tag::Img), vec![a, b]);
        assert_eq!(tree.find_all(root, &Tag::P), vec![p1, p2]);
    }

    #[test]
    fn test_outline() {
        let (tree, _, _, _) = sample();
        let outline = tree.to_string();
        assert_eq!(
            outline,
            "div\n  h1 text=\"Title\"\n  p\n    img src=\"a.png\"\n"
        );
    }
}
