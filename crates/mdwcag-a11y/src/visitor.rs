//! Element visitor
//!
//! Single dispatch on the element tag. Each `visit_*` handler defaults to
//! [`ElementVisitor::generic_visit`], so a visitor only overrides the kinds
//! it cares about. A handler may prune (not recurse), recurse by hand with a
//! custom [`VisitContext`], or delegate to `generic_visit`.
//!
//! ```
//! use mdwcag_a11y::visitor::{ElementVisitor, VisitContext, walk};
//! use mdwcag_dom::{DomTree, Element, NodeId};
//!
//! #[derive(Default)]
//! struct CountImages(usize);
//!
//! impl ElementVisitor for CountImages {
//!     fn visit_img(&mut self, _tree: &mut DomTree, _node: NodeId, _cx: &VisitContext) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let mut tree = DomTree::new();
//! let p = tree.append(tree.root(), Element::new("p")).unwrap();
//! tree.append(p, Element::new("img")).unwrap();
//!
//! let mut counter = CountImages::default();
//! walk(&mut counter, &mut tree);
//! assert_eq!(counter.0, 1);
//! ```

use mdwcag_dom::{DomTree, NodeId, NodePath, Tag};

/// Context handed to every handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitContext {
    path: NodePath,
    row_index: Option<usize>,
}

impl VisitContext {
    /// Context for the tree root
    pub fn root() -> Self {
        Self::default()
    }

    /// Context for a node at `path`
    pub fn at(path: NodePath) -> Self {
        Self {
            path,
            row_index: None,
        }
    }

    /// Context for the `index`-th child; custom fields are not inherited
    pub fn child(&self, index: usize) -> Self {
        Self::at(self.path.child(index))
    }

    /// Attach a 1-based table row index
    pub fn with_row_index(mut self, index: usize) -> Self {
        self.row_index = Some(index);
        self
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }

    /// Zero-based position among siblings (`None` for the walk's start)
    pub fn sibling_index(&self) -> Option<usize> {
        self.path.last()
    }

    pub fn row_index(&self) -> Option<usize> {
        self.row_index
    }

    pub fn depth(&self) -> usize {
        self.path.depth()
    }
}

/// Handler slots, one per element kind with a dedicated handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Handler {
    Img,
    P,
    H1,
    Table,
    Thead,
    Tbody,
    Tr,
    Td,
    Th,
    Generic,
}

impl Handler {
    fn for_tag(tag: &Tag) -> Self {
        match tag {
            Tag::Img => Self::Img,
            Tag::P => Self::P,
            Tag::H1 => Self::H1,
            Tag::Table => Self::Table,
            Tag::Thead => Self::Thead,
            Tag::Tbody => Self::Tbody,
            Tag::Tr => Self::Tr,
            Tag::Td => Self::Td,
            Tag::Th => Self::Th,
            _ => Self::Generic,
        }
    }
}

/// Tree visitor with per-tag handlers
pub trait ElementVisitor {
    /// Dispatch `node` to the handler for its tag
    fn visit(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        let Some(handler) = tree.element(node).map(|e| Handler::for_tag(&e.tag)) else {
            return;
        };
        match handler {
            Handler::Img => self.visit_img(tree, node, cx),
            Handler::P => self.visit_p(tree, node, cx),
            Handler::H1 => self.visit_h1(tree, node, cx),
            Handler::Table => self.visit_table(tree, node, cx),
            Handler::Thead => self.visit_thead(tree, node, cx),
            Handler::Tbody => self.visit_tbody(tree, node, cx),
            Handler::Tr => self.visit_tr(tree, node, cx),
            Handler::Td => self.visit_td(tree, node, cx),
            Handler::Th => self.visit_th(tree, node, cx),
            Handler::Generic => self.generic_visit(tree, node, cx),
        }
    }

    /// Visit every child in order with its sibling index
    fn generic_visit(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        for (index, child) in tree.child_ids(node).into_iter().enumerate() {
            self.visit(tree, child, &cx.child(index));
        }
    }

    fn visit_img(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_p(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_h1(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_table(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_thead(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_tbody(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_tr(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_td(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }

    fn visit_th(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        self.generic_visit(tree, node, cx);
    }
}

/// Walk the whole tree from its root
pub fn walk<V: ElementVisitor + ?Sized>(visitor: &mut V, tree: &mut DomTree) {
    let root = tree.root();
    visitor.visit(tree, root, &VisitContext::root());
}

/// Walk the subtree under `node`, with paths relative to the tree root
pub fn walk_from<V: ElementVisitor + ?Sized>(visitor: &mut V, tree: &mut DomTree, node: NodeId) {
    let cx = VisitContext::at(tree.path(node));
    visitor.visit(tree, node, &cx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdwcag_dom::Element;

    /// Records (tag, path, sibling index) for every dispatched node
    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, String, Option<usize>)>,
    }

    impl ElementVisitor for Recorder {
        fn visit(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
            let tag = tree.element(node).unwrap().tag.to_string();
            self.seen
                .push((tag, cx.path().to_string(), cx.sibling_index()));
            self.generic_visit(tree, node, cx);
        }
    }

    /// Prunes paragraphs
    #[derive(Default)]
    struct SkipParagraphs {
        images: usize,
    }

    impl ElementVisitor for SkipParagraphs {
        fn visit_p(&mut self, _: &mut DomTree, _: NodeId, _: &VisitContext) {}

        fn visit_img(&mut self, _: &mut DomTree, _: NodeId, _: &VisitContext) {
            self.images += 1;
        }
    }

    fn sample() -> DomTree {
        let mut tree = DomTree::new();
        let root = tree.root();
        tree.append(root, Element::new("h1")).unwrap();
        let p = tree.append(root, Element::new("p")).unwrap();
        tree.append(p, Element::new("img")).unwrap();
        let div = tree.append(root, Element::new("div")).unwrap();
        tree.append(div, Element::new("img")).unwrap();
        tree
    }

    #[test]
    fn test_generic_visit_propagates_sibling_index() {
        let mut tree = sample();
        let mut recorder = Recorder::default();
        walk(&mut recorder, &mut tree);

        let seen: Vec<_> = recorder
            .seen
            .iter()
            .map(|(t, p, i)| (t.as_str(), p.as_str(), *i))
            .collect();
        assert_eq!(
            seen,
            vec![
                ("div", "/", None),
                ("h1", "/0", Some(0)),
                ("p", "/1", Some(1)),
                ("img", "/1/0", Some(0)),
                ("div", "/2", Some(2)),
                ("img", "/2/0", Some(0)),
            ]
        );
    }

    #[test]
    fn test_handler_can_prune_subtree() {
        let mut tree = sample();
        let mut visitor = SkipParagraphs::default();
        walk(&mut visitor, &mut tree);
        // the image inside <p> is never reached
        assert_eq!(visitor.images, 1);
    }

    #[test]
    fn test_walk_from_uses_absolute_paths() {
        let mut tree = sample();
        let div = tree.child_ids(tree.root())[2];
        let mut recorder = Recorder::default();
        walk_from(&mut recorder, &mut tree, div);

        assert_eq!(recorder.seen[0].1, "/2");
        assert_eq!(recorder.seen[1].1, "/2/0");
    }

    #[test]
    fn test_child_context_drops_row_index() {
        let cx = VisitContext::root().child(3).with_row_index(4);
        assert_eq!(cx.row_index(), Some(4));
        assert_eq!(cx.sibling_index(), Some(3));
        assert_eq!(cx.child(0).row_index(), None);
        assert_eq!(cx.child(0).depth(), 2);
    }
}
