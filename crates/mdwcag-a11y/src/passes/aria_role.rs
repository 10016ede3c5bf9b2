//! Heading roles from `==role==` markers
//!
//! `# Header ==banner==` becomes `<h1 role="banner">Header</h1>`. Only the
//! roles in [`LandmarkRole`] are honoured; anything else leaves the heading
//! exactly as parsed.

use mdwcag_dom::{DomTree, NodeId};

use super::{Pass, PassKind};
use crate::aria::{LandmarkRole, ROLE};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::visitor::{ElementVisitor, VisitContext, walk_from};

const MARKER: &str = "==";

/// Byte range of the first marker and the token it encloses
fn find_marker(text: &str) -> Option<(usize, usize, &str)> {
    let open = text.find(MARKER)?;
    let inner = open + MARKER.len();
    let len = text[inner..].find(MARKER)?;
    Some((open, inner + len + MARKER.len(), &text[inner..inner + len]))
}

/// Remove every marker, then trim
fn strip_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((start, end, _)) = find_marker(rest) {
        out.push_str(&rest[..start]);
        rest = &rest[end..];
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Sets `role` on `h1` elements carrying a valid marker
pub struct RoleSetter<'a> {
    sink: &'a mut Diagnostics,
}

impl<'a> RoleSetter<'a> {
    pub fn new(sink: &'a mut Diagnostics) -> Self {
        Self { sink }
    }
}

impl ElementVisitor for RoleSetter<'_> {
    fn visit_h1(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        let Some(heading) = tree.element_mut(node) else {
            return;
        };
        let Some(text) = heading.text() else {
            return;
        };
        let Some(role) = find_marker(text).and_then(|(_, _, token)| LandmarkRole::parse(token))
        else {
            return;
        };

        let stripped = strip_markers(text);
        heading.text = Some(stripped);
        heading.set(ROLE, role.as_str());
        self.sink.push(
            Diagnostic::debug("aria-role-set", format!("Setting role to {}", role.as_str()))
                .at(cx.path().clone()),
        );
    }
}

/// `aria-role`
#[derive(Debug, Default, Clone, Copy)]
pub struct AriaRole;

impl Pass for AriaRole {
    fn kind(&self) -> PassKind {
        PassKind::AriaRole
    }

    fn run(&mut self, tree: &mut DomTree, scope: NodeId, sink: &mut Diagnostics) {
        walk_from(&mut RoleSetter::new(sink), tree, scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::visitor::walk;
    use mdwcag_dom::Element;

    fn heading(tag: &str, text: &str) -> (DomTree, NodeId) {
        let mut tree = DomTree::new();
        let h = tree
            .append(tree.root(), Element::new(tag).with_text(text))
            .unwrap();
        (tree, h)
    }

    fn run(tree: &mut DomTree) -> Diagnostics {
        let mut sink = Diagnostics::new();
        walk(&mut RoleSetter::new(&mut sink), tree);
        sink
    }

    #[test]
    fn test_find_marker() {
        assert_eq!(find_marker("Header ==banner=="), Some((7, 17, "banner")));
        assert_eq!(find_marker("a ==b== ==c=="), Some((2, 7, "b")));
        assert_eq!(find_marker("no marker"), None);
        assert_eq!(find_marker("==open only"), None);
    }

    #[test]
    fn test_strip_markers() {
        assert_eq!(strip_markers("Header ==banner=="), "Header");
        assert_eq!(strip_markers("==main== Body ==x== end"), "Body  end");
    }

    #[test]
    fn test_valid_role_is_applied() {
        let (mut tree, h1) = heading("h1", "Header ==banner==");
        let sink = run(&mut tree);

        let h1 = tree.element(h1).unwrap();
        assert_eq!(h1.get("role"), Some("banner"));
        assert_eq!(h1.text(), Some("Header"));
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.as_slice()[0].severity, Severity::Debug);
        assert_eq!(sink.as_slice()[0].message, "Setting role to banner");
    }

    #[test]
    fn test_unknown_role_leaves_heading_untouched() {
        let (mut tree, h1) = heading("h1", "Header ==bogus==");
        let sink = run(&mut tree);

        let h1 = tree.element(h1).unwrap();
        assert_eq!(h1.get("role"), None);
        assert_eq!(h1.text(), Some("Header ==bogus=="));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_only_first_marker_decides() {
        let (mut tree, h1) = heading("h1", "==bogus== Title ==main==");
        run(&mut tree);
        assert_eq!(tree.element(h1).unwrap().get("role"), None);
    }

    #[test]
    fn test_lower_headings_are_ignored() {
        let (mut tree, h2) = heading("h2", "Sub ==main==");
        run(&mut tree);
        assert_eq!(tree.element(h2).unwrap().get("role"), None);
    }
}
