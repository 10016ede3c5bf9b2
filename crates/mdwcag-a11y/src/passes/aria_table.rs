//! Table semantics
//!
//! Two passes. [`AriaTableRole`] runs while the parser builds the tree and
//! marks each finished `table`; [`AriaTableIndex`] runs over the complete
//! tree and assigns row-group, row and cell roles plus body row indices.

use mdwcag_dom::{DomTree, NodeId};

use super::{Pass, PassKind};
use crate::aria::{ARIA_ROWCOUNT, ARIA_ROWINDEX, ROLE, TableRole};
use crate::diagnostics::Diagnostics;
use crate::visitor::{ElementVisitor, VisitContext, walk_from};

fn set_role(tree: &mut DomTree, node: NodeId, role: TableRole) {
    if let Some(element) = tree.element_mut(node) {
        element.set(ROLE, role.as_str());
    }
}

/// Sets `role="table"` and `aria-rowcount`.
///
/// The row count is the number of direct children, so a grouped table
/// reports its row groups rather than its rows.
#[derive(Debug, Default)]
pub struct TableRoleSetter;

impl ElementVisitor for TableRoleSetter {
    fn visit_table(&mut self, tree: &mut DomTree, node: NodeId, _cx: &VisitContext) {
        let count = tree.child_count(node);
        set_role(tree, node, TableRole::Table);
        if let Some(table) = tree.element_mut(node) {
            table.set(ARIA_ROWCOUNT, count.to_string());
        }
    }
}

/// Row groups, rows, cells and 1-based body row indices
#[derive(Debug, Default)]
pub struct TableRowIndexer;

impl ElementVisitor for TableRowIndexer {
    fn visit_thead(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        set_role(tree, node, TableRole::RowGroup);
        for (index, row) in tree.child_ids(node).into_iter().enumerate() {
            self.visit(tree, row, &cx.child(index));
        }
    }

    fn visit_tbody(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        set_role(tree, node, TableRole::RowGroup);
        for (index, row) in tree.child_ids(node).into_iter().enumerate() {
            self.visit(tree, row, &cx.child(index).with_row_index(index + 1));
        }
    }

    fn visit_tr(&mut self, tree: &mut DomTree, node: NodeId, cx: &VisitContext) {
        set_role(tree, node, TableRole::Row);
        if let Some(row_index) = cx.row_index() {
            if let Some(row) = tree.element_mut(node) {
                row.set(ARIA_ROWINDEX, row_index.to_string());
            }
        }
        for (index, cell) in tree.child_ids(node).into_iter().enumerate() {
            self.visit(tree, cell, &cx.child(index));
        }
    }

    fn visit_td(&mut self, tree: &mut DomTree, node: NodeId, _cx: &VisitContext) {
        set_role(tree, node, TableRole::Cell);
    }

    fn visit_th(&mut self, tree: &mut DomTree, node: NodeId, _cx: &VisitContext) {
        set_role(tree, node, TableRole::ColumnHeader);
    }
}

/// `aria-table-role` (block stage)
#[derive(Debug, Default, Clone, Copy)]
pub struct AriaTableRole;

impl Pass for AriaTableRole {
    fn kind(&self) -> PassKind {
        PassKind::AriaTableRole
    }

    fn run(&mut self, tree: &mut DomTree, scope: NodeId, _sink: &mut Diagnostics) {
        walk_from(&mut TableRoleSetter, tree, scope);
    }
}

/// `aria-table-index`
#[derive(Debug, Default, Clone, Copy)]
pub struct AriaTableIndex;

impl Pass for AriaTableIndex {
    fn kind(&self) -> PassKind {
        PassKind::AriaTableIndex
    }

    fn run(&mut self, tree: &mut DomTree, scope: NodeId, _sink: &mut Diagnostics) {
        walk_from(&mut TableRowIndexer, tree, scope);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::walk;
    use mdwcag_dom::{Element, Tag};

    /// One header row, `body_rows` body rows, two columns
    fn table(body_rows: usize) -> DomTree {
        let mut tree = DomTree::new();
        let table = tree.append(tree.root(), Element::new("table")).unwrap();
        let thead = tree.append(table, Element::new("thead")).unwrap();
        let tr = tree.append(thead, Element::new("tr")).unwrap();
        tree.append(tr, Element::new("th").with_text("Name")).unwrap();
        tree.append(tr, Element::new("th").with_text("Qty")).unwrap();
        let tbody = tree.append(table, Element::new("tbody")).unwrap();
        for i in 0..body_rows {
            let tr = tree.append(tbody, Element::new("tr")).unwrap();
            tree.append(tr, Element::new("td").with_text(format!("r{i}"))).unwrap();
            tree.append(tr, Element::new("td").with_text(i.to_string())).unwrap();
        }
        tree
    }

    fn attr(tree: &DomTree, id: NodeId, name: &str) -> Option<String> {
        tree.element(id).unwrap().get(name).map(str::to_string)
    }

    #[test]
    fn test_role_setter_counts_direct_children() {
        let mut tree = table(3);
        walk(&mut TableRoleSetter, &mut tree);

        let t = tree.find_all(tree.root(), &Tag::Table)[0];
        assert_eq!(attr(&tree, t, "role").as_deref(), Some("table"));
        assert_eq!(attr(&tree, t, "aria-rowcount").as_deref(), Some("2"));
        // nothing below the table is touched
        let tbody = tree.find_all(t, &Tag::Tbody)[0];
        assert_eq!(attr(&tree, tbody, "role"), None);
    }

    #[test]
    fn test_indexer_numbers_body_rows_only() {
        let mut tree = table(3);
        walk(&mut TableRowIndexer, &mut tree);
        let root = tree.root();

        let rows = tree.find_all(root, &Tag::Tr);
        let indices: Vec<_> = rows.iter().map(|&r| attr(&tree, r, "aria-rowindex")).collect();
        assert_eq!(
            indices,
            vec![None, Some("1".into()), Some("2".into()), Some("3".into())]
        );
        for row in rows {
            assert_eq!(attr(&tree, row, "role").as_deref(), Some("row"));
        }
        for group in [Tag::Thead, Tag::Tbody] {
            let id = tree.find_all(root, &group)[0];
            assert_eq!(attr(&tree, id, "role").as_deref(), Some("rowgroup"));
        }
        for th in tree.find_all(root, &Tag::Th) {
            assert_eq!(attr(&tree, th, "role").as_deref(), Some("columnheader"));
        }
        for td in tree.find_all(root, &Tag::Td) {
            assert_eq!(attr(&tree, td, "role").as_deref(), Some("cell"));
            assert_eq!(attr(&tree, td, "aria-rowindex"), None);
        }
    }

    #[test]
    fn test_index_resets_per_tbody() {
        let mut tree = table(2);
        let t = tree.find_all(tree.root(), &Tag::Table)[0];
        let second = tree.append(t, Element::new("tbody")).unwrap();
        let extra = tree.append(second, Element::new("tr")).unwrap();

        walk(&mut TableRowIndexer, &mut tree);
        assert_eq!(attr(&tree, extra, "aria-rowindex").as_deref(), Some("1"));
    }

    #[test]
    fn test_row_outside_tbody_gets_no_index() {
        let mut tree = DomTree::new();
        let t = tree.append(tree.root(), Element::new("table")).unwrap();
        let tr = tree.append(t, Element::new("tr")).unwrap();

        walk(&mut TableRowIndexer, &mut tree);
        assert_eq!(attr(&tree, tr, "role").as_deref(), Some("row"));
        assert_eq!(attr(&tree, tr, "aria-rowindex"), None);
    }
}
