//! Pass pipeline
//!
//! Ordered pass composition over one tree. Passes run sequentially and each
//! sees every mutation made by the ones before it.

use mdwcag_dom::{DomTree, NodeId};

use crate::diagnostics::Diagnostics;
use crate::passes::{
    AltCheck, AriaRole, AriaTableIndex, AriaTableRole, ContrastProbe, ImageContrast, Pass,
    PassKind, Stage, TitleCheck,
};

/// Pipeline assembly errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("unknown pass `{0}`")]
    UnknownPass(String),

    #[error("pass `{0}` is listed more than once")]
    DuplicatePass(PassKind),
}

/// Ordered set of passes, at most one per kind
#[derive(Default)]
pub struct Pipeline {
    passes: Vec<Box<dyn Pass>>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the passes named by `kinds`, in order.
    ///
    /// `probe` backs the contrast pass and is dropped when that pass is not
    /// requested.
    pub fn from_kinds(
        kinds: &[PassKind],
        probe: Box<dyn ContrastProbe>,
    ) -> Result<Self, PipelineError> {
        let mut pipeline = Self::new();
        let mut probe = Some(probe);
        for &kind in kinds {
            let pass: Box<dyn Pass> = match kind {
                PassKind::AltCheck => Box::new(AltCheck),
                PassKind::TitleCheck => Box::new(TitleCheck),
                PassKind::AriaRole => Box::new(AriaRole),
                PassKind::AriaTableRole => Box::new(AriaTableRole),
                PassKind::AriaTableIndex => Box::new(AriaTableIndex),
                PassKind::ImageContrast => match probe.take() {
                    Some(probe) => Box::new(ImageContrast::new(probe)),
                    None => return Err(PipelineError::DuplicatePass(kind)),
                },
            };
            pipeline.register(pass)?;
        }
        Ok(pipeline)
    }

    /// Append a pass; a second pass of the same kind is rejected
    pub fn register(&mut self, pass: Box<dyn Pass>) -> Result<(), PipelineError> {
        let kind = pass.kind();
        if self.contains(kind) {
            return Err(PipelineError::DuplicatePass(kind));
        }
        tracing::debug!("Registered pass {} ({:?} stage)", kind, pass.stage());
        self.passes.push(pass);
        Ok(())
    }

    pub fn contains(&self, kind: PassKind) -> bool {
        self.passes.iter().any(|p| p.kind() == kind)
    }

    /// Registered kinds in run order
    pub fn kinds(&self) -> Vec<PassKind> {
        self.passes.iter().map(|p| p.kind()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn has_block_passes(&self) -> bool {
        self.passes.iter().any(|p| p.stage() == Stage::Block)
    }

    /// Run block-stage passes on the parent of a just-completed block
    pub fn run_block_stage(&mut self, tree: &mut DomTree, parent: NodeId, sink: &mut Diagnostics) {
        for pass in self.passes.iter_mut().filter(|p| p.stage() == Stage::Block) {
            pass.run(tree, parent, sink);
        }
    }

    /// Run tree-stage passes over the finished tree, in order
    pub fn run(&mut self, tree: &mut DomTree, sink: &mut Diagnostics) {
        let root = tree.root();
        for pass in self.passes.iter_mut().filter(|p| p.stage() == Stage::Tree) {
            tracing::debug!("Running pass {}", pass.kind());
            let before = sink.len();
            pass.run(tree, root, sink);
            tracing::debug!("Pass {} recorded {} diagnostics", pass.kind(), sink.len() - before);
        }
    }

    /// Run every pass over an already built tree.
    ///
    /// Block-stage passes see the whole tree once, ahead of the tree stage.
    /// Used for trees that did not come out of the parser.
    pub fn run_all(&mut self, tree: &mut DomTree, sink: &mut Diagnostics) {
        let root = tree.root();
        self.run_block_stage(tree, root, sink);
        self.run(tree, sink);
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("passes", &self.kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::{ContrastError, ImageFileProbe};
    use mdwcag_dom::{Element, NodePath};

    struct Flat;

    impl ContrastProbe for Flat {
        fn luminance_spread(&self, _src: &str) -> Result<f64, ContrastError> {
            Ok(0.0)
        }
    }

    /// Records the order it ran in through the tree root text
    struct Marker(PassKind);

    impl Pass for Marker {
        fn kind(&self) -> PassKind {
            self.0
        }

        fn run(&mut self, tree: &mut DomTree, _scope: NodeId, _sink: &mut Diagnostics) {
            let root = tree.root();
            if let Some(root) = tree.element_mut(root) {
                let text = root.text.get_or_insert_with(String::new);
                text.push_str(self.0.name());
                text.push(';');
            }
        }
    }

    #[test]
    fn test_duplicate_pass_is_rejected() {
        let err = Pipeline::from_kinds(
            &[PassKind::AltCheck, PassKind::TitleCheck, PassKind::AltCheck],
            Box::new(Flat),
        )
        .unwrap_err();
        assert_eq!(err, PipelineError::DuplicatePass(PassKind::AltCheck));
        assert_eq!(err.to_string(), "pass `alt-check` is listed more than once");
    }

    #[test]
    fn test_from_kinds_keeps_order() {
        let kinds = [PassKind::ImageContrast, PassKind::AriaRole, PassKind::AltCheck];
        let pipeline = Pipeline::from_kinds(&kinds, Box::new(ImageFileProbe::default())).unwrap();
        assert_eq!(pipeline.kinds(), kinds.to_vec());
        assert!(!pipeline.has_block_passes());
    }

    #[test]
    fn test_stages_are_separated() {
        let mut pipeline = Pipeline::new();
        pipeline.register(Box::new(Marker(PassKind::TitleCheck))).unwrap();
        pipeline.register(Box::new(Marker(PassKind::AriaTableRole))).unwrap();
        pipeline.register(Box::new(Marker(PassKind::AltCheck))).unwrap();
        assert!(pipeline.has_block_passes());

        let mut tree = DomTree::new();
        let mut sink = Diagnostics::new();
        pipeline.run(&mut tree, &mut sink);
        let root = tree.root();
        assert_eq!(
            tree.element(root).unwrap().text(),
            Some("title-check;alt-check;")
        );

        pipeline.run_block_stage(&mut tree, root, &mut sink);
        assert_eq!(
            tree.element(root).unwrap().text(),
            Some("title-check;alt-check;aria-table-role;")
        );
    }

    #[test]
    fn test_later_passes_see_earlier_mutations() {
        let mut tree = DomTree::new();
        let root = tree.root();
        tree.append(root, Element::new("p").with_text("intro")).unwrap();
        let p = tree.append(root, Element::new("p")).unwrap();
        tree.append(p, Element::new("img").with_attr("src", "a.png")).unwrap();
        tree.append(p, Element::new("img").with_attr("src", "b.png")).unwrap();

        let mut pipeline = Pipeline::from_kinds(&[PassKind::AltCheck], Box::new(Flat)).unwrap();
        let mut sink = Diagnostics::new();
        pipeline.run(&mut tree, &mut sink);

        // both images get the placeholder, which then repeats within the paragraph
        let rules: Vec<_> = sink.iter().map(|d| d.rule_id).collect();
        assert_eq!(rules, vec!["alt-missing", "alt-missing", "alt-duplicate"]);
        assert_eq!(sink.as_slice()[2].node_path, NodePath(vec![1, 1]));
    }

    #[test]
    fn test_run_all_applies_block_passes_to_built_trees() {
        let mut tree = DomTree::new();
        let table = tree.append(tree.root(), Element::new("table")).unwrap();
        let tbody = tree.append(table, Element::new("tbody")).unwrap();
        tree.append(tbody, Element::new("tr")).unwrap();

        let mut pipeline = Pipeline::from_kinds(
            &[PassKind::AriaTableRole, PassKind::AriaTableIndex],
            Box::new(Flat),
        )
        .unwrap();
        let mut sink = Diagnostics::new();
        pipeline.run_all(&mut tree, &mut sink);

        let table = tree.element(table).unwrap();
        assert_eq!(table.get("role"), Some("table"));
        assert_eq!(table.get("aria-rowcount"), Some("1"));
        assert_eq!(tree.element(tbody).unwrap().get("role"), Some("rowgroup"));
    }
}
