//! End-to-end checks from Markdown text

use image::{GrayImage, Luma};
use mdwcag_engine::a11y::{PassKind, Severity};
use mdwcag_engine::dom::{NodePath, Tag};
use mdwcag_engine::{Checker, Config, MarkdownConfig};

const DOC: &str = "\
Intro with ![](logo.png) then ![Chart](q1.png) and ![Chart](q2.png)

# Site ==banner==

| Name | Qty |
|------|-----|
| a    | 1   |
| b    | 2   |
";

fn checker(config: Config) -> Checker {
    Checker::new(config).unwrap()
}

#[test]
fn test_default_passes_over_a_document() {
    let report = checker(Config::default()).check("doc.md", DOC).unwrap();

    let rules: Vec<_> = report.diagnostics.iter().map(|d| d.rule_id).collect();
    assert_eq!(
        rules,
        vec!["alt-empty", "alt-duplicate", "title-missing", "aria-role-set"]
    );
    assert_eq!(report.findings(Severity::Info).count(), 3);
    assert!(report.has_findings());

    let duplicate = &report.diagnostics.as_slice()[1];
    assert_eq!(
        duplicate.message,
        "Found an image with duplicate alt text(Chart) for q2.png"
    );
    assert_eq!(duplicate.node_path, NodePath(vec![0, 2]));

    let tree = &report.tree;
    let root = tree.root();
    let h1 = tree.find_all(root, &Tag::H1)[0];
    assert_eq!(tree.element(h1).unwrap().get("role"), Some("banner"));
    assert_eq!(tree.element(h1).unwrap().text(), Some("Site"));

    let table = tree.find_all(root, &Tag::Table)[0];
    assert_eq!(tree.element(table).unwrap().get("role"), Some("table"));
    assert_eq!(tree.element(table).unwrap().get("aria-rowcount"), Some("2"));
    let indices: Vec<_> = tree
        .find_all(table, &Tag::Tr)
        .into_iter()
        .map(|tr| tree.element(tr).unwrap().get("aria-rowindex").map(str::to_string))
        .collect();
    assert_eq!(indices, vec![None, Some("1".into()), Some("2".into())]);
}

#[test]
fn test_titled_document_has_no_title_finding() {
    let report = checker(Config::default())
        .check("-", "# Report\n\nBody text.\n")
        .unwrap();
    assert_eq!(report.diagnostics.by_rule("title-missing").count(), 0);
}

#[test]
fn test_table_role_runs_for_every_table_during_parsing() {
    let markdown = "\
| A |
|---|
| 1 |

Between.

| B | C |
|---|---|
| 2 | 3 |
| 4 | 5 |
";
    let config = Config::default().with_passes(vec![PassKind::AriaTableRole]);
    let report = checker(config).check("-", markdown).unwrap();

    let tree = &report.tree;
    for table in tree.find_all(tree.root(), &Tag::Table) {
        assert_eq!(tree.element(table).unwrap().get("role"), Some("table"));
        assert_eq!(tree.element(table).unwrap().get("aria-rowcount"), Some("2"));
    }
    // the index pass was not requested
    for tr in tree.find_all(tree.root(), &Tag::Tr) {
        assert_eq!(tree.element(tr).unwrap().get("role"), None);
    }
}

#[test]
fn test_header_only_table_counts_its_empty_body() {
    let report = checker(Config::default())
        .check("-", "# T\n\n| A | B |\n|---|---|\n")
        .unwrap();
    let tree = &report.tree;
    let table = tree.find_all(tree.root(), &Tag::Table)[0];
    assert_eq!(tree.element(table).unwrap().get("aria-rowcount"), Some("2"));

    let tbody = tree.find_all(table, &Tag::Tbody)[0];
    let row = tree.child_ids(tbody)[0];
    assert_eq!(tree.element(row).unwrap().get("aria-rowindex"), Some("1"));
    for td in tree.child_ids(row) {
        assert_eq!(tree.element(td).unwrap().get("role"), Some("cell"));
    }
}

#[test]
fn test_disabling_tables_disables_table_roles() {
    let config = Config {
        markdown: MarkdownConfig {
            tables: false,
            deletion: true,
        },
        ..Config::default()
    };
    let report = checker(config).check("-", DOC).unwrap();
    assert!(report.tree.find_all(report.tree.root(), &Tag::Table).is_empty());
}

#[test]
fn test_deletion_markup_becomes_del() {
    let report = checker(Config::default())
        .check("-", "# T\n\nfoo --bar-- baz\n")
        .unwrap();
    let tree = &report.tree;
    let del = tree.find_all(tree.root(), &Tag::Del)[0];
    assert_eq!(tree.element(del).unwrap().text(), Some("bar"));
    assert_eq!(tree.element(del).unwrap().tail(), Some(" baz"));
}

#[test]
fn test_contrast_resolves_against_the_document_directory() {
    let dir = tempfile::tempdir().unwrap();
    GrayImage::from_fn(4, 4, |x, _| Luma([if x < 2 { 0 } else { 255 }]))
        .save(dir.path().join("split.png"))
        .unwrap();
    let doc = dir.path().join("doc.md");
    std::fs::write(&doc, "# Title\n\n![Split](split.png) ![Gone](gone.png)\n").unwrap();

    let config = Config::default().with_passes(vec![PassKind::ImageContrast]);
    let report = checker(config).check_file(&doc).unwrap();

    let messages: Vec<_> = report.diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "Estimated contrast of the image(split.png) is 127.50",
            "No image found. Check the path for gone.png",
        ]
    );
}

#[test]
fn test_report_serialises_without_the_tree() {
    let report = checker(Config::default()).check("notes.md", "plain\n").unwrap();
    let json = serde_json::to_value(&report).unwrap();

    assert_eq!(json["source"], "notes.md");
    assert!(json.get("tree").is_none());
    assert_eq!(json["diagnostics"][0]["rule_id"], "title-missing");
    assert_eq!(json["diagnostics"][0]["node_path"], "/");
}
