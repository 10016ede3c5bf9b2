//! Report rendering

use mdwcag_engine::Report;
use mdwcag_engine::a11y::Severity;

/// Render reports as text, one finding per line
pub fn render_text(reports: &[Report], min: Severity, tree: bool) -> String {
    let mut out = String::new();
    for report in reports {
        for diagnostic in report.findings(min) {
            out.push_str(&format!(
                "{}:{}: {} ({})\n",
                report.source, diagnostic.node_path, diagnostic, diagnostic.rule_id
            ));
        }
        if tree {
            out.push_str(&format!("--- {} ---\n{}", report.source, report.tree));
        }
    }

    let total: usize = reports.iter().map(|r| r.findings(Severity::Info).count()).sum();
    out.push_str(&format!(
        "{} finding(s) in {} document(s)\n",
        total,
        reports.len()
    ));
    out
}

/// Render reports as a JSON array
pub fn render_json(reports: &[Report]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
