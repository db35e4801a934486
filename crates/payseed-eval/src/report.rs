use crate::metrics::MetricsReport;
use crate::model::Violation;

/// Render a deterministic markdown report from metrics and violations.
pub fn render_report(
    metrics: &MetricsReport,
    violations: &[Violation],
    max_examples: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("# Payseed Integrity Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", metrics.run_id));
    lines.push(format!("- dataset_version: {}", metrics.dataset_version));
    lines.push(format!("- metrics_version: {}", metrics.metrics_version));
    lines.push(String::new());

    lines.push("## Row counts".to_string());
    lines.push("| table | rows_expected | rows_found |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    for table in &metrics.tables {
        let expected = table
            .rows_expected
            .map(|value| value.to_string())
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!(
            "| {} | {} | {} |",
            table.table, expected, table.rows_found
        ));
    }
    lines.push(String::new());

    lines.push("## Check summary".to_string());
    lines.push("| check | checked | violations |".to_string());
    lines.push("| --- | --- | --- |".to_string());
    for (name, stats) in metrics.checks.entries() {
        lines.push(format!(
            "| {} | {} | {} |",
            name, stats.checked, stats.violations
        ));
    }
    lines.push(String::new());

    if !metrics.warnings.is_empty() {
        lines.push("## Warnings".to_string());
        for warning in &metrics.warnings {
            let hint = warning
                .hint
                .as_ref()
                .map(|hint| format!(" (hint: {hint})"))
                .unwrap_or_default();
            lines.push(format!("- {}: {}{}", warning.path, warning.message, hint));
        }
        lines.push(String::new());
    }

    if !violations.is_empty() {
        lines.push("## Top violations".to_string());
        for violation in violations.iter().take(max_examples) {
            lines.push(format!(
                "- {} {} [{}]: {}",
                violation.path, violation.record_id, violation.code, violation.message
            ));
        }
        if violations.len() > max_examples {
            lines.push(format!("- ... {} more", violations.len() - max_examples));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(metrics, violations));
    lines.join("\n")
}

fn recommendations(metrics: &MetricsReport, violations: &[Violation]) -> Vec<String> {
    let checks = &metrics.checks;
    let mut lines = Vec::new();
    if checks.id_sequence.violations > 0 {
        lines.push("- ids must run contiguously from _001 in insertion order.".to_string());
    }
    if checks.references.violations > 0 {
        lines.push("- ensure parent tables are generated before children.".to_string());
    }
    if checks.pay_arithmetic.violations > 0 || checks.amounts.violations > 0 {
        lines.push("- recompute amounts from their source records.".to_string());
    }
    if checks.timestamps.violations > 0 || checks.audit_order.violations > 0 {
        lines.push("- derive timestamps from their anchors, not the wall clock.".to_string());
    }
    if !metrics.warnings.is_empty() {
        lines.push("- missing tables were treated as empty; re-run generation.".to_string());
    }
    if violations.is_empty() {
        lines.push("- no violations detected; compare digests across runs for drift.".to_string());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{CheckSummary, METRICS_VERSION, PerformanceMetrics};

    fn metrics() -> MetricsReport {
        MetricsReport {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: "run-1".to_string(),
            dataset_version: "0.1".to_string(),
            tables: Vec::new(),
            checks: CheckSummary::default(),
            warnings: Vec::new(),
            performance: PerformanceMetrics {
                load_ms: 0,
                validate_ms: 0,
                total_ms: 0,
            },
        }
    }

    #[test]
    fn caps_listed_violations() {
        let violations: Vec<Violation> = (1..=3)
            .map(|n| Violation {
                code: "dangling_reference".to_string(),
                path: "orders.vendor_id".to_string(),
                record_id: format!("ord_{n:03}"),
                message: "'vend_009' not found in vendors".to_string(),
            })
            .collect();

        let report = render_report(&metrics(), &violations, 2);
        assert!(report.contains("ord_002"));
        assert!(!report.contains("ord_003"));
        assert!(report.contains("- ... 1 more"));
    }

    #[test]
    fn clean_report_says_so() {
        let report = render_report(&metrics(), &[], 20);
        assert!(report.starts_with("# Payseed Integrity Report"));
        assert!(report.contains("no violations detected"));
    }
}
