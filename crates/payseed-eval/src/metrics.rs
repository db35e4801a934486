use serde::{Deserialize, Serialize};

/// Metrics contract version for dataset evaluation.
pub const METRICS_VERSION: &str = "0.1";

/// Machine-readable metrics for a dataset evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    pub metrics_version: String,
    pub run_id: String,
    pub dataset_version: String,
    pub tables: Vec<TableMetrics>,
    pub checks: CheckSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<WarningItem>,
    pub performance: PerformanceMetrics,
}

/// Per-table row counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetrics {
    pub table: String,
    pub rows_found: u64,
    /// Row count the generation report recorded, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows_expected: Option<u64>,
}

/// Outcome counters for every integrity check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    pub id_sequence: CheckStats,
    pub references: CheckStats,
    pub pay_arithmetic: CheckStats,
    pub amounts: CheckStats,
    pub timestamps: CheckStats,
    pub audit_order: CheckStats,
    pub department_heads: CheckStats,
}

impl CheckSummary {
    /// `(name, stats)` pairs in report order.
    pub fn entries(&self) -> [(&'static str, &CheckStats); 7] {
        [
            ("id_sequence", &self.id_sequence),
            ("references", &self.references),
            ("pay_arithmetic", &self.pay_arithmetic),
            ("amounts", &self.amounts),
            ("timestamps", &self.timestamps),
            ("audit_order", &self.audit_order),
            ("department_heads", &self.department_heads),
        ]
    }

    pub fn total_checked(&self) -> u64 {
        self.entries().iter().map(|(_, stats)| stats.checked).sum()
    }

    pub fn total_violations(&self) -> u64 {
        self.entries().iter().map(|(_, stats)| stats.violations).sum()
    }
}

/// Generic check counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStats {
    pub checked: u64,
    pub violations: u64,
}

impl CheckStats {
    /// Count one evaluation; returns `passed` for chaining.
    pub fn record(&mut self, passed: bool) -> bool {
        self.checked += 1;
        if !passed {
            self.violations += 1;
        }
        passed
    }
}

/// Structured warning entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningItem {
    pub code: String,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Performance timings for the evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub load_ms: u128,
    pub validate_ms: u128,
    pub total_ms: u128,
}
