use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use payseed_core::EntityKind;

use crate::checks::check_dataset;
use crate::errors::EvalError;
use crate::loader::load_dataset;
use crate::metrics::{METRICS_VERSION, MetricsReport, PerformanceMetrics, TableMetrics};
use crate::model::{EvaluateOptions, EvaluationResult};
use crate::report::render_report;

/// Evaluate a written dataset against the cross-table integrity rules.
#[derive(Debug, Clone)]
pub struct EvaluationEngine {
    options: EvaluateOptions,
}

impl EvaluationEngine {
    pub fn new(options: EvaluateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, dataset_dir: &Path) -> Result<EvaluationResult, EvalError> {
        let total_start = Instant::now();

        let loaded = load_dataset(dataset_dir)?;
        let load_ms = total_start.elapsed().as_millis();

        let run_id = loaded
            .generation_report
            .as_ref()
            .map(|report| report.run_id.clone())
            .unwrap_or_else(|| "unknown".to_string());
        let dataset_version = loaded
            .generation_report
            .as_ref()
            .map(|report| report.dataset_version.clone())
            .unwrap_or_else(|| payseed_core::DATASET_VERSION.to_string());

        let validate_start = Instant::now();
        let (checks, violations) = check_dataset(&loaded.dataset);
        let validate_ms = validate_start.elapsed().as_millis();

        let tables = EntityKind::ALL
            .into_iter()
            .map(|kind| TableMetrics {
                table: kind.table_name().to_string(),
                rows_found: loaded.dataset.row_count(kind) as u64,
                rows_expected: loaded
                    .generation_report
                    .as_ref()
                    .and_then(|report| report.rows(kind.table_name())),
            })
            .collect();

        let metrics = MetricsReport {
            metrics_version: METRICS_VERSION.to_string(),
            run_id: run_id.clone(),
            dataset_version,
            tables,
            checks,
            warnings: loaded.warnings,
            performance: PerformanceMetrics {
                load_ms,
                validate_ms,
                total_ms: total_start.elapsed().as_millis(),
            },
        };

        let report = render_report(&metrics, &violations, self.options.max_examples);
        let out_dir = self
            .options
            .out_dir
            .clone()
            .unwrap_or_else(|| dataset_dir.to_path_buf());
        std::fs::create_dir_all(&out_dir)?;

        let metrics_path = out_dir.join("metrics.json");
        std::fs::write(&metrics_path, serde_json::to_vec_pretty(&metrics)?)?;

        let report_path = out_dir.join("report.md");
        std::fs::write(&report_path, report.as_bytes())?;

        let violations_path = if self.options.write_violations {
            let path = out_dir.join("violations.json");
            std::fs::write(&path, serde_json::to_vec_pretty(&violations)?)?;
            Some(path)
        } else {
            None
        };

        if violations.is_empty() {
            info!(
                run_id = %run_id,
                checked = metrics.checks.total_checked(),
                "integrity check passed"
            );
        } else {
            warn!(
                run_id = %run_id,
                violations = violations.len(),
                "integrity check found violations"
            );
        }

        if self.options.strict && !violations.is_empty() {
            return Err(EvalError::Violations(violations.len() as u64));
        }

        Ok(EvaluationResult {
            out_dir,
            metrics_path,
            report_path,
            violations_path,
            metrics,
            report,
            violations,
        })
    }
}
