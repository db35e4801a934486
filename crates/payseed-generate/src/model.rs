use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Seed every run uses for faker-filled text fields.
pub const SEED: u64 = 42;

/// Number of departments created by the foundation stage.
pub const DEPARTMENT_COUNT: u32 = 5;

/// Upper bound accepted for each size parameter.
pub const MAX_COUNT: u32 = 100_000;

/// Size parameters for a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateParams {
    /// Onboarding requests to create; approved ones become employees or vendors.
    pub onboarding_requests: u32,
    /// Payroll runs to create.
    pub payroll_runs: u32,
    /// Order indices to attempt; each produced order carries one invoice.
    pub orders: u32,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            onboarding_requests: 40,
            payroll_runs: 20,
            orders: 30,
        }
    }
}

impl GenerateParams {
    pub fn new(onboarding_requests: u32, payroll_runs: u32, orders: u32) -> Self {
        Self {
            onboarding_requests,
            payroll_runs,
            orders,
        }
    }

    /// Reject out-of-range counts before any stage runs.
    pub fn validate(&self) -> Result<(), GenerationError> {
        for (name, value) in [
            ("onboarding_requests", self.onboarding_requests),
            ("payroll_runs", self.payroll_runs),
            ("orders", self.orders),
        ] {
            if value > MAX_COUNT {
                return Err(GenerationError::InvalidParams(format!(
                    "{name} must be <= {MAX_COUNT}, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Summary of one written table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub rows: u64,
    pub bytes: u64,
    pub sha256: String,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub dataset_version: String,
    pub seed: u64,
    pub params: GenerateParams,
    pub tables: Vec<TableReport>,
    pub bytes_written: u64,
    pub duration_ms: u64,
}

impl GenerationReport {
    pub fn new(run_id: String, params: GenerateParams) -> Self {
        Self {
            run_id,
            dataset_version: payseed_core::DATASET_VERSION.to_string(),
            seed: SEED,
            params,
            tables: Vec::new(),
            bytes_written: 0,
            duration_ms: 0,
        }
    }

    pub fn record_table(&mut self, table: TableReport) {
        self.bytes_written += table.bytes;
        self.tables.push(table);
    }

    pub fn rows(&self, table: &str) -> Option<u64> {
        self.tables
            .iter()
            .find(|entry| entry.table == table)
            .map(|entry| entry.rows)
    }
}

/// Result of a generation run that wrote its tables to disk.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub out_dir: PathBuf,
    pub report_path: PathBuf,
    pub report: GenerationReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_sizes() {
        let params = GenerateParams::default();
        assert_eq!(params, GenerateParams::new(40, 20, 30));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_oversized_counts() {
        let params = GenerateParams::new(MAX_COUNT + 1, 1, 1);
        assert!(matches!(
            params.validate(),
            Err(GenerationError::InvalidParams(_))
        ));
    }

    #[test]
    fn zero_counts_are_valid() {
        assert!(GenerateParams::new(0, 0, 0).validate().is_ok());
    }
}
