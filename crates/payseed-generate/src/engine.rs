use std::path::Path;
use std::time::Instant;

use tracing::{info, warn};

use payseed_core::Dataset;

use crate::errors::GenerationError;
use crate::model::{DEPARTMENT_COUNT, GenerateParams, GenerationReport, GenerationResult, SEED};
use crate::output::{REPORT_FILE_NAME, write_dataset, write_json_atomic};
use crate::pipeline::{GenerationContext, Stage, StageLedger, check_pipeline};
use crate::stages;

/// Entry point for generating a payroll dataset.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    params: GenerateParams,
}

impl GenerationEngine {
    pub fn new(params: GenerateParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GenerateParams {
        &self.params
    }

    /// Build every table in memory.
    ///
    /// Two calls with equal params return equal datasets.
    pub fn generate(&self) -> Result<Dataset, GenerationError> {
        self.params.validate()?;
        check_pipeline(&Stage::PIPELINE)?;

        let start = Instant::now();
        let mut ctx = GenerationContext::new(SEED);
        let mut ledger = StageLedger::new();
        let mut dataset = Dataset::default();

        info!(
            onboarding_requests = self.params.onboarding_requests,
            payroll_runs = self.params.payroll_runs,
            orders = self.params.orders,
            seed = SEED,
            "generation started"
        );

        for stage in Stage::PIPELINE {
            ledger.begin(stage)?;
            let stage_start = Instant::now();
            self.run_stage(stage, &mut ctx, &mut dataset)?;
            ledger.complete(stage);

            let rows: usize = stage
                .creates()
                .iter()
                .map(|kind| dataset.row_count(*kind))
                .sum();
            info!(
                stage = stage.name(),
                rows,
                duration_ms = stage_start.elapsed().as_millis() as u64,
                "stage completed"
            );
        }

        if self.params.payroll_runs > 0 && dataset.employees.is_empty() {
            warn!("no employees were onboarded; payroll runs carry no pays");
        }
        if self.params.orders > 0 && dataset.vendors.is_empty() {
            warn!("no vendors were onboarded; no orders were placed");
        }

        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "dataset generated"
        );
        Ok(dataset)
    }

    /// Generate and write every table plus `generation_report.json` into
    /// `out_dir`, which must already exist.
    pub fn run(&self, out_dir: &Path) -> Result<GenerationResult, GenerationError> {
        if !out_dir.is_dir() {
            return Err(GenerationError::MissingOutputDir(out_dir.to_path_buf()));
        }

        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(run_id = %run_id, out_dir = %out_dir.display(), "run started");

        let dataset = match self.generate() {
            Ok(dataset) => dataset,
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                return Err(err);
            }
        };

        let mut report = GenerationReport::new(run_id.clone(), self.params);
        for table in write_dataset(out_dir, &dataset)? {
            report.record_table(table);
        }
        report.duration_ms = start.elapsed().as_millis() as u64;

        let report_path = out_dir.join(REPORT_FILE_NAME);
        write_json_atomic(&report_path, &report)?;

        info!(
            run_id = %run_id,
            tables = report.tables.len(),
            duration_ms = report.duration_ms,
            bytes_written = report.bytes_written,
            "run completed"
        );

        Ok(GenerationResult {
            out_dir: out_dir.to_path_buf(),
            report_path,
            report,
        })
    }

    fn run_stage(
        &self,
        stage: Stage,
        ctx: &mut GenerationContext,
        dataset: &mut Dataset,
    ) -> Result<(), GenerationError> {
        let params = &self.params;
        match stage {
            Stage::Departments => {
                dataset.departments = stages::generate_departments(ctx, DEPARTMENT_COUNT)?;
            }
            Stage::Onboarding => {
                dataset.onboarding_requests = stages::generate_onboarding_requests(
                    ctx,
                    params.onboarding_requests,
                    &dataset.departments,
                )?;
            }
            Stage::Resolution => {
                let (employees, vendors) =
                    stages::resolve_requests(ctx, &mut dataset.onboarding_requests)?;
                dataset.employees = employees;
                dataset.vendors = vendors;
            }
            Stage::DepartmentHeads => {
                stages::assign_department_heads(&mut dataset.departments, &dataset.employees);
            }
            Stage::Payroll => {
                let (runs, pays) =
                    stages::generate_payroll(ctx, params.payroll_runs, &dataset.employees)?;
                dataset.payroll_runs = runs;
                dataset.employee_pays = pays;
            }
            Stage::Billing => {
                let (orders, invoices) =
                    stages::generate_orders_and_invoices(ctx, params.orders, &dataset.vendors)?;
                dataset.orders = orders;
                dataset.invoices = invoices;
            }
            Stage::Payments => {
                dataset.payments = stages::generate_payments(ctx, dataset)?;
            }
            Stage::Approvals => {
                dataset.approvals = stages::generate_approvals(ctx, dataset)?;
            }
            Stage::Disputes => {
                dataset.disputes = stages::generate_disputes(ctx, dataset)?;
            }
            Stage::Offboarding => {
                dataset.offboarding_requests = stages::generate_offboarding_requests(ctx, dataset)?;
            }
            Stage::AuditLog => {
                dataset.audit_logs = stages::generate_audit_log(ctx, dataset)?;
            }
        }
        Ok(())
    }
}
