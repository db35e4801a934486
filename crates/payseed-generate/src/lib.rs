//! Deterministic payroll and vendor-management dataset generator.
//!
//! A run builds thirteen related tables (departments, onboarding requests,
//! employees, vendors, payroll runs, employee pays, orders, invoices,
//! payments, approvals, disputes, offboarding requests and audit logs) in
//! dependency order and can write each one as a JSON document keyed by id.

pub mod engine;
pub mod errors;
pub mod faker;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod stages;

pub use engine::GenerationEngine;
pub use errors::GenerationError;
pub use model::{
    DEPARTMENT_COUNT, GenerateParams, GenerationReport, GenerationResult, MAX_COUNT, SEED,
    TableReport,
};
pub use output::{REPORT_FILE_NAME, write_dataset};
pub use pipeline::{Stage, StageLedger, check_pipeline};
