//! Core contracts and helpers for payseed.
//!
//! This crate defines the record types of every generated table, the
//! categorical value lists, id and time primitives, and the entity
//! dependency graph shared by the generator, the evaluator and the CLI.

pub mod categories;
pub mod clock;
pub mod dataset;
pub mod error;
pub mod graph;
pub mod ids;
pub mod money;
pub mod records;
pub mod schema;
pub mod table;

pub use clock::{Clock, HISTORY_DAYS, Timestamp};
pub use dataset::{Dataset, TableDocument};
pub use error::{Error, Result};
pub use graph::{DependencyReport, DependencySummary, EntityKind, build_dependency_report};
pub use ids::{IdCounters, SYSTEM_ACTOR, bank_account, format_id, routing_number};
pub use money::{DEDUCTION_RATE, PAY_PERIODS_PER_YEAR, round_cents};
pub use records::{
    Approval, AuditLog, Department, Dispute, Employee, EmployeePay, Invoice, OffboardingRequest,
    OnboardingRequest, Order, Payment, PayrollRun, RequestedData, Vendor,
};
pub use schema::record_json_schema;
pub use table::{Record, Table};

/// Contract version for the written tables.
pub const DATASET_VERSION: &str = "0.1";
