//! Integrity evaluation for generated payroll datasets.
//!
//! Loads the tables a generation run wrote, checks id sequences, references,
//! amounts and timestamp ordering across them, and reports the outcome as
//! `metrics.json` plus a markdown summary.

pub mod checks;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod report;

pub use checks::check_dataset;
pub use engine::EvaluationEngine;
pub use errors::EvalError;
pub use loader::{LoadedDataset, load_dataset};
pub use metrics::{CheckStats, CheckSummary, MetricsReport, TableMetrics, WarningItem};
pub use model::{EvaluateOptions, EvaluationResult, Violation};
