//! Generation stages, one module per pipeline step.
//!
//! Stages only read tables produced by earlier stages. The two back-fills
//! (`resolve_requests` and `assign_department_heads`) are the only writes to
//! records after their creating stage.

pub mod billing;
pub mod events;
pub mod foundation;
pub mod intake;
pub mod payroll;

pub use billing::generate_orders_and_invoices;
pub use events::{
    generate_approvals, generate_audit_log, generate_disputes, generate_offboarding_requests,
    generate_payments,
};
pub use foundation::generate_departments;
pub use intake::{assign_department_heads, generate_onboarding_requests, resolve_requests};
pub use payroll::generate_payroll;
