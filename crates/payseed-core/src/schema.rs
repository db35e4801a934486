use schemars::schema::RootSchema;
use schemars::schema_for;

use crate::graph::EntityKind;
use crate::records::{
    Approval, AuditLog, Department, Dispute, Employee, EmployeePay, Invoice, OffboardingRequest,
    OnboardingRequest, Order, Payment, PayrollRun, Vendor,
};

/// JSON Schema of one record of `kind`, as written under its id key.
pub fn record_json_schema(kind: EntityKind) -> RootSchema {
    match kind {
        EntityKind::Department => schema_for!(Department),
        EntityKind::OnboardingRequest => schema_for!(OnboardingRequest),
        EntityKind::Employee => schema_for!(Employee),
        EntityKind::Vendor => schema_for!(Vendor),
        EntityKind::PayrollRun => schema_for!(PayrollRun),
        EntityKind::EmployeePay => schema_for!(EmployeePay),
        EntityKind::Order => schema_for!(Order),
        EntityKind::Invoice => schema_for!(Invoice),
        EntityKind::Payment => schema_for!(Payment),
        EntityKind::Approval => schema_for!(Approval),
        EntityKind::Dispute => schema_for!(Dispute),
        EntityKind::OffboardingRequest => schema_for!(OffboardingRequest),
        EntityKind::AuditLog => schema_for!(AuditLog),
    }
}
