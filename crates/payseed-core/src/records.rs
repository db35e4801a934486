//! Record types, one per output table.
//!
//! Field names are the JSON keys downstream tools read, so renaming a field
//! is a breaking change to every consumer of the written tables.
//!
//! Money fields are `f64` rounded to cents. Salaries, order and invoice
//! amounts and payment amounts are written as JSON integers when whole
//! (`80000`, `500`) and as floats otherwise (`2666.66`).

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::categories::{
    ApprovalSubject, AuditAction, AuditRole, AuditSubject, Decision, DisputeStatus, DisputeType,
    InvoiceStatus, OffboardingStatus, OrderStatus, OrderType, PartyStatus, PaymentMethod,
    PaymentStatus, PaymentSubject, PayStatus, PayrollRunStatus, RequestStatus, SubjectKind,
};
use crate::clock::Timestamp;
use crate::graph::EntityKind;
use crate::money::serialize_whole;
use crate::table::Record;

/// Organizational unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Department {
    pub department_id: String,
    pub name: String,
    /// Back-filled once employees exist; `null` while none do.
    pub head_id: Option<String>,
}

/// Payload captured by an onboarding request.
///
/// Covers both subject kinds: employees use name, role and salary, vendors
/// use legal name and service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RequestedData {
    pub name: String,
    pub role: String,
    #[serde(serialize_with = "serialize_whole")]
    pub salary: f64,
    pub tax_id: String,
    pub bank_account_number: String,
    pub bank_routing_number: String,
    pub legal_name: String,
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OnboardingRequest {
    pub request_id: String,
    pub entity_type: SubjectKind,
    /// Only set for employee requests.
    pub department_id: Option<String>,
    pub requested_by: String,
    pub requested_data: RequestedData,
    pub status: RequestStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Employee or vendor realized from this request, once approved.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Employee {
    pub employee_id: String,
    pub name: String,
    pub role: String,
    #[serde(serialize_with = "serialize_whole")]
    pub salary: f64,
    pub tax_id: String,
    pub bank_account_number: String,
    pub bank_routing_number: String,
    pub department_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub status: PartyStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Vendor {
    pub vendor_id: String,
    pub legal_name: String,
    pub tax_id: String,
    pub bank_account_number: String,
    pub bank_routing_number: String,
    pub service: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub status: PartyStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PayrollRun {
    pub payroll_run_id: String,
    pub payroll_period_start: NaiveDate,
    pub payroll_period_end: NaiveDate,
    pub status: PayrollRunStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// One employee's pay within a payroll run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmployeePay {
    pub pay_id: String,
    pub employee_id: String,
    pub payroll_run_id: String,
    pub gross_pay: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub status: PayStatus,
    pub paid_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Order {
    pub order_id: String,
    pub vendor_id: String,
    pub order_type: OrderType,
    pub description: String,
    #[serde(serialize_with = "serialize_whole")]
    pub amount: f64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Invoice {
    pub invoice_id: String,
    pub vendor_id: String,
    pub order_id: String,
    #[serde(serialize_with = "serialize_whole")]
    pub amount: f64,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Payment {
    pub payment_id: String,
    /// Employee pay or invoice id, discriminated by `entity_type`.
    pub entity_id: String,
    pub entity_type: PaymentSubject,
    #[serde(serialize_with = "serialize_whole")]
    pub amount: f64,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub executed_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Approval {
    pub approval_id: String,
    pub entity_type: ApprovalSubject,
    pub entity_id: String,
    /// Employee id, or `"system"` when no employee exists.
    pub approver_id: String,
    pub level: u8,
    pub decision: Decision,
    pub comments: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Dispute {
    pub dispute_id: String,
    pub dispute_type: DisputeType,
    pub entity_id: String,
    pub raised_by: String,
    pub description: String,
    pub resolution: String,
    pub status: DisputeStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OffboardingRequest {
    pub request_id: String,
    pub entity_id: String,
    pub entity_type: SubjectKind,
    pub reason: String,
    pub status: OffboardingStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AuditLog {
    pub audit_id: String,
    pub entity_type: AuditSubject,
    pub entity_id: String,
    pub action_performed: AuditAction,
    pub timestamp: Timestamp,
    pub performed_by: String,
    pub role: AuditRole,
    /// Reserved for structured detail; always empty.
    pub details: Map<String, Value>,
}

macro_rules! impl_record {
    ($($ty:ty => $kind:ident . $field:ident),+ $(,)?) => {
        $(
            impl Record for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn id(&self) -> &str {
                    &self.$field
                }
            }
        )+
    };
}

impl_record! {
    Department => Department.department_id,
    OnboardingRequest => OnboardingRequest.request_id,
    Employee => Employee.employee_id,
    Vendor => Vendor.vendor_id,
    PayrollRun => PayrollRun.payroll_run_id,
    EmployeePay => EmployeePay.pay_id,
    Order => Order.order_id,
    Invoice => Invoice.invoice_id,
    Payment => Payment.payment_id,
    Approval => Approval.approval_id,
    Dispute => Dispute.dispute_id,
    OffboardingRequest => OffboardingRequest.request_id,
    AuditLog => AuditLog.audit_id,
}
