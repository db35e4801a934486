//! Stages that fan out over records created earlier in the run: payments,
//! approvals, disputes, offboarding and the audit trail.
//!
//! Each stage walks its subjects in creation order and selects categorical
//! values from the walk position, so the output depends only on the tables
//! it reads.

use payseed_core::categories::{
    ApprovalSubject, AuditAction, AuditRole, AuditSubject, Decision, DisputeStatus, DisputeType,
    OffboardingStatus, PaymentMethod, PaymentStatus, PaymentSubject, SubjectKind,
};
use payseed_core::{
    Approval, AuditLog, Dataset, Dispute, EntityKind, OffboardingRequest, Payment, Record,
    SYSTEM_ACTOR, Table, Timestamp,
};
use serde_json::Map;

use crate::errors::GenerationError;
use crate::pipeline::GenerationContext;

/// Settle every employee pay, then every invoice, with one payment each.
pub fn generate_payments(
    ctx: &mut GenerationContext,
    dataset: &Dataset,
) -> Result<Table<Payment>, GenerationError> {
    let subjects = dataset
        .employee_pays
        .iter()
        .map(|pay| (PaymentSubject::EmployeePay, &pay.pay_id, pay.net_pay, pay.paid_at))
        .chain(dataset.invoices.iter().map(|invoice| {
            (
                PaymentSubject::Invoice,
                &invoice.invoice_id,
                invoice.amount,
                invoice.created_at,
            )
        }));

    let mut payments = Table::new();
    for (position, (entity_type, entity_id, amount, anchor)) in subjects.enumerate() {
        let index = position as u64;
        let (_, payment_id) = ctx.counters.next(EntityKind::Payment);
        payments.insert(Payment {
            payment_id,
            entity_id: entity_id.clone(),
            entity_type,
            amount,
            method: PaymentMethod::from_index(index),
            status: PaymentStatus::from_index(index),
            executed_at: anchor.plus_days((index % 10) as i64),
        })?;
    }

    Ok(payments)
}

/// One approval per payroll run, invoice, order and onboarding request.
///
/// Positions restart at zero for each subject type; the approval counter
/// does not.
pub fn generate_approvals(
    ctx: &mut GenerationContext,
    dataset: &Dataset,
) -> Result<Table<Approval>, GenerationError> {
    let groups: [(ApprovalSubject, Vec<(&str, Timestamp)>); 4] = [
        (
            ApprovalSubject::PayrollRun,
            anchors(&dataset.payroll_runs, |run| run.created_at),
        ),
        (
            ApprovalSubject::Invoice,
            anchors(&dataset.invoices, |invoice| invoice.created_at),
        ),
        (
            ApprovalSubject::Order,
            anchors(&dataset.orders, |order| order.created_at),
        ),
        (
            ApprovalSubject::Onboarding,
            anchors(&dataset.onboarding_requests, |request| request.created_at),
        ),
    ];

    let reference = ctx.clock.reference();
    let mut approvals = Table::new();
    for (entity_type, subjects) in groups {
        for (position, (entity_id, anchor)) in subjects.into_iter().enumerate() {
            let index = position as u64;
            let (_, approval_id) = ctx.counters.next(EntityKind::Approval);
            approvals.insert(Approval {
                approval_id,
                entity_type,
                entity_id: entity_id.to_string(),
                approver_id: actor_or_system(&dataset.employees, index),
                level: (index % 3) as u8 + 1,
                decision: Decision::from_index(index),
                comments: format!("Approval comments for {entity_type} {entity_id}"),
                created_at: anchor.plus_days((index % 10) as i64),
                updated_at: reference,
            })?;
        }
    }

    Ok(approvals)
}

/// Raise a dispute on every fifth employee pay, invoice and payment.
pub fn generate_disputes(
    ctx: &mut GenerationContext,
    dataset: &Dataset,
) -> Result<Table<Dispute>, GenerationError> {
    let groups: [(DisputeType, Vec<(&str, Timestamp)>); 3] = [
        (
            DisputeType::Payroll,
            anchors(&dataset.employee_pays, |pay| pay.paid_at),
        ),
        (
            DisputeType::Invoice,
            anchors(&dataset.invoices, |invoice| invoice.created_at),
        ),
        (
            DisputeType::Payment,
            anchors(&dataset.payments, |payment| payment.executed_at),
        ),
    ];

    let reference = ctx.clock.reference();
    let mut disputes = Table::new();
    for (dispute_type, subjects) in groups {
        for (position, (entity_id, anchor)) in subjects.into_iter().enumerate() {
            let index = position as u64;
            if index % 5 != 0 {
                continue;
            }

            let (_, dispute_id) = ctx.counters.next(EntityKind::Dispute);
            let raised_by = match dispute_type {
                DisputeType::Payroll => actor_or_system(&dataset.employees, index),
                DisputeType::Invoice | DisputeType::Payment => {
                    actor_or_system(&dataset.vendors, index)
                }
            };

            disputes.insert(Dispute {
                description: format!("Dispute for {dispute_type} ID: {entity_id}"),
                resolution: format!("Resolution for {dispute_type} dispute {dispute_id}"),
                dispute_id,
                dispute_type,
                entity_id: entity_id.to_string(),
                raised_by,
                status: DisputeStatus::from_index(index),
                created_at: anchor.plus_days((index % 10) as i64),
                updated_at: reference,
            })?;
        }
    }

    Ok(disputes)
}

/// Open an offboarding request for every fourth party, employees first.
pub fn generate_offboarding_requests(
    ctx: &mut GenerationContext,
    dataset: &Dataset,
) -> Result<Table<OffboardingRequest>, GenerationError> {
    let parties = dataset
        .employees
        .iter()
        .map(|employee| (SubjectKind::Employee, &employee.employee_id, employee.created_at))
        .chain(
            dataset
                .vendors
                .iter()
                .map(|vendor| (SubjectKind::Vendor, &vendor.vendor_id, vendor.created_at)),
        );

    let reference = ctx.clock.reference();
    let mut requests = Table::new();
    for (position, (entity_type, entity_id, created_at)) in parties.enumerate() {
        let index = position as u64;
        if index % 4 != 0 {
            continue;
        }

        let (_, request_id) = ctx.counters.next(EntityKind::OffboardingRequest);
        requests.insert(OffboardingRequest {
            request_id,
            entity_id: entity_id.clone(),
            entity_type,
            reason: format!("Offboarding reason for {entity_type} {entity_id}"),
            status: OffboardingStatus::from_index(index),
            created_at: created_at.plus_days((index % 30) as i64),
            updated_at: reference,
        })?;
    }

    Ok(requests)
}

/// Audit every third record across runs, invoices, payments and both
/// request tables.
///
/// Entries step back one second from the reference instant per entry, so
/// later entries carry strictly earlier timestamps.
pub fn generate_audit_log(
    ctx: &mut GenerationContext,
    dataset: &Dataset,
) -> Result<Table<AuditLog>, GenerationError> {
    let subjects = ids_of(AuditSubject::PayrollRun, &dataset.payroll_runs)
        .chain(ids_of(AuditSubject::Invoice, &dataset.invoices))
        .chain(ids_of(AuditSubject::Payment, &dataset.payments))
        .chain(ids_of(AuditSubject::Onboarding, &dataset.onboarding_requests))
        .chain(ids_of(AuditSubject::Offboarding, &dataset.offboarding_requests));

    let reference = ctx.clock.reference();
    let mut entries = Table::new();
    for (position, (entity_type, entity_id)) in subjects.enumerate() {
        let index = position as u64;
        if index % 3 != 0 {
            continue;
        }

        let (number, audit_id) = ctx.counters.next(EntityKind::AuditLog);
        entries.insert(AuditLog {
            audit_id,
            entity_type,
            entity_id: entity_id.to_string(),
            action_performed: AuditAction::from_index(index),
            timestamp: reference.minus_seconds(number as i64),
            performed_by: actor_or_system(&dataset.employees, index),
            role: AuditRole::from_index(index),
            details: Map::new(),
        })?;
    }

    Ok(entries)
}

fn anchors<T: Record>(
    table: &Table<T>,
    anchor: impl Fn(&T) -> Timestamp,
) -> Vec<(&str, Timestamp)> {
    table.iter().map(|row| (row.id(), anchor(row))).collect()
}

fn ids_of<T: Record, S: Copy>(subject: S, table: &Table<T>) -> impl Iterator<Item = (S, &str)> {
    table.iter().map(move |row| (subject, row.id()))
}

/// Id of the party at `index` (round-robin), or the system actor when the
/// table is empty.
fn actor_or_system<T: Record>(parties: &Table<T>, index: u64) -> String {
    parties
        .round_robin(index)
        .map_or_else(|| SYSTEM_ACTOR.to_string(), |party| party.id().to_string())
}
