//! Integrity checks over an in-memory dataset.
//!
//! Checks never stop at the first failure: every record is visited and each
//! failed expectation becomes one [`Violation`].

use payseed_core::categories::{
    ApprovalSubject, AuditSubject, DisputeType, PaymentSubject, RequestStatus, SubjectKind,
};
use payseed_core::{
    DEDUCTION_RATE, Dataset, PAY_PERIODS_PER_YEAR, Record, SYSTEM_ACTOR, Table, Timestamp,
    format_id, round_cents,
};

use crate::metrics::{CheckStats, CheckSummary};
use crate::model::Violation;

const CENT_TOLERANCE: f64 = 0.005;

/// Run every check against `dataset`.
pub fn check_dataset(dataset: &Dataset) -> (CheckSummary, Vec<Violation>) {
    let mut checker = Checker {
        dataset,
        summary: CheckSummary::default(),
        violations: Vec::new(),
    };

    checker.check_id_sequences();
    checker.check_references();
    checker.check_pay_arithmetic();
    checker.check_amounts();
    checker.check_timestamps();
    checker.check_audit_order();
    checker.check_department_heads();

    (checker.summary, checker.violations)
}

struct Checker<'a> {
    dataset: &'a Dataset,
    summary: CheckSummary,
    violations: Vec<Violation>,
}

/// Which counter a finding is tallied under.
#[derive(Clone, Copy)]
enum Check {
    IdSequence,
    References,
    PayArithmetic,
    Amounts,
    Timestamps,
    AuditOrder,
    DepartmentHeads,
}

impl Check {
    fn code(self) -> &'static str {
        match self {
            Check::IdSequence => "id_sequence",
            Check::References => "dangling_reference",
            Check::PayArithmetic => "pay_arithmetic",
            Check::Amounts => "amount_mismatch",
            Check::Timestamps => "timestamp_order",
            Check::AuditOrder => "audit_order",
            Check::DepartmentHeads => "department_head",
        }
    }
}

impl<'a> Checker<'a> {
    fn stats(&mut self, check: Check) -> &mut CheckStats {
        match check {
            Check::IdSequence => &mut self.summary.id_sequence,
            Check::References => &mut self.summary.references,
            Check::PayArithmetic => &mut self.summary.pay_arithmetic,
            Check::Amounts => &mut self.summary.amounts,
            Check::Timestamps => &mut self.summary.timestamps,
            Check::AuditOrder => &mut self.summary.audit_order,
            Check::DepartmentHeads => &mut self.summary.department_heads,
        }
    }

    fn require(
        &mut self,
        check: Check,
        passed: bool,
        path: &str,
        record_id: &str,
        message: impl FnOnce() -> String,
    ) {
        if !self.stats(check).record(passed) {
            self.violations.push(Violation {
                code: check.code().to_string(),
                path: path.to_string(),
                record_id: record_id.to_string(),
                message: message(),
            });
        }
    }

    fn reference<T: Record>(&mut self, table: &Table<T>, id: &str, path: &str, record_id: &str) {
        let found = table.contains(id);
        self.require(Check::References, found, path, record_id, || {
            format!("'{id}' not found in {}", T::KIND.table_name())
        });
    }

    /// Reference that may also be the system actor.
    fn actor<T: Record>(&mut self, table: &Table<T>, id: &str, path: &str, record_id: &str) {
        let found = id == SYSTEM_ACTOR || table.contains(id);
        self.require(Check::References, found, path, record_id, || {
            format!(
                "'{id}' is neither '{SYSTEM_ACTOR}' nor found in {}",
                T::KIND.table_name()
            )
        });
    }

    fn not_before(
        &mut self,
        value: Timestamp,
        anchor: Option<Timestamp>,
        path: &str,
        record_id: &str,
    ) {
        // Dangling anchors are reported by the reference check.
        let Some(anchor) = anchor else {
            return;
        };
        self.require(Check::Timestamps, value >= anchor, path, record_id, || {
            format!("{value} precedes its anchor {anchor}")
        });
    }

    fn check_id_sequences(&mut self) {
        let data = self.dataset;
        self.id_sequence(&data.departments);
        self.id_sequence(&data.onboarding_requests);
        self.id_sequence(&data.employees);
        self.id_sequence(&data.vendors);
        self.id_sequence(&data.payroll_runs);
        self.id_sequence(&data.employee_pays);
        self.id_sequence(&data.orders);
        self.id_sequence(&data.invoices);
        self.id_sequence(&data.payments);
        self.id_sequence(&data.approvals);
        self.id_sequence(&data.disputes);
        self.id_sequence(&data.offboarding_requests);
        self.id_sequence(&data.audit_logs);
    }

    fn id_sequence<T: Record>(&mut self, table: &Table<T>) {
        let kind = T::KIND;
        let path = format!("{}.id", kind.table_name());
        for (position, row) in table.iter().enumerate() {
            let expected = format_id(kind.id_prefix(), position as u64 + 1);
            let id = row.id();
            self.require(Check::IdSequence, id == expected, &path, id, || {
                format!("expected '{expected}' at position {}", position + 1)
            });
        }
    }

    fn check_references(&mut self) {
        let data = self.dataset;

        for request in &data.onboarding_requests {
            let id = request.request_id.as_str();
            if let Some(department_id) = &request.department_id {
                self.reference(
                    &data.departments,
                    department_id,
                    "onboarding_requests.department_id",
                    id,
                );
            }
            if let Some(entity_id) = &request.entity_id {
                let path = "onboarding_requests.entity_id";
                match request.entity_type {
                    SubjectKind::Employee => self.reference(&data.employees, entity_id, path, id),
                    SubjectKind::Vendor => self.reference(&data.vendors, entity_id, path, id),
                }
                let approved = request.status == RequestStatus::Approved;
                self.require(Check::References, approved, path, id, || {
                    format!(
                        "request resolved to '{entity_id}' with status {}",
                        request.status
                    )
                });
            }
        }

        for employee in &data.employees {
            if let Some(department_id) = &employee.department_id {
                self.reference(
                    &data.departments,
                    department_id,
                    "employees.department_id",
                    &employee.employee_id,
                );
            }
        }

        for pay in &data.employee_pays {
            self.reference(
                &data.employees,
                &pay.employee_id,
                "employee_pays.employee_id",
                &pay.pay_id,
            );
            self.reference(
                &data.payroll_runs,
                &pay.payroll_run_id,
                "employee_pays.payroll_run_id",
                &pay.pay_id,
            );
        }

        for order in &data.orders {
            self.reference(&data.vendors, &order.vendor_id, "orders.vendor_id", &order.order_id);
        }

        for invoice in &data.invoices {
            let id = invoice.invoice_id.as_str();
            self.reference(&data.vendors, &invoice.vendor_id, "invoices.vendor_id", id);
            self.reference(&data.orders, &invoice.order_id, "invoices.order_id", id);
            if let Some(order) = data.orders.get(&invoice.order_id) {
                let same_vendor = order.vendor_id == invoice.vendor_id;
                self.require(Check::References, same_vendor, "invoices.vendor_id", id, || {
                    format!("order {} belongs to {}", order.order_id, order.vendor_id)
                });
            }
        }

        for payment in &data.payments {
            let id = payment.payment_id.as_str();
            let path = "payments.entity_id";
            match payment.entity_type {
                PaymentSubject::EmployeePay => {
                    self.reference(&data.employee_pays, &payment.entity_id, path, id)
                }
                PaymentSubject::Invoice => {
                    self.reference(&data.invoices, &payment.entity_id, path, id)
                }
            }
        }

        for approval in &data.approvals {
            let id = approval.approval_id.as_str();
            let path = "approvals.entity_id";
            match approval.entity_type {
                ApprovalSubject::PayrollRun => {
                    self.reference(&data.payroll_runs, &approval.entity_id, path, id)
                }
                ApprovalSubject::Invoice => {
                    self.reference(&data.invoices, &approval.entity_id, path, id)
                }
                ApprovalSubject::Order => {
                    self.reference(&data.orders, &approval.entity_id, path, id)
                }
                ApprovalSubject::Onboarding => {
                    self.reference(&data.onboarding_requests, &approval.entity_id, path, id)
                }
            }
            self.actor(&data.employees, &approval.approver_id, "approvals.approver_id", id);
        }

        for dispute in &data.disputes {
            let id = dispute.dispute_id.as_str();
            let path = "disputes.entity_id";
            match dispute.dispute_type {
                DisputeType::Payroll => {
                    self.reference(&data.employee_pays, &dispute.entity_id, path, id);
                    self.actor(&data.employees, &dispute.raised_by, "disputes.raised_by", id);
                }
                DisputeType::Invoice => {
                    self.reference(&data.invoices, &dispute.entity_id, path, id);
                    self.actor(&data.vendors, &dispute.raised_by, "disputes.raised_by", id);
                }
                DisputeType::Payment => {
                    self.reference(&data.payments, &dispute.entity_id, path, id);
                    self.actor(&data.vendors, &dispute.raised_by, "disputes.raised_by", id);
                }
            }
        }

        for request in &data.offboarding_requests {
            let id = request.request_id.as_str();
            let path = "offboarding_requests.entity_id";
            match request.entity_type {
                SubjectKind::Employee => {
                    self.reference(&data.employees, &request.entity_id, path, id)
                }
                SubjectKind::Vendor => {
                    self.reference(&data.vendors, &request.entity_id, path, id)
                }
            }
        }

        for entry in &data.audit_logs {
            let id = entry.audit_id.as_str();
            let path = "audit_logs.entity_id";
            match entry.entity_type {
                AuditSubject::PayrollRun => {
                    self.reference(&data.payroll_runs, &entry.entity_id, path, id)
                }
                AuditSubject::Invoice => {
                    self.reference(&data.invoices, &entry.entity_id, path, id)
                }
                AuditSubject::Payment => {
                    self.reference(&data.payments, &entry.entity_id, path, id)
                }
                AuditSubject::Onboarding => {
                    self.reference(&data.onboarding_requests, &entry.entity_id, path, id)
                }
                AuditSubject::Offboarding => {
                    self.reference(&data.offboarding_requests, &entry.entity_id, path, id)
                }
            }
            self.actor(&data.employees, &entry.performed_by, "audit_logs.performed_by", id);
        }
    }

    fn check_pay_arithmetic(&mut self) {
        let data = self.dataset;
        for pay in &data.employee_pays {
            let id = pay.pay_id.as_str();

            // A missing employee is reported by the reference check.
            if let Some(employee) = data.employees.get(&pay.employee_id) {
                let expected = round_cents(employee.salary / PAY_PERIODS_PER_YEAR);
                let passed = (pay.gross_pay - expected).abs() < CENT_TOLERANCE;
                let path = "employee_pays.gross_pay";
                self.require(Check::PayArithmetic, passed, path, id, || {
                    format!(
                        "gross {} != salary {} of {} / {PAY_PERIODS_PER_YEAR}",
                        pay.gross_pay, employee.salary, employee.employee_id
                    )
                });
            }

            let expected = round_cents(pay.gross_pay * DEDUCTION_RATE);
            let passed = (pay.deductions - expected).abs() < CENT_TOLERANCE;
            let path = "employee_pays.deductions";
            self.require(Check::PayArithmetic, passed, path, id, || {
                format!(
                    "deductions {} != {DEDUCTION_RATE} of gross {}",
                    pay.deductions, pay.gross_pay
                )
            });

            let expected = round_cents(pay.gross_pay - pay.deductions);
            let passed = (pay.net_pay - expected).abs() < CENT_TOLERANCE;
            let path = "employee_pays.net_pay";
            self.require(Check::PayArithmetic, passed, path, id, || {
                format!(
                    "net {} != gross {} - deductions {}",
                    pay.net_pay, pay.gross_pay, pay.deductions
                )
            });
        }
    }

    fn check_amounts(&mut self) {
        let data = self.dataset;

        for invoice in &data.invoices {
            let Some(order) = data.orders.get(&invoice.order_id) else {
                continue;
            };
            let passed = (invoice.amount - order.amount).abs() < CENT_TOLERANCE;
            self.require(Check::Amounts, passed, "invoices.amount", &invoice.invoice_id, || {
                format!(
                    "invoice {} != order {} amount {}",
                    invoice.amount, order.order_id, order.amount
                )
            });
        }

        for payment in &data.payments {
            let expected = match payment.entity_type {
                PaymentSubject::EmployeePay => data
                    .employee_pays
                    .get(&payment.entity_id)
                    .map(|pay| pay.net_pay),
                PaymentSubject::Invoice => data
                    .invoices
                    .get(&payment.entity_id)
                    .map(|invoice| invoice.amount),
            };
            let Some(expected) = expected else {
                continue;
            };
            let passed = (payment.amount - expected).abs() < CENT_TOLERANCE;
            self.require(Check::Amounts, passed, "payments.amount", &payment.payment_id, || {
                format!("paid {} for {} owing {expected}", payment.amount, payment.entity_id)
            });
        }
    }

    fn check_timestamps(&mut self) {
        let data = self.dataset;

        for request in &data.onboarding_requests {
            let Some(entity_id) = &request.entity_id else {
                continue;
            };
            let realized = match request.entity_type {
                SubjectKind::Employee => data.employees.get(entity_id).map(|row| row.created_at),
                SubjectKind::Vendor => data.vendors.get(entity_id).map(|row| row.created_at),
            };
            if let Some(created_at) = realized {
                let passed = created_at == request.created_at;
                let path = "onboarding_requests.created_at";
                self.require(Check::Timestamps, passed, path, entity_id, || {
                    format!(
                        "{created_at} differs from request {} at {}",
                        request.request_id, request.created_at
                    )
                });
            }
        }

        for pay in &data.employee_pays {
            let period_end = data
                .payroll_runs
                .get(&pay.payroll_run_id)
                .map(|run| Timestamp::start_of(run.payroll_period_end));
            self.not_before(pay.paid_at, period_end, "employee_pays.paid_at", &pay.pay_id);
        }

        for order in &data.orders {
            let anchor = created_at(&data.vendors, &order.vendor_id, |row| row.created_at);
            self.not_before(order.created_at, anchor, "orders.created_at", &order.order_id);
        }

        for invoice in &data.invoices {
            let id = invoice.invoice_id.as_str();
            let anchor = created_at(&data.orders, &invoice.order_id, |row| row.created_at);
            self.not_before(invoice.created_at, anchor, "invoices.created_at", id);
            let passed = invoice.due_date > invoice.created_at.date();
            self.require(Check::Timestamps, passed, "invoices.due_date", id, || {
                format!("due {} is not after {}", invoice.due_date, invoice.created_at)
            });
        }

        for payment in &data.payments {
            let anchor = match payment.entity_type {
                PaymentSubject::EmployeePay => {
                    created_at(&data.employee_pays, &payment.entity_id, |row| row.paid_at)
                }
                PaymentSubject::Invoice => {
                    created_at(&data.invoices, &payment.entity_id, |row| row.created_at)
                }
            };
            let id = payment.payment_id.as_str();
            self.not_before(payment.executed_at, anchor, "payments.executed_at", id);
        }

        for approval in &data.approvals {
            let subject = approval.entity_id.as_str();
            let anchor = match approval.entity_type {
                ApprovalSubject::PayrollRun => {
                    created_at(&data.payroll_runs, subject, |row| row.created_at)
                }
                ApprovalSubject::Invoice => {
                    created_at(&data.invoices, subject, |row| row.created_at)
                }
                ApprovalSubject::Order => created_at(&data.orders, subject, |row| row.created_at),
                ApprovalSubject::Onboarding => {
                    created_at(&data.onboarding_requests, subject, |row| row.created_at)
                }
            };
            let id = approval.approval_id.as_str();
            self.not_before(approval.created_at, anchor, "approvals.created_at", id);
        }

        for dispute in &data.disputes {
            let subject = dispute.entity_id.as_str();
            let anchor = match dispute.dispute_type {
                DisputeType::Payroll => created_at(&data.employee_pays, subject, |row| row.paid_at),
                DisputeType::Invoice => created_at(&data.invoices, subject, |row| row.created_at),
                DisputeType::Payment => created_at(&data.payments, subject, |row| row.executed_at),
            };
            let id = dispute.dispute_id.as_str();
            self.not_before(dispute.created_at, anchor, "disputes.created_at", id);
        }

        for request in &data.offboarding_requests {
            let subject = request.entity_id.as_str();
            let anchor = match request.entity_type {
                SubjectKind::Employee => created_at(&data.employees, subject, |row| row.created_at),
                SubjectKind::Vendor => created_at(&data.vendors, subject, |row| row.created_at),
            };
            let id = request.request_id.as_str();
            self.not_before(request.created_at, anchor, "offboarding_requests.created_at", id);
        }
    }

    fn check_audit_order(&mut self) {
        let data = self.dataset;
        let entries: Vec<_> = data.audit_logs.iter().collect();
        for pair in entries.windows(2) {
            let (previous, entry) = (pair[0], pair[1]);
            let passed = entry.timestamp < previous.timestamp;
            self.require(Check::AuditOrder, passed, "audit_logs.timestamp", &entry.audit_id, || {
                format!(
                    "{} is not earlier than {} at {}",
                    entry.timestamp, previous.audit_id, previous.timestamp
                )
            });
        }
    }

    fn check_department_heads(&mut self) {
        let data = self.dataset;
        let has_employees = !data.employees.is_empty();

        for department in &data.departments {
            let id = department.department_id.as_str();
            let passed = match &department.head_id {
                Some(head_id) => data.employees.contains(head_id),
                None => !has_employees,
            };
            self.require(Check::DepartmentHeads, passed, "departments.head_id", id, || {
                match &department.head_id {
                    Some(head_id) => format!("head '{head_id}' is not an employee"),
                    None => "no head assigned although employees exist".to_string(),
                }
            });
        }
    }
}

fn created_at<T: Record>(
    table: &Table<T>,
    id: &str,
    anchor: impl Fn(&T) -> Timestamp,
) -> Option<Timestamp> {
    table.get(id).map(anchor)
}
