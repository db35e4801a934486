use serde::{Deserialize, Serialize};

use crate::graph::EntityKind;
use crate::records::{
    Approval, AuditLog, Department, Dispute, Employee, EmployeePay, Invoice, OffboardingRequest,
    OnboardingRequest, Order, Payment, PayrollRun, Vendor,
};
use crate::table::Table;

/// Every table of one generation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub departments: Table<Department>,
    pub onboarding_requests: Table<OnboardingRequest>,
    pub employees: Table<Employee>,
    pub vendors: Table<Vendor>,
    pub payroll_runs: Table<PayrollRun>,
    pub employee_pays: Table<EmployeePay>,
    pub orders: Table<Order>,
    pub invoices: Table<Invoice>,
    pub payments: Table<Payment>,
    pub approvals: Table<Approval>,
    pub disputes: Table<Dispute>,
    pub offboarding_requests: Table<OffboardingRequest>,
    pub audit_logs: Table<AuditLog>,
}

/// One table serialized as a standalone JSON document.
#[derive(Debug, Clone)]
pub struct TableDocument {
    pub kind: EntityKind,
    pub rows: usize,
    pub bytes: Vec<u8>,
}

impl Dataset {
    pub fn row_count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Department => self.departments.len(),
            EntityKind::OnboardingRequest => self.onboarding_requests.len(),
            EntityKind::Employee => self.employees.len(),
            EntityKind::Vendor => self.vendors.len(),
            EntityKind::PayrollRun => self.payroll_runs.len(),
            EntityKind::EmployeePay => self.employee_pays.len(),
            EntityKind::Order => self.orders.len(),
            EntityKind::Invoice => self.invoices.len(),
            EntityKind::Payment => self.payments.len(),
            EntityKind::Approval => self.approvals.len(),
            EntityKind::Dispute => self.disputes.len(),
            EntityKind::OffboardingRequest => self.offboarding_requests.len(),
            EntityKind::AuditLog => self.audit_logs.len(),
        }
    }

    /// Serialize one table as pretty JSON (two-space indent).
    pub fn table_json(&self, kind: EntityKind) -> serde_json::Result<Vec<u8>> {
        match kind {
            EntityKind::Department => serde_json::to_vec_pretty(&self.departments),
            EntityKind::OnboardingRequest => serde_json::to_vec_pretty(&self.onboarding_requests),
            EntityKind::Employee => serde_json::to_vec_pretty(&self.employees),
            EntityKind::Vendor => serde_json::to_vec_pretty(&self.vendors),
            EntityKind::PayrollRun => serde_json::to_vec_pretty(&self.payroll_runs),
            EntityKind::EmployeePay => serde_json::to_vec_pretty(&self.employee_pays),
            EntityKind::Order => serde_json::to_vec_pretty(&self.orders),
            EntityKind::Invoice => serde_json::to_vec_pretty(&self.invoices),
            EntityKind::Payment => serde_json::to_vec_pretty(&self.payments),
            EntityKind::Approval => serde_json::to_vec_pretty(&self.approvals),
            EntityKind::Dispute => serde_json::to_vec_pretty(&self.disputes),
            EntityKind::OffboardingRequest => {
                serde_json::to_vec_pretty(&self.offboarding_requests)
            }
            EntityKind::AuditLog => serde_json::to_vec_pretty(&self.audit_logs),
        }
    }

    /// Serialize every table, in [`EntityKind::ALL`] order.
    pub fn documents(&self) -> serde_json::Result<Vec<TableDocument>> {
        EntityKind::ALL
            .into_iter()
            .map(|kind| {
                Ok(TableDocument {
                    kind,
                    rows: self.row_count(kind),
                    bytes: self.table_json(kind)?,
                })
            })
            .collect()
    }

    /// Replace one table from its JSON document.
    pub fn load_table_json(&mut self, kind: EntityKind, bytes: &[u8]) -> serde_json::Result<()> {
        match kind {
            EntityKind::Department => self.departments = serde_json::from_slice(bytes)?,
            EntityKind::OnboardingRequest => {
                self.onboarding_requests = serde_json::from_slice(bytes)?
            }
            EntityKind::Employee => self.employees = serde_json::from_slice(bytes)?,
            EntityKind::Vendor => self.vendors = serde_json::from_slice(bytes)?,
            EntityKind::PayrollRun => self.payroll_runs = serde_json::from_slice(bytes)?,
            EntityKind::EmployeePay => self.employee_pays = serde_json::from_slice(bytes)?,
            EntityKind::Order => self.orders = serde_json::from_slice(bytes)?,
            EntityKind::Invoice => self.invoices = serde_json::from_slice(bytes)?,
            EntityKind::Payment => self.payments = serde_json::from_slice(bytes)?,
            EntityKind::Approval => self.approvals = serde_json::from_slice(bytes)?,
            EntityKind::Dispute => self.disputes = serde_json::from_slice(bytes)?,
            EntityKind::OffboardingRequest => {
                self.offboarding_requests = serde_json::from_slice(bytes)?
            }
            EntityKind::AuditLog => self.audit_logs = serde_json::from_slice(bytes)?,
        }
        Ok(())
    }
}
