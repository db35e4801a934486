use std::collections::BTreeSet;

use payseed_core::{Clock, EntityKind, IdCounters};

use crate::errors::GenerationError;
use crate::faker::TextFaker;

/// Pipeline stages, in the order the engine runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Departments,
    Onboarding,
    Resolution,
    DepartmentHeads,
    Payroll,
    Billing,
    Payments,
    Approvals,
    Disputes,
    Offboarding,
    AuditLog,
}

impl Stage {
    pub const PIPELINE: [Stage; 11] = [
        Stage::Departments,
        Stage::Onboarding,
        Stage::Resolution,
        Stage::DepartmentHeads,
        Stage::Payroll,
        Stage::Billing,
        Stage::Payments,
        Stage::Approvals,
        Stage::Disputes,
        Stage::Offboarding,
        Stage::AuditLog,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::Departments => "departments",
            Stage::Onboarding => "onboarding",
            Stage::Resolution => "resolution",
            Stage::DepartmentHeads => "department_heads",
            Stage::Payroll => "payroll",
            Stage::Billing => "billing",
            Stage::Payments => "payments",
            Stage::Approvals => "approvals",
            Stage::Disputes => "disputes",
            Stage::Offboarding => "offboarding",
            Stage::AuditLog => "audit_log",
        }
    }

    /// Kinds this stage creates, in creation order.
    pub fn creates(self) -> &'static [EntityKind] {
        match self {
            Stage::Departments => &[EntityKind::Department],
            Stage::Onboarding => &[EntityKind::OnboardingRequest],
            Stage::Resolution => &[EntityKind::Employee, EntityKind::Vendor],
            Stage::DepartmentHeads => &[],
            Stage::Payroll => &[EntityKind::PayrollRun, EntityKind::EmployeePay],
            Stage::Billing => &[EntityKind::Order, EntityKind::Invoice],
            Stage::Payments => &[EntityKind::Payment],
            Stage::Approvals => &[EntityKind::Approval],
            Stage::Disputes => &[EntityKind::Dispute],
            Stage::Offboarding => &[EntityKind::OffboardingRequest],
            Stage::AuditLog => &[EntityKind::AuditLog],
        }
    }

    /// Existing kinds this stage writes back into.
    pub fn backfills(self) -> &'static [EntityKind] {
        match self {
            Stage::Resolution => &[EntityKind::OnboardingRequest],
            Stage::DepartmentHeads => &[EntityKind::Department],
            _ => &[],
        }
    }

    /// Kinds that must already exist when this stage starts.
    pub fn reads(self) -> BTreeSet<EntityKind> {
        let created: BTreeSet<EntityKind> = self.creates().iter().copied().collect();
        let mut reads = BTreeSet::new();

        for kind in self.creates() {
            reads.extend(kind.parents().iter().copied());
        }
        for kind in self.backfills() {
            reads.insert(*kind);
            reads.extend(kind.backfill_parents().iter().copied());
        }

        reads.retain(|kind| !created.contains(kind));
        reads
    }
}

/// Tracks which kinds exist so far and refuses out-of-order stages.
#[derive(Debug, Clone, Default)]
pub struct StageLedger {
    produced: BTreeSet<EntityKind>,
}

impl StageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, stage: Stage) -> Result<(), GenerationError> {
        match stage.reads().into_iter().find(|kind| !self.produced.contains(kind)) {
            Some(missing) => Err(GenerationError::StageOrder {
                stage: stage.name(),
                missing,
            }),
            None => Ok(()),
        }
    }

    pub fn complete(&mut self, stage: Stage) {
        self.produced.extend(stage.creates().iter().copied());
    }
}

/// Check a stage sequence without running it.
pub fn check_pipeline(stages: &[Stage]) -> Result<(), GenerationError> {
    let mut ledger = StageLedger::new();
    for stage in stages {
        ledger.begin(*stage)?;
        ledger.complete(*stage);
    }
    Ok(())
}

/// State threaded through every stage of one run.
#[derive(Debug, Clone)]
pub struct GenerationContext {
    pub counters: IdCounters,
    pub clock: Clock,
    pub faker: TextFaker,
}

impl GenerationContext {
    pub fn new(seed: u64) -> Self {
        Self {
            counters: IdCounters::new(),
            clock: Clock::fixed(),
            faker: TextFaker::new(seed),
        }
    }
}
