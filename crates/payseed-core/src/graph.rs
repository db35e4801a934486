use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Every entity kind the generator produces, in declaration order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Department,
    OnboardingRequest,
    Employee,
    Vendor,
    PayrollRun,
    EmployeePay,
    Order,
    Invoice,
    Payment,
    Approval,
    Dispute,
    OffboardingRequest,
    AuditLog,
}

impl EntityKind {
    pub const ALL: [EntityKind; 13] = [
        EntityKind::Department,
        EntityKind::OnboardingRequest,
        EntityKind::Employee,
        EntityKind::Vendor,
        EntityKind::PayrollRun,
        EntityKind::EmployeePay,
        EntityKind::Order,
        EntityKind::Invoice,
        EntityKind::Payment,
        EntityKind::Approval,
        EntityKind::Dispute,
        EntityKind::OffboardingRequest,
        EntityKind::AuditLog,
    ];

    /// Table name; also the stem of the table's output file.
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Department => "departments",
            EntityKind::OnboardingRequest => "onboarding_requests",
            EntityKind::Employee => "employees",
            EntityKind::Vendor => "vendors",
            EntityKind::PayrollRun => "payroll_runs",
            EntityKind::EmployeePay => "employee_pays",
            EntityKind::Order => "orders",
            EntityKind::Invoice => "invoices",
            EntityKind::Payment => "payments",
            EntityKind::Approval => "approvals",
            EntityKind::Dispute => "disputes",
            EntityKind::OffboardingRequest => "offboarding_requests",
            EntityKind::AuditLog => "audit_logs",
        }
    }

    pub fn id_prefix(self) -> &'static str {
        match self {
            EntityKind::Department => "dept",
            EntityKind::OnboardingRequest => "onb",
            EntityKind::Employee => "emp",
            EntityKind::Vendor => "vend",
            EntityKind::PayrollRun => "prun",
            EntityKind::EmployeePay => "epay",
            EntityKind::Order => "ord",
            EntityKind::Invoice => "inv",
            EntityKind::Payment => "pay",
            EntityKind::Approval => "app",
            EntityKind::Dispute => "disp",
            EntityKind::OffboardingRequest => "off",
            EntityKind::AuditLog => "audit",
        }
    }

    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.table_name() == name)
    }

    /// Kinds whose records must exist before a record of this kind is
    /// created.
    ///
    /// Department heads are a back-fill onto existing departments and are
    /// listed in [`EntityKind::backfill_parents`] instead.
    pub fn parents(self) -> &'static [EntityKind] {
        use EntityKind::*;
        match self {
            Department => &[],
            OnboardingRequest => &[Department],
            Employee => &[OnboardingRequest, Department],
            Vendor => &[OnboardingRequest],
            PayrollRun => &[],
            EmployeePay => &[PayrollRun, Employee],
            Order => &[Vendor],
            Invoice => &[Order, Vendor],
            Payment => &[EmployeePay, Invoice],
            Approval => &[PayrollRun, Invoice, Order, OnboardingRequest, Employee],
            Dispute => &[EmployeePay, Invoice, Payment, Employee, Vendor],
            OffboardingRequest => &[Employee, Vendor],
            AuditLog => &[
                PayrollRun,
                Invoice,
                Payment,
                OnboardingRequest,
                OffboardingRequest,
                Employee,
            ],
        }
    }

    /// Kinds read by post-creation back-fills of this kind.
    pub fn backfill_parents(self) -> &'static [EntityKind] {
        match self {
            EntityKind::Department => &[EntityKind::Employee],
            EntityKind::OnboardingRequest => &[EntityKind::Employee, EntityKind::Vendor],
            _ => &[],
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Summary of dependency graph structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySummary {
    pub nodes: usize,
    pub edges: usize,
}

/// Report for entity dependency ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyReport {
    pub summary: DependencySummary,
    pub topo_order: Option<Vec<EntityKind>>,
    pub cycle: Option<Vec<EntityKind>>,
}

/// Build the deterministic creation-order report for all entity kinds.
pub fn build_dependency_report() -> DependencyReport {
    let graph = build_adjacency();
    let nodes = graph.len();
    let edges = graph.values().map(|targets| targets.len()).sum();
    let summary = DependencySummary { nodes, edges };

    match toposort(&graph) {
        Ok(order) => DependencyReport {
            summary,
            topo_order: Some(order),
            cycle: None,
        },
        Err(cycle) => DependencyReport {
            summary,
            topo_order: None,
            cycle: Some(cycle),
        },
    }
}

/// Parent -> children adjacency over creation dependencies.
fn build_adjacency() -> BTreeMap<EntityKind, BTreeSet<EntityKind>> {
    let mut graph: BTreeMap<EntityKind, BTreeSet<EntityKind>> = BTreeMap::new();

    for kind in EntityKind::ALL {
        graph.entry(kind).or_default();
        for parent in kind.parents() {
            graph.entry(*parent).or_default().insert(kind);
        }
    }

    graph
}

/// Kahn's algorithm; ties resolve in `Ord` order so the result is stable.
///
/// On failure returns the nodes left with unresolved inbound edges.
pub fn toposort<K: Ord + Clone>(graph: &BTreeMap<K, BTreeSet<K>>) -> Result<Vec<K>, Vec<K>> {
    let mut indegree: BTreeMap<K, usize> = BTreeMap::new();

    for (node, targets) in graph {
        indegree.entry(node.clone()).or_insert(0);
        for target in targets {
            *indegree.entry(target.clone()).or_insert(0) += 1;
        }
    }

    let mut ready: BTreeSet<K> = indegree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(node, _)| node.clone())
        .collect();

    let mut order = Vec::with_capacity(indegree.len());

    while let Some(node) = ready.pop_first() {
        if let Some(targets) = graph.get(&node) {
            for target in targets {
                if let Some(count) = indegree.get_mut(target) {
                    *count = count.saturating_sub(1);
                    if *count == 0 {
                        ready.insert(target.clone());
                    }
                }
            }
        }
        order.push(node);
    }

    if order.len() == indegree.len() {
        Ok(order)
    } else {
        Err(indegree
            .into_iter()
            .filter_map(|(node, count)| if count > 0 { Some(node) } else { None })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toposort_reports_cycle() {
        let mut graph: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
        graph.entry("a").or_default().insert("b");
        graph.entry("b").or_default().insert("a");
        graph.entry("c").or_default();

        let cycle = toposort(&graph).expect_err("expected cycle");
        assert_eq!(cycle, vec!["a", "b"]);
    }

    #[test]
    fn entity_order_respects_parents() {
        let report = build_dependency_report();
        assert!(report.cycle.is_none());
        let order = report.topo_order.expect("expected toposort");
        assert_eq!(order.len(), EntityKind::ALL.len());

        let position = |kind: EntityKind| order.iter().position(|item| *item == kind).unwrap();
        for kind in EntityKind::ALL {
            for parent in kind.parents() {
                assert!(
                    position(*parent) < position(kind),
                    "{parent} must precede {kind}"
                );
            }
        }
    }

    #[test]
    fn table_names_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_table_name(kind.table_name()), Some(kind));
        }
        assert_eq!(EntityKind::from_table_name("users"), None);
    }
}
