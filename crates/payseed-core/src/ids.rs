use std::collections::BTreeMap;

use crate::graph::EntityKind;

/// Actor id substituted when no employee exists to act on a record.
pub const SYSTEM_ACTOR: &str = "system";

/// Format a record id as `prefix_NNN`.
///
/// Counters are 1-based and zero-padded to three digits; larger counters are
/// printed in full, so ids stay unique past `999`.
pub fn format_id(prefix: &str, count: u64) -> String {
    format!("{prefix}_{count:03}")
}

/// Synthetic bank account: the prefix followed by the counter padded to ten
/// digits.
pub fn bank_account(prefix: &str, count: u64) -> String {
    format!("{prefix}{count:010}")
}

/// Synthetic nine-digit routing number derived from a counter.
pub fn routing_number(count: u64) -> String {
    format!("{:09}", 100_000_000 + (count % 900_000_000))
}

/// Per-kind monotonically increasing id counters for one generation run.
#[derive(Debug, Clone, Default)]
pub struct IdCounters {
    counts: BTreeMap<EntityKind, u64>,
}

impl IdCounters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the counter for `kind` and return the new count with its id.
    pub fn next(&mut self, kind: EntityKind) -> (u64, String) {
        let count = self.counts.entry(kind).or_insert(0);
        *count += 1;
        (*count, format_id(kind.id_prefix(), *count))
    }

    /// Number of ids handed out for `kind` so far.
    pub fn current(&self, kind: EntityKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_padded_ids() {
        assert_eq!(format_id("dept", 1), "dept_001");
        assert_eq!(format_id("epay", 42), "epay_042");
        assert_eq!(format_id("audit", 1234), "audit_1234");
    }

    #[test]
    fn derives_bank_identifiers() {
        assert_eq!(bank_account("EMPL", 4), "EMPL0000000004");
        assert_eq!(routing_number(1), "100000001");
        assert_eq!(routing_number(899_999_999), "999999999");
        assert_eq!(routing_number(900_000_000), "100000000");
    }

    #[test]
    fn counters_are_independent_per_kind() {
        let mut counters = IdCounters::new();
        assert_eq!(counters.next(EntityKind::Employee).1, "emp_001");
        assert_eq!(counters.next(EntityKind::Employee).1, "emp_002");
        assert_eq!(counters.next(EntityKind::Vendor).1, "vend_001");
        assert_eq!(counters.current(EntityKind::Employee), 2);
        assert_eq!(counters.current(EntityKind::Invoice), 0);
    }
}
