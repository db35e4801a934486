use payseed_core::{Department, EntityKind, Table};

use crate::errors::GenerationError;
use crate::pipeline::GenerationContext;

/// Create `count` departments with no head yet.
pub fn generate_departments(
    ctx: &mut GenerationContext,
    count: u32,
) -> Result<Table<Department>, GenerationError> {
    let mut departments = Table::new();
    for _ in 0..count {
        let (index, department_id) = ctx.counters.next(EntityKind::Department);
        let title = ctx.faker.record("departments", index).job_title();
        departments.insert(Department {
            department_id,
            name: format!("{title} Department"),
            head_id: None,
        })?;
    }
    Ok(departments)
}
