use payseed_core::categories::{PayStatus, PayrollRunStatus};
use payseed_core::{
    DEDUCTION_RATE, Employee, EmployeePay, EntityKind, PAY_PERIODS_PER_YEAR, PayrollRun, Table,
    round_cents,
};
use tracing::debug;

use crate::errors::GenerationError;
use crate::pipeline::GenerationContext;

const PERIOD_DAYS: i64 = 14;
const GAP_DAYS: i64 = 7;

/// Create `count` back-to-back payroll runs and pay a slice of the
/// employees hired by each run's period end.
pub fn generate_payroll(
    ctx: &mut GenerationContext,
    count: u32,
    employees: &Table<Employee>,
) -> Result<(Table<PayrollRun>, Table<EmployeePay>), GenerationError> {
    let reference = ctx.clock.reference();
    let mut runs = Table::new();
    let mut pays = Table::new();
    let mut period_start = ctx.clock.history_start();

    for _ in 0..count {
        let (number, payroll_run_id) = ctx.counters.next(EntityKind::PayrollRun);
        let start = period_start;
        let end = start.plus_days(PERIOD_DAYS);
        period_start = end.plus_days(GAP_DAYS);

        runs.insert(PayrollRun {
            payroll_run_id: payroll_run_id.clone(),
            payroll_period_start: start.date(),
            payroll_period_end: end.date(),
            status: PayrollRunStatus::from_index(number),
            created_at: start,
            updated_at: reference,
        })?;

        let eligible: Vec<&Employee> = employees
            .iter()
            .filter(|employee| employee.created_at <= end)
            .collect();
        if eligible.is_empty() {
            debug!(payroll_run = %payroll_run_id, "no eligible employees");
            continue;
        }

        let take = (eligible.len() / 4).max(1);
        let first = (number % eligible.len() as u64) as usize;

        for employee in eligible.iter().skip(first).take(take) {
            let (pay_number, pay_id) = ctx.counters.next(EntityKind::EmployeePay);
            let gross_pay = round_cents(employee.salary / PAY_PERIODS_PER_YEAR);
            let deductions = round_cents(gross_pay * DEDUCTION_RATE);

            pays.insert(EmployeePay {
                pay_id,
                employee_id: employee.employee_id.clone(),
                payroll_run_id: payroll_run_id.clone(),
                gross_pay,
                deductions,
                net_pay: round_cents(gross_pay - deductions),
                status: PayStatus::from_index(pay_number),
                paid_at: end.plus_days((pay_number % 5) as i64),
            })?;
        }
    }

    Ok((runs, pays))
}
