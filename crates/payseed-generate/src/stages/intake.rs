use payseed_core::categories::{PartyStatus, RequestStatus, SubjectKind};
use payseed_core::{
    Clock, Department, Employee, EntityKind, OnboardingRequest, RequestedData, Table, Vendor,
    bank_account, format_id, routing_number,
};

use crate::errors::GenerationError;
use crate::pipeline::GenerationContext;

/// Create `count` onboarding requests spread across the history window.
///
/// Subject kind and status cycle by request number, so with fewer than
/// three requests some statuses never appear.
pub fn generate_onboarding_requests(
    ctx: &mut GenerationContext,
    count: u32,
    departments: &Table<Department>,
) -> Result<Table<OnboardingRequest>, GenerationError> {
    let history_start = ctx.clock.history_start();
    let reference = ctx.clock.reference();
    let mut requests = Table::new();

    for _ in 0..count {
        let (number, request_id) = ctx.counters.next(EntityKind::OnboardingRequest);
        let entity_type = SubjectKind::from_index(number);
        let department_id = match entity_type {
            SubjectKind::Employee => departments
                .round_robin(number - 1)
                .map(|department| department.department_id.clone()),
            SubjectKind::Vendor => None,
        };

        let mut text = ctx.faker.record("onboarding_requests", number);
        let requested_data = RequestedData {
            name: text.person_name(),
            role: text.job_title(),
            salary: (80_000 + (number % 5) * 15_000) as f64,
            tax_id: format!("TAX-{number:05}"),
            bank_account_number: bank_account(bank_prefix(entity_type), number),
            bank_routing_number: routing_number(number),
            legal_name: text.company_name(),
            service: text.catch_phrase(),
        };

        requests.insert(OnboardingRequest {
            request_id,
            entity_type,
            department_id,
            requested_by: format_id(EntityKind::Employee.id_prefix(), number % 5 + 1),
            requested_data,
            status: RequestStatus::from_index(number),
            created_at: history_start.plus_days(Clock::spread_days(number - 1, count as u64)),
            updated_at: reference,
            entity_id: None,
        })?;
    }

    Ok(requests)
}

/// Realize every approved request as an employee or vendor and record the
/// realized id on the request.
pub fn resolve_requests(
    ctx: &mut GenerationContext,
    requests: &mut Table<OnboardingRequest>,
) -> Result<(Table<Employee>, Table<Vendor>), GenerationError> {
    let reference = ctx.clock.reference();
    let mut employees = Table::new();
    let mut vendors = Table::new();

    for request in requests.iter_mut() {
        if request.status != RequestStatus::Approved {
            continue;
        }
        let data = &request.requested_data;

        let entity_id = match request.entity_type {
            SubjectKind::Employee => {
                let (_, employee_id) = ctx.counters.next(EntityKind::Employee);
                employees.insert(Employee {
                    employee_id: employee_id.clone(),
                    name: data.name.clone(),
                    role: data.role.clone(),
                    salary: data.salary,
                    tax_id: data.tax_id.clone(),
                    bank_account_number: data.bank_account_number.clone(),
                    bank_routing_number: data.bank_routing_number.clone(),
                    department_id: request.department_id.clone(),
                    created_at: request.created_at,
                    updated_at: reference,
                    status: PartyStatus::Active,
                })?;
                employee_id
            }
            SubjectKind::Vendor => {
                let (_, vendor_id) = ctx.counters.next(EntityKind::Vendor);
                vendors.insert(Vendor {
                    vendor_id: vendor_id.clone(),
                    legal_name: data.legal_name.clone(),
                    tax_id: data.tax_id.clone(),
                    bank_account_number: data.bank_account_number.clone(),
                    bank_routing_number: data.bank_routing_number.clone(),
                    service: data.service.clone(),
                    created_at: request.created_at,
                    updated_at: reference,
                    status: PartyStatus::Active,
                })?;
                vendor_id
            }
        };

        request.entity_id = Some(entity_id);
    }

    Ok((employees, vendors))
}

/// Point each department at an employee, round-robin; heads stay `null`
/// when there are no employees.
pub fn assign_department_heads(departments: &mut Table<Department>, employees: &Table<Employee>) {
    for (position, department) in departments.iter_mut().enumerate() {
        department.head_id = employees
            .round_robin(position as u64)
            .map(|employee| employee.employee_id.clone());
    }
}

fn bank_prefix(kind: SubjectKind) -> &'static str {
    match kind {
        SubjectKind::Employee => "EMPL",
        SubjectKind::Vendor => "VEND",
    }
}
