use std::collections::BTreeSet;

use payseed_core::categories::{
    ApprovalSubject, AuditAction, AuditRole, Decision, DisputeStatus, DisputeType,
    OffboardingStatus, PaymentMethod, PaymentStatus, PaymentSubject, RequestStatus, SubjectKind,
};
use payseed_core::{Clock, Dataset, EntityKind, SYSTEM_ACTOR, round_cents};
use payseed_generate::{GenerateParams, GenerationEngine, GenerationError, MAX_COUNT};

fn generate(params: GenerateParams) -> Dataset {
    GenerationEngine::new(params)
        .generate()
        .expect("generate dataset")
}

fn assert_contiguous<'a>(prefix: &str, ids: impl Iterator<Item = &'a str>) {
    for (position, id) in ids.enumerate() {
        assert_eq!(id, format!("{prefix}_{:03}", position + 1));
    }
}

#[test]
fn generation_is_deterministic() {
    let params = GenerateParams::default();
    assert_eq!(generate(params), generate(params));
}

#[test]
fn default_run_has_expected_sizes() {
    let dataset = generate(GenerateParams::default());

    assert_eq!(dataset.departments.len(), 5);
    assert_eq!(dataset.onboarding_requests.len(), 40);
    assert_eq!(dataset.employees.len(), 7);
    assert_eq!(dataset.vendors.len(), 7);
    assert_eq!(dataset.payroll_runs.len(), 20);
    assert_eq!(dataset.orders.len(), 30);
    assert_eq!(dataset.invoices.len(), 30);
    assert_eq!(
        dataset.payments.len(),
        dataset.employee_pays.len() + dataset.invoices.len()
    );
    assert_eq!(dataset.approvals.len(), 20 + 30 + 30 + 40);
}

#[test]
fn two_requests_resolve_one_vendor() {
    let dataset = generate(GenerateParams::new(2, 20, 30));

    let first = dataset.onboarding_requests.get("onb_001").expect("onb_001");
    assert_eq!(first.entity_type, SubjectKind::Vendor);
    assert_eq!(first.status, RequestStatus::Approved);
    assert_eq!(first.department_id, None);
    assert_eq!(first.entity_id.as_deref(), Some("vend_001"));

    let second = dataset.onboarding_requests.get("onb_002").expect("onb_002");
    assert_eq!(second.entity_type, SubjectKind::Employee);
    assert_eq!(second.status, RequestStatus::Rejected);
    assert_eq!(second.department_id.as_deref(), Some("dept_002"));
    assert_eq!(second.entity_id, None);

    let vendor = dataset.vendors.get("vend_001").expect("vend_001");
    assert_eq!(vendor.created_at, first.created_at);
    assert_eq!(vendor.legal_name, first.requested_data.legal_name);
    assert_eq!(vendor.bank_account_number, "VEND0000000001");
    assert_eq!(vendor.bank_routing_number, "100000001");

    assert!(dataset.employees.is_empty());
    assert!(dataset.employee_pays.is_empty());
    assert!(dataset.departments.iter().all(|dept| dept.head_id.is_none()));
    assert!(
        dataset
            .approvals
            .iter()
            .all(|approval| approval.approver_id == SYSTEM_ACTOR)
    );
    assert!(
        dataset
            .orders
            .iter()
            .all(|order| order.vendor_id == "vend_001")
    );
}

#[test]
fn zero_counts_produce_only_departments() {
    let dataset = generate(GenerateParams::new(0, 0, 0));

    assert_eq!(dataset.departments.len(), 5);
    for kind in EntityKind::ALL {
        if kind != EntityKind::Department {
            assert_eq!(dataset.row_count(kind), 0, "{kind} should be empty");
        }
    }
    assert!(dataset.departments.iter().all(|dept| dept.head_id.is_none()));
}

#[test]
fn orders_without_vendors_are_skipped() {
    let dataset = generate(GenerateParams::new(0, 3, 10));

    assert_eq!(dataset.payroll_runs.len(), 3);
    assert!(dataset.orders.is_empty());
    assert!(dataset.invoices.is_empty());
    assert!(dataset.payments.is_empty());
    assert_eq!(dataset.approvals.len(), 3);
}

#[test]
fn first_payroll_run_has_no_eligible_employees() {
    let mut params = GenerateParams::default();
    params.payroll_runs = 1;
    let dataset = generate(params);

    assert_eq!(dataset.payroll_runs.len(), 1);
    assert!(dataset.employee_pays.is_empty());

    let run = dataset.payroll_runs.get("prun_001").expect("prun_001");
    let history_start = Clock::fixed().history_start();
    assert_eq!(run.created_at, history_start);
    assert_eq!(run.payroll_period_start, history_start.date());
    assert_eq!(
        run.payroll_period_end,
        history_start.plus_days(14).date()
    );
}

#[test]
fn payroll_periods_follow_each_other() {
    let dataset = generate(GenerateParams::default());
    let runs: Vec<_> = dataset.payroll_runs.iter().collect();

    for pair in runs.windows(2) {
        let gap = pair[1].payroll_period_start - pair[0].payroll_period_end;
        assert_eq!(gap.num_days(), 7);
    }
    for run in &runs {
        let length = run.payroll_period_end - run.payroll_period_start;
        assert_eq!(length.num_days(), 14);
    }
}

#[test]
fn pay_arithmetic_holds() {
    let dataset = generate(GenerateParams::default());
    assert!(!dataset.employee_pays.is_empty());

    for pay in &dataset.employee_pays {
        let employee = dataset.employees.get(&pay.employee_id).expect("employee");
        assert_eq!(pay.gross_pay, round_cents(employee.salary / 24.0));
        assert_eq!(pay.deductions, round_cents(pay.gross_pay * 0.2));
        assert_eq!(pay.net_pay, round_cents(pay.gross_pay - pay.deductions));
        assert!((pay.gross_pay - pay.deductions - pay.net_pay).abs() < 0.005);
    }
}

#[test]
fn invoices_match_their_orders() {
    let dataset = generate(GenerateParams::default());

    for (order, invoice) in dataset.orders.iter().zip(dataset.invoices.iter()) {
        assert_eq!(invoice.order_id, order.order_id);
        assert_eq!(invoice.vendor_id, order.vendor_id);
        assert_eq!(invoice.amount, order.amount);
        assert!(invoice.created_at >= order.created_at);
        assert_eq!(
            invoice.due_date,
            invoice.created_at.plus_days(30).date()
        );
    }
}

#[test]
fn references_resolve() {
    let dataset = generate(GenerateParams::default());

    for request in &dataset.onboarding_requests {
        if let Some(department_id) = &request.department_id {
            assert!(dataset.departments.contains(department_id));
        }
        if let Some(entity_id) = &request.entity_id {
            assert_eq!(request.status, RequestStatus::Approved);
            assert!(
                dataset.employees.contains(entity_id) || dataset.vendors.contains(entity_id)
            );
        }
    }
    for department in &dataset.departments {
        let head = department.head_id.as_deref().expect("head assigned");
        assert!(dataset.employees.contains(head));
    }
    for pay in &dataset.employee_pays {
        assert!(dataset.payroll_runs.contains(&pay.payroll_run_id));
    }
    for payment in &dataset.payments {
        let found = match payment.entity_type {
            PaymentSubject::EmployeePay => dataset.employee_pays.contains(&payment.entity_id),
            PaymentSubject::Invoice => dataset.invoices.contains(&payment.entity_id),
        };
        assert!(found, "payment {} has a dangling subject", payment.payment_id);
    }
    for approval in &dataset.approvals {
        let found = match approval.entity_type {
            ApprovalSubject::PayrollRun => dataset.payroll_runs.contains(&approval.entity_id),
            ApprovalSubject::Invoice => dataset.invoices.contains(&approval.entity_id),
            ApprovalSubject::Order => dataset.orders.contains(&approval.entity_id),
            ApprovalSubject::Onboarding => {
                dataset.onboarding_requests.contains(&approval.entity_id)
            }
        };
        assert!(found, "approval {} has a dangling subject", approval.approval_id);
        assert!(dataset.employees.contains(&approval.approver_id));
    }
    for request in &dataset.offboarding_requests {
        let found = match request.entity_type {
            SubjectKind::Employee => dataset.employees.contains(&request.entity_id),
            SubjectKind::Vendor => dataset.vendors.contains(&request.entity_id),
        };
        assert!(found);
    }
}

#[test]
fn derived_timestamps_follow_their_anchors() {
    let dataset = generate(GenerateParams::default());
    let reference = Clock::fixed().reference();

    for employee in &dataset.employees {
        let request = dataset
            .onboarding_requests
            .iter()
            .find(|request| request.entity_id.as_deref() == Some(employee.employee_id.as_str()))
            .expect("originating request");
        assert_eq!(employee.created_at, request.created_at);
        assert_eq!(employee.updated_at, reference);
    }
    for payment in &dataset.payments {
        let anchor = match payment.entity_type {
            PaymentSubject::EmployeePay => {
                dataset
                    .employee_pays
                    .get(&payment.entity_id)
                    .expect("pay")
                    .paid_at
            }
            PaymentSubject::Invoice => {
                dataset
                    .invoices
                    .get(&payment.entity_id)
                    .expect("invoice")
                    .created_at
            }
        };
        assert!(payment.executed_at >= anchor);
    }
    for dispute in &dataset.disputes {
        let anchor = match dispute.dispute_type {
            DisputeType::Payroll => {
                dataset
                    .employee_pays
                    .get(&dispute.entity_id)
                    .expect("pay")
                    .paid_at
            }
            DisputeType::Invoice => {
                dataset
                    .invoices
                    .get(&dispute.entity_id)
                    .expect("invoice")
                    .created_at
            }
            DisputeType::Payment => {
                dataset
                    .payments
                    .get(&dispute.entity_id)
                    .expect("payment")
                    .executed_at
            }
        };
        assert!(dispute.created_at >= anchor);
        assert_eq!(dispute.updated_at, reference);
    }

    let audit: Vec<_> = dataset.audit_logs.iter().collect();
    assert!(!audit.is_empty());
    assert!(audit[0].timestamp < reference);
    for pair in audit.windows(2) {
        assert!(pair[1].timestamp < pair[0].timestamp);
    }
}

#[test]
fn ids_are_contiguous_per_table() {
    let dataset = generate(GenerateParams::default());

    assert_contiguous("dept", dataset.departments.ids());
    assert_contiguous("onb", dataset.onboarding_requests.ids());
    assert_contiguous("emp", dataset.employees.ids());
    assert_contiguous("vend", dataset.vendors.ids());
    assert_contiguous("prun", dataset.payroll_runs.ids());
    assert_contiguous("epay", dataset.employee_pays.ids());
    assert_contiguous("ord", dataset.orders.ids());
    assert_contiguous("inv", dataset.invoices.ids());
    assert_contiguous("pay", dataset.payments.ids());
    assert_contiguous("app", dataset.approvals.ids());
    assert_contiguous("disp", dataset.disputes.ids());
    assert_contiguous("off", dataset.offboarding_requests.ids());
    assert_contiguous("audit", dataset.audit_logs.ids());

    let unique: BTreeSet<&str> = dataset.payments.ids().collect();
    assert_eq!(unique.len(), dataset.payments.len());
}

#[test]
fn faker_text_is_filled() {
    let dataset = generate(GenerateParams::default());

    for department in &dataset.departments {
        assert!(department.name.ends_with(" Department"));
        assert!(department.name.len() > " Department".len());
    }
    for employee in &dataset.employees {
        assert!(!employee.name.is_empty());
        assert!(!employee.role.is_empty());
    }
    for vendor in &dataset.vendors {
        assert!(!vendor.legal_name.is_empty());
        assert!(!vendor.service.is_empty());
    }
}

#[test]
fn oversized_counts_fail_before_generation() {
    let err = GenerationEngine::new(GenerateParams::new(1, MAX_COUNT + 1, 1))
        .generate()
        .expect_err("too many payroll runs");
    assert!(matches!(err, GenerationError::InvalidParams(_)));
}

#[test]
fn default_run_samples_events_at_fixed_rates() {
    let dataset = generate(GenerateParams::default());

    assert_eq!(dataset.employee_pays.len(), 16);
    assert_eq!(dataset.payments.len(), 46);
    assert_eq!(dataset.disputes.len(), 20);
    assert_eq!(dataset.offboarding_requests.len(), 4);
    assert_eq!(dataset.audit_logs.len(), 47);

    let disputed: Vec<&str> = dataset
        .disputes
        .iter()
        .map(|dispute| dispute.entity_id.as_str())
        .collect();
    assert_eq!(
        disputed,
        [
            "epay_001", "epay_006", "epay_011", "epay_016", "inv_001", "inv_006", "inv_011",
            "inv_016", "inv_021", "inv_026", "pay_001", "pay_006", "pay_011", "pay_016",
            "pay_021", "pay_026", "pay_031", "pay_036", "pay_041", "pay_046",
        ]
    );

    let offboarded: Vec<(&str, OffboardingStatus)> = dataset
        .offboarding_requests
        .iter()
        .map(|request| (request.entity_id.as_str(), request.status))
        .collect();
    assert_eq!(
        offboarded,
        [
            ("emp_001", OffboardingStatus::Pending),
            ("emp_005", OffboardingStatus::Pending),
            ("vend_002", OffboardingStatus::Pending),
            ("vend_006", OffboardingStatus::Pending),
        ]
    );

    let audited: Vec<&str> = dataset
        .audit_logs
        .iter()
        .map(|entry| entry.entity_id.as_str())
        .collect();
    assert_eq!(
        audited,
        [
            "prun_001", "prun_004", "prun_007", "prun_010", "prun_013", "prun_016", "prun_019",
            "inv_002", "inv_005", "inv_008", "inv_011", "inv_014", "inv_017", "inv_020",
            "inv_023", "inv_026", "inv_029", "pay_002", "pay_005", "pay_008", "pay_011",
            "pay_014", "pay_017", "pay_020", "pay_023", "pay_026", "pay_029", "pay_032",
            "pay_035", "pay_038", "pay_041", "pay_044", "onb_001", "onb_004", "onb_007",
            "onb_010", "onb_013", "onb_016", "onb_019", "onb_022", "onb_025", "onb_028",
            "onb_031", "onb_034", "onb_037", "onb_040", "off_003",
        ]
    );
}

#[test]
fn default_run_selects_known_categories() {
    let dataset = generate(GenerateParams::default());

    let payments: Vec<(&str, PaymentMethod, PaymentStatus)> = dataset
        .payments
        .iter()
        .take(4)
        .map(|payment| (payment.entity_id.as_str(), payment.method, payment.status))
        .collect();
    assert_eq!(
        payments,
        [
            ("epay_001", PaymentMethod::BankTransfer, PaymentStatus::Completed),
            ("epay_002", PaymentMethod::Check, PaymentStatus::Pending),
            ("epay_003", PaymentMethod::Wallet, PaymentStatus::Failed),
            ("epay_004", PaymentMethod::BankTransfer, PaymentStatus::Completed),
        ]
    );

    for (subject, first_id) in [
        (ApprovalSubject::PayrollRun, "app_001"),
        (ApprovalSubject::Invoice, "app_021"),
        (ApprovalSubject::Order, "app_051"),
        (ApprovalSubject::Onboarding, "app_081"),
    ] {
        let group: Vec<(&str, Decision, u8, &str)> = dataset
            .approvals
            .iter()
            .filter(|approval| approval.entity_type == subject)
            .take(3)
            .map(|approval| {
                (
                    approval.approval_id.as_str(),
                    approval.decision,
                    approval.level,
                    approval.approver_id.as_str(),
                )
            })
            .collect();
        assert_eq!(group[0].0, first_id, "{subject}");
        let picks: Vec<_> = group.iter().map(|row| (row.1, row.2, row.3)).collect();
        assert_eq!(
            picks,
            [
                (Decision::Approved, 1, "emp_001"),
                (Decision::Rejected, 2, "emp_002"),
                (Decision::Escalated, 3, "emp_003"),
            ],
            "{subject}"
        );
    }

    let statuses: Vec<DisputeStatus> = dataset
        .disputes
        .iter()
        .take(5)
        .map(|dispute| dispute.status)
        .collect();
    assert_eq!(
        statuses,
        [
            DisputeStatus::Open,
            DisputeStatus::UnderReview,
            DisputeStatus::Resolved,
            DisputeStatus::Escalated,
            DisputeStatus::Open,
        ]
    );
    let raisers: Vec<&str> = dataset
        .disputes
        .iter()
        .take(6)
        .map(|dispute| dispute.raised_by.as_str())
        .collect();
    assert_eq!(
        raisers,
        ["emp_001", "emp_006", "emp_004", "emp_002", "vend_001", "vend_006"]
    );

    let first = dataset.audit_logs.get("audit_001").expect("audit_001");
    assert_eq!(first.action_performed, AuditAction::Created);
    assert_eq!(first.role, AuditRole::System);
    assert_eq!(first.performed_by, "emp_001");
    let second = dataset.audit_logs.get("audit_002").expect("audit_002");
    assert_eq!(second.action_performed, AuditAction::Paid);
    assert_eq!(second.role, AuditRole::System);
    assert_eq!(second.performed_by, "emp_004");
}

#[test]
fn payroll_pays_a_rotating_slice_of_eligible_employees() {
    let dataset = generate(GenerateParams::default());

    let paid: Vec<(&str, &str)> = dataset
        .employee_pays
        .iter()
        .map(|pay| (pay.payroll_run_id.as_str(), pay.employee_id.as_str()))
        .collect();
    assert_eq!(
        paid,
        [
            ("prun_005", "emp_001"),
            ("prun_006", "emp_001"),
            ("prun_007", "emp_001"),
            ("prun_008", "emp_001"),
            ("prun_009", "emp_001"),
            ("prun_010", "emp_001"),
            ("prun_011", "emp_001"),
            ("prun_012", "emp_001"),
            ("prun_013", "emp_002"),
            ("prun_014", "emp_001"),
            ("prun_015", "emp_002"),
            ("prun_016", "emp_001"),
            ("prun_017", "emp_002"),
            ("prun_018", "emp_001"),
            ("prun_019", "emp_002"),
            ("prun_020", "emp_003"),
        ]
    );
}

#[test]
fn order_amounts_cycle_in_steps_of_five_hundred() {
    let dataset = generate(GenerateParams::default());

    let amounts: Vec<(&str, f64, &str)> = dataset
        .orders
        .iter()
        .take(10)
        .map(|order| (order.order_id.as_str(), order.amount, order.vendor_id.as_str()))
        .collect();
    assert_eq!(
        amounts,
        [
            ("ord_001", 1000.0, "vend_001"),
            ("ord_002", 1500.0, "vend_002"),
            ("ord_003", 2000.0, "vend_003"),
            ("ord_004", 2500.0, "vend_004"),
            ("ord_005", 3000.0, "vend_005"),
            ("ord_006", 3500.0, "vend_006"),
            ("ord_007", 4000.0, "vend_007"),
            ("ord_008", 4500.0, "vend_001"),
            ("ord_009", 5000.0, "vend_002"),
            ("ord_010", 500.0, "vend_003"),
        ]
    );

    let order = serde_json::to_value(dataset.orders.get("ord_001").expect("ord_001"))
        .expect("serialize order");
    assert_eq!(order["amount"], serde_json::json!(1000));
    assert!(order["amount"].is_u64());
    let employee = serde_json::to_value(dataset.employees.get("emp_001").expect("emp_001"))
        .expect("serialize employee");
    assert!(employee["salary"].is_u64());
}
