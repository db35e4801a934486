use payseed_core::categories::{PayStatus, RequestStatus, SubjectKind};
use payseed_core::{Clock, Dataset, EmployeePay, OnboardingRequest, RequestedData, Table};

fn request(entity_id: Option<&str>) -> OnboardingRequest {
    let clock = Clock::fixed();
    OnboardingRequest {
        request_id: "onb_001".to_string(),
        entity_type: SubjectKind::Vendor,
        department_id: None,
        requested_by: "emp_002".to_string(),
        requested_data: RequestedData {
            name: "Ada Lovelace".to_string(),
            role: "Engineer".to_string(),
            salary: 95000.0,
            tax_id: "TAX-00001".to_string(),
            bank_account_number: "VEND0000000001".to_string(),
            bank_routing_number: "100000001".to_string(),
            legal_name: "Acme LLC".to_string(),
            service: "Widgets".to_string(),
        },
        status: RequestStatus::Approved,
        created_at: clock.history_start(),
        updated_at: clock.reference(),
        entity_id: entity_id.map(str::to_string),
    }
}

#[test]
fn serializes_request_with_wire_field_names() {
    let json = serde_json::to_string_pretty(&request(Some("vend_001"))).expect("serialize");
    let expected = r#"{
  "request_id": "onb_001",
  "entity_type": "vendor",
  "department_id": null,
  "requested_by": "emp_002",
  "requested_data": {
    "name": "Ada Lovelace",
    "role": "Engineer",
    "salary": 95000,
    "tax_id": "TAX-00001",
    "bank_account_number": "VEND0000000001",
    "bank_routing_number": "100000001",
    "legal_name": "Acme LLC",
    "service": "Widgets"
  },
  "status": "approved",
  "created_at": "2022-09-24T12:00:00+00:00",
  "updated_at": "2025-09-23T12:00:00+00:00",
  "entity_id": "vend_001"
}"#;
    assert_eq!(json, expected);
}

#[test]
fn omits_entity_id_until_resolved() {
    let json = serde_json::to_value(request(None)).expect("serialize");
    assert!(json.get("entity_id").is_none());
}

#[test]
fn tables_are_keyed_by_id() {
    let mut pays = Table::new();
    pays.insert(EmployeePay {
        pay_id: "epay_001".to_string(),
        employee_id: "emp_001".to_string(),
        payroll_run_id: "prun_002".to_string(),
        gross_pay: 3333.33,
        deductions: 666.67,
        net_pay: 2666.66,
        status: PayStatus::Paid,
        paid_at: Clock::fixed().reference(),
    })
    .expect("insert pay");

    let mut dataset = Dataset::default();
    dataset.employee_pays = pays;

    let bytes = dataset
        .table_json(payseed_core::EntityKind::EmployeePay)
        .expect("serialize table");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("parse table");
    assert_eq!(value["epay_001"]["net_pay"], serde_json::json!(2666.66));
    assert_eq!(value["epay_001"]["status"], "paid");

    let mut reloaded = Dataset::default();
    reloaded
        .load_table_json(payseed_core::EntityKind::EmployeePay, &bytes)
        .expect("reload table");
    assert_eq!(reloaded.employee_pays, dataset.employee_pays);
}
