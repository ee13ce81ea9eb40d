//! Integration tests for the UKRI rules engine HTTP API.
//!
//! This test suite drives the router end to end:
//! - Salary cost calculation for full-time and part-time researchers
//! - Grant totals across researchers
//! - Burn rate projection from previously calculated months
//! - Timesheet validation reports
//! - Timesheet status transitions
//! - Funder profile lookup
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use ukri_rules_engine::api::{AppState, create_router};
use ukri_rules_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    let loader = ConfigLoader::load("./config/funders").expect("Failed to load config");
    AppState::new(loader.into_registry())
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string.
fn decimal_at(value: &Value) -> Decimal {
    decimal(value.as_str().expect("decimal should serialize as a string"))
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

fn full_time_researcher() -> Value {
    json!({
        "id": "researcher-001",
        "name": "Dr Sarah Chen",
        "email": "s.chen@university.ac.uk",
        "department": "Physics",
        "contracted_hours_weekly": "35",
        "employment_fraction": "1.0",
        "annual_salary": "52000",
        "salary_effective_date": "2024-08-01",
        "institution_id": "inst-001"
    })
}

fn part_time_researcher() -> Value {
    json!({
        "id": "researcher-002",
        "name": "Dr James Okafor",
        "contracted_hours_weekly": "37.5",
        "employment_fraction": "0.5",
        "annual_salary": "45000",
        "salary_effective_date": "2024-08-01"
    })
}

fn grant(funder_profile_id: &str) -> Value {
    json!({
        "id": "grant-001",
        "funder_profile_id": funder_profile_id,
        "title": "Quantum Materials for Energy Storage",
        "reference": "EP/X012345/1",
        "start_date": "2025-01-01",
        "end_date": "2027-12-31",
        "funded_fte": "0.4",
        "total_staff_budget": "180000",
        "principal_investigator_id": "pi-001",
        "institution_id": "inst-001"
    })
}

fn period(researcher_id: &str, year: i32, month: u32, hours: &str) -> Value {
    json!({
        "id": format!("tp-{researcher_id}-{year}-{month}"),
        "researcher_id": researcher_id,
        "year": year,
        "month": month,
        "status": "draft",
        "entries": [{ "id": "e1", "grant_id": "grant-001", "hours": hours }]
    })
}

/// A locked October 2025 period, submitted on time with full hours.
fn compliant_period() -> Value {
    json!({
        "id": "tp-2025-10",
        "researcher_id": "researcher-001",
        "year": 2025,
        "month": 10,
        "status": "locked",
        "submitted_at": "2025-11-03T12:00:00Z",
        "signed_at": "2025-11-04T12:00:00Z",
        "countersigned_at": "2025-11-05T12:00:00Z",
        "locked_at": "2025-11-06T12:00:00Z",
        "entries": [{ "id": "e1", "grant_id": "grant-001", "hours": "60" }],
        "non_grant_entries": [{
            "id": "ng1",
            "category": "teaching",
            "hours": "91.67",
            "description": "Undergraduate lectures"
        }]
    })
}

// =============================================================================
// Salary Cost
// =============================================================================

#[tokio::test]
async fn test_salary_cost_full_time_researcher() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "researcher": full_time_researcher(),
        "grant": grant("ukri")
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json["contracted_monthly_hours"]), decimal("151.67"));
    assert_eq!(decimal_at(&json["effort_percentage"]), decimal("0.0923"));
    assert_eq!(decimal_at(&json["monthly_salary"]), decimal("4333.33"));
    assert_eq!(decimal_at(&json["salary_cost_charged"]), decimal("400"));
    assert_eq!(decimal_at(&json["fec_rate"]), decimal("0.8"));
    assert_eq!(decimal_at(&json["claimable_cost"]), decimal("320"));
    assert_eq!(json["workings"].as_array().unwrap().len(), 5);
    assert!(json["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_salary_cost_part_time_researcher() {
    let body = json!({
        "period": period("researcher-002", 2025, 10, "40"),
        "researcher": part_time_researcher(),
        "grant": grant("ukri")
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json["contracted_monthly_hours"]), decimal("162.5"));
    assert_eq!(decimal_at(&json["effort_percentage"]), decimal("0.2462"));
    assert_eq!(decimal_at(&json["monthly_salary"]), decimal("3750"));
    assert_eq!(decimal_at(&json["salary_cost_charged"]), decimal("923.08"));
    assert_eq!(decimal_at(&json["claimable_cost"]), decimal("738.46"));
}

#[tokio::test]
async fn test_salary_cost_over_allocation_warns() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "80"),
        "researcher": full_time_researcher(),
        "grant": grant("ukri")
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json["effort_percentage"]), decimal("0.5275"));
    let warnings = json["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().contains("exceeds"));
}

#[tokio::test]
async fn test_salary_cost_unknown_funder_returns_404() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "researcher": full_time_researcher(),
        "grant": grant("wellcome")
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "FUNDER_PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn test_salary_cost_is_idempotent() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "researcher": full_time_researcher(),
        "grant": grant("ukri")
    });

    let (_, first) = post_json(create_router_for_test(), "/calculate/salary-cost", body.clone()).await;
    let (_, second) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(first, second);
}

// =============================================================================
// Grant Total
// =============================================================================

#[tokio::test]
async fn test_grant_total_across_researchers() {
    let body = json!({
        "grant": grant("ukri"),
        "periods": [
            period("researcher-001", 2025, 10, "14"),
            period("researcher-002", 2025, 10, "40")
        ],
        "researchers": [full_time_researcher(), part_time_researcher()]
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/grant-total", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json["total_claimable_cost"]), decimal("1058.46"));
    assert_eq!(decimal_at(&json["total_staff_budget"]), decimal("180000"));

    let by_researcher = json["by_researcher"].as_array().unwrap();
    assert_eq!(by_researcher.len(), 2);
    assert_eq!(by_researcher[0]["researcher_name"], "Dr Sarah Chen");
    assert_eq!(decimal_at(&by_researcher[0]["total_claimable"]), decimal("320"));
    assert_eq!(decimal_at(&by_researcher[1]["total_claimable"]), decimal("738.46"));
}

#[tokio::test]
async fn test_grant_total_skips_researchers_without_periods() {
    let body = json!({
        "grant": grant("ukri"),
        "periods": [period("researcher-001", 2025, 10, "14")],
        "researchers": [full_time_researcher(), part_time_researcher()]
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/grant-total", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["by_researcher"].as_array().unwrap().len(), 1);
    assert_eq!(decimal_at(&json["total_claimable_cost"]), decimal("320"));
}

// =============================================================================
// Burn Rate
// =============================================================================

#[tokio::test]
async fn test_burn_rate_from_calculated_months() {
    let mut calculation_results = Vec::new();
    for month in 1..=6 {
        let body = json!({
            "period": period("researcher-001", 2025, month, "14"),
            "researcher": full_time_researcher(),
            "grant": grant("ukri")
        });
        let (status, json) =
            post_json(create_router_for_test(), "/calculate/salary-cost", body).await;
        assert_eq!(status, StatusCode::OK);
        calculation_results.push(json);
    }

    let body = json!({
        "grant": grant("ukri"),
        "calculation_results": calculation_results,
        "as_of": "2025-07-01"
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/burn-rate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json["total_claimed_to_date"]), decimal("1920"));
    assert_eq!(json["months_elapsed"], 6);
    assert_eq!(json["months_remaining"], 29);
    assert_eq!(decimal_at(&json["average_monthly_burn"]), decimal("320"));
    assert_eq!(decimal_at(&json["projected_total_cost"]), decimal("11200"));
    assert_eq!(json["burn_rate_status"], "underspending");
    assert_eq!(json["workings"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_burn_rate_defaults_as_of_to_today() {
    let body = json!({
        "grant": grant("ukri"),
        "calculation_results": []
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/burn-rate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_at(&json["total_claimed_to_date"]), Decimal::ZERO);
    assert!(json["months_elapsed"].as_i64().unwrap() >= 1);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn test_validate_compliant_period() {
    let body = json!({
        "period": compliant_period(),
        "researcher": full_time_researcher(),
        "grants": [grant("ukri")]
    });

    let (status, json) = post_json(create_router_for_test(), "/validate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["compliant"], true);
    assert_eq!(json["failed_count"], 0);

    let rule_ids: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rule_id"].as_str().unwrap())
        .collect();
    assert_eq!(
        rule_ids,
        vec![
            "UKRI-TS-001",
            "UKRI-TS-002",
            "UKRI-TS-003",
            "UKRI-TS-004",
            "UKRI-TS-005",
            "UKRI-TS-006",
            "UKRI-TS-007",
            "UKRI-TS-008",
        ]
    );
}

#[tokio::test]
async fn test_validate_unsigned_draft_is_not_compliant() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "60"),
        "researcher": full_time_researcher(),
        "grants": [grant("ukri")]
    });

    let (status, json) = post_json(create_router_for_test(), "/validate", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["compliant"], false);

    let signature = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["rule_id"] == "UKRI-TS-002")
        .unwrap();
    assert_eq!(signature["passed"], false);
    assert_eq!(signature["severity"], "error");
}

// =============================================================================
// Status Transitions
// =============================================================================

#[tokio::test]
async fn test_transition_draft_to_submitted() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "target_status": "submitted"
    });

    let (status, json) = post_json(create_router_for_test(), "/timesheets/transition", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "submitted");
    assert!(json["submitted_at"].is_string());
    assert!(json["signed_at"].is_null());
}

#[tokio::test]
async fn test_transition_skipping_a_step_returns_409() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "target_status": "locked"
    });

    let (status, json) = post_json(create_router_for_test(), "/timesheets/transition", body).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["code"], "INVALID_TRANSITION");
    assert!(json["message"].as_str().unwrap().contains("'draft' → 'submitted'"));
}

#[tokio::test]
async fn test_transition_from_locked_returns_409() {
    let body = json!({
        "period": compliant_period(),
        "target_status": "draft"
    });

    let (status, json) = post_json(create_router_for_test(), "/timesheets/transition", body).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert!(json["message"].as_str().unwrap().contains("terminal state"));
}

// =============================================================================
// Funder Profiles
// =============================================================================

#[tokio::test]
async fn test_list_funder_profiles() {
    let (status, json) = get_json(create_router_for_test(), "/funder-profiles").await;

    assert_eq!(status, StatusCode::OK);
    let profiles = json.as_array().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0]["id"], "ukri");
}

#[tokio::test]
async fn test_get_funder_profile() {
    let (status, json) = get_json(create_router_for_test(), "/funder-profiles/ukri").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["name"], "UK Research & Innovation");
    assert_eq!(decimal_at(&json["fec_rate"]), decimal("0.8"));
    assert_eq!(json["submission_deadline_days"], 10);
    assert_eq!(json["requires_pi_signature"], true);
}

#[tokio::test]
async fn test_get_unknown_funder_profile_returns_404() {
    let (status, json) = get_json(create_router_for_test(), "/funder-profiles/wellcome").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "FUNDER_PROFILE_NOT_FOUND");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_missing_field_returns_validation_error() {
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "grant": grant("ukri")
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_invalid_json_returns_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/calculate/salary-cost")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"period\": "))
        .unwrap();

    let (status, json) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_wrong_type_returns_malformed_json() {
    let mut researcher = full_time_researcher();
    researcher["annual_salary"] = json!(["52000"]);
    let body = json!({
        "period": period("researcher-001", 2025, 10, "14"),
        "researcher": researcher,
        "grant": grant("ukri")
    });

    let (status, json) = post_json(create_router_for_test(), "/calculate/salary-cost", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "MALFORMED_JSON");
}
