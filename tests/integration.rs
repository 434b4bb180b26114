//! Integration tests for the ESI contribution engine API.
//!
//! This test suite drives the router end to end over the sample payroll
//! data in `./data/sample`:
//! - Session and permission checks on every endpoint
//! - Dashboard summary and recent transactions
//! - Contribution listing and its filters
//! - Report generation in both export formats
//! - Settings view and update with anti-forgery tokens
//! - Period liability and challan data
//! - Ad-hoc wage calculation

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Local;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use esi_engine::api::{AppState, SessionRegistry, create_router};
use esi_engine::config::{DataLoader, InMemorySettingsStore};
use esi_engine::store::InMemoryPayrollStore;

// =============================================================================
// Test Helpers
// =============================================================================

const ADMIN: &str = "sess-admin";
const CLERK: &str = "sess-clerk";
const EXPIRED: &str = "sess-expired";

fn create_test_state() -> AppState {
    let loader = DataLoader::load("./data/sample").expect("Failed to load sample data");
    let (data, sessions) = loader.into_parts();
    AppState::new(
        Arc::new(InMemoryPayrollStore::new(data)),
        Arc::new(InMemorySettingsStore::default()),
        SessionRegistry::new(sessions),
    )
}

fn create_router_for_test() -> Router {
    create_router(create_test_state())
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a decimal serialized as a JSON string or number.
fn decimal_at(json: &Value, pointer: &str) -> Decimal {
    match json.pointer(pointer) {
        Some(Value::String(s)) => decimal(s),
        Some(Value::Number(n)) => decimal(&n.to_string()),
        other => panic!("Expected a decimal at {}, got {:?}", pointer, other),
    }
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

/// A response with its body collected.
struct TestResponse {
    status: StatusCode,
    content_type: Option<String>,
    disposition: Option<String>,
    body: String,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    };
    let content_type = header_value(header::CONTENT_TYPE);
    let disposition = header_value(header::CONTENT_DISPOSITION);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        content_type,
        disposition,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

async fn get(router: &Router, uri: &str, session: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, format!("session_id={}", session));
    }
    send(router, builder.body(Body::empty()).unwrap()).await
}

async fn post_form(router: &Router, uri: &str, session: Option<&str>, form: &str) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, format!("session_id={}", session));
    }
    send(router, builder.body(Body::from(form.to_string())).unwrap()).await
}

async fn post_json(router: &Router, uri: &str, session: Option<&str>, body: Value) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, format!("session_id={}", session));
    }
    send(router, builder.body(Body::from(body.to_string())).unwrap()).await
}

fn emp_codes(listing: &Value) -> Vec<String> {
    listing["contributions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["emp_code"].as_str().unwrap().to_string())
        .collect()
}

// =============================================================================
// Authorization
// =============================================================================

#[tokio::test]
async fn test_every_endpoint_requires_a_session() {
    let router = create_router_for_test();

    for uri in [
        "/esi",
        "/esi/contributions",
        "/esi/reports",
        "/esi/settings",
        "/esi/liability/2",
        "/esi/challan/2",
    ] {
        let response = get(&router, uri, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "GET {}", uri);
        assert_eq!(response.json()["code"], "UNAUTHENTICATED");
    }

    let response = post_form(&router, "/esi/reports", None, "format=csv").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = post_form(&router, "/esi/settings", None, "csrf_token=x").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let response = post_json(
        &router,
        "/esi/calculate",
        None,
        serde_json::json!({"gross_wage": 1000}),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_session_is_rejected() {
    let router = create_router_for_test();
    let response = get(&router, "/esi/settings", Some(EXPIRED)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_payroll_only_session_cannot_use_reports_or_settings() {
    let router = create_router_for_test();

    for uri in ["/esi/reports", "/esi/settings"] {
        let response = get(&router, uri, Some(CLERK)).await;
        assert_eq!(response.status, StatusCode::FORBIDDEN, "GET {}", uri);
        assert_eq!(response.json()["code"], "PERMISSION_DENIED");
    }

    let response = post_form(&router, "/esi/reports", Some(CLERK), "").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = get(&router, "/esi/contributions", Some(CLERK)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_authorization_is_checked_before_body_parsing() {
    let router = create_router_for_test();
    let response = send(
        &router,
        Request::builder()
            .method("POST")
            .uri("/esi/calculate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn test_dashboard_lists_recent_transactions_newest_first() {
    let router = create_router_for_test();
    let response = get(&router, "/esi", Some(CLERK)).await;

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    let recent = json["recent_transactions"].as_array().unwrap();
    assert_eq!(recent.len(), 6);
    assert_eq!(recent[0]["emp_code"], "EMP003");
    assert_eq!(decimal_at(&json, "/recent_transactions/0/esi_amount"), decimal("90"));
    assert_eq!(json["esi_summary"]["financial_year"], json["current_fy"]);
}

// =============================================================================
// Contribution Listing
// =============================================================================

#[tokio::test]
async fn test_listing_without_filters_returns_active_employees_in_code_order() {
    let router = create_router_for_test();
    let response = get(&router, "/esi/contributions", Some(CLERK)).await;

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(
        emp_codes(&json),
        vec!["EMP001", "EMP001", "EMP002", "EMP002", "EMP003"]
    );
    assert_eq!(json["periods"].as_array().unwrap().len(), 4);
    assert_eq!(json["periods"][0]["period_name"], "May 2024");
    assert_eq!(json["departments"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_listing_row_breakdown() {
    let router = create_router_for_test();
    let json = get(&router, "/esi/contributions?period_id=2", Some(CLERK))
        .await
        .json();

    assert_eq!(emp_codes(&json), vec!["EMP001", "EMP002"]);
    assert_eq!(decimal_at(&json, "/contributions/0/esi_wages"), decimal("15000"));
    assert_eq!(decimal_at(&json, "/contributions/0/employee_esi"), decimal("112.50"));
    assert_eq!(decimal_at(&json, "/contributions/0/employer_esi"), decimal("487.125"));
    assert_eq!(decimal_at(&json, "/contributions/0/total_esi"), decimal("599.625"));
}

#[tokio::test]
async fn test_listing_filters_intersect() {
    let router = create_router_for_test();
    let json = get(
        &router,
        "/esi/contributions?period_id=3&department_id=1",
        Some(CLERK),
    )
    .await
    .json();
    assert_eq!(emp_codes(&json), vec!["EMP001", "EMP003"]);
    assert_eq!(json["filter"]["period_id"], "3");
}

#[tokio::test]
async fn test_listing_accepts_legacy_parameter_names_and_empty_values() {
    let router = create_router_for_test();

    let legacy = get(&router, "/esi/contributions?period=3&department=2", Some(CLERK))
        .await
        .json();
    assert_eq!(emp_codes(&legacy), vec!["EMP002"]);

    let empty = get(
        &router,
        "/esi/contributions?period_id=&department_id=",
        Some(CLERK),
    )
    .await
    .json();
    assert_eq!(emp_codes(&empty).len(), 5);
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_report_form_offers_periods_years_and_token() {
    let router = create_router_for_test();
    let response = get(&router, "/esi/reports", Some(ADMIN)).await;

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["periods"].as_array().unwrap().len(), 4);
    assert_eq!(
        json["financial_years"],
        serde_json::json!(["2024-2025", "2023-2024"])
    );
    assert!(!json["csrf_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_default_report_is_contribution_summary_as_excel() {
    let router = create_router_for_test();
    let response = post_form(&router, "/esi/reports", Some(ADMIN), "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.content_type.as_deref(),
        Some("application/vnd.ms-excel")
    );
    assert_eq!(
        response.disposition,
        Some(format!(
            "attachment; filename=\"esi_contribution_summary_{}.xlsx\"",
            today()
        ))
    );
    assert!(response.body.starts_with("<table border='1'><tr><th colspan='5'><h2>ESI Report</h2></th></tr>"));
    assert!(response.body.contains("<th>Department Name</th><th>Employee Count</th>"));
    assert!(response.body.contains("<td>Engineering</td><td>2</td>"));
    assert!(response.body.ends_with("</table>"));
}

#[tokio::test]
async fn test_employee_wise_report_as_csv() {
    let router = create_router_for_test();
    let response = post_form(
        &router,
        "/esi/reports",
        Some(ADMIN),
        "report_type=employee_wise&period_id=3&format=csv",
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("text/csv"));
    assert_eq!(
        response.disposition,
        Some(format!(
            "attachment; filename=\"esi_employee_wise_{}.csv\"",
            today()
        ))
    );

    let lines: Vec<&str> = response.body.lines().collect();
    assert_eq!(
        lines[0],
        "emp_code,first_name,last_name,esi_number,department_name,period_name,start_date,end_date,esi_wages,employee_esi,employer_esi,total_esi"
    );
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("EMP001,Asha,Rao,"));
    assert!(lines[3].starts_with("EMP003,Meera,Iyer,"));
    assert!(response.body.ends_with('\n'));
}

#[tokio::test]
async fn test_monthly_summary_is_named_after_financial_year() {
    let router = create_router_for_test();
    let response = post_form(
        &router,
        "/esi/reports",
        Some(ADMIN),
        "report_type=monthly_summary&financial_year=2024-2025&format=excel",
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.disposition.as_deref(),
        Some("attachment; filename=\"esi_monthly_summary_2024-2025.xlsx\"")
    );
    assert!(response.body.contains("<td>April 2024</td>"));
    assert!(!response.body.contains("March 2024"));
}

#[tokio::test]
async fn test_empty_report_exports() {
    let router = create_router_for_test();

    let csv = post_form(
        &router,
        "/esi/reports",
        Some(ADMIN),
        "report_type=monthly_summary&financial_year=1999-2000&format=csv",
    )
    .await;
    assert_eq!(
        csv.body,
        "period_name,start_date,end_date,employee_count,employee_contribution,employer_contribution,total_contribution\n"
    );

    let html = post_form(
        &router,
        "/esi/reports",
        Some(ADMIN),
        "report_type=monthly_summary&financial_year=1999-2000",
    )
    .await;
    assert_eq!(
        html.body,
        "<table border='1'><tr><th colspan='7'><h2>ESI Report</h2></th></tr></table>"
    );
}

#[tokio::test]
async fn test_unknown_report_type_is_rejected() {
    let router = create_router_for_test();
    let response = post_form(
        &router,
        "/esi/reports",
        Some(ADMIN),
        "report_type=quarterly",
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "INVALID_REPORT_TYPE");
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn test_settings_view_returns_defaults_and_token() {
    let router = create_router_for_test();
    let json = get(&router, "/esi/settings", Some(ADMIN)).await.json();

    let settings = &json["esi_settings"];
    assert_eq!(settings["employee_esi_rate"], serde_json::json!(0.75));
    assert_eq!(settings["employer_esi_rate"], serde_json::json!(3.25));
    assert_eq!(settings["esi_threshold"], serde_json::json!(21000.0));
    assert_eq!(settings["esi_ceiling"], serde_json::json!(25000.0));
    assert_eq!(settings["medical_benefit_rate"], serde_json::json!(4.0));
    assert!(!json["csrf_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_settings_update_with_wrong_token_changes_nothing() {
    let router = create_router_for_test();
    get(&router, "/esi/settings", Some(ADMIN)).await;

    let response = post_form(
        &router,
        "/esi/settings",
        Some(ADMIN),
        "csrf_token=forged&employee_esi_rate=9",
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Invalid token");

    let json = get(&router, "/esi/settings", Some(ADMIN)).await.json();
    assert_eq!(json["esi_settings"]["employee_esi_rate"], serde_json::json!(0.75));
}

#[tokio::test]
async fn test_settings_update_replaces_all_fields() {
    let router = create_router_for_test();
    let token = get(&router, "/esi/settings", Some(ADMIN)).await.json()["csrf_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = post_form(
        &router,
        "/esi/settings",
        Some(ADMIN),
        &format!(
            "csrf_token={}&employee_esi_rate=1&employer_esi_rate=4&esi_threshold=50000&esi_ceiling=abc",
            token
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "ESI settings updated successfully");

    let settings = get(&router, "/esi/settings", Some(ADMIN)).await.json()["esi_settings"].clone();
    assert_eq!(settings["employee_esi_rate"], serde_json::json!(1.0));
    assert_eq!(settings["esi_threshold"], serde_json::json!(50000.0));
    assert_eq!(settings["esi_ceiling"], serde_json::json!(0.0));
    assert_eq!(settings["medical_benefit_rate"], serde_json::json!(0.0));

    // The ad-hoc calculator picks up the new rates.
    let result = post_json(
        &router,
        "/esi/calculate",
        Some(CLERK),
        serde_json::json!({"gross_wage": 30000}),
    )
    .await
    .json();
    assert_eq!(result["eligible"], true);
    assert_eq!(decimal_at(&result, "/contribution/total"), decimal("1500"));
}

// =============================================================================
// Liability and Challan
// =============================================================================

#[tokio::test]
async fn test_liability_for_period() {
    let router = create_router_for_test();
    let json = get(&router, "/esi/liability/2", Some(CLERK)).await.json();

    assert_eq!(decimal_at(&json, "/liability/employee_total"), decimal("292.50"));
    assert_eq!(decimal_at(&json, "/liability/employer_total"), decimal("1266.525"));
    assert_eq!(decimal_at(&json, "/liability/grand_total"), decimal("1559.025"));
}

#[tokio::test]
async fn test_liability_for_period_without_deductions_is_zero() {
    let router = create_router_for_test();
    let json = get(&router, "/esi/liability/4", Some(CLERK)).await.json();
    assert_eq!(decimal_at(&json, "/liability/grand_total"), Decimal::ZERO);
}

#[tokio::test]
async fn test_challan_for_march_period() {
    let router = create_router_for_test();
    let response = get(&router, "/esi/challan/2", Some(CLERK)).await;

    assert_eq!(response.status, StatusCode::OK);
    let json = response.json();
    assert_eq!(json["due_date"], "2024-04-21");
    assert_eq!(json["period"]["period_name"], "March 2024");
    assert_eq!(
        json["reference_number"],
        format!("ESI2{}", Local::now().date_naive().format("%Y%m%d"))
    );
    assert_eq!(decimal_at(&json, "/liability/employee_total"), decimal("292.50"));
}

#[tokio::test]
async fn test_challan_for_unknown_period() {
    let router = create_router_for_test();
    let response = get(&router, "/esi/challan/999", Some(CLERK)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["code"], "PERIOD_NOT_FOUND");
}

// =============================================================================
// Calculation
// =============================================================================

#[tokio::test]
async fn test_calculation_at_threshold_is_eligible() {
    let router = create_router_for_test();
    let json = post_json(
        &router,
        "/esi/calculate",
        Some(CLERK),
        serde_json::json!({"gross_wage": "21000"}),
    )
    .await
    .json();

    assert_eq!(json["eligible"], true);
    assert_eq!(decimal_at(&json, "/contribution/employee"), decimal("157.50"));
    assert_eq!(decimal_at(&json, "/contribution/employer"), decimal("682.50"));
    assert_eq!(json["audit_steps"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_calculation_above_threshold_is_not_eligible() {
    let router = create_router_for_test();
    let json = post_json(
        &router,
        "/esi/calculate",
        Some(CLERK),
        serde_json::json!({"gross_wage": "21000.01"}),
    )
    .await
    .json();

    assert_eq!(json["eligible"], false);
    assert!(json["contribution"].is_null());
}

#[tokio::test]
async fn test_calculation_out_of_decimal_range_is_an_error_response() {
    let router = create_router_for_test();
    let token = get(&router, "/esi/settings", Some(ADMIN)).await.json()["csrf_token"]
        .as_str()
        .unwrap()
        .to_string();
    let response = post_form(
        &router,
        "/esi/settings",
        Some(ADMIN),
        &format!(
            "csrf_token={}&employee_esi_rate=0.75&employer_esi_rate=3.25&esi_threshold=30000000000000000000000000000",
            token
        ),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = post_json(
        &router,
        "/esi/calculate",
        Some(CLERK),
        serde_json::json!({"gross_wage": "30000000000000000000000000000"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["code"], "CALCULATION_ERROR");

    // The server keeps answering afterwards.
    let response = post_json(
        &router,
        "/esi/calculate",
        Some(CLERK),
        serde_json::json!({"gross_wage": "10000"}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_calculation_with_missing_wage_is_rejected() {
    let router = create_router_for_test();
    let response = post_json(&router, "/esi/calculate", Some(CLERK), serde_json::json!({})).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "MALFORMED_REQUEST");
}
