//! End-to-end tests for the report engine HTTP API.
//!
//! This suite drives the router the way clients do:
//! - Task sheet aggregation (totals, serials, annotations, bad rows)
//! - Payroll derivation for both shipped sheet templates
//! - Time-based reports from tracker CSV exports
//! - CSV, XLSX and PDF output
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

use report_engine::api::{AppState, create_router};
use report_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal fields serialize as strings")).unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let (status, bytes) = send(create_router_for_test(), request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_csv(uri: &str, csv: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "text/csv")
        .body(Body::from(csv.to_string()))
        .unwrap();

    let (status, bytes) = send(create_router_for_test(), request).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn display_column(envelope: &Value, column: usize) -> Vec<String> {
    envelope["table"]["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["cells"][column].as_str().unwrap().to_string())
        .collect()
}

/// Monthly layout: header on row 0, two filler rows, employees from row 3.
fn monthly_sheet(employees: Vec<Value>) -> Value {
    let mut rows = vec![
        json!([
            "NAME", "1", "2", "3", "4", "Gross", "Dedection PF", "Total CL", "Balance SL",
            "Total Month Days"
        ]),
        json!(["", "Mon", "Tue", "Wed", "Thu"]),
        json!([]),
    ];
    rows.extend(employees);
    json!({ "rows": rows })
}

/// Register layout: three title rows, header on row 3, spacer, employees from row 5.
fn register_sheet(employees: Vec<Value>) -> Value {
    let mut rows = vec![
        json!(["Attendance Register"]),
        json!(["October 2024"]),
        json!([]),
        json!([
            "Employee Name", "1", "2", "3", "4", "Gross Salary", "Dedection", "Balance CL",
            "Balance SL", "Total Working Days"
        ]),
        json!([]),
    ];
    rows.extend(employees);
    json!({ "rows": rows })
}

// =============================================================================
// Task Sheet Aggregation
// =============================================================================

#[tokio::test]
async fn test_task_sheet_reference_example() {
    let (status, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [1, "Login", "J-1", "2:30"],
                [2, null, null, "Done"],
                [1, "Signup", "J-2", "0:45"],
                [0, "Bob"],
                [1, "API", null, "1:00"]
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 7);

    assert_eq!(records[0]["kind"], "summary");
    assert_eq!(records[0]["serial"], 1);
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[0]["total"], "3h 15m");

    assert_eq!(records[1]["kind"], "task");
    assert_eq!(records[1]["label"], "Login");
    assert_eq!(records[1]["external_id"], "J-1");
    assert_eq!(records[1]["duration"], "2:30");
    assert_eq!(records[1]["status"], "Done");

    assert_eq!(records[2]["label"], "Signup");
    assert_eq!(records[2]["status"], "");

    assert_eq!(records[3]["kind"], "separator");

    assert_eq!(records[4]["serial"], 2);
    assert_eq!(records[4]["name"], "Bob");
    assert_eq!(records[4]["total"], "1h 0m");
    assert!(records[5]["external_id"].is_null());
    assert_eq!(records[6]["kind"], "separator");

    assert!(body["skipped"].as_array().unwrap().is_empty());
    assert!(body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_task_sheet_overflowing_duration_is_a_row_error() {
    let (status, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [1, "a", null, "9223372036854775807:00"],
                [1, "b", null, "1:00"],
                [0, "Bob"],
                [1, "c", null, "0:20"]
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["total"], "9223372036854775807h 0m");
    assert_eq!(body["records"][2]["duration_parsed"], false);
    assert_eq!(body["records"][5]["total"], "0h 20m");
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert_eq!(body["errors"][0]["row_index"], 2);
    assert_eq!(body["errors"][0]["code"], "PARSE_ERROR");
}

#[tokio::test]
async fn test_task_sheet_empty_input() {
    let (status, body) = post_json("/reports/tasks", json!({ "rows": [] })).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["records"].as_array().unwrap().is_empty());
    assert!(body["table"]["rows"].as_array().unwrap().is_empty());
    assert_eq!(body["table"]["headers"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_task_sheet_minutes_carry_only_at_flush() {
    let (_, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [1, "a", null, "0:50"],
                [1, "b", null, "0:50"],
                [1, "c", null, "0:50"]
            ]
        }),
    )
    .await;

    assert_eq!(body["records"][0]["total"], "2h 30m");
}

#[tokio::test]
async fn test_task_sheet_annotation_before_any_task_is_skipped() {
    let (_, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [2, "Done"],
                [1, "a", null, "1:00"]
            ]
        }),
    )
    .await;

    assert_eq!(body["records"][1]["status"], "");
    let skipped = body["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0]["row_index"], 1);
    assert_eq!(skipped[0]["reason"], "annotation_without_task");
}

#[tokio::test]
async fn test_task_sheet_unrecognized_levels_are_ignored() {
    let (_, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                ["Level", "Name"],
                [0, "Alice"],
                [3, "nested", null, "9:00"],
                [1, "a", null, "1:00"]
            ]
        }),
    )
    .await;

    assert_eq!(body["records"][0]["total"], "1h 0m");
    let reasons: Vec<&str> = body["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["reason"].as_str().unwrap())
        .collect();
    assert_eq!(reasons, vec!["unrecognized_level", "unrecognized_level"]);
}

#[tokio::test]
async fn test_task_sheet_malformed_duration_is_reported() {
    let (status, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [1, "a", null, "1:00"],
                [1, "b", null, "soon"],
                [1, "c"]
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["total"], "1h 0m");
    // Failed items keep their raw duration text.
    assert_eq!(body["records"][2]["duration"], "soon");
    assert_eq!(body["records"][2]["duration_parsed"], false);

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["row_index"], 2);
    assert_eq!(errors[0]["code"], "PARSE_ERROR");
    assert_eq!(errors[1]["row_index"], 3);
}

#[tokio::test]
async fn test_task_sheet_blank_subject_closes_group() {
    let (_, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [1, "a", null, "1:00"],
                [0, ""],
                [1, "orphan", null, "5:00"],
                [0, "Bob"]
            ]
        }),
    )
    .await;

    let summaries: Vec<(&str, &str)> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["kind"] == "summary")
        .map(|r| (r["name"].as_str().unwrap(), r["total"].as_str().unwrap()))
        .collect();
    assert_eq!(summaries, vec![("Alice", "1h 0m"), ("Bob", "0h 0m")]);

    let reasons: Vec<&str> = body["skipped"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["reason"].as_str().unwrap())
        .collect();
    assert_eq!(reasons, vec!["empty_subject_name", "no_open_subject"]);
}

#[tokio::test]
async fn test_task_sheet_repeated_subject_gets_new_serial() {
    let (_, body) = post_json(
        "/reports/tasks",
        json!({
            "rows": [
                [0, "Alice"],
                [0, "Alice"],
                [0, "Bob"]
            ]
        }),
    )
    .await;

    let serials: Vec<u64> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|r| r["kind"] == "summary")
        .map(|r| r["serial"].as_u64().unwrap())
        .collect();
    assert_eq!(serials, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_task_sheet_table_emphasizes_summaries() {
    let (_, body) = post_json(
        "/reports/tasks",
        json!({ "rows": [[0, "Alice"], [1, "a", "J-9", "1:00"]] }),
    )
    .await;

    let rows = body["table"]["rows"].as_array().unwrap();
    assert_eq!(rows[0]["emphasized"], true);
    assert_eq!(rows[1]["emphasized"], false);
    assert_eq!(display_column(&body, 3), vec!["", "J-9", ""]);
}

// =============================================================================
// Payroll
// =============================================================================

#[tokio::test]
async fn test_payroll_reference_example() {
    // 20 present + 2 CL over 22 working days, CL balance 1.
    let mut codes = vec!["P"; 20];
    codes.extend(["CL", "CL"]);
    let mut header = vec![json!("NAME")];
    header.extend((1..=22).map(|d| json!(d.to_string())));
    header.extend([
        json!("Gross"),
        json!("Dedection PF"),
        json!("Total CL"),
        json!("Balance SL"),
        json!("Total Month Days"),
    ]);
    let mut employee = vec![json!("Alice")];
    employee.extend(codes.iter().map(|c| json!(c)));
    employee.extend([json!(31000), json!(500), json!(1), json!(1), json!(22)]);

    let (status, body) = post_json(
        "/reports/payroll",
        json!({
            "template": "monthly",
            "rows": [header, [], [], employee]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], "monthly");

    let result = &body["records"][0];
    assert_eq!(result["serial"], 1);
    assert_eq!(result["counts"]["present"], 20);
    assert_eq!(result["counts"]["casual_raw"], 2);
    assert_eq!(decimal(&result["adjusted_casual"]), Decimal::from(2));
    assert_eq!(decimal(&result["excess_casual"]), Decimal::from(1));
    assert_eq!(
        decimal(&result["daily_rate"]).round_dp(2),
        Decimal::from_str("1409.09").unwrap()
    );
    assert_eq!(decimal(&result["casual_deduction"]), Decimal::from(1409));
    assert_eq!(decimal(&result["net_salary"]), Decimal::from(29091));
    assert_eq!(result["audit_trace"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_payroll_monthly_half_day_remainder_counts_as_leave() {
    let (_, body) = post_json(
        "/reports/payroll",
        monthly_sheet(vec![json!(["Alice", "P", "HD", "HD", "HD", 4000, 0, 0, 1, 4])]),
    )
    .await;

    let result = &body["records"][0];
    assert_eq!(result["half_day_policy"], "as_leave_unit");
    assert_eq!(decimal(&result["adjusted_casual"]), Decimal::from_str("1.5").unwrap());
    assert_eq!(decimal(&result["casual_deduction"]), Decimal::from(1500));
    assert_eq!(decimal(&result["half_day_deduction"]), Decimal::ZERO);
    assert_eq!(decimal(&result["net_salary"]), Decimal::from(2500));
}

#[tokio::test]
async fn test_payroll_register_half_day_remainder_is_deducted() {
    let (status, body) = post_json(
        "/reports/payroll",
        {
            let mut sheet = register_sheet(vec![json!([
                "Bob", "P", "HD", "HD", "HD", 4000, 100, 0, 1, 4
            ])]);
            sheet["template"] = json!("register");
            sheet
        },
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let result = &body["records"][0];
    assert_eq!(result["row_index"], 5);
    assert_eq!(result["name"], "Bob");
    assert_eq!(result["half_day_policy"], "as_deduction");
    assert_eq!(decimal(&result["adjusted_casual"]), Decimal::from(1));
    assert_eq!(decimal(&result["casual_deduction"]), Decimal::from(1000));
    assert_eq!(decimal(&result["half_day_deduction"]), Decimal::from(500));
    assert_eq!(decimal(&result["net_salary"]), Decimal::from(2400));
}

#[tokio::test]
async fn test_payroll_policy_override() {
    let mut sheet = monthly_sheet(vec![json!(["Alice", "P", "HD", "P", "P", 4000, 0, 0, 1, 4])]);
    sheet["half_day_policy"] = json!("as_deduction");

    let (_, body) = post_json("/reports/payroll", sheet).await;

    let result = &body["records"][0];
    assert_eq!(result["half_day_policy"], "as_deduction");
    assert_eq!(decimal(&result["half_day_deduction"]), Decimal::from(500));
    assert_eq!(decimal(&result["net_salary"]), Decimal::from(3500));
}

#[tokio::test]
async fn test_payroll_extra_days_are_credited() {
    let (_, body) = post_json(
        "/reports/payroll",
        monthly_sheet(vec![json!(["Alice", "P", "P", "WFH", "P", 3000, 0, 1, 1, 3])]),
    )
    .await;

    let result = &body["records"][0];
    assert_eq!(decimal(&result["extra_days"]), Decimal::from(1));
    assert_eq!(decimal(&result["bonus"]), Decimal::from(1000));
    assert_eq!(decimal(&result["net_salary"]), Decimal::from(4000));
}

#[tokio::test]
async fn test_payroll_drops_inactive_rows_and_renumbers() {
    let (_, body) = post_json(
        "/reports/payroll",
        monthly_sheet(vec![
            json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
            json!(["Idle", null, null, null, null, 4000, 0, 1, 1, 4]),
            json!(["Carol", "SL", "SL", "P", "P", 4000, 0, 1, 1, 4]),
        ]),
    )
    .await;

    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["serial"], 1);
    assert_eq!(records[1]["serial"], 2);
    assert_eq!(records[1]["name"], "Carol");
    assert_eq!(records[1]["row_index"], 5);
    assert_eq!(decimal(&records[1]["sick_deduction"]), Decimal::from(1000));
    assert_eq!(body["inactive_dropped"], 1);
}

#[tokio::test]
async fn test_payroll_row_errors_do_not_abort_the_run() {
    let (status, body) = post_json(
        "/reports/payroll",
        monthly_sheet(vec![
            json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, null, 4]),
            json!(["Bob", "P", "P", "P", "P", 4000, 0, 1, 1, 0]),
            json!(["Carol", "P", "P", "P", "P", "n/a", 0, 1, 1, 4]),
            json!(["Dan", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Dan");
    assert_eq!(records[0]["serial"], 1);

    let codes: Vec<(u64, &str)> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| (e["row_index"].as_u64().unwrap(), e["code"].as_str().unwrap()))
        .collect();
    assert_eq!(
        codes,
        vec![
            (3, "MISSING_FIELD"),
            (4, "DIVISION_POLICY"),
            (5, "INVALID_FIELD"),
        ]
    );
}

#[tokio::test]
async fn test_payroll_table_blanks_repeated_names() {
    let (_, body) = post_json(
        "/reports/payroll",
        monthly_sheet(vec![
            json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
            json!(["Alice", "P", "CL", "P", "P", 4000, 0, 1, 1, 4]),
            json!(["Bob", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
        ]),
    )
    .await;

    assert_eq!(display_column(&body, 1), vec!["Alice", "", "Bob"]);
    assert_eq!(body["records"][1]["name"], "Alice");
}

#[tokio::test]
async fn test_payroll_unknown_template_returns_400() {
    let (status, body) = post_json(
        "/reports/payroll",
        json!({ "rows": [], "template": "weekly" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "TEMPLATE_NOT_FOUND");
}

#[tokio::test]
async fn test_payroll_invalid_policy_returns_400() {
    let (status, body) = post_json(
        "/reports/payroll",
        json!({ "rows": [], "half_day_policy": "ignore" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

// =============================================================================
// Time-Based Report
// =============================================================================

#[tokio::test]
async fn test_time_report_converts_seconds() {
    let (status, body) = post_csv(
        "/reports/time",
        "Assignee,Project name,Summary,Status,Due date,Σ Original Estimate,Σ Time Spent\n\
         Alice,Core,Fix login,Done,2024-10-01,28800,9000\n\
         Bob,Web,Landing page,In Progress,,,\n",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["original_estimate"], "8h 0m");
    assert_eq!(records[0]["time_spent"], "2h 30m");
    assert_eq!(records[1]["original_estimate"], "");
    assert_eq!(records[1]["time_spent"], "");
    assert_eq!(
        body["table"]["headers"],
        json!([
            "Assignee",
            "Project",
            "Summary",
            "Status",
            "Due Date",
            "Original Estimated",
            "Time Spent"
        ])
    );
}

#[tokio::test]
async fn test_time_report_bad_seconds_fail_only_that_row() {
    let (status, body) = post_csv(
        "/reports/time",
        "assignee,time spent\nAlice,lots\nBob,60\n",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"].as_array().unwrap().len(), 1);
    assert_eq!(body["records"][0]["assignee"], "Bob");
    assert_eq!(body["errors"][0]["row_index"], 0);
    assert_eq!(body["errors"][0]["code"], "PARSE_ERROR");
}

// =============================================================================
// Output Formats
// =============================================================================

#[tokio::test]
async fn test_payroll_as_csv_matches_table() {
    let request = Request::builder()
        .method("POST")
        .uri("/reports/payroll?format=csv")
        .header("Content-Type", "application/json")
        .body(Body::from(
            monthly_sheet(vec![
                json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
                json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
            ])
            .to_string(),
        ))
        .unwrap();

    let (status, bytes) = send(create_router_for_test(), request).await;

    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(bytes).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("S.No,Name,Days Present,Half Days"));
    assert!(lines[1].starts_with("1,Alice,4,0,0,0,0,0,4000,0,0,0,0,0,0,4000"));
    assert!(lines[2].starts_with("2,,4,"));
}

#[tokio::test]
async fn test_payroll_overflow_is_a_row_error() {
    let (status, body) = post_json(
        "/reports/payroll",
        monthly_sheet(vec![
            json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, 1, 4]),
            json!(["Huge", "P", "P", "P", "P", "79228162514264337593543950335", 0, 1, 1, 1]),
            json!(["Bob", "P", "P", "P", "CL", 4000, 0, 1, 1, 4]),
        ]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["name"], "Alice");
    assert_eq!(records[1]["name"], "Bob");
    assert_eq!(records[1]["serial"], 2);
    assert_eq!(body["errors"][0]["row_index"], 4);
    assert_eq!(body["errors"][0]["code"], "OVERFLOW");
}

#[tokio::test]
async fn test_payroll_as_pdf() {
    let request = Request::builder()
        .method("POST")
        .uri("/reports/payroll?format=pdf")
        .header("Content-Type", "application/json")
        .body(Body::from(
            monthly_sheet(vec![json!(["Alice", "P", "P", "P", "P", 4000, 0, 1, 1, 4])])
                .to_string(),
        ))
        .unwrap();

    let router = create_router_for_test();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(body.starts_with(b"%PDF-"));
    assert!(body.windows(b"(Net Salary)".len()).any(|w| w == b"(Net Salary)"));
}

#[tokio::test]
async fn test_time_report_as_xlsx() {
    let request = Request::builder()
        .method("POST")
        .uri("/reports/time?format=xlsx")
        .header("Content-Type", "text/csv")
        .body(Body::from("Assignee,Time Spent\nAlice,3600\n"))
        .unwrap();

    let router = create_router_for_test();
    let response = router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..2], b"PK");
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/reports/tasks")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"rows\": [[0, \"Alice\"]"))
        .unwrap();

    let (status, bytes) = send(create_router_for_test(), request).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_content_type_returns_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/reports/tasks")
        .body(Body::from("{\"rows\": []}"))
        .unwrap();

    let (status, bytes) = send(create_router_for_test(), request).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "MISSING_CONTENT_TYPE");
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let request = Request::builder()
        .method("POST")
        .uri("/reports/unknown")
        .body(Body::empty())
        .unwrap();

    let (status, _) = send(create_router_for_test(), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
