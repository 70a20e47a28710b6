//! HTTP request handlers for the report engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{aggregate_task_sheet, flatten, read_time_report, run_payroll};
use crate::error::EngineError;
use crate::export::{ExportFormat, csv_bytes, pdf_bytes, xlsx_bytes};

use super::request::{ExportQuery, PayrollRequest, TaskReportRequest};
use super::response::{ApiError, ApiErrorResponse, ReportEnvelope};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/reports/tasks", post(task_report_handler))
        .route("/reports/payroll", post(payroll_handler))
        .route("/reports/time", post(time_report_handler))
        .with_state(state)
}

/// Handler for POST /reports/tasks.
///
/// Aggregates a level-tagged task sheet into per-subject groups.
async fn task_report_handler(
    query: Result<Query<ExportQuery>, QueryRejection>,
    payload: Result<Json<TaskReportRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing task report request");

    let format = match export_format(correlation_id, query) {
        Ok(format) => format,
        Err(response) => return response,
    };
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let report = aggregate_task_sheet(&request.rows);

    info!(
        correlation_id = %correlation_id,
        rows = request.rows.len(),
        subjects = report.subject_count(),
        skipped = report.skipped.len(),
        errors = report.errors.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Task report aggregated"
    );

    let table = flatten(&report.records);
    let mut envelope = ReportEnvelope::new(report.records, table);
    envelope.skipped = report.skipped;
    envelope.errors = report.errors;

    render(correlation_id, format, envelope, "Task Report", "task_report")
}

/// Handler for POST /reports/payroll.
///
/// Derives payroll figures from an attendance sheet using a configured
/// sheet template.
async fn payroll_handler(
    State(state): State<AppState>,
    query: Result<Query<ExportQuery>, QueryRejection>,
    payload: Result<Json<PayrollRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing payroll request");

    let format = match export_format(correlation_id, query) {
        Ok(format) => format,
        Err(response) => return response,
    };
    let request = match json_body(correlation_id, payload) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let template = match state.config().resolve_template(request.template.as_deref()) {
        Ok(template) => template,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                template = ?request.template,
                "Sheet template not found"
            );
            return error_response(err);
        }
    };

    let start_time = Instant::now();
    let report = run_payroll(&request.rows, template, request.half_day_policy);

    info!(
        correlation_id = %correlation_id,
        template = %template.code,
        rows = request.rows.len(),
        results = report.results.len(),
        inactive_dropped = report.inactive_dropped,
        errors = report.errors.len(),
        duration_us = start_time.elapsed().as_micros(),
        "Payroll derived"
    );

    let table = flatten(&report.results);
    let mut envelope = ReportEnvelope::new(report.results, table);
    envelope.template = Some(template.code.clone());
    envelope.inactive_dropped = Some(report.inactive_dropped);
    envelope.errors = report.errors;

    render(correlation_id, format, envelope, "Employee Attendance", "payroll_report")
}

/// Handler for POST /reports/time.
///
/// Reads an issue-tracker CSV export; the request body is the CSV text.
async fn time_report_handler(
    query: Result<Query<ExportQuery>, QueryRejection>,
    body: Bytes,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, bytes = body.len(), "Processing time report request");

    let format = match export_format(correlation_id, query) {
        Ok(format) => format,
        Err(response) => return response,
    };

    let report = match read_time_report(&body[..]) {
        Ok(report) => report,
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Time report rejected");
            return error_response(err);
        }
    };

    info!(
        correlation_id = %correlation_id,
        entries = report.entries.len(),
        errors = report.errors.len(),
        "Time report read"
    );

    let table = flatten(&report.entries);
    let mut envelope = ReportEnvelope::new(report.entries, table);
    envelope.errors = report.errors;

    render(correlation_id, format, envelope, "Time Report", "time_report")
}

fn export_format(
    correlation_id: Uuid,
    query: Result<Query<ExportQuery>, QueryRejection>,
) -> Result<ExportFormat, Response> {
    match query {
        Ok(Query(query)) => Ok(query.format),
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            Err(bad_request(ApiError::invalid_format(rejection.body_text())))
        }
    }
}

fn json_body<T>(
    correlation_id: Uuid,
    payload: Result<Json<T>, JsonRejection>,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err(bad_request(error))
        }
    }
}

/// Writes the envelope in the requested format.
fn render<R: Serialize>(
    correlation_id: Uuid,
    format: ExportFormat,
    envelope: ReportEnvelope<R>,
    sheet_name: &str,
    file_stem: &str,
) -> Response {
    let bytes = match format {
        ExportFormat::Json => {
            return (
                StatusCode::OK,
                [(header::CONTENT_TYPE, format.content_type())],
                Json(envelope),
            )
                .into_response();
        }
        ExportFormat::Csv => csv_bytes(&envelope.table),
        ExportFormat::Xlsx => xlsx_bytes(&envelope.table, sheet_name),
        ExportFormat::Pdf => Ok(pdf_bytes(&envelope.table, sheet_name)),
    };

    match bytes {
        Ok(bytes) => {
            let disposition = format!(
                "attachment; filename=\"{}.{}\"",
                file_stem,
                format.file_extension()
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, format.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                bytes,
            )
                .into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                format = format.as_str(),
                error = %err,
                "Export failed"
            );
            error_response(err)
        }
    }
}

fn bad_request(error: ApiError) -> Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::{PayrollResult, ReportRecord, TimeReportEntry};
    use axum::{body::Body, http::Request};
    use serde_json::json;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::load("./config/default").expect("Failed to load config");
        AppState::new(config)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Bytes {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
    }

    fn task_sheet() -> serde_json::Value {
        json!({
            "rows": [
                [0, "Alice"],
                [1, "Login page", "CORE-12", "2:30"],
                [2, "Done"],
                [1, "Signup page", "CORE-13", "0:45"],
                [0, "Bob"],
                [1, "Reports", null, "1:00"]
            ]
        })
    }

    #[tokio::test]
    async fn test_task_report_returns_envelope() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports/tasks", task_sheet()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");

        let body = body_bytes(response).await;
        let envelope: ReportEnvelope<ReportRecord> = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            envelope.records[0],
            ReportRecord::Summary {
                serial: 1,
                name: "Alice".to_string(),
                total: "3h 15m".to_string(),
            }
        );
        assert_eq!(envelope.records.len(), 7);
        assert_eq!(envelope.table.rows.len(), 7);
        assert!(envelope.errors.is_empty());
        assert_eq!(envelope.engine_version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_task_report_as_csv() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports/tasks?format=csv", task_sheet()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/csv; charset=utf-8"
        );
        assert!(
            response
                .headers()
                .get("content-disposition")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("task_report.csv")
        );

        let body = body_bytes(response).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("S.No,Resource Name,Tasks,Jira Id,Time Utilized,Status")
        );
        assert_eq!(lines.next(), Some("1,Alice,,,3h 15m,"));
        assert_eq!(lines.next(), Some(",,Login page,CORE-12,2:30,Done"));
    }

    #[tokio::test]
    async fn test_task_report_as_xlsx() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports/tasks?format=xlsx", task_sheet()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_bytes(response).await;
        assert_eq!(&body[..2], b"PK");
    }

    #[tokio::test]
    async fn test_task_report_as_pdf() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports/tasks?format=pdf", task_sheet()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "application/pdf"
        );
        assert!(
            response
                .headers()
                .get("content-disposition")
                .unwrap()
                .to_str()
                .unwrap()
                .contains("task_report.pdf")
        );
        let body = body_bytes(response).await;
        assert!(body.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_unknown_format_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports/tasks?format=xml", task_sheet()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_FORMAT");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reports/tasks")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_rows_returns_validation_error() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json("/reports/payroll", json!({ "template": "monthly" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_unknown_template_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_json(
                "/reports/payroll",
                json!({ "rows": [], "template": "weekly" }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_bytes(response).await;
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "TEMPLATE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_payroll_with_default_template() {
        let router = create_router(create_test_state());

        // Monthly layout: header on row 0, data from row 3.
        let body = json!({
            "rows": [
                ["NAME", "1", "2", "3", "Gross", "Dedection PF", "Total CL", "Balance SL", "Total Month Days"],
                [],
                [],
                ["Alice", "P", "CL", "CL", 3000, 0, 1, 1, 3]
            ]
        });

        let response = router
            .oneshot(post_json("/reports/payroll", body))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_bytes(response).await;
        let envelope: ReportEnvelope<PayrollResult> = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope.template.as_deref(), Some("monthly"));
        assert_eq!(envelope.records.len(), 1);
        assert_eq!(envelope.records[0].name, "Alice");
        assert_eq!(envelope.records[0].row_index, 3);
        assert_eq!(envelope.table.rows[0].cells[15], "2000");
    }

    #[tokio::test]
    async fn test_time_report_from_csv_body() {
        let router = create_router(create_test_state());
        let csv = "Assignee,Project name,Summary,Status,Due date,Original Estimate,Time Spent\n\
                   Alice,Core,Fix login,Done,2024-10-01,7200,5400\n";

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/reports/time")
                    .header("Content-Type", "text/csv")
                    .body(Body::from(csv))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_bytes(response).await;
        let envelope: ReportEnvelope<TimeReportEntry> = serde_json::from_slice(&body).unwrap();

        assert_eq!(envelope.records.len(), 1);
        assert_eq!(envelope.records[0].time_spent, "1h 30m");
        assert_eq!(envelope.table.headers[5], "Original Estimated");
    }
}
