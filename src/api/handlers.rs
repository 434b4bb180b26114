//! HTTP request handlers for the ESI API.
//!
//! Every handler authorizes the session before touching any data. Failures
//! are logged against a per-request correlation id and returned as
//! [`ApiError`] bodies.

use std::time::Instant;

use axum::{
    Form, Json, Router,
    extract::{
        Path, Query, State,
        rejection::{FormRejection, JsonRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{Local, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    DEFAULT_RECENT_LIMIT, REPORT_FORM_PERIOD_LIMIT, ReportType, active_departments, assess_wage,
    build_report, calculate_liability, challan_data, financial_year_for, financial_years,
    latest_periods, list_contributions, recent_transactions, summarize,
};
use crate::config::{ContributionSettings, Permission, SessionGrant};
use crate::error::EngineError;
use crate::models::{CalculationResult, ChallanData};
use crate::report::{ExportFormat, export_filename, export_report};

use super::auth::session_id_from;
use super::request::{CalculateRequest, ContributionQuery, ReportRequest, SettingsUpdateRequest};
use super::response::{
    ApiError, ApiErrorResponse, ContributionListView, DashboardView, LiabilityView,
    ReportFormView, SettingsView, SuccessMessage,
};
use super::state::AppState;

type ApiResult<T> = Result<T, ApiErrorResponse>;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/esi", get(dashboard_handler))
        .route("/esi/contributions", get(contributions_handler))
        .route(
            "/esi/reports",
            get(report_form_handler).post(generate_report_handler),
        )
        .route(
            "/esi/settings",
            get(settings_view_handler).post(update_settings_handler),
        )
        .route("/esi/liability/:period_id", get(liability_handler))
        .route("/esi/challan/:period_id", get(challan_handler))
        .route("/esi/calculate", post(calculate_handler))
        .with_state(state)
}

/// An authorized request: the session id and the grant it resolved to.
struct Authorized {
    session_id: String,
    grant: SessionGrant,
}

fn authorize(
    state: &AppState,
    jar: &CookieJar,
    headers: &HeaderMap,
    permission: Permission,
    correlation_id: Uuid,
) -> ApiResult<Authorized> {
    let session_id = session_id_from(jar, headers);
    match state
        .sessions()
        .authorize(session_id.as_deref(), permission, Utc::now())
    {
        Ok(grant) => Ok(Authorized {
            session_id: grant.session_id.clone(),
            grant,
        }),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                permission = permission.as_str(),
                error = %err,
                "Request not authorized"
            );
            Err(err.into())
        }
    }
}

/// Logs a failed operation and converts it to a response.
fn failed(correlation_id: Uuid, operation: &str, err: EngineError) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        operation,
        error = %err,
        "Request failed"
    );
    err.into()
}

fn rejected_body(correlation_id: Uuid, body_text: String) -> ApiErrorResponse {
    warn!(
        correlation_id = %correlation_id,
        error = %body_text,
        "Malformed request body"
    );
    ApiErrorResponse {
        status: StatusCode::BAD_REQUEST,
        error: ApiError::malformed_body(body_text),
    }
}

/// Handler for GET /esi.
///
/// Summarizes the current financial year and lists the latest deductions.
async fn dashboard_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> ApiResult<Json<DashboardView>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing ESI dashboard request");
    authorize(&state, &jar, &headers, Permission::Payroll, correlation_id)?;

    let current_fy = financial_year_for(Local::now().date_naive());
    let esi_summary = summarize(state.store(), &current_fy)
        .map_err(|e| failed(correlation_id, "summary", e))?;
    let recent = recent_transactions(state.store(), DEFAULT_RECENT_LIMIT)
        .map_err(|e| failed(correlation_id, "recent_transactions", e))?;

    Ok(Json(DashboardView {
        current_fy,
        esi_summary,
        recent_transactions: recent,
    }))
}

/// Handler for GET /esi/contributions.
async fn contributions_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Query(query): Query<ContributionQuery>,
) -> ApiResult<Json<ContributionListView>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing contribution listing request");
    authorize(&state, &jar, &headers, Permission::Payroll, correlation_id)?;

    let filter = query.into();
    let contributions = list_contributions(state.store(), &filter)
        .map_err(|e| failed(correlation_id, "list_contributions", e))?;
    let periods = latest_periods(state.store(), REPORT_FORM_PERIOD_LIMIT)
        .map_err(|e| failed(correlation_id, "latest_periods", e))?;
    let departments = active_departments(state.store())
        .map_err(|e| failed(correlation_id, "active_departments", e))?;

    info!(
        correlation_id = %correlation_id,
        period_id = ?filter.period_id,
        department_id = ?filter.department_id,
        rows = contributions.len(),
        "Contribution listing completed"
    );

    Ok(Json(ContributionListView {
        contributions,
        periods,
        departments,
        filter,
    }))
}

/// Handler for GET /esi/reports.
async fn report_form_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> ApiResult<Json<ReportFormView>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report form request");
    let auth = authorize(&state, &jar, &headers, Permission::Reports, correlation_id)?;

    let periods = latest_periods(state.store(), REPORT_FORM_PERIOD_LIMIT)
        .map_err(|e| failed(correlation_id, "latest_periods", e))?;
    let financial_years =
        financial_years(state.store()).map_err(|e| failed(correlation_id, "financial_years", e))?;
    let csrf_token = state
        .sessions()
        .issue_csrf_token(&auth.session_id)
        .map_err(|e| failed(correlation_id, "issue_csrf_token", e))?;

    Ok(Json(ReportFormView {
        periods,
        financial_years,
        csrf_token,
    }))
}

/// Handler for POST /esi/reports.
///
/// Renders the selected report as a downloadable attachment.
async fn generate_report_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    payload: Result<Form<ReportRequest>, FormRejection>,
) -> ApiResult<Response> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report generation request");
    authorize(&state, &jar, &headers, Permission::Reports, correlation_id)?;

    let Form(request) = payload.map_err(|r| rejected_body(correlation_id, r.body_text()))?;

    let report_type: ReportType = match request.report_type.as_deref() {
        Some(raw) => raw
            .parse()
            .map_err(|e| failed(correlation_id, "parse_report_type", e))?,
        None => ReportType::default(),
    };
    let format = request
        .format
        .as_deref()
        .map(ExportFormat::from_request)
        .unwrap_or_default();

    let start_time = Instant::now();
    let table = build_report(state.store(), report_type, &request.scope())
        .map_err(|e| failed(correlation_id, "build_report", e))?;
    let base_name = export_filename(
        report_type,
        request.financial_year.as_deref(),
        Local::now().date_naive(),
    );
    let document = export_report(&table, format, &base_name);

    info!(
        correlation_id = %correlation_id,
        report_type = %report_type,
        rows = table.rows().len(),
        filename = %document.filename,
        duration_us = start_time.elapsed().as_micros(),
        "Report generated"
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.content_type.to_string()),
            (header::CONTENT_DISPOSITION, document.content_disposition()),
        ],
        document.body,
    )
        .into_response())
}

/// Handler for GET /esi/settings.
async fn settings_view_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> ApiResult<Json<SettingsView>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settings view request");
    let auth = authorize(&state, &jar, &headers, Permission::Settings, correlation_id)?;

    let esi_settings = state
        .settings()
        .load()
        .map_err(|e| failed(correlation_id, "load_settings", e))?;
    let csrf_token = state
        .sessions()
        .issue_csrf_token(&auth.session_id)
        .map_err(|e| failed(correlation_id, "issue_csrf_token", e))?;

    Ok(Json(SettingsView {
        esi_settings,
        csrf_token,
    }))
}

/// Handler for POST /esi/settings.
///
/// Replaces the settings wholesale after checking the anti-forgery token.
async fn update_settings_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    payload: Result<Form<SettingsUpdateRequest>, FormRejection>,
) -> ApiResult<Json<SuccessMessage>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing settings update request");
    let auth = authorize(&state, &jar, &headers, Permission::Settings, correlation_id)?;

    let Form(request) = payload.map_err(|r| rejected_body(correlation_id, r.body_text()))?;

    state
        .sessions()
        .verify_csrf_token(&auth.session_id, &request.csrf_token)
        .map_err(|e| failed(correlation_id, "verify_csrf_token", e))?;

    let settings = ContributionSettings::from_fields(&request.fields);
    state
        .settings()
        .save(&settings)
        .map_err(|e| failed(correlation_id, "save_settings", e))?;

    info!(
        correlation_id = %correlation_id,
        user_id = %auth.grant.user_id,
        action = "update_esi_settings",
        entity = "esi_settings",
        "User activity"
    );

    Ok(Json(SuccessMessage::new("ESI settings updated successfully")))
}

/// Handler for GET /esi/liability/{period_id}.
async fn liability_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(period_id): Path<String>,
) -> ApiResult<Json<LiabilityView>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %period_id, "Processing liability request");
    authorize(&state, &jar, &headers, Permission::Payroll, correlation_id)?;

    let liability = calculate_liability(state.store(), &period_id)
        .map_err(|e| failed(correlation_id, "calculate_liability", e))?;

    Ok(Json(LiabilityView {
        period_id,
        liability,
    }))
}

/// Handler for GET /esi/challan/{period_id}.
async fn challan_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    Path(period_id): Path<String>,
) -> ApiResult<Json<ChallanData>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period_id = %period_id, "Processing challan request");
    authorize(&state, &jar, &headers, Permission::Payroll, correlation_id)?;

    let challan = challan_data(state.store(), &period_id, Local::now().date_naive())
        .map_err(|e| failed(correlation_id, "challan_data", e))?;

    info!(
        correlation_id = %correlation_id,
        reference_number = %challan.reference_number,
        due_date = %challan.due_date,
        "Challan generated"
    );
    Ok(Json(challan))
}

/// Handler for POST /esi/calculate.
///
/// Assesses a single gross wage against the current settings.
async fn calculate_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> ApiResult<Json<CalculationResult>> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");
    authorize(&state, &jar, &headers, Permission::Payroll, correlation_id)?;

    let Json(request) = payload.map_err(|r| rejected_body(correlation_id, r.body_text()))?;

    let settings = state
        .settings()
        .load()
        .map_err(|e| failed(correlation_id, "load_settings", e))?;
    let result = assess_wage(request.gross_wage, &settings)
        .map_err(|e| failed(correlation_id, "assess_wage", e))?;

    info!(
        correlation_id = %correlation_id,
        calculation_id = %result.calculation_id,
        gross_wage = %result.gross_wage,
        eligible = result.eligible,
        "Calculation completed successfully"
    );
    Ok(Json(result))
}
