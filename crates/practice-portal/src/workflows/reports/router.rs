use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Report, ReportDraft, ReportId};
use super::repository::ReportRepository;
use super::service::{ReportDesk, ReportError};
use crate::workflows::forms::Accepted;
use crate::workflows::http::{
    error_response, repository_response, today, validation_response, FieldUpdate,
};
use crate::workflows::notice::schedule_clear;

#[derive(Debug, Deserialize)]
pub(crate) struct StatusChange {
    status: String,
}

/// Students submit and list; companies review; either side can open a single report.
pub fn report_router<R>(desk: Arc<ReportDesk<R>>) -> Router
where
    R: ReportRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/student/reports",
            get(student_view_handler::<R>).post(submit_report_handler::<R>),
        )
        .route(
            "/api/v1/student/reports/form",
            patch(update_field_handler::<R>),
        )
        .route(
            "/api/v1/student/reports/form/submit",
            post(submit_form_handler::<R>),
        )
        .route("/api/v1/company/reports", get(review_view_handler::<R>))
        .route(
            "/api/v1/company/reports/:report_id/status",
            put(set_status_handler::<R>),
        )
        .route("/api/v1/reports/:report_id", get(view_report_handler::<R>))
        .with_state(desk)
}

pub(crate) async fn student_view_handler<R>(State(desk): State<Arc<ReportDesk<R>>>) -> Response
where
    R: ReportRepository + 'static,
{
    match desk.student_snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => report_error(error),
    }
}

pub(crate) async fn review_view_handler<R>(State(desk): State<Arc<ReportDesk<R>>>) -> Response
where
    R: ReportRepository + 'static,
{
    match desk.review_snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => report_error(error),
    }
}

pub(crate) async fn submit_report_handler<R>(
    State(desk): State<Arc<ReportDesk<R>>>,
    Json(draft): Json<ReportDraft>,
) -> Response
where
    R: ReportRepository + 'static,
{
    accepted_response(&desk, StatusCode::CREATED, desk.submit_report(draft, today()))
}

pub(crate) async fn update_field_handler<R>(
    State(desk): State<Arc<ReportDesk<R>>>,
    Json(update): Json<FieldUpdate>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match desk.update_field(&update.field, update.value) {
        Ok(()) => (StatusCode::OK, Json(json!({ "form": desk.draft() }))).into_response(),
        Err(error) => report_error(error),
    }
}

pub(crate) async fn submit_form_handler<R>(State(desk): State<Arc<ReportDesk<R>>>) -> Response
where
    R: ReportRepository + 'static,
{
    accepted_response(&desk, StatusCode::CREATED, desk.submit_form(today()))
}

pub(crate) async fn set_status_handler<R>(
    State(desk): State<Arc<ReportDesk<R>>>,
    Path(report_id): Path<u32>,
    Json(change): Json<StatusChange>,
) -> Response
where
    R: ReportRepository + 'static,
{
    let outcome = desk.set_status_str(ReportId(report_id), &change.status);
    accepted_response(&desk, StatusCode::OK, outcome)
}

pub(crate) async fn view_report_handler<R>(
    State(desk): State<Arc<ReportDesk<R>>>,
    Path(report_id): Path<u32>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match desk.view_report(ReportId(report_id)) {
        Ok(disclosure) => (StatusCode::OK, Json(disclosure)).into_response(),
        Err(error) => report_error(error),
    }
}

fn accepted_response<R>(
    desk: &ReportDesk<R>,
    status: StatusCode,
    outcome: Result<Accepted<Report>, ReportError>,
) -> Response
where
    R: ReportRepository + 'static,
{
    match outcome {
        Ok(accepted) => {
            schedule_clear(desk.notices(), accepted.notice);
            let payload = json!({
                "report": accepted.value,
                "notice": desk.notices().current(),
            });
            (status, Json(payload)).into_response()
        }
        Err(error) => report_error(error),
    }
}

fn report_error(error: ReportError) -> Response {
    match error {
        ReportError::Validation(errors) => validation_response(&errors),
        ReportError::NotFound(_) => error_response(StatusCode::NOT_FOUND, error),
        ReportError::InvalidStatus(unknown) => error_response(StatusCode::BAD_REQUEST, unknown),
        ReportError::UnknownField(unknown) => error_response(StatusCode::BAD_REQUEST, unknown),
        ReportError::Repository(repository) => repository_response(&repository),
    }
}
