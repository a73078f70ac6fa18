use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;

use super::domain::{Vacancy, VacancyDraft, VacancyId};
use super::repository::VacancyRepository;
use super::service::{ApplyOutcome, VacancyBoard, VacancyError};
use crate::workflows::forms::Accepted;
use crate::workflows::http::{
    error_response, repository_response, today, validation_response, FieldUpdate,
};
use crate::workflows::notice::schedule_clear;

/// Company routes publish and list with counts; student routes list and apply.
pub fn vacancy_router<R>(board: Arc<VacancyBoard<R>>) -> Router
where
    R: VacancyRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/company/vacancies",
            get(company_view_handler::<R>).post(post_vacancy_handler::<R>),
        )
        .route(
            "/api/v1/company/vacancies/form",
            patch(update_field_handler::<R>),
        )
        .route(
            "/api/v1/company/vacancies/form/submit",
            post(submit_form_handler::<R>),
        )
        .route(
            "/api/v1/student/vacancies",
            get(student_view_handler::<R>),
        )
        .route(
            "/api/v1/student/vacancies/:vacancy_id/apply",
            post(apply_handler::<R>),
        )
        .with_state(board)
}

pub(crate) async fn company_view_handler<R>(State(board): State<Arc<VacancyBoard<R>>>) -> Response
where
    R: VacancyRepository + 'static,
{
    match board.company_snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => vacancy_error(error),
    }
}

pub(crate) async fn student_view_handler<R>(State(board): State<Arc<VacancyBoard<R>>>) -> Response
where
    R: VacancyRepository + 'static,
{
    match board.student_snapshot() {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(error) => vacancy_error(error),
    }
}

pub(crate) async fn post_vacancy_handler<R>(
    State(board): State<Arc<VacancyBoard<R>>>,
    Json(draft): Json<VacancyDraft>,
) -> Response
where
    R: VacancyRepository + 'static,
{
    posted_response(&board, board.post_vacancy(draft, today()))
}

pub(crate) async fn update_field_handler<R>(
    State(board): State<Arc<VacancyBoard<R>>>,
    Json(update): Json<FieldUpdate>,
) -> Response
where
    R: VacancyRepository + 'static,
{
    match board.update_field(&update.field, update.value) {
        Ok(()) => (StatusCode::OK, Json(json!({ "form": board.draft() }))).into_response(),
        Err(error) => vacancy_error(error),
    }
}

pub(crate) async fn submit_form_handler<R>(State(board): State<Arc<VacancyBoard<R>>>) -> Response
where
    R: VacancyRepository + 'static,
{
    posted_response(&board, board.submit_form(today()))
}

pub(crate) async fn apply_handler<R>(
    State(board): State<Arc<VacancyBoard<R>>>,
    Path(vacancy_id): Path<u32>,
) -> Response
where
    R: VacancyRepository + 'static,
{
    match board.apply(VacancyId(vacancy_id), today()) {
        Ok(outcome) => {
            schedule_clear(board.notices(), outcome.notice());
            let status = match outcome {
                ApplyOutcome::Applied { .. } => StatusCode::CREATED,
                ApplyOutcome::AlreadyApplied { .. } => StatusCode::CONFLICT,
            };
            let payload = json!({
                "result": outcome,
                "notice": board.notices().current(),
            });
            (status, Json(payload)).into_response()
        }
        Err(error) => vacancy_error(error),
    }
}

fn posted_response<R>(
    board: &VacancyBoard<R>,
    outcome: Result<Accepted<Vacancy>, VacancyError>,
) -> Response
where
    R: VacancyRepository + 'static,
{
    match outcome {
        Ok(accepted) => {
            schedule_clear(board.notices(), accepted.notice);
            let payload = json!({
                "vacancy": accepted.value,
                "notice": board.notices().current(),
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => vacancy_error(error),
    }
}

fn vacancy_error(error: VacancyError) -> Response {
    match error {
        VacancyError::Validation(errors) => validation_response(&errors),
        VacancyError::NotFound(_) => error_response(StatusCode::NOT_FOUND, error),
        VacancyError::UnknownField(unknown) => error_response(StatusCode::BAD_REQUEST, unknown),
        VacancyError::Repository(repository) => repository_response(&repository),
    }
}
