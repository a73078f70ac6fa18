use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{RegistrationForm, RegistrationReceipt};
use super::service::{RegistrationDesk, RegistrationError};
use crate::workflows::forms::Accepted;
use crate::workflows::http::{error_response, validation_response, FieldUpdate};
use crate::workflows::notice::schedule_clear;
use crate::workflows::role::Role;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RoleSelection {
    pub role: Role,
}

/// Routes for the registration screen: role toggle, field edits and submission.
pub fn registration_router(desk: Arc<RegistrationDesk>) -> Router {
    Router::new()
        .route(
            "/api/v1/registration",
            get(snapshot_handler).post(register_handler),
        )
        .route("/api/v1/registration/role", put(select_role_handler))
        .route("/api/v1/registration/fields", patch(update_field_handler))
        .route("/api/v1/registration/submit", post(submit_handler))
        .with_state(desk)
}

pub(crate) async fn snapshot_handler(State(desk): State<Arc<RegistrationDesk>>) -> Response {
    (StatusCode::OK, Json(desk.snapshot())).into_response()
}

pub(crate) async fn select_role_handler(
    State(desk): State<Arc<RegistrationDesk>>,
    Json(selection): Json<RoleSelection>,
) -> Response {
    desk.select_role(selection.role);
    (StatusCode::OK, Json(desk.snapshot())).into_response()
}

pub(crate) async fn update_field_handler(
    State(desk): State<Arc<RegistrationDesk>>,
    Json(update): Json<FieldUpdate>,
) -> Response {
    match desk.update_field(&update.field, update.value) {
        Ok(()) => (StatusCode::OK, Json(desk.snapshot())).into_response(),
        Err(error) => submission_error(error),
    }
}

pub(crate) async fn submit_handler(State(desk): State<Arc<RegistrationDesk>>) -> Response {
    let outcome = desk.submit();
    submission_response(&desk, outcome)
}

pub(crate) async fn register_handler(
    State(desk): State<Arc<RegistrationDesk>>,
    Json(form): Json<RegistrationForm>,
) -> Response {
    let outcome = desk.register(form);
    submission_response(&desk, outcome)
}

fn submission_response(
    desk: &RegistrationDesk,
    outcome: Result<Accepted<RegistrationReceipt>, RegistrationError>,
) -> Response {
    match outcome {
        Ok(accepted) => {
            schedule_clear(desk.notices(), accepted.notice);
            let payload = json!({
                "receipt": accepted.value,
                "notice": desk.notices().current(),
            });
            (StatusCode::CREATED, Json(payload)).into_response()
        }
        Err(error) => submission_error(error),
    }
}

fn submission_error(error: RegistrationError) -> Response {
    match error {
        RegistrationError::Validation(errors) => validation_response(&errors),
        RegistrationError::UnknownField(unknown) => {
            error_response(StatusCode::BAD_REQUEST, unknown)
        }
    }
}
