use super::common::*;
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::vacancies::repository::VacancyRepository;
use crate::workflows::vacancies::router::{apply_handler, vacancy_router};
use crate::workflows::vacancies::service::VacancyBoard;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializes")))
        .expect("request builds")
}

#[tokio::test]
async fn post_route_creates_vacancy() {
    let (board, repository) = seeded_board();
    let router = vacancy_router(Arc::new(board));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/company/vacancies",
            serde_json::to_value(draft()).expect("serializes"),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["vacancy"]["id"], 3);
    assert_eq!(payload["notice"]["message"], "Vacante publicada exitosamente");
    assert_eq!(repository.list().expect("list").len(), 3);
}

#[tokio::test]
async fn post_route_returns_field_errors() {
    let (board, _) = empty_board();
    let router = vacancy_router(Arc::new(board));

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/company/vacancies",
            serde_json::json!({ "title": "Solo título" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    let errors = payload["errors"].as_object().expect("error map");
    assert!(!errors.contains_key("title"));
    assert_eq!(errors["company"], "La empresa es obligatoria");
    assert_eq!(errors.len(), 5);
}

#[tokio::test]
async fn company_view_lists_counts() {
    let (board, _) = seeded_board();
    let board = Arc::new(board);
    board
        .apply(crate::workflows::vacancies::VacancyId(2), today())
        .expect("apply");

    let response = vacancy_router(board)
        .oneshot(
            Request::get("/api/v1/company/vacancies")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let vacancies = payload["vacancies"].as_array().expect("vacancies");
    assert_eq!(vacancies.len(), 2);
    assert_eq!(vacancies[1]["id"], 2);
    assert_eq!(vacancies[1]["applicationCount"], 1);
    assert_eq!(payload["form"]["type"], "presencial");
}

#[tokio::test]
async fn apply_handler_maps_outcomes_to_status_codes() {
    let (board, _) = seeded_board();
    let board = Arc::new(board);

    let first = apply_handler(State(board.clone()), Path(1)).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let payload = read_json_body(first).await;
    assert_eq!(payload["result"]["outcome"], "applied");

    let second = apply_handler(State(board.clone()), Path(1)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let payload = read_json_body(second).await;
    assert_eq!(payload["result"]["outcome"], "already_applied");
    assert_eq!(payload["notice"]["message"], "Ya has postulado a esta vacante");
    assert_eq!(payload["notice"]["kind"], "warning");

    let missing = apply_handler(State(board), Path(42)).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn student_view_marks_applied_vacancies() {
    let (board, _) = seeded_board();
    let router = vacancy_router(Arc::new(board));

    let applied = router
        .clone()
        .oneshot(
            Request::post("/api/v1/student/vacancies/2/apply")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(applied.status(), StatusCode::CREATED);

    let response = router
        .oneshot(
            Request::get("/api/v1/student/vacancies")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    let payload = read_json_body(response).await;
    let flags: Vec<_> = payload["vacancies"]
        .as_array()
        .expect("vacancies")
        .iter()
        .map(|row| (row["id"].as_u64(), row["alreadyApplied"].as_bool()))
        .collect();
    assert_eq!(flags, vec![(Some(1), Some(false)), (Some(2), Some(true))]);
}

#[tokio::test]
async fn form_routes_edit_and_submit_buffer() {
    let (board, _) = empty_board();
    let board = Arc::new(board);
    let router = vacancy_router(board.clone());

    let unknown = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/api/v1/company/vacancies/form",
            serde_json::json!({ "field": "salary", "value": "900" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

    let edited = router
        .clone()
        .oneshot(json_request(
            "PATCH",
            "/api/v1/company/vacancies/form",
            serde_json::json!({ "field": "title", "value": "Pasantía QA" }),
        ))
        .await
        .expect("route executes");
    assert_eq!(edited.status(), StatusCode::OK);
    assert_eq!(read_json_body(edited).await["form"]["title"], "Pasantía QA");

    let submitted = router
        .oneshot(
            Request::post("/api/v1/company/vacancies/form/submit")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(submitted.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(board.draft().title, "Pasantía QA", "rejected draft is kept");
}

#[tokio::test]
async fn repository_outage_is_internal_error() {
    let board = Arc::new(VacancyBoard::new(
        Arc::new(UnavailableRepository),
        &portal_config(),
    ));
    let response = vacancy_router(board)
        .oneshot(
            Request::get("/api/v1/student/vacancies")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
