use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::PortalConfig;
use crate::workflows::reports::domain::{Report, ReportDraft, ReportId, ReportStatus};
use crate::workflows::reports::repository::{InMemoryReportRepository, ReportRepository};
use crate::workflows::reports::service::ReportDesk;
use crate::workflows::store::RepositoryError;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, 2).expect("valid date")
}

pub(super) fn portal_config() -> PortalConfig {
    PortalConfig {
        notice_ttl: Duration::from_secs(3),
        seed_samples: true,
        applicant_name: "Estudiante Ejemplo".to_string(),
    }
}

pub(super) fn draft() -> ReportDraft {
    ReportDraft {
        title: "Informe de práctica - Tercera semana".to_string(),
        content: "Trabajé en la migración del servicio de facturación.".to_string(),
        start_date: "2025-03-24".to_string(),
        end_date: "2025-03-30".to_string(),
        activities: "Revisión de código, pruebas de carga.".to_string(),
        learnings: "Perfilado de consultas SQL.".to_string(),
        difficulties: "Datos de prueba incompletos.".to_string(),
        recommendations: String::new(),
    }
}

pub(super) fn seeded_desk() -> (ReportDesk<InMemoryReportRepository>, Arc<InMemoryReportRepository>) {
    let repository = Arc::new(InMemoryReportRepository::seeded());
    let desk = ReportDesk::new(repository.clone(), &portal_config());
    (desk, repository)
}

pub(super) fn empty_desk() -> (ReportDesk<InMemoryReportRepository>, Arc<InMemoryReportRepository>) {
    let repository = Arc::new(InMemoryReportRepository::default());
    let desk = ReportDesk::new(repository.clone(), &portal_config());
    (desk, repository)
}

pub(super) struct UnavailableRepository;

impl ReportRepository for UnavailableRepository {
    fn next_id(&self) -> Result<ReportId, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn insert(&self, _report: Report) -> Result<Report, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: ReportId) -> Result<Option<Report>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Report>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn set_status(
        &self,
        _id: ReportId,
        _status: ReportStatus,
    ) -> Result<Report, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
