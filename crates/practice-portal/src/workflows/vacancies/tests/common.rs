use std::sync::Arc;
use std::time::Duration;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::PortalConfig;
use crate::workflows::store::RepositoryError;
use crate::workflows::vacancies::domain::{
    Application, ApplicationId, Vacancy, VacancyDraft, VacancyId,
};
use crate::workflows::vacancies::repository::{InMemoryVacancyRepository, VacancyRepository};
use crate::workflows::vacancies::service::VacancyBoard;

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

pub(super) fn draft() -> VacancyDraft {
    VacancyDraft {
        title: "Pasantía en Backend".to_string(),
        company: "Andes Cloud".to_string(),
        description: "Servicios internos en Rust.".to_string(),
        requirements: "Programación básica, Git.".to_string(),
        benefits: "Mentoría semanal".to_string(),
        location: "Trujillo".to_string(),
        mode: "híbrido".to_string(),
        duration: "5 meses".to_string(),
    }
}

pub(super) fn seeded_board() -> (
    VacancyBoard<InMemoryVacancyRepository>,
    Arc<InMemoryVacancyRepository>,
) {
    let repository = Arc::new(InMemoryVacancyRepository::seeded());
    let board = VacancyBoard::new(repository.clone(), &portal_config());
    (board, repository)
}

pub(super) fn empty_board() -> (
    VacancyBoard<InMemoryVacancyRepository>,
    Arc<InMemoryVacancyRepository>,
) {
    let repository = Arc::new(InMemoryVacancyRepository::default());
    let board = VacancyBoard::new(repository.clone(), &portal_config());
    (board, repository)
}

pub(super) struct UnavailableRepository;

impl VacancyRepository for UnavailableRepository {
    fn next_vacancy_id(&self) -> Result<VacancyId, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn next_application_id(&self) -> Result<ApplicationId, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn insert(&self, _vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn list(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn applications(&self) -> Result<Vec<Application>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn has_applied(
        &self,
        _student_name: &str,
        _vacancy_id: VacancyId,
    ) -> Result<bool, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn record_application(&self, _application: Application) -> Result<Vacancy, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Reports no prior application, then loses the race when recording.
pub(super) struct RacingRepository {
    pub(super) inner: InMemoryVacancyRepository,
}

impl VacancyRepository for RacingRepository {
    fn next_vacancy_id(&self) -> Result<VacancyId, RepositoryError> {
        self.inner.next_vacancy_id()
    }

    fn next_application_id(&self) -> Result<ApplicationId, RepositoryError> {
        self.inner.next_application_id()
    }

    fn insert(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        self.inner.insert(vacancy)
    }

    fn fetch(&self, id: VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn list(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        self.inner.list()
    }

    fn applications(&self) -> Result<Vec<Application>, RepositoryError> {
        self.inner.applications()
    }

    fn has_applied(
        &self,
        _student_name: &str,
        _vacancy_id: VacancyId,
    ) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    fn record_application(&self, _application: Application) -> Result<Vacancy, RepositoryError> {
        Err(RepositoryError::Conflict)
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
