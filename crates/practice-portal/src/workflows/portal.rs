//! Application shell: the three independent workflows mounted side by side.

use std::sync::Arc;

use axum::Router;
use tracing::debug;

use super::registration::{registration_router, RegistrationDesk};
use super::reports::{report_router, InMemoryReportRepository, ReportDesk, ReportRepository};
use super::vacancies::{
    vacancy_router, InMemoryVacancyRepository, VacancyBoard, VacancyRepository,
};
use crate::config::PortalConfig;

pub struct Portal<V = InMemoryVacancyRepository, R = InMemoryReportRepository> {
    pub registration: Arc<RegistrationDesk>,
    pub vacancies: Arc<VacancyBoard<V>>,
    pub reports: Arc<ReportDesk<R>>,
}

impl Portal {
    /// Builds a session over in-memory tables, seeded with the sample records unless
    /// `config.seed_samples` is off.
    pub fn in_memory(config: &PortalConfig) -> Self {
        let (vacancies, reports) = if config.seed_samples {
            (
                InMemoryVacancyRepository::seeded(),
                InMemoryReportRepository::seeded(),
            )
        } else {
            (
                InMemoryVacancyRepository::default(),
                InMemoryReportRepository::default(),
            )
        };
        debug!(seeded = config.seed_samples, "portal tables initialised");
        Self::new(Arc::new(vacancies), Arc::new(reports), config)
    }
}

impl<V, R> Portal<V, R>
where
    V: VacancyRepository + 'static,
    R: ReportRepository + 'static,
{
    pub fn new(vacancies: Arc<V>, reports: Arc<R>, config: &PortalConfig) -> Self {
        Self {
            registration: Arc::new(RegistrationDesk::new(config)),
            vacancies: Arc::new(VacancyBoard::new(vacancies, config)),
            reports: Arc::new(ReportDesk::new(reports, config)),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .merge(registration_router(self.registration.clone()))
            .merge(vacancy_router(self.vacancies.clone()))
            .merge(report_router(self.reports.clone()))
    }
}

impl<V, R> Clone for Portal<V, R> {
    fn clone(&self) -> Self {
        Self {
            registration: self.registration.clone(),
            vacancies: self.vacancies.clone(),
            reports: self.reports.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn config(seed_samples: bool) -> PortalConfig {
        PortalConfig {
            notice_ttl: Duration::from_millis(50),
            seed_samples,
            applicant_name: "Estudiante Ejemplo".to_string(),
        }
    }

    #[test]
    fn seeding_follows_config() {
        let seeded = Portal::in_memory(&config(true));
        assert_eq!(seeded.vacancies.vacancies().expect("list").len(), 2);
        assert_eq!(seeded.reports.list().expect("list").len(), 2);

        let empty = Portal::in_memory(&config(false));
        assert!(empty.vacancies.vacancies().expect("list").is_empty());
        assert!(empty.reports.list().expect("list").is_empty());
    }

    #[test]
    fn workflows_keep_separate_notice_slots() {
        let portal = Portal::in_memory(&config(true));
        portal
            .reports
            .set_status(
                crate::workflows::reports::ReportId(2),
                crate::workflows::reports::ReportStatus::Approved,
            )
            .expect("known report");
        assert!(portal.reports.notices().current().is_some());
        assert!(portal.vacancies.notices().current().is_none());
        assert!(portal.registration.notices().current().is_none());
    }

    #[tokio::test]
    async fn router_mounts_every_workflow() {
        let router = Portal::in_memory(&config(true)).router();
        for uri in [
            "/api/v1/registration",
            "/api/v1/company/vacancies",
            "/api/v1/student/vacancies",
            "/api/v1/student/reports",
            "/api/v1/company/reports",
        ] {
            let response = router
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).expect("request builds"))
                .await
                .expect("route executes");
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
        }
    }
}
