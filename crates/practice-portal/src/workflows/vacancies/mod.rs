//! Vacancy postings authored by companies and the applications students file against them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationId, ApplicationStatus, CompanyVacancyView, StudentVacancyView,
    Vacancy, VacancyDraft, VacancyId, WorkMode,
};
pub use repository::{InMemoryVacancyRepository, VacancyRepository};
pub use router::vacancy_router;
pub use seed::sample_vacancies;
pub use service::{
    ApplyOutcome, CompanyBoardSnapshot, StudentBoardSnapshot, VacancyBoard, VacancyError,
    ALREADY_APPLIED_NOTICE, APPLICATION_SENT_NOTICE, VACANCY_POSTED_NOTICE,
};
