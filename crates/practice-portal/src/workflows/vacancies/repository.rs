use std::sync::Mutex;

use super::domain::{Application, ApplicationId, Vacancy, VacancyId};
use super::seed::sample_vacancies;
use crate::workflows::store::{RepositoryError, Table};

/// Storage abstraction so the board can be exercised in isolation.
pub trait VacancyRepository: Send + Sync {
    fn next_vacancy_id(&self) -> Result<VacancyId, RepositoryError>;
    fn next_application_id(&self) -> Result<ApplicationId, RepositoryError>;
    /// Stores a new vacancy ahead of every existing one.
    fn insert(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError>;
    fn fetch(&self, id: VacancyId) -> Result<Option<Vacancy>, RepositoryError>;
    /// Most recent first.
    fn list(&self) -> Result<Vec<Vacancy>, RepositoryError>;
    fn applications(&self) -> Result<Vec<Application>, RepositoryError>;
    fn has_applied(&self, student_name: &str, vacancy_id: VacancyId)
        -> Result<bool, RepositoryError>;
    /// Appends the application and links it to its vacancy in one step. Fails with `Conflict`
    /// when the student already applied and `NotFound` when the vacancy is unknown.
    fn record_application(&self, application: Application) -> Result<Vacancy, RepositoryError>;
}

#[derive(Debug, Default)]
struct VacancyTables {
    vacancies: Table<Vacancy>,
    applications: Table<Application>,
}

/// Process-local repository; contents vanish with the process.
#[derive(Debug, Default)]
pub struct InMemoryVacancyRepository {
    tables: Mutex<VacancyTables>,
}

impl InMemoryVacancyRepository {
    pub fn with_vacancies(vacancies: Vec<Vacancy>) -> Self {
        Self {
            tables: Mutex::new(VacancyTables {
                vacancies: Table::from_rows(vacancies),
                applications: Table::default(),
            }),
        }
    }

    pub fn seeded() -> Self {
        Self::with_vacancies(sample_vacancies())
    }
}

impl VacancyRepository for InMemoryVacancyRepository {
    fn next_vacancy_id(&self) -> Result<VacancyId, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(VacancyId(tables.vacancies.allocate()))
    }

    fn next_application_id(&self) -> Result<ApplicationId, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(ApplicationId(tables.applications.allocate()))
    }

    fn insert(&self, vacancy: Vacancy) -> Result<Vacancy, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");
        tables.vacancies.prepend(vacancy.clone())?;
        Ok(vacancy)
    }

    fn fetch(&self, id: VacancyId) -> Result<Option<Vacancy>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.vacancies.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Vacancy>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.vacancies.snapshot())
    }

    fn applications(&self) -> Result<Vec<Application>, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        Ok(tables.applications.snapshot())
    }

    fn has_applied(
        &self,
        student_name: &str,
        vacancy_id: VacancyId,
    ) -> Result<bool, RepositoryError> {
        let tables = self.tables.lock().expect("repository mutex poisoned");
        let applied = tables
            .applications
            .iter()
            .any(|app| app.vacancy_id == vacancy_id && app.student_name == student_name);
        Ok(applied)
    }

    fn record_application(&self, application: Application) -> Result<Vacancy, RepositoryError> {
        let mut tables = self.tables.lock().expect("repository mutex poisoned");

        if tables.vacancies.get(application.vacancy_id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        let duplicate = tables.applications.iter().any(|existing| {
            existing.vacancy_id == application.vacancy_id
                && existing.student_name == application.student_name
        });
        if duplicate {
            return Err(RepositoryError::Conflict);
        }

        let application_id = application.id;
        let vacancy_id = application.vacancy_id;
        tables.applications.push(application)?;

        let vacancy = tables
            .vacancies
            .get_mut(vacancy_id)
            .ok_or(RepositoryError::NotFound)?;
        vacancy.applications.push(application_id);
        Ok(vacancy.clone())
    }
}
