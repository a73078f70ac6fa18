use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{
    Application, ApplicationStatus, CompanyVacancyView, StudentVacancyView, Vacancy, VacancyDraft,
    VacancyId,
};
use super::repository::VacancyRepository;
use crate::config::PortalConfig;
use crate::workflows::forms::{Accepted, FieldErrors, FormBuffer, UnknownField};
use crate::workflows::notice::{Notice, NoticeBoard, NoticeKind, NoticeTicket};
use crate::workflows::store::RepositoryError;

pub const VACANCY_POSTED_NOTICE: &str = "Vacante publicada exitosamente";
pub const APPLICATION_SENT_NOTICE: &str = "Postulación enviada exitosamente";
pub const ALREADY_APPLIED_NOTICE: &str = "Ya has postulado a esta vacante";

#[derive(Debug, Default)]
struct PostingForm {
    draft: VacancyDraft,
    errors: FieldErrors,
}

/// Result of an apply attempt. Re-applying is a guarded no-op, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ApplyOutcome {
    Applied {
        application: Application,
        vacancy: Vacancy,
        notice: NoticeTicket,
    },
    AlreadyApplied {
        vacancy_id: VacancyId,
        notice: NoticeTicket,
    },
}

impl ApplyOutcome {
    pub fn notice(&self) -> NoticeTicket {
        match self {
            ApplyOutcome::Applied { notice, .. } | ApplyOutcome::AlreadyApplied { notice, .. } => {
                *notice
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyBoardSnapshot {
    pub vacancies: Vec<CompanyVacancyView>,
    pub form: VacancyDraft,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentBoardSnapshot {
    pub applicant: String,
    pub vacancies: Vec<StudentVacancyView>,
    pub notice: Option<Notice>,
}

/// Vacancy postings and the applications made against them.
pub struct VacancyBoard<R> {
    repository: Arc<R>,
    applicant: String,
    form: Mutex<PostingForm>,
    notices: Arc<NoticeBoard>,
}

impl<R> VacancyBoard<R>
where
    R: VacancyRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &PortalConfig) -> Self {
        Self {
            repository,
            applicant: config.applicant_name.clone(),
            form: Mutex::new(PostingForm::default()),
            notices: Arc::new(NoticeBoard::new(config.notice_ttl)),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn notices(&self) -> &Arc<NoticeBoard> {
        &self.notices
    }

    /// Name applications are filed under when no explicit applicant is given.
    pub fn applicant(&self) -> &str {
        &self.applicant
    }

    pub fn update_field(&self, name: &str, value: impl Into<String>) -> Result<(), VacancyError> {
        let mut form = self.form.lock().expect("vacancy form mutex poisoned");
        form.draft.update_field(name, value.into())?;
        Ok(())
    }

    pub fn draft(&self) -> VacancyDraft {
        self.form
            .lock()
            .expect("vacancy form mutex poisoned")
            .draft
            .clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.form
            .lock()
            .expect("vacancy form mutex poisoned")
            .errors
            .clone()
    }

    /// Posts the buffered draft.
    pub fn submit_form(&self, today: NaiveDate) -> Result<Accepted<Vacancy>, VacancyError> {
        let draft = self.draft();
        self.post_vacancy(draft, today)
    }

    /// Validates and publishes a vacancy ahead of all existing ones. A rejected draft stays in
    /// the form buffer next to its errors; an accepted one resets the buffer.
    ///
    /// The success notice stays posted until cleared. Callers that want it to expire pass the
    /// returned ticket to [`schedule_clear`](crate::workflows::notice::schedule_clear).
    pub fn post_vacancy(
        &self,
        draft: VacancyDraft,
        today: NaiveDate,
    ) -> Result<Accepted<Vacancy>, VacancyError> {
        let mut form = self.form.lock().expect("vacancy form mutex poisoned");

        let errors = draft.validate();
        if !errors.is_empty() {
            debug!(%errors, "vacancy rejected");
            form.draft = draft;
            form.errors = errors.clone();
            return Err(VacancyError::Validation(errors));
        }

        let id = self.repository.next_vacancy_id()?;
        let vacancy = self.repository.insert(draft.into_vacancy(id, today))?;

        form.draft.reset();
        form.errors = FieldErrors::new();
        drop(form);

        info!(vacancy_id = %vacancy.id, company = %vacancy.company, "vacancy posted");
        let notice = self.notices.post(NoticeKind::Success, VACANCY_POSTED_NOTICE);
        Ok(Accepted {
            value: vacancy,
            notice,
        })
    }

    /// Applies to `vacancy_id` as the session applicant. Both outcomes carry a notice ticket
    /// that the caller hands to [`schedule_clear`](crate::workflows::notice::schedule_clear);
    /// nothing here expires it.
    pub fn apply(&self, vacancy_id: VacancyId, today: NaiveDate) -> Result<ApplyOutcome, VacancyError> {
        self.apply_as(&self.applicant, vacancy_id, today)
    }

    pub fn apply_as(
        &self,
        applicant: &str,
        vacancy_id: VacancyId,
        today: NaiveDate,
    ) -> Result<ApplyOutcome, VacancyError> {
        if self.repository.fetch(vacancy_id)?.is_none() {
            return Err(VacancyError::NotFound(vacancy_id));
        }
        if self.repository.has_applied(applicant, vacancy_id)? {
            return Ok(self.already_applied(applicant, vacancy_id));
        }

        let application = Application {
            id: self.repository.next_application_id()?,
            vacancy_id,
            student_name: applicant.to_string(),
            application_date: today,
            status: ApplicationStatus::Pending,
        };

        let vacancy = match self.repository.record_application(application.clone()) {
            Ok(vacancy) => vacancy,
            Err(RepositoryError::Conflict) => return Ok(self.already_applied(applicant, vacancy_id)),
            Err(RepositoryError::NotFound) => return Err(VacancyError::NotFound(vacancy_id)),
            Err(other) => return Err(other.into()),
        };

        info!(
            application_id = %application.id,
            vacancy_id = %vacancy_id,
            applicant,
            "application submitted"
        );
        let notice = self.notices.post(NoticeKind::Success, APPLICATION_SENT_NOTICE);
        Ok(ApplyOutcome::Applied {
            application,
            vacancy,
            notice,
        })
    }

    fn already_applied(&self, applicant: &str, vacancy_id: VacancyId) -> ApplyOutcome {
        warn!(vacancy_id = %vacancy_id, applicant, "duplicate application ignored");
        let notice = self.notices.post(NoticeKind::Warning, ALREADY_APPLIED_NOTICE);
        ApplyOutcome::AlreadyApplied { vacancy_id, notice }
    }

    pub fn vacancies(&self) -> Result<Vec<Vacancy>, VacancyError> {
        Ok(self.repository.list()?)
    }

    pub fn applications(&self) -> Result<Vec<Application>, VacancyError> {
        Ok(self.repository.applications()?)
    }

    pub fn company_view(&self) -> Result<Vec<CompanyVacancyView>, VacancyError> {
        let views = self
            .repository
            .list()?
            .into_iter()
            .map(|vacancy| CompanyVacancyView {
                application_count: vacancy.application_count(),
                vacancy,
            })
            .collect();
        Ok(views)
    }

    pub fn student_view(&self, applicant: &str) -> Result<Vec<StudentVacancyView>, VacancyError> {
        let applications = self.repository.applications()?;
        let views = self
            .repository
            .list()?
            .into_iter()
            .map(|vacancy| {
                let already_applied = applications
                    .iter()
                    .any(|app| app.vacancy_id == vacancy.id && app.student_name == applicant);
                StudentVacancyView {
                    vacancy,
                    already_applied,
                }
            })
            .collect();
        Ok(views)
    }

    pub fn company_snapshot(&self) -> Result<CompanyBoardSnapshot, VacancyError> {
        let vacancies = self.company_view()?;
        let form = self.form.lock().expect("vacancy form mutex poisoned");
        Ok(CompanyBoardSnapshot {
            vacancies,
            form: form.draft.clone(),
            errors: form.errors.clone(),
            notice: self.notices.current(),
        })
    }

    pub fn student_snapshot(&self) -> Result<StudentBoardSnapshot, VacancyError> {
        Ok(StudentBoardSnapshot {
            applicant: self.applicant.clone(),
            vacancies: self.student_view(&self.applicant)?,
            notice: self.notices.current(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum VacancyError {
    #[error("vacancy rejected: {0}")]
    Validation(FieldErrors),
    #[error("vacancy {0} not found")]
    NotFound(VacancyId),
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
