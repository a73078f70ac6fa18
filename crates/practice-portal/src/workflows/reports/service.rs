use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use super::domain::{Report, ReportDisclosure, ReportDraft, ReportId, ReportStatus, UnknownStatus};
use super::repository::ReportRepository;
use crate::config::PortalConfig;
use crate::workflows::forms::{Accepted, FieldErrors, FormBuffer, UnknownField};
use crate::workflows::notice::{Notice, NoticeBoard, NoticeKind};
use crate::workflows::store::RepositoryError;

pub const REPORT_SENT_NOTICE: &str = "Informe enviado exitosamente";

#[derive(Debug, Default)]
struct ReportForm {
    draft: ReportDraft,
    errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReportsSnapshot {
    pub reports: Vec<Report>,
    pub form: ReportDraft,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSnapshot {
    pub reports: Vec<Report>,
    pub pending_review: Vec<ReportId>,
    pub notice: Option<Notice>,
}

/// Practice reports submitted by students and reviewed by companies.
pub struct ReportDesk<R> {
    repository: Arc<R>,
    form: Mutex<ReportForm>,
    notices: Arc<NoticeBoard>,
}

impl<R> ReportDesk<R>
where
    R: ReportRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &PortalConfig) -> Self {
        Self {
            repository,
            form: Mutex::new(ReportForm::default()),
            notices: Arc::new(NoticeBoard::new(config.notice_ttl)),
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    pub fn notices(&self) -> &Arc<NoticeBoard> {
        &self.notices
    }

    pub fn update_field(&self, name: &str, value: impl Into<String>) -> Result<(), ReportError> {
        let mut form = self.form.lock().expect("report form mutex poisoned");
        form.draft.update_field(name, value.into())?;
        Ok(())
    }

    pub fn draft(&self) -> ReportDraft {
        self.form
            .lock()
            .expect("report form mutex poisoned")
            .draft
            .clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.form
            .lock()
            .expect("report form mutex poisoned")
            .errors
            .clone()
    }

    pub fn submit_form(&self, today: NaiveDate) -> Result<Accepted<Report>, ReportError> {
        let draft = self.draft();
        self.submit_report(draft, today)
    }

    /// Validates and files a pending report. A rejected draft stays in the form buffer next to
    /// its errors.
    ///
    /// The success notice is not cleared here; pass the returned ticket to
    /// [`schedule_clear`](crate::workflows::notice::schedule_clear) to expire it.
    pub fn submit_report(
        &self,
        draft: ReportDraft,
        today: NaiveDate,
    ) -> Result<Accepted<Report>, ReportError> {
        let mut form = self.form.lock().expect("report form mutex poisoned");

        let checked = match draft.check() {
            Ok(checked) => checked,
            Err(errors) => {
                debug!(%errors, "report rejected");
                form.draft = draft;
                form.errors = errors.clone();
                return Err(ReportError::Validation(errors));
            }
        };

        let id = self.repository.next_id()?;
        let report = self.repository.insert(checked.into_report(id, today))?;

        form.draft.reset();
        form.errors = FieldErrors::new();
        drop(form);

        info!(report_id = %report.id, student = %report.student_name, "report submitted");
        let notice = self.notices.post(NoticeKind::Success, REPORT_SENT_NOTICE);
        Ok(Accepted {
            value: report,
            notice,
        })
    }

    /// Overwrites the status of one report. Any of the three statuses may follow any other.
    /// The returned ticket is how callers expire the status notice.
    pub fn set_status(
        &self,
        report_id: ReportId,
        status: ReportStatus,
    ) -> Result<Accepted<Report>, ReportError> {
        let report = match self.repository.set_status(report_id, status) {
            Ok(report) => report,
            Err(RepositoryError::NotFound) => return Err(ReportError::NotFound(report_id)),
            Err(other) => return Err(other.into()),
        };

        info!(report_id = %report_id, status = %status, "report status updated");
        let notice = self.notices.post(
            NoticeKind::Success,
            format!("Estado del informe actualizado a: {}", status.label()),
        );
        Ok(Accepted {
            value: report,
            notice,
        })
    }

    /// Parses `raw` before touching any state.
    pub fn set_status_str(
        &self,
        report_id: ReportId,
        raw: &str,
    ) -> Result<Accepted<Report>, ReportError> {
        let status = raw.parse::<ReportStatus>()?;
        self.set_status(report_id, status)
    }

    pub fn view_report(&self, report_id: ReportId) -> Result<ReportDisclosure, ReportError> {
        self.repository
            .fetch(report_id)?
            .as_ref()
            .map(ReportDisclosure::from)
            .ok_or(ReportError::NotFound(report_id))
    }

    pub fn list(&self) -> Result<Vec<Report>, ReportError> {
        Ok(self.repository.list()?)
    }

    /// Reports still awaiting a reviewer decision, most recent first.
    pub fn pending_review(&self) -> Result<Vec<Report>, ReportError> {
        let pending = self
            .repository
            .list()?
            .into_iter()
            .filter(|report| report.status == ReportStatus::Pending)
            .collect();
        Ok(pending)
    }

    pub fn student_snapshot(&self) -> Result<StudentReportsSnapshot, ReportError> {
        let reports = self.repository.list()?;
        let form = self.form.lock().expect("report form mutex poisoned");
        Ok(StudentReportsSnapshot {
            reports,
            form: form.draft.clone(),
            errors: form.errors.clone(),
            notice: self.notices.current(),
        })
    }

    pub fn review_snapshot(&self) -> Result<ReviewSnapshot, ReportError> {
        let reports = self.repository.list()?;
        let pending_review = reports
            .iter()
            .filter(|report| report.status == ReportStatus::Pending)
            .map(|report| report.id)
            .collect();
        Ok(ReviewSnapshot {
            reports,
            pending_review,
            notice: self.notices.current(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report rejected: {0}")]
    Validation(FieldErrors),
    #[error("report {0} not found")]
    NotFound(ReportId),
    #[error(transparent)]
    InvalidStatus(#[from] UnknownStatus),
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
