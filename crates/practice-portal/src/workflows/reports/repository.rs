use std::sync::Mutex;

use super::domain::{Report, ReportId, ReportStatus};
use super::seed::sample_reports;
use crate::workflows::store::{RepositoryError, Table};

pub trait ReportRepository: Send + Sync {
    fn next_id(&self) -> Result<ReportId, RepositoryError>;
    fn insert(&self, report: Report) -> Result<Report, RepositoryError>;
    fn fetch(&self, id: ReportId) -> Result<Option<Report>, RepositoryError>;
    /// Most recent first.
    fn list(&self) -> Result<Vec<Report>, RepositoryError>;
    /// Rewrites only the status of `id`; every other field and report stays as is.
    fn set_status(&self, id: ReportId, status: ReportStatus) -> Result<Report, RepositoryError>;
}

#[derive(Debug, Default)]
pub struct InMemoryReportRepository {
    reports: Mutex<Table<Report>>,
}

impl InMemoryReportRepository {
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: Mutex::new(Table::from_rows(reports)),
        }
    }

    pub fn seeded() -> Self {
        Self::with_reports(sample_reports())
    }
}

impl ReportRepository for InMemoryReportRepository {
    fn next_id(&self) -> Result<ReportId, RepositoryError> {
        let reports = self.reports.lock().expect("repository mutex poisoned");
        Ok(ReportId(reports.allocate()))
    }

    fn insert(&self, report: Report) -> Result<Report, RepositoryError> {
        let mut reports = self.reports.lock().expect("repository mutex poisoned");
        reports.prepend(report.clone())?;
        Ok(report)
    }

    fn fetch(&self, id: ReportId) -> Result<Option<Report>, RepositoryError> {
        let reports = self.reports.lock().expect("repository mutex poisoned");
        Ok(reports.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<Report>, RepositoryError> {
        let reports = self.reports.lock().expect("repository mutex poisoned");
        Ok(reports.snapshot())
    }

    fn set_status(&self, id: ReportId, status: ReportStatus) -> Result<Report, RepositoryError> {
        let mut reports = self.reports.lock().expect("repository mutex poisoned");
        let report = reports.get_mut(id).ok_or(RepositoryError::NotFound)?;
        report.status = status;
        Ok(report.clone())
    }
}
