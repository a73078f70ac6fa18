//! Practice reports: students submit them, companies review them.

pub mod domain;
pub mod repository;
pub mod router;
pub mod seed;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    CheckedReport, Report, ReportDisclosure, ReportDraft, ReportId, ReportStatus, UnknownStatus,
    PLACEHOLDER_COMPANY, PLACEHOLDER_STUDENT,
};
pub use repository::{InMemoryReportRepository, ReportRepository};
pub use router::report_router;
pub use seed::sample_reports;
pub use service::{
    ReportDesk, ReportError, ReviewSnapshot, StudentReportsSnapshot, REPORT_SENT_NOTICE,
};
