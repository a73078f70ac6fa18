use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::forms::{optional_text, FieldErrors, FormBuffer, UnknownField};
use crate::workflows::store::Keyed;

pub const PLACEHOLDER_STUDENT: &str = "Estudiante Ejemplo";
pub const PLACEHOLDER_COMPANY: &str = "Empresa Ejemplo";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub u32);

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review state. Reports start pending; a reviewer moves them to approved or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "aprobado")]
    Approved,
    #[serde(rename = "rechazado")]
    Rejected,
}

impl ReportStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "pendiente",
            ReportStatus::Approved => "aprobado",
            ReportStatus::Rejected => "rechazado",
        }
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown report status `{0}` (expected pendiente, aprobado or rechazado)")]
pub struct UnknownStatus(pub String);

impl FromStr for ReportStatus {
    type Err = UnknownStatus;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "pendiente" | "pending" => Ok(ReportStatus::Pending),
            "aprobado" | "approved" => Ok(ReportStatus::Approved),
            "rechazado" | "rejected" => Ok(ReportStatus::Rejected),
            _ => Err(UnknownStatus(raw.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    pub title: String,
    pub content: String,
    pub student_name: String,
    pub company_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub activities: String,
    pub learnings: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<String>,
    pub submission_date: NaiveDate,
    pub status: ReportStatus,
    /// Reviewer comments. No operation writes this; only sample data carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Keyed for Report {
    type Key = ReportId;

    fn key(&self) -> ReportId {
        self.id
    }

    fn ordinal(&self) -> u32 {
        self.id.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReportDraft {
    pub title: String,
    pub content: String,
    pub start_date: String,
    pub end_date: String,
    pub activities: String,
    pub learnings: String,
    pub difficulties: String,
    pub recommendations: String,
}

fn parse_form_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

impl ReportDraft {
    pub fn validate(&self) -> FieldErrors {
        self.inspect().0
    }

    /// Validates the draft and keeps the parsed dates for [`CheckedReport::into_report`].
    pub fn check(&self) -> Result<CheckedReport, FieldErrors> {
        match self.inspect() {
            (errors, Some(start_date), Some(end_date)) if errors.is_empty() => Ok(CheckedReport {
                draft: self.clone(),
                start_date,
                end_date,
            }),
            (errors, ..) => Err(errors),
        }
    }

    /// A date is only returned when its field passed; a missing or malformed date always
    /// leaves an entry in the error map.
    fn inspect(&self) -> (FieldErrors, Option<NaiveDate>, Option<NaiveDate>) {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "El título es obligatorio");
        errors.require("content", &self.content, "El contenido es obligatorio");
        let start_date = dated_field(
            &mut errors,
            "startDate",
            &self.start_date,
            "La fecha de inicio es obligatoria",
            "La fecha de inicio no es válida",
        );
        let end_date = dated_field(
            &mut errors,
            "endDate",
            &self.end_date,
            "La fecha de fin es obligatoria",
            "La fecha de fin no es válida",
        );
        errors.require(
            "activities",
            &self.activities,
            "Las actividades son obligatorias",
        );
        errors.require(
            "learnings",
            &self.learnings,
            "Los aprendizajes son obligatorios",
        );
        (errors, start_date, end_date)
    }
}

fn dated_field(
    errors: &mut FieldErrors,
    field: &str,
    raw: &str,
    missing: &str,
    malformed: &str,
) -> Option<NaiveDate> {
    if !errors.require(field, raw, missing) {
        return None;
    }
    let parsed = parse_form_date(raw);
    if parsed.is_none() {
        errors.insert(field, malformed);
    }
    parsed
}

/// A draft that passed validation, with its period already parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedReport {
    draft: ReportDraft,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl CheckedReport {
    /// Builds a pending report credited to the placeholder student and company.
    pub fn into_report(self, id: ReportId, submission_date: NaiveDate) -> Report {
        let draft = self.draft;
        Report {
            id,
            difficulties: optional_text(&draft.difficulties),
            recommendations: optional_text(&draft.recommendations),
            title: draft.title,
            content: draft.content,
            student_name: PLACEHOLDER_STUDENT.to_string(),
            company_name: PLACEHOLDER_COMPANY.to_string(),
            start_date: self.start_date,
            end_date: self.end_date,
            activities: draft.activities,
            learnings: draft.learnings,
            submission_date,
            status: ReportStatus::Pending,
            feedback: None,
        }
    }
}

impl FormBuffer for ReportDraft {
    fn update_field(&mut self, name: &str, value: String) -> Result<(), UnknownField> {
        let slot = match name {
            "title" => &mut self.title,
            "content" => &mut self.content,
            "startDate" => &mut self.start_date,
            "endDate" => &mut self.end_date,
            "activities" => &mut self.activities,
            "learnings" => &mut self.learnings,
            "difficulties" => &mut self.difficulties,
            "recommendations" => &mut self.recommendations,
            _ => return Err(UnknownField(name.to_string())),
        };
        *slot = value;
        Ok(())
    }
}

/// Read-only view handed to whoever opens a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportDisclosure {
    pub id: ReportId,
    pub title: String,
    pub content: String,
    pub message: String,
}

impl From<&Report> for ReportDisclosure {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id,
            title: report.title.clone(),
            content: report.content.clone(),
            message: format!("Viendo informe: {}\n\n{}", report.title, report.content),
        }
    }
}
