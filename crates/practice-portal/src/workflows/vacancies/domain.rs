use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::forms::{optional_text, FieldErrors, FormBuffer, UnknownField};
use crate::workflows::store::Keyed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VacancyId(pub u32);

impl fmt::Display for VacancyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(pub u32);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the practice takes place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WorkMode {
    #[default]
    #[serde(rename = "presencial")]
    OnSite,
    #[serde(rename = "remoto")]
    Remote,
    #[serde(rename = "híbrido")]
    Hybrid,
}

impl WorkMode {
    pub const fn label(self) -> &'static str {
        match self {
            WorkMode::OnSite => "presencial",
            WorkMode::Remote => "remoto",
            WorkMode::Hybrid => "híbrido",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "presencial" => Some(WorkMode::OnSite),
            "remoto" => Some(WorkMode::Remote),
            "híbrido" | "hibrido" => Some(WorkMode::Hybrid),
            _ => None,
        }
    }
}

/// A published internship opening. Only `applications` changes after creation, and only by
/// growing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vacancy {
    pub id: VacancyId,
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<String>,
    pub location: String,
    #[serde(rename = "type")]
    pub mode: WorkMode,
    pub duration: String,
    pub posted_date: NaiveDate,
    #[serde(default)]
    pub applications: Vec<ApplicationId>,
}

impl Vacancy {
    pub fn application_count(&self) -> usize {
        self.applications.len()
    }
}

impl Keyed for Vacancy {
    type Key = VacancyId;

    fn key(&self) -> VacancyId {
        self.id
    }

    fn ordinal(&self) -> u32 {
        self.id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationStatus {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pendiente",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub vacancy_id: VacancyId,
    pub student_name: String,
    pub application_date: NaiveDate,
    pub status: ApplicationStatus,
}

impl Keyed for Application {
    type Key = ApplicationId;

    fn key(&self) -> ApplicationId {
        self.id
    }

    fn ordinal(&self) -> u32 {
        self.id.0
    }
}

/// Company-side form for a new vacancy. Values stay as typed until validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VacancyDraft {
    pub title: String,
    pub company: String,
    pub description: String,
    pub requirements: String,
    pub benefits: String,
    pub location: String,
    #[serde(rename = "type")]
    pub mode: String,
    pub duration: String,
}

impl Default for VacancyDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            company: String::new(),
            description: String::new(),
            requirements: String::new(),
            benefits: String::new(),
            location: String::new(),
            mode: WorkMode::default().label().to_string(),
            duration: String::new(),
        }
    }
}

impl VacancyDraft {
    /// A blank modality falls back to the default; anything else must name one of the three.
    fn resolved_mode(&self) -> Option<WorkMode> {
        if self.mode.trim().is_empty() {
            return Some(WorkMode::default());
        }
        WorkMode::parse(&self.mode)
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("title", &self.title, "El título es obligatorio");
        errors.require("company", &self.company, "La empresa es obligatoria");
        errors.require(
            "description",
            &self.description,
            "La descripción es obligatoria",
        );
        errors.require(
            "requirements",
            &self.requirements,
            "Los requisitos son obligatorios",
        );
        errors.require("location", &self.location, "La ubicación es obligatoria");
        if self.resolved_mode().is_none() {
            errors.insert("type", "La modalidad no es válida");
        }
        errors.require("duration", &self.duration, "La duración es obligatoria");
        errors
    }

    /// Builds the vacancy; callers validate first.
    pub fn into_vacancy(self, id: VacancyId, posted_date: NaiveDate) -> Vacancy {
        Vacancy {
            id,
            mode: self.resolved_mode().unwrap_or_default(),
            benefits: optional_text(&self.benefits),
            title: self.title,
            company: self.company,
            description: self.description,
            requirements: self.requirements,
            location: self.location,
            duration: self.duration,
            posted_date,
            applications: Vec::new(),
        }
    }
}

impl FormBuffer for VacancyDraft {
    fn update_field(&mut self, name: &str, value: String) -> Result<(), UnknownField> {
        let slot = match name {
            "title" => &mut self.title,
            "company" => &mut self.company,
            "description" => &mut self.description,
            "requirements" => &mut self.requirements,
            "benefits" => &mut self.benefits,
            "location" => &mut self.location,
            "type" => &mut self.mode,
            "duration" => &mut self.duration,
            _ => return Err(UnknownField(name.to_string())),
        };
        *slot = value;
        Ok(())
    }
}

/// Company view row: the vacancy plus how many students applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyVacancyView {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub application_count: usize,
}

/// Student view row: the vacancy plus whether the apply action is still available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentVacancyView {
    #[serde(flatten)]
    pub vacancy: Vacancy,
    pub already_applied: bool,
}
