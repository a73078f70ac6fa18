//! Form buffers and the field→message error map shared by every workflow.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::notice::NoticeTicket;

/// Field name to user-facing message. Rebuilt from scratch on every validation attempt so
/// stale entries never survive a resubmission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    /// Records `message` under `field` when `value` is blank after trimming.
    pub fn require(&mut self, field: &str, value: &str, message: &str) -> bool {
        let present = !value.trim().is_empty();
        if !present {
            self.insert(field, message);
        }
        present
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.fields().collect::<Vec<_>>().join(", ");
        write!(f, "validation failed for: {fields}")
    }
}

impl std::error::Error for FieldErrors {}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field `{0}`")]
pub struct UnknownField(pub String);

/// Mutable form state edited one field at a time before submission.
pub trait FormBuffer: Default + Clone {
    /// Writes one field; no validation happens on change.
    fn update_field(&mut self, name: &str, value: String) -> Result<(), UnknownField>;

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Successful submission together with the notice it raised.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accepted<T> {
    pub value: T,
    pub notice: NoticeTicket,
}

pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_flags_whitespace_only_values() {
        let mut errors = FieldErrors::new();
        assert!(!errors.require("title", "   ", "El título es obligatorio"));
        assert!(errors.require("company", "Tech Solutions", "La empresa es obligatoria"));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("title"), Some("El título es obligatorio"));
        assert!(!errors.contains("company"));
    }

    #[test]
    fn display_lists_failing_fields() {
        let mut errors = FieldErrors::new();
        errors.insert("email", "El email es obligatorio");
        errors.insert("name", "El nombre es obligatorio");
        assert_eq!(errors.to_string(), "validation failed for: email, name");
        assert!(errors.clone().into_result().is_err());
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.insert("content", "El contenido es obligatorio");
        let json = serde_json::to_value(&errors).expect("serializes");
        assert_eq!(
            json,
            serde_json::json!({ "content": "El contenido es obligatorio" })
        );
    }

    #[test]
    fn optional_text_drops_blank_values() {
        assert_eq!(optional_text("  "), None);
        assert_eq!(optional_text("Certificaciones"), Some("Certificaciones".to_string()));
    }
}
