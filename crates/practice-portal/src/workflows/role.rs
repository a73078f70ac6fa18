use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Capacity the current user acts in; selects form variants and available actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Company,
}

impl Role {
    pub const fn label(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Company => "company",
        }
    }

    /// Spanish noun used in user-facing notices.
    pub const fn display_name(self) -> &'static str {
        match self {
            Role::Student => "Estudiante",
            Role::Company => "Empresa",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}` (expected student or company)")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "student" | "estudiante" => Ok(Role::Student),
            "company" | "empresa" => Ok(Role::Company),
            _ => Err(UnknownRole(raw.to_string())),
        }
    }
}
