use serde::{Deserialize, Serialize};

use crate::workflows::forms::{FieldErrors, FormBuffer, UnknownField};
use crate::workflows::role::Role;

/// Fields every profile carries regardless of role. Passwords are accepted on input but never
/// echoed back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccountFields {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StudentFields {
    pub career: String,
    pub university: String,
    pub semester: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompanyFields {
    pub company_name: String,
    pub sector: String,
    pub description: String,
}

/// Role-specific half of the form. Switching roles swaps the variant, so fields that only make
/// sense for the other role are not carried along.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum ProfileFields {
    Student(StudentFields),
    Company(CompanyFields),
}

impl ProfileFields {
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Student => ProfileFields::Student(StudentFields::default()),
            Role::Company => ProfileFields::Company(CompanyFields::default()),
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ProfileFields::Student(_) => Role::Student,
            ProfileFields::Company(_) => Role::Company,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    #[serde(default)]
    pub account: AccountFields,
    pub profile: ProfileFields,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self::new(Role::Student)
    }
}

impl RegistrationForm {
    pub fn new(role: Role) -> Self {
        Self {
            account: AccountFields::default(),
            profile: ProfileFields::empty(role),
        }
    }

    pub fn role(&self) -> Role {
        self.profile.role()
    }

    /// Keeps the account fields and starts the new role's fields empty.
    pub fn select_role(&mut self, role: Role) {
        if self.role() != role {
            self.profile = ProfileFields::empty(role);
        }
    }

    /// Name shown in notices and receipts: the person for students, the firm for companies.
    pub fn display_name(&self) -> &str {
        match &self.profile {
            ProfileFields::Student(_) => &self.account.name,
            ProfileFields::Company(company) => &company.company_name,
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        let account = &self.account;

        match &self.profile {
            ProfileFields::Student(_) => {
                errors.require("name", &account.name, "El nombre es obligatorio");
            }
            ProfileFields::Company(company) => {
                errors.require(
                    "companyName",
                    &company.company_name,
                    "El nombre de la empresa es obligatorio",
                );
            }
        }
        errors.require("email", &account.email, "El email es obligatorio");
        errors.require("password", &account.password, "La contraseña es obligatoria");
        if account.password != account.confirm_password {
            errors.insert("confirmPassword", "Las contraseñas no coinciden");
        }

        match &self.profile {
            ProfileFields::Student(student) => {
                errors.require("career", &student.career, "La carrera es obligatoria");
                errors.require(
                    "university",
                    &student.university,
                    "La universidad es obligatoria",
                );
                errors.require("semester", &student.semester, "El semestre es obligatorio");
            }
            ProfileFields::Company(company) => {
                errors.require("sector", &company.sector, "El sector es obligatorio");
            }
        }

        errors
    }
}

impl FormBuffer for RegistrationForm {
    fn update_field(&mut self, name: &str, value: String) -> Result<(), UnknownField> {
        let slot = match (name, &mut self.profile) {
            ("name", _) => &mut self.account.name,
            ("email", _) => &mut self.account.email,
            ("password", _) => &mut self.account.password,
            ("confirmPassword", _) => &mut self.account.confirm_password,
            ("career", ProfileFields::Student(student)) => &mut student.career,
            ("university", ProfileFields::Student(student)) => &mut student.university,
            ("semester", ProfileFields::Student(student)) => &mut student.semester,
            ("companyName", ProfileFields::Company(company)) => &mut company.company_name,
            ("sector", ProfileFields::Company(company)) => &mut company.sector,
            ("description", ProfileFields::Company(company)) => &mut company.description,
            _ => return Err(UnknownField(name.to_string())),
        };
        *slot = value;
        Ok(())
    }

    fn reset(&mut self) {
        *self = Self::new(self.role());
    }
}

/// What an accepted registration hands back. Nothing is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub role: Role,
    pub display_name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_student() -> RegistrationForm {
        let mut form = RegistrationForm::new(Role::Student);
        for (field, value) in [
            ("name", "Juan Pérez"),
            ("email", "juan@uni.pe"),
            ("password", "secreto"),
            ("confirmPassword", "secreto"),
            ("career", "Ingeniería de Sistemas"),
            ("university", "UNSA"),
            ("semester", "7"),
        ] {
            form.update_field(field, value.to_string())
                .expect("student field");
        }
        form
    }

    #[test]
    fn role_fields_are_scoped_to_active_variant() {
        let mut form = RegistrationForm::new(Role::Student);
        assert_eq!(
            form.update_field("sector", "Tecnología".to_string()),
            Err(UnknownField("sector".to_string()))
        );

        form.select_role(Role::Company);
        form.update_field("sector", "Tecnología".to_string())
            .expect("company field");
        assert!(form.update_field("career", "Derecho".to_string()).is_err());
    }

    #[test]
    fn switching_roles_keeps_account_fields_and_drops_profile() {
        let mut form = filled_student();
        form.select_role(Role::Company);

        assert_eq!(form.account.email, "juan@uni.pe");
        assert_eq!(form.profile, ProfileFields::Company(CompanyFields::default()));

        form.select_role(Role::Student);
        assert_eq!(form.profile, ProfileFields::Student(StudentFields::default()));
    }

    #[test]
    fn selecting_current_role_is_a_no_op() {
        let mut form = filled_student();
        let before = form.clone();
        form.select_role(Role::Student);
        assert_eq!(form, before);
    }

    #[test]
    fn company_requires_company_name_instead_of_person_name() {
        let mut form = RegistrationForm::new(Role::Company);
        for (field, value) in [
            ("email", "rrhh@tech.pe"),
            ("password", "x"),
            ("confirmPassword", "x"),
            ("sector", "Software"),
        ] {
            form.update_field(field, value.to_string())
                .expect("company field");
        }

        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("companyName"),
            Some("El nombre de la empresa es obligatorio")
        );
        assert!(!errors.contains("name"));
    }

    #[test]
    fn mismatched_confirmation_is_reported() {
        let mut form = filled_student();
        form.update_field("confirmPassword", "otro".to_string())
            .expect("known field");
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("confirmPassword"),
            Some("Las contraseñas no coinciden")
        );
    }

    #[test]
    fn each_blank_student_field_yields_its_own_error() {
        for (field, message) in [
            ("name", "El nombre es obligatorio"),
            ("email", "El email es obligatorio"),
            ("career", "La carrera es obligatoria"),
            ("university", "La universidad es obligatoria"),
            ("semester", "El semestre es obligatorio"),
        ] {
            let mut form = filled_student();
            form.update_field(field, "  ".to_string())
                .expect("student field");
            let errors = form.validate();
            assert_eq!(errors.len(), 1, "{field}");
            assert_eq!(errors.get(field), Some(message), "{field}");
        }
    }

    #[test]
    fn blank_password_also_fails_confirmation() {
        let mut form = filled_student();
        form.update_field("password", String::new())
            .expect("known field");
        let errors = form.validate();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["confirmPassword", "password"]);
        assert_eq!(errors.get("password"), Some("La contraseña es obligatoria"));
        assert_eq!(
            errors.get("confirmPassword"),
            Some("Las contraseñas no coinciden")
        );
    }

    #[test]
    fn blank_sector_is_the_only_company_error() {
        let mut form = RegistrationForm::new(Role::Company);
        for (field, value) in [
            ("companyName", "Tech Solutions"),
            ("email", "rrhh@tech.pe"),
            ("password", "x"),
            ("confirmPassword", "x"),
            ("sector", " "),
        ] {
            form.update_field(field, value.to_string())
                .expect("company field");
        }
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("sector"), Some("El sector es obligatorio"));
    }

    #[test]
    fn reset_keeps_role() {
        let mut form = RegistrationForm::new(Role::Company);
        form.update_field("sector", "Retail".to_string())
            .expect("company field");
        form.reset();
        assert_eq!(form, RegistrationForm::new(Role::Company));
    }

    #[test]
    fn passwords_are_not_serialized() {
        let json = serde_json::to_value(filled_student()).expect("serializes");
        assert!(json["account"].get("password").is_none());
        assert!(json["account"].get("confirmPassword").is_none());
        assert_eq!(json["profile"]["role"], "student");
        assert_eq!(json["profile"]["career"], "Ingeniería de Sistemas");
    }
}
