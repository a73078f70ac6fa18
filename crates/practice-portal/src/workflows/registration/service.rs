use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::{debug, info};

use super::domain::{RegistrationForm, RegistrationReceipt};
use crate::config::PortalConfig;
use crate::workflows::forms::{Accepted, FieldErrors, FormBuffer, UnknownField};
use crate::workflows::notice::{Notice, NoticeBoard, NoticeKind};
use crate::workflows::role::Role;

#[derive(Debug, Default)]
struct RegistrationState {
    form: RegistrationForm,
    errors: FieldErrors,
}

/// Point-in-time copy of the registration screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistrationSnapshot {
    pub role: Role,
    pub form: RegistrationForm,
    pub errors: FieldErrors,
    pub notice: Option<Notice>,
}

/// Owns the registration form buffer, its last error map and the screen's notice slot.
pub struct RegistrationDesk {
    state: Mutex<RegistrationState>,
    notices: Arc<NoticeBoard>,
}

impl RegistrationDesk {
    pub fn new(config: &PortalConfig) -> Self {
        Self::with_notices(Arc::new(NoticeBoard::new(config.notice_ttl)))
    }

    pub fn with_notices(notices: Arc<NoticeBoard>) -> Self {
        Self {
            state: Mutex::new(RegistrationState::default()),
            notices,
        }
    }

    pub fn notices(&self) -> &Arc<NoticeBoard> {
        &self.notices
    }

    pub fn select_role(&self, role: Role) {
        let mut state = self.state.lock().expect("registration mutex poisoned");
        state.form.select_role(role);
    }

    pub fn update_field(&self, name: &str, value: impl Into<String>) -> Result<(), RegistrationError> {
        let mut state = self.state.lock().expect("registration mutex poisoned");
        state.form.update_field(name, value.into())?;
        Ok(())
    }

    /// Validates the buffered form. Success clears the buffer and posts a notice; failure
    /// replaces the stored error map and leaves the buffer as typed.
    ///
    /// The notice is left showing. HTTP handlers expire it by passing the returned ticket to
    /// [`schedule_clear`](crate::workflows::notice::schedule_clear).
    pub fn submit(&self) -> Result<Accepted<RegistrationReceipt>, RegistrationError> {
        let state = self.state.lock().expect("registration mutex poisoned");
        self.submit_locked(state)
    }

    /// Replaces the buffer with a complete form and submits it under the same lock, so no
    /// concurrent edit can land between the two.
    pub fn register(
        &self,
        form: RegistrationForm,
    ) -> Result<Accepted<RegistrationReceipt>, RegistrationError> {
        let mut state = self.state.lock().expect("registration mutex poisoned");
        state.form = form;
        self.submit_locked(state)
    }

    fn submit_locked(
        &self,
        mut state: MutexGuard<'_, RegistrationState>,
    ) -> Result<Accepted<RegistrationReceipt>, RegistrationError> {
        let errors = state.form.validate();
        if !errors.is_empty() {
            debug!(role = state.form.role().label(), %errors, "registration rejected");
            state.errors = errors.clone();
            return Err(RegistrationError::Validation(errors));
        }

        let role = state.form.role();
        let receipt = RegistrationReceipt {
            role,
            display_name: state.form.display_name().trim().to_string(),
            email: state.form.account.email.trim().to_string(),
        };

        state.errors = FieldErrors::new();
        state.form.reset();
        drop(state);

        info!(
            role = role.label(),
            email = %receipt.email,
            "registration accepted"
        );
        let notice = self.notices.post(
            NoticeKind::Success,
            format!("{} registrado exitosamente", role.display_name()),
        );

        Ok(Accepted {
            value: receipt,
            notice,
        })
    }

    pub fn form(&self) -> RegistrationForm {
        self.state
            .lock()
            .expect("registration mutex poisoned")
            .form
            .clone()
    }

    pub fn errors(&self) -> FieldErrors {
        self.state
            .lock()
            .expect("registration mutex poisoned")
            .errors
            .clone()
    }

    pub fn snapshot(&self) -> RegistrationSnapshot {
        let state = self.state.lock().expect("registration mutex poisoned");
        RegistrationSnapshot {
            role: state.form.role(),
            form: state.form.clone(),
            errors: state.errors.clone(),
            notice: self.notices.current(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("registration rejected: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    UnknownField(#[from] UnknownField),
}
