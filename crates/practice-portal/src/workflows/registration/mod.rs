//! Student and company sign-up. Submissions are validated and acknowledged but never stored.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{
    AccountFields, CompanyFields, ProfileFields, RegistrationForm, RegistrationReceipt,
    StudentFields,
};
pub use router::{registration_router, RoleSelection};
pub use service::{RegistrationDesk, RegistrationError, RegistrationSnapshot};
