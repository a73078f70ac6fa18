pub mod forms;
pub(crate) mod http;
pub mod notice;
pub mod portal;
pub mod registration;
pub mod reports;
mod role;
pub mod sequence;
pub mod store;
pub mod vacancies;

pub use forms::{Accepted, FieldErrors, FormBuffer, UnknownField};
pub use notice::{Notice, NoticeBoard, NoticeKind, NoticeTicket};
pub use portal::Portal;
pub use role::{Role, UnknownRole};
pub use store::RepositoryError;
