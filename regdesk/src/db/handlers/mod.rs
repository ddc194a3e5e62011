//! Store implementations for database and filesystem access.
//!
//! - [`registrations`]: registration record store (trait + PostgreSQL implementation)
//! - [`documents`]: identity-document storage (trait + local-disk implementation)

pub mod documents;
pub mod registrations;

pub use documents::{DocumentStorage, LocalDocumentStorage};
pub use registrations::{PgRegistrationStore, RegistrationStore};
