//! Status module — one short sentence per tracked project.

pub mod document;
pub mod store;

pub use document::{sanitize, Project, StatusDocument, StatusUpdate, EMPTY_SENTENCE};
pub use store::StatusStore;
