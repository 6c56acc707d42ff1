//! Secrets module — the fixed set of named API secrets.
//!
//! This module provides:
//! - `SecretField` and the `FieldUpdate` tri-state (`field`)
//! - `SecretDocument` and `SecretsUpdate` (`document`)
//! - `SecretStore` for reading and writing `secrets.json` (`store`)

pub mod document;
pub mod field;
pub mod store;

pub use document::{SecretDocument, SecretsUpdate};
pub use field::{FieldUpdate, SecretField};
pub use store::SecretStore;
