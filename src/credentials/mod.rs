//! Credentials module — an open-ended list of named credentials.
//!
//! This module provides:
//! - `CredentialItem`, `NewCredential` and `CredentialDatabase` (`item`)
//! - Discovery from legacy secrets and the environment (`import`)
//! - `CredentialStore` for reading and writing `credentials.json` (`store`)

pub mod import;
pub mod item;
pub mod store;

pub use import::LegacySecrets;
pub use item::{CredentialDatabase, CredentialItem, CredentialSource, NewCredential};
pub use store::CredentialStore;
