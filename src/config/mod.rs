//! Configuration: `.kiwy-hq.toml` settings and environment lookup.

pub mod env;
pub mod settings;

pub use env::{EnvSource, ProcessEnv};
pub use settings::{Settings, StorePaths};
