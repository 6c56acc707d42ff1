//! One module per top-level subcommand.

pub mod creds;
pub mod secrets;
pub mod status;
