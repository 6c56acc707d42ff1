pub mod cli;
pub mod config;
pub mod credentials;
pub mod errors;
pub mod redact;
pub mod secrets;
pub mod status;
pub mod storage;
pub mod timestamp;
