//! CLI command implementations

pub mod config;
pub mod health;
pub mod status;
