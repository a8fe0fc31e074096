//! Add-on Engine Library
//!
//! Policy and identity layer of the add-on supervisor: security rating,
//! repository ids, the install-state guard and data purge. It is used by the
//! `addonctl` binary and by integration tests.

/// Configuration management module
pub mod config;

/// Security rating module
pub mod security;

/// Repository identity module
pub mod repository;

/// Install-state guard module
pub mod guard;

/// Add-on data purge module
pub mod purge;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
