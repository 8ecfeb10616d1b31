//! Shared types, errors, and configuration for Gestor.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with decimal precision and explicit rounding
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LedgerConfig, LoggingConfig};
pub use error::{AppError, AppResult};

#[cfg(test)]
mod error_tests;
