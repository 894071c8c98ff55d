//! Shared types, errors, and configuration for Splitledger.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for projects and expenses
//! - Decimal rounding helpers used at display boundaries
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
