//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - Unified error handling rendered as the API error envelope
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
