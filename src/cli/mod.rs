//! CLI module - Command-line interface for the application.
//!
//! Provides commands for:
//! - `serve` - Start the HTTP server
//! - `migrate` - Database migrations
//! - `qr` - Offline payload parsing and rendering

pub mod args;

pub use args::{Cli, Commands};
