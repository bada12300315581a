//! QR Track - traceability backend for railway track fittings
//!
//! Tracks fittings (elastic rail clips, liners, pads, sleepers) from the
//! supply order through manufacturing batches to the QR code marked on
//! each piece, and records installations, inspections and maintenance
//! against that code.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **services**: Application use cases and business logic
//! - **infra**: Database, migrations and repositories
//! - **api**: HTTP handlers, extractors and routes
//! - **types**: Shared response types
//! - **utils**: QR image rendering
//!
//! Domain entities live in the `domain` crate, errors and shared
//! configuration in the `common` crate.
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//!
//! # Check a scanned payload offline
//! cargo run -- qr parse QRTF_<batch>_000001_<digest>
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use common::{AppError, AppResult};
pub use config::Config;
