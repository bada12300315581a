//! Application configuration.
//!
//! `Config` is read from the environment (and `.env`) at start-up; server,
//! database and QR issuing defaults live in `constants`.

mod constants;
mod settings;

pub use constants::*;
pub use settings::Config;
