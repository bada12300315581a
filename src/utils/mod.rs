//! Utility functions and helpers

pub mod qr_image;
