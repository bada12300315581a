//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// QR Payload Format
// =============================================================================

/// Fixed prefix of every QR payload issued by this system
pub const QR_PREFIX: &str = "QRTF";

/// Separator between payload parts
pub const QR_SEPARATOR: char = '_';

/// Number of `_`-separated parts in a payload (prefix, batch, sequence, digest)
pub const QR_PART_COUNT: usize = 4;

/// Zero-padded width of the sequence part
pub const QR_SEQUENCE_WIDTH: usize = 6;

/// Highest sequence number representable in the payload
pub const MAX_QR_SEQUENCE: u32 = 999_999;

/// Number of hex characters kept from the SHA-256 digest
pub const QR_DIGEST_LENGTH: usize = 8;

/// Minimum length of a QR code string accepted on any endpoint
pub const MIN_QR_CODE_LENGTH: usize = 10;

/// Maximum length of a QR code string accepted on any endpoint
pub const MAX_QR_CODE_LENGTH: usize = 100;

/// Check that a string only uses characters allowed in a QR code
/// (ASCII letters, digits, `-` and `_`).
pub fn is_valid_qr_charset(code: &str) -> bool {
    code.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

// =============================================================================
// Batch Generation
// =============================================================================

/// Default upper bound on codes generated by a single request
pub const DEFAULT_MAX_BATCH_QUANTITY: u32 = 10_000;

// =============================================================================
// Field Records
// =============================================================================

/// Warranty applied when an installed fitting has no known fitting type
pub const DEFAULT_WARRANTY_MONTHS: u32 = 24;

/// Days until the next maintenance falls due after a maintenance record
pub const MAINTENANCE_INTERVAL_DAYS: i64 = 90;

/// Scan purpose recorded when the client does not supply one
pub const DEFAULT_SCAN_PURPOSE: &str = "general";

/// Number of entries per section in a QR code history bundle
pub const HISTORY_LIMIT: u64 = 20;

/// Currency of supply order amounts
pub const DEFAULT_CURRENCY: &str = "INR";

// =============================================================================
// Coordinates
// =============================================================================

pub const MIN_LATITUDE: f64 = -90.0;
pub const MAX_LATITUDE: f64 = 90.0;
pub const MIN_LONGITUDE: f64 = -180.0;
pub const MAX_LONGITUDE: f64 = 180.0;
