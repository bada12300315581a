//! Field patterns shared by request bodies.

use once_cell::sync::Lazy;
use regex::Regex;

/// Zone, division, station, manufacturer and fitting type codes
pub static UPPERCASE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z0-9]+$").expect("valid code regex"));

/// Order numbers, batch numbers and fitting models
pub static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid identifier regex"));

/// Indian postal code
pub static PINCODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("valid pincode regex"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_must_be_uppercase() {
        assert!(UPPERCASE_CODE.is_match("SR"));
        assert!(UPPERCASE_CODE.is_match("NR2"));
        assert!(!UPPERCASE_CODE.is_match("Sr"));
        assert!(!UPPERCASE_CODE.is_match("S-R"));
    }

    #[test]
    fn identifiers_allow_dash_and_underscore() {
        assert!(IDENTIFIER.is_match("PO-2024_001"));
        assert!(!IDENTIFIER.is_match("PO 2024"));
    }

    #[test]
    fn pincode_is_six_digits() {
        assert!(PINCODE.is_match("600001"));
        assert!(!PINCODE.is_match("60001"));
        assert!(!PINCODE.is_match("60000A"));
    }
}
