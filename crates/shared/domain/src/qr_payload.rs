//! QR payload value object.
//!
//! A payload is the text encoded into a fitting's QR symbol:
//!
//! ```text
//! QRTF_{batch}_{sequence}_{digest}
//! ```
//!
//! - `batch` is the fitting batch UUID in simple form (32 lowercase hex chars)
//! - `sequence` is the 1-based position within the batch, zero-padded to 6 digits
//! - `digest` is the first 8 hex chars of `SHA-256("{secret}|{batch}|{sequence}")`
//!
//! The batch and sequence make every payload unique by construction. The
//! digest lets a scanner holding the signing key reject forged labels
//! without a database round trip.

use std::fmt;
use std::str::FromStr;

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::constants::{
    is_valid_qr_charset, MAX_QR_CODE_LENGTH, MAX_QR_SEQUENCE, MIN_QR_CODE_LENGTH,
    QR_DIGEST_LENGTH, QR_PART_COUNT, QR_PREFIX, QR_SEPARATOR, QR_SEQUENCE_WIDTH,
};
use crate::error::{DomainError, DomainResult};

const BATCH_PART_LENGTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QrPayload {
    batch_id: Uuid,
    sequence: u32,
    digest: String,
}

impl QrPayload {
    /// Issue the payload for one position of a batch.
    pub fn issue(batch_id: Uuid, sequence: u32, secret: &str) -> DomainResult<Self> {
        check_sequence(sequence)?;
        Ok(Self {
            batch_id,
            sequence,
            digest: compute_digest(secret, batch_id, sequence),
        })
    }

    /// Parse a scanned string, checking structure only.
    ///
    /// Use [`QrPayload::verify_digest`] to check authenticity.
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let len = raw.len();
        if !(MIN_QR_CODE_LENGTH..=MAX_QR_CODE_LENGTH).contains(&len) {
            return Err(DomainError::invalid_qr(format!(
                "length must be between {} and {} characters",
                MIN_QR_CODE_LENGTH, MAX_QR_CODE_LENGTH
            )));
        }
        if !is_valid_qr_charset(raw) {
            return Err(DomainError::invalid_qr(
                "only letters, digits, hyphens and underscores are allowed",
            ));
        }

        let parts: Vec<&str> = raw.split(QR_SEPARATOR).collect();
        if parts.len() != QR_PART_COUNT {
            return Err(DomainError::invalid_qr(format!(
                "expected {} parts separated by '{}', found {}",
                QR_PART_COUNT,
                QR_SEPARATOR,
                parts.len()
            )));
        }

        let (prefix, batch, sequence, digest) = (parts[0], parts[1], parts[2], parts[3]);

        if prefix != QR_PREFIX {
            return Err(DomainError::invalid_qr(format!(
                "prefix must be '{}'",
                QR_PREFIX
            )));
        }

        if batch.len() != BATCH_PART_LENGTH || !is_lower_hex(batch) {
            return Err(DomainError::invalid_qr(
                "batch part must be 32 lowercase hex characters",
            ));
        }
        let batch_id = Uuid::try_parse(batch)
            .map_err(|_| DomainError::invalid_qr("batch part is not a valid identifier"))?;

        if sequence.len() != QR_SEQUENCE_WIDTH || !sequence.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::invalid_qr(format!(
                "sequence part must be {} digits",
                QR_SEQUENCE_WIDTH
            )));
        }
        let sequence: u32 = sequence
            .parse()
            .map_err(|_| DomainError::invalid_qr("sequence part is not a number"))?;
        check_sequence(sequence).map_err(|e| DomainError::invalid_qr(e.to_string()))?;

        if digest.len() != QR_DIGEST_LENGTH || !is_lower_hex(digest) {
            return Err(DomainError::invalid_qr(format!(
                "digest part must be {} lowercase hex characters",
                QR_DIGEST_LENGTH
            )));
        }

        Ok(Self {
            batch_id,
            sequence,
            digest: digest.to_string(),
        })
    }

    /// Recompute the digest with `secret` and compare it to the embedded one.
    pub fn verify_digest(&self, secret: &str) -> bool {
        compute_digest(secret, self.batch_id, self.sequence) == self.digest
    }

    pub fn batch_id(&self) -> Uuid {
        self.batch_id
    }

    pub fn sequence(&self) -> u32 {
        self.sequence
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl fmt::Display for QrPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{prefix}{sep}{batch}{sep}{seq:0width$}{sep}{digest}",
            prefix = QR_PREFIX,
            sep = QR_SEPARATOR,
            batch = self.batch_id.simple(),
            seq = self.sequence,
            width = QR_SEQUENCE_WIDTH,
            digest = self.digest,
        )
    }
}

impl FromStr for QrPayload {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn check_sequence(sequence: u32) -> DomainResult<()> {
    if sequence == 0 || sequence > MAX_QR_SEQUENCE {
        return Err(DomainError::validation(format!(
            "Sequence number must be between 1 and {}",
            MAX_QR_SEQUENCE
        )));
    }
    Ok(())
}

fn compute_digest(secret: &str, batch_id: Uuid, sequence: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b"|");
    hasher.update(batch_id.simple().to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(format!("{:0width$}", sequence, width = QR_SEQUENCE_WIDTH).as_bytes());
    let mut digest = hex::encode(hasher.finalize());
    digest.truncate(QR_DIGEST_LENGTH);
    digest
}

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-key";

    fn batch() -> Uuid {
        Uuid::parse_str("6f1c2d3e-4a5b-4c6d-8e7f-901a2b3c4d5e").unwrap()
    }

    #[test]
    fn issued_payload_has_canonical_layout() {
        let payload = QrPayload::issue(batch(), 42, SECRET).unwrap();
        let text = payload.to_string();

        assert!(text.starts_with("QRTF_6f1c2d3e4a5b4c6d8e7f901a2b3c4d5e_000042_"));
        assert_eq!(text.len(), 4 + 1 + 32 + 1 + 6 + 1 + 8);
    }

    #[test]
    fn parse_accepts_issued_payload() {
        let issued = QrPayload::issue(batch(), 7, SECRET).unwrap();
        let parsed = QrPayload::parse(&issued.to_string()).unwrap();

        assert_eq!(parsed, issued);
        assert_eq!(parsed.batch_id(), batch());
        assert_eq!(parsed.sequence(), 7);
        assert!(parsed.verify_digest(SECRET));
    }

    #[test]
    fn digest_is_stable_per_position() {
        let a = QrPayload::issue(batch(), 1, SECRET).unwrap();
        let b = QrPayload::issue(batch(), 1, SECRET).unwrap();
        let c = QrPayload::issue(batch(), 2, SECRET).unwrap();

        assert_eq!(a.digest(), b.digest());
        assert_ne!(a.to_string(), c.to_string());
    }

    #[test]
    fn digest_fails_under_other_key() {
        let payload = QrPayload::issue(batch(), 1, SECRET).unwrap();
        assert!(!payload.verify_digest("another-key"));
    }

    #[test]
    fn issue_rejects_out_of_range_sequence() {
        assert!(QrPayload::issue(batch(), 0, SECRET).is_err());
        assert!(QrPayload::issue(batch(), MAX_QR_SEQUENCE + 1, SECRET).is_err());
        assert!(QrPayload::issue(batch(), MAX_QR_SEQUENCE, SECRET).is_ok());
    }

    #[test]
    fn parse_rejects_malformed_parts() {
        let good = QrPayload::issue(batch(), 3, SECRET).unwrap().to_string();
        let digest = &good[good.len() - 8..];
        let cases = [
            "QRTF_short".to_string(),
            good.replacen("QRTF", "QRXX", 1),
            format!("QRTF_{}_000003_{}", "zz".repeat(16), digest),
            format!("QRTF_{}_00003_{}", batch().simple(), digest),
            format!("QRTF_{}_000000_{}", batch().simple(), digest),
            format!("QRTF_{}_000003_{}", batch().simple(), "ABCDEF12"),
            format!("QRTF_{}_000003_{}_extra", batch().simple(), digest),
            format!("QRTF {}_000003_{}", batch().simple(), digest),
        ];

        for case in cases {
            let err = QrPayload::parse(&case).unwrap_err();
            assert!(
                matches!(err, DomainError::InvalidQrCode(_)),
                "expected rejection for {case}"
            );
        }
    }

    #[test]
    fn parse_rejects_overlong_input() {
        let long = format!("QRTF_{}", "a".repeat(120));
        assert!(QrPayload::parse(&long).is_err());
    }

    #[test]
    fn tampered_sequence_fails_digest() {
        let issued = QrPayload::issue(batch(), 10, SECRET).unwrap().to_string();
        let forged = issued.replace("_000010_", "_000011_");
        let parsed = QrPayload::parse(&forged).unwrap();

        assert!(!parsed.verify_digest(SECRET));
    }
}
