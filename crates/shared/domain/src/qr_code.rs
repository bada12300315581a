//! QR code records, scan logs and the read models built around them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;
use crate::inspection::Inspection;
use crate::installation::{Installation, InstallationStatus};
use crate::maintenance::MaintenanceRecord;
use crate::supply::{FittingBatch, FittingType};

string_enum! {
    /// Lifecycle of a QR code from generation to retirement
    pub enum QrCodeStatus ("QR code status") {
        #[default]
        Generated => "generated",
        Printed => "printed",
        Verified => "verified",
        Rejected => "rejected",
        NeedsReprint => "needs_reprint",
        Installed => "installed",
        InService => "in_service",
        MaintenanceDue => "maintenance_due",
        Replaced => "replaced",
        Retired => "retired",
    }
}

string_enum! {
    /// Outcome of a print quality verification
    pub enum VerificationStatus ("verification status") {
        #[default]
        Verified => "verified",
        Rejected => "rejected",
        NeedsReprint => "needs_reprint",
    }
}

impl From<VerificationStatus> for QrCodeStatus {
    fn from(status: VerificationStatus) -> Self {
        match status {
            VerificationStatus::Verified => QrCodeStatus::Verified,
            VerificationStatus::Rejected => QrCodeStatus::Rejected,
            VerificationStatus::NeedsReprint => QrCodeStatus::NeedsReprint,
        }
    }
}

impl From<InstallationStatus> for QrCodeStatus {
    fn from(status: InstallationStatus) -> Self {
        match status {
            InstallationStatus::Installed => QrCodeStatus::Installed,
            InstallationStatus::InService => QrCodeStatus::InService,
            InstallationStatus::MaintenanceDue => QrCodeStatus::MaintenanceDue,
            InstallationStatus::Replaced => QrCodeStatus::Replaced,
            InstallationStatus::Retired => QrCodeStatus::Retired,
        }
    }
}

/// A QR code issued for one fitting of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QrCode {
    pub id: Uuid,
    /// Encoded payload, unique across the system
    #[cfg_attr(
        feature = "openapi",
        schema(example = "QRTF_6f1c2d3e4a5b4c6d8e7f901a2b3c4d5e_000001_9c1e2f3a")
    )]
    pub code: String,
    pub batch_id: Uuid,
    pub sequence_number: u32,
    pub status: QrCodeStatus,
    pub marking_machine_id: Option<String>,
    pub marking_operator_id: Option<String>,
    pub generated_at: DateTime<Utc>,
    pub verification_status: Option<VerificationStatus>,
    pub print_quality_score: Option<f64>,
    pub verification_remarks: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTime<Utc>>,
    pub installed_at: Option<DateTime<Utc>>,
    pub last_scanned_at: Option<DateTime<Utc>>,
    pub last_scanned_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for one code of a generated batch
#[derive(Debug, Clone, PartialEq)]
pub struct NewQrCode {
    pub code: String,
    pub batch_id: Uuid,
    pub sequence_number: u32,
    pub marking_machine_id: Option<String>,
    pub marking_operator_id: Option<String>,
}

/// Print quality verification submitted for a code
#[derive(Debug, Clone, PartialEq)]
pub struct QrVerification {
    pub status: VerificationStatus,
    pub print_quality_score: Option<f64>,
    pub remarks: Option<String>,
    pub verified_by: Option<String>,
}

/// One recorded scan of a QR code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ScanLog {
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub code: String,
    pub scanned_by: Option<String>,
    pub scan_location: Option<String>,
    pub scan_coordinates: Option<Coordinates>,
    pub scan_purpose: String,
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub device_info: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub scanned_at: DateTime<Utc>,
}

/// Scan data captured from the client and the request
#[derive(Debug, Clone, PartialEq)]
pub struct NewScan {
    pub scanned_by: Option<String>,
    pub scan_location: Option<String>,
    pub scan_coordinates: Option<Coordinates>,
    pub scan_purpose: String,
    pub device_info: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Result of a batch generation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct GeneratedBatch {
    pub qr_codes: Vec<QrCode>,
    pub batch_summary: BatchSummary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub total_generated: u32,
    pub first_sequence: u32,
    pub last_sequence: u32,
    /// Codes issued for the batch including this request
    pub batch_qr_code_count: u32,
    pub generated_at: DateTime<Utc>,
}

/// A QR code with the records needed to identify the fitting in the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QrCodeDetails {
    pub qr_code: QrCode,
    pub batch: Option<FittingBatch>,
    pub fitting_type: Option<FittingType>,
    pub installation: Option<Installation>,
    pub last_inspection: Option<Inspection>,
}

/// Offline bundle for field devices: details plus recent activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QrCodeHistory {
    pub details: QrCodeDetails,
    pub recent_scans: Vec<ScanLog>,
    pub inspections: Vec<Inspection>,
    pub maintenance_records: Vec<MaintenanceRecord>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_maps_onto_code_status() {
        assert_eq!(
            QrCodeStatus::from(VerificationStatus::NeedsReprint),
            QrCodeStatus::NeedsReprint
        );
        assert_eq!(
            QrCodeStatus::from(VerificationStatus::Verified),
            QrCodeStatus::Verified
        );
    }

    #[test]
    fn installation_status_mirrors_onto_code_status() {
        for status in InstallationStatus::ALL {
            assert_eq!(QrCodeStatus::from(*status).as_str(), status.as_str());
        }
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&QrCodeStatus::MaintenanceDue).unwrap();
        assert_eq!(json, "\"maintenance_due\"");
    }
}
