//! Fitting installations on the track.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::geo::Coordinates;

string_enum! {
    /// Service state of an installed fitting
    pub enum InstallationStatus ("installation status") {
        #[default]
        Installed => "installed",
        InService => "in_service",
        MaintenanceDue => "maintenance_due",
        Replaced => "replaced",
        Retired => "retired",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Installation {
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub zone_id: Uuid,
    pub division_id: Option<Uuid>,
    pub station_id: Option<Uuid>,
    pub track_section: String,
    pub kilometer_post: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub status: InstallationStatus,
    pub installed_by: Option<String>,
    pub installation_date: DateTime<Utc>,
    pub warranty_start: DateTime<Utc>,
    pub warranty_end: DateTime<Utc>,
    pub replaced_at: Option<DateTime<Utc>>,
    pub retired_at: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Installation request data
#[derive(Debug, Clone, PartialEq)]
pub struct NewInstallation {
    pub qr_code_id: Uuid,
    pub zone_id: Uuid,
    pub division_id: Option<Uuid>,
    pub station_id: Option<Uuid>,
    pub track_section: String,
    pub kilometer_post: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub installed_by: Option<String>,
    pub remarks: Option<String>,
}

/// Compute the end of a warranty that starts at `start`.
pub fn warranty_end(start: DateTime<Utc>, months: u32) -> DomainResult<DateTime<Utc>> {
    start
        .checked_add_months(Months::new(months))
        .ok_or_else(|| DomainError::validation("Warranty period is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn warranty_end_adds_calendar_months() {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 10, 0, 0).unwrap();
        let end = warranty_end(start, 24).unwrap();

        assert_eq!(end, Utc.with_ymd_and_hms(2026, 1, 31, 10, 0, 0).unwrap());
    }

    #[test]
    fn warranty_end_clamps_to_month_end() {
        let start = Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap();
        let end = warranty_end(start, 1).unwrap();

        assert_eq!(end, Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap());
    }
}
