//! Maintenance work carried out on installed fittings.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MAINTENANCE_INTERVAL_DAYS;
use crate::error::{DomainError, DomainResult};

string_enum! {
    pub enum MaintenanceType ("maintenance type") {
        Preventive => "preventive",
        #[default]
        Corrective => "corrective",
        Emergency => "emergency",
        Routine => "routine",
    }
}

impl MaintenanceType {
    /// Corrective and emergency work must be signed off by a quality check.
    pub fn requires_quality_check(&self) -> bool {
        matches!(self, MaintenanceType::Corrective | MaintenanceType::Emergency)
    }
}

string_enum! {
    pub enum MaintenanceStatus ("maintenance status") {
        #[default]
        Completed => "completed",
        Verified => "verified",
        ReworkRequired => "rework_required",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PartReplaced {
    pub part_name: String,
    pub part_number: Option<String>,
    pub quantity: u32,
    pub unit_cost: f64,
}

impl PartReplaced {
    pub fn cost(&self) -> f64 {
        f64::from(self.quantity) * self.unit_cost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MaintenanceRecord {
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub maintenance_type: MaintenanceType,
    pub status: MaintenanceStatus,
    pub work_description: String,
    pub performed_by: Option<String>,
    pub parts_replaced: Vec<PartReplaced>,
    pub labor_hours: Option<f64>,
    pub total_cost: f64,
    pub remarks: Option<String>,
    pub maintenance_date: DateTime<Utc>,
    pub next_maintenance_due: Option<NaiveDate>,
    pub quality_check_required: bool,
    pub quality_check_passed: Option<bool>,
    pub quality_checked_at: Option<DateTime<Utc>>,
    pub quality_remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Ensure a quality check may be recorded against this record.
    pub fn ensure_quality_check_required(&self) -> DomainResult<()> {
        if !self.quality_check_required {
            return Err(DomainError::invalid_state(
                "Quality check is not required for this maintenance record",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenanceRecord {
    pub qr_code_id: Uuid,
    pub maintenance_type: MaintenanceType,
    pub work_description: String,
    pub performed_by: Option<String>,
    pub parts_replaced: Vec<PartReplaced>,
    pub labor_hours: Option<f64>,
    pub remarks: Option<String>,
}

impl NewMaintenanceRecord {
    pub fn total_cost(&self) -> f64 {
        self.parts_replaced.iter().map(PartReplaced::cost).sum()
    }
}

/// Quality check outcome for a maintenance record
#[derive(Debug, Clone, PartialEq)]
pub struct QualityCheck {
    pub passed: bool,
    pub remarks: Option<String>,
    pub next_maintenance_due: Option<NaiveDate>,
}

impl QualityCheck {
    pub fn resulting_status(&self) -> MaintenanceStatus {
        if self.passed {
            MaintenanceStatus::Verified
        } else {
            MaintenanceStatus::ReworkRequired
        }
    }
}

/// Date the next maintenance falls due after work done at `performed_at`.
pub fn next_maintenance_due(performed_at: DateTime<Utc>) -> NaiveDate {
    (performed_at + Duration::days(MAINTENANCE_INTERVAL_DAYS)).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn total_cost_multiplies_quantity() {
        let record = NewMaintenanceRecord {
            qr_code_id: Uuid::new_v4(),
            maintenance_type: MaintenanceType::Corrective,
            work_description: "Replaced worn liner".to_string(),
            performed_by: None,
            parts_replaced: vec![
                PartReplaced {
                    part_name: "GFN liner".to_string(),
                    part_number: None,
                    quantity: 4,
                    unit_cost: 35.5,
                },
                PartReplaced {
                    part_name: "ERC Mk-III".to_string(),
                    part_number: Some("ERC-3".to_string()),
                    quantity: 2,
                    unit_cost: 120.0,
                },
            ],
            labor_hours: Some(1.5),
            remarks: None,
        };

        assert_eq!(record.total_cost(), 382.0);
    }

    #[test]
    fn quality_check_required_for_corrective_and_emergency() {
        assert!(MaintenanceType::Corrective.requires_quality_check());
        assert!(MaintenanceType::Emergency.requires_quality_check());
        assert!(!MaintenanceType::Preventive.requires_quality_check());
        assert!(!MaintenanceType::Routine.requires_quality_check());
    }

    #[test]
    fn next_due_is_ninety_days_out() {
        let performed = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        assert_eq!(
            next_maintenance_due(performed),
            NaiveDate::from_ymd_opt(2024, 5, 30).unwrap()
        );
    }

    #[test]
    fn failed_check_requires_rework() {
        let check = QualityCheck {
            passed: false,
            remarks: None,
            next_maintenance_due: None,
        };
        assert_eq!(check.resulting_status(), MaintenanceStatus::ReworkRequired);
    }
}
