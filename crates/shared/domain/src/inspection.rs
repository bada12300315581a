//! Field inspections of installed fittings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, DomainResult};
use crate::geo::Coordinates;

string_enum! {
    pub enum InspectionType ("inspection type") {
        #[default]
        Routine => "routine",
        Special => "special",
        Emergency => "emergency",
        PostMaintenance => "post_maintenance",
    }
}

string_enum! {
    pub enum InspectionStatus ("inspection status") {
        #[default]
        InProgress => "in_progress",
        Completed => "completed",
    }
}

string_enum! {
    /// Condition observed by the inspector
    pub enum VisualCondition ("visual condition") {
        #[default]
        Good => "good",
        Fair => "fair",
        Poor => "poor",
        Critical => "critical",
    }
}

string_enum! {
    pub enum ChecklistStatus ("checklist status") {
        Pass => "pass",
        Fail => "fail",
        #[default]
        NotApplicable => "na",
    }
}

string_enum! {
    /// Inspector's verdict recorded on completion
    pub enum Recommendation ("recommendation") {
        #[default]
        Pass => "pass",
        Fail => "fail",
        ConditionalPass => "conditional_pass",
        NeedsAttention => "needs_attention",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ChecklistItem {
    pub item: String,
    pub status: ChecklistStatus,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Inspection {
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub inspection_type: InspectionType,
    pub status: InspectionStatus,
    pub inspector_id: Option<String>,
    pub visual_condition: Option<VisualCondition>,
    pub checklist: Vec<ChecklistItem>,
    pub coordinates: Option<Coordinates>,
    pub remarks: Option<String>,
    pub recommendation: Option<Recommendation>,
    pub next_inspection_due: Option<NaiveDate>,
    pub inspection_date: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inspection {
    /// Number of checklist items that failed
    pub fn failed_items(&self) -> usize {
        self.checklist
            .iter()
            .filter(|item| item.status == ChecklistStatus::Fail)
            .count()
    }

    /// Ensure the inspection can still be completed.
    pub fn ensure_completable(&self) -> DomainResult<()> {
        match self.status {
            InspectionStatus::InProgress => Ok(()),
            InspectionStatus::Completed => Err(DomainError::invalid_state(
                "Inspection is already completed",
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewInspection {
    pub qr_code_id: Uuid,
    pub inspection_type: InspectionType,
    pub inspector_id: Option<String>,
    pub visual_condition: Option<VisualCondition>,
    pub checklist: Vec<ChecklistItem>,
    pub coordinates: Option<Coordinates>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectionCompletion {
    pub recommendation: Recommendation,
    pub next_inspection_due: Option<NaiveDate>,
    pub remarks: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspection(status: InspectionStatus) -> Inspection {
        let now = Utc::now();
        Inspection {
            id: Uuid::new_v4(),
            qr_code_id: Uuid::new_v4(),
            inspection_type: InspectionType::Routine,
            status,
            inspector_id: None,
            visual_condition: Some(VisualCondition::Fair),
            checklist: vec![
                ChecklistItem {
                    item: "Clip seated".to_string(),
                    status: ChecklistStatus::Pass,
                    remarks: None,
                },
                ChecklistItem {
                    item: "Toe load".to_string(),
                    status: ChecklistStatus::Fail,
                    remarks: Some("below tolerance".to_string()),
                },
            ],
            coordinates: None,
            remarks: None,
            recommendation: None,
            next_inspection_due: None,
            inspection_date: now,
            completed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn counts_failed_items() {
        assert_eq!(inspection(InspectionStatus::InProgress).failed_items(), 1);
    }

    #[test]
    fn only_in_progress_is_completable() {
        assert!(inspection(InspectionStatus::InProgress)
            .ensure_completable()
            .is_ok());
        assert!(matches!(
            inspection(InspectionStatus::Completed).ensure_completable(),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn checklist_status_uses_short_na() {
        assert_eq!("na".parse::<ChecklistStatus>(), Ok(ChecklistStatus::NotApplicable));
    }
}
