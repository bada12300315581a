//! Inspection service.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{Inspection, InspectionCompletion, NewInspection};

use super::hierarchy_service::validate_coordinates;
use crate::infra::{InspectionRepository, QrCodeRepository};

/// Inspection service trait for dependency injection.
#[async_trait]
pub trait InspectionService: Send + Sync {
    async fn create(&self, inspection: NewInspection) -> AppResult<Inspection>;

    async fn get(&self, id: Uuid) -> AppResult<Inspection>;

    /// Record the inspector's verdict. Only in-progress inspections complete.
    async fn complete(&self, id: Uuid, completion: InspectionCompletion) -> AppResult<Inspection>;
}

pub struct InspectionManager {
    inspections: Arc<dyn InspectionRepository>,
    qr_codes: Arc<dyn QrCodeRepository>,
}

impl InspectionManager {
    pub fn new(
        inspections: Arc<dyn InspectionRepository>,
        qr_codes: Arc<dyn QrCodeRepository>,
    ) -> Self {
        Self {
            inspections,
            qr_codes,
        }
    }
}

#[async_trait]
impl InspectionService for InspectionManager {
    async fn create(&self, inspection: NewInspection) -> AppResult<Inspection> {
        validate_coordinates(inspection.coordinates.as_ref())?;

        let qr_code = self
            .qr_codes
            .find_by_id(inspection.qr_code_id)
            .await?
            .ok_or_not_found("QR code")?;

        let inspection = self.inspections.create(inspection).await?;
        tracing::info!(
            inspection_id = %inspection.id,
            qr_code = %qr_code.code,
            inspection_type = %inspection.inspection_type,
            failed_items = inspection.failed_items(),
            "Inspection started"
        );
        Ok(inspection)
    }

    async fn get(&self, id: Uuid) -> AppResult<Inspection> {
        self.inspections
            .find_by_id(id)
            .await?
            .ok_or_not_found("Inspection")
    }

    async fn complete(&self, id: Uuid, completion: InspectionCompletion) -> AppResult<Inspection> {
        let inspection = self.get(id).await?;
        inspection.ensure_completable()?;

        let recommendation = completion.recommendation;
        let inspection = self.inspections.complete(id, completion).await?;
        tracing::info!(
            inspection_id = %id,
            recommendation = %recommendation,
            "Inspection completed"
        );
        Ok(inspection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{MockInspectionRepository, MockQrCodeRepository};
    use chrono::Utc;
    use common::AppError;
    use domain::{InspectionStatus, InspectionType, Recommendation};

    fn inspection(id: Uuid, status: InspectionStatus) -> Inspection {
        let now = Utc::now();
        Inspection {
            id,
            qr_code_id: Uuid::new_v4(),
            inspection_type: InspectionType::Routine,
            status,
            inspector_id: Some("INS-7".to_string()),
            visual_condition: None,
            checklist: Vec::new(),
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

    fn completion() -> InspectionCompletion {
        InspectionCompletion {
            recommendation: Recommendation::Pass,
            next_inspection_due: None,
            remarks: None,
        }
    }

    #[tokio::test]
    async fn completes_in_progress_inspection() {
        let mut repo = MockInspectionRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(inspection(id, InspectionStatus::InProgress))));
        repo.expect_complete().times(1).returning(|id, completion| {
            let mut done = inspection(id, InspectionStatus::Completed);
            done.recommendation = Some(completion.recommendation);
            done.completed_at = Some(Utc::now());
            Ok(done)
        });

        let service = InspectionManager::new(Arc::new(repo), Arc::new(MockQrCodeRepository::new()));
        let done = service.complete(Uuid::new_v4(), completion()).await.unwrap();

        assert_eq!(done.status, InspectionStatus::Completed);
        assert_eq!(done.recommendation, Some(Recommendation::Pass));
    }

    #[tokio::test]
    async fn completed_inspection_cannot_complete_again() {
        let mut repo = MockInspectionRepository::new();
        repo.expect_find_by_id()
            .returning(|id| Ok(Some(inspection(id, InspectionStatus::Completed))));
        repo.expect_complete().never();

        let service = InspectionManager::new(Arc::new(repo), Arc::new(MockQrCodeRepository::new()));
        let err = service.complete(Uuid::new_v4(), completion()).await.unwrap_err();

        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn inspection_of_unknown_code_is_not_found() {
        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes.expect_find_by_id().returning(|_| Ok(None));
        let mut repo = MockInspectionRepository::new();
        repo.expect_create().never();

        let service = InspectionManager::new(Arc::new(repo), Arc::new(qr_codes));
        let err = service
            .create(NewInspection {
                qr_code_id: Uuid::new_v4(),
                inspection_type: InspectionType::Routine,
                inspector_id: None,
                visual_condition: None,
                checklist: Vec::new(),
                coordinates: None,
                remarks: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(entity) if entity == "QR code"));
    }
}
