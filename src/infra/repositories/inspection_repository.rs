//! Inspection repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::base::find_mapped;
use super::entities::{
    self,
    inspection::{self, Checklist},
};
use common::{AppResult, OptionExt};
use domain::{Inspection, InspectionCompletion, InspectionStatus, NewInspection};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Inspection repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InspectionRepository: Send + Sync {
    async fn create(&self, inspection: NewInspection) -> AppResult<Inspection>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Inspection>>;

    /// Latest inspection by inspection date
    async fn latest_for_qr_code(&self, qr_code_id: Uuid) -> AppResult<Option<Inspection>>;

    async fn list_for_qr_code(&self, qr_code_id: Uuid, limit: u64) -> AppResult<Vec<Inspection>>;

    async fn complete(&self, id: Uuid, completion: InspectionCompletion) -> AppResult<Inspection>;
}

/// Concrete implementation of InspectionRepository
pub struct InspectionStore {
    db: DatabaseConnection,
}

impl InspectionStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InspectionRepository for InspectionStore {
    async fn create(&self, new: NewInspection) -> AppResult<Inspection> {
        let now = chrono::Utc::now();
        let active_model = inspection::ActiveModel {
            id: Set(Uuid::new_v4()),
            qr_code_id: Set(new.qr_code_id),
            inspection_type: Set(new.inspection_type.to_string()),
            status: Set(InspectionStatus::InProgress.to_string()),
            inspector_id: Set(new.inspector_id),
            visual_condition: Set(new.visual_condition.map(|c| c.to_string())),
            checklist: Set(Checklist(new.checklist)),
            latitude: Set(entities::latitude(new.coordinates)),
            longitude: Set(entities::longitude(new.coordinates)),
            remarks: Set(new.remarks),
            recommendation: Set(None),
            next_inspection_due: Set(None),
            inspection_date: Set(now),
            completed_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Inspection::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Inspection>> {
        find_mapped::<inspection::Entity, _, _>(&self.db, id).await
    }

    async fn latest_for_qr_code(&self, qr_code_id: Uuid) -> AppResult<Option<Inspection>> {
        let model = inspection::Entity::find()
            .filter(inspection::Column::QrCodeId.eq(qr_code_id))
            .order_by_desc(inspection::Column::InspectionDate)
            .one(&self.db)
            .await?;

        Ok(model.map(Inspection::from))
    }

    async fn list_for_qr_code(&self, qr_code_id: Uuid, limit: u64) -> AppResult<Vec<Inspection>> {
        let models = inspection::Entity::find()
            .filter(inspection::Column::QrCodeId.eq(qr_code_id))
            .order_by_desc(inspection::Column::InspectionDate)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Inspection::from).collect())
    }

    async fn complete(&self, id: Uuid, completion: InspectionCompletion) -> AppResult<Inspection> {
        let existing = inspection::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Inspection")?;

        let now = chrono::Utc::now();
        let mut active: inspection::ActiveModel = existing.into();
        active.status = Set(InspectionStatus::Completed.to_string());
        active.recommendation = Set(Some(completion.recommendation.to_string()));
        active.next_inspection_due = Set(completion.next_inspection_due);
        if completion.remarks.is_some() {
            active.remarks = Set(completion.remarks);
        }
        active.completed_at = Set(Some(now));
        active.updated_at = Set(now);

        let model = active.update(&self.db).await?;
        Ok(Inspection::from(model))
    }
}
