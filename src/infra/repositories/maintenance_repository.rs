//! Maintenance record repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::base::find_mapped;
use super::entities::maintenance_record::{self, PartsReplaced};
use common::{AppResult, OptionExt};
use domain::{
    maintenance::next_maintenance_due, MaintenanceRecord, MaintenanceStatus, NewMaintenanceRecord,
    QualityCheck,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Maintenance repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Persist a record; cost, quality-check requirement and the next due
    /// date are derived from the input.
    async fn create(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>>;

    async fn list_for_qr_code(
        &self,
        qr_code_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<MaintenanceRecord>>;

    async fn record_quality_check(&self, id: Uuid, check: QualityCheck)
        -> AppResult<MaintenanceRecord>;
}

/// Concrete implementation of MaintenanceRepository
pub struct MaintenanceStore {
    db: DatabaseConnection,
}

impl MaintenanceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MaintenanceRepository for MaintenanceStore {
    async fn create(&self, new: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let now = chrono::Utc::now();
        let total_cost = new.total_cost();
        let active_model = maintenance_record::ActiveModel {
            id: Set(Uuid::new_v4()),
            qr_code_id: Set(new.qr_code_id),
            maintenance_type: Set(new.maintenance_type.to_string()),
            status: Set(MaintenanceStatus::Completed.to_string()),
            work_description: Set(new.work_description),
            performed_by: Set(new.performed_by),
            parts_replaced: Set(PartsReplaced(new.parts_replaced)),
            labor_hours: Set(new.labor_hours),
            total_cost: Set(total_cost),
            remarks: Set(new.remarks),
            maintenance_date: Set(now),
            next_maintenance_due: Set(Some(next_maintenance_due(now))),
            quality_check_required: Set(new.maintenance_type.requires_quality_check()),
            quality_check_passed: Set(None),
            quality_checked_at: Set(None),
            quality_remarks: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(MaintenanceRecord::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MaintenanceRecord>> {
        find_mapped::<maintenance_record::Entity, _, _>(&self.db, id).await
    }

    async fn list_for_qr_code(
        &self,
        qr_code_id: Uuid,
        limit: u64,
    ) -> AppResult<Vec<MaintenanceRecord>> {
        let models = maintenance_record::Entity::find()
            .filter(maintenance_record::Column::QrCodeId.eq(qr_code_id))
            .order_by_desc(maintenance_record::Column::MaintenanceDate)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(MaintenanceRecord::from).collect())
    }

    async fn record_quality_check(
        &self,
        id: Uuid,
        check: QualityCheck,
    ) -> AppResult<MaintenanceRecord> {
        let existing = maintenance_record::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Maintenance record")?;

        let now = chrono::Utc::now();
        let mut active: maintenance_record::ActiveModel = existing.into();
        active.status = Set(check.resulting_status().to_string());
        active.quality_check_passed = Set(Some(check.passed));
        active.quality_checked_at = Set(Some(now));
        if check.remarks.is_some() {
            active.quality_remarks = Set(check.remarks);
        }
        if let Some(due) = check.next_maintenance_due {
            active.next_maintenance_due = Set(Some(due));
        }
        active.updated_at = Set(now);

        let model = active.update(&self.db).await?;
        Ok(MaintenanceRecord::from(model))
    }
}
