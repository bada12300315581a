//! Maintenance service - work records and their quality sign-off.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppResult, OptionExt};
use domain::{MaintenanceRecord, NewMaintenanceRecord, QualityCheck};

use crate::infra::{MaintenanceRepository, QrCodeRepository};

/// Maintenance service trait for dependency injection.
#[async_trait]
pub trait MaintenanceService: Send + Sync {
    async fn create(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord>;

    async fn get(&self, id: Uuid) -> AppResult<MaintenanceRecord>;

    /// Sign off a record that requires a quality check.
    async fn quality_check(&self, id: Uuid, check: QualityCheck) -> AppResult<MaintenanceRecord>;
}

pub struct MaintenanceManager {
    records: Arc<dyn MaintenanceRepository>,
    qr_codes: Arc<dyn QrCodeRepository>,
}

impl MaintenanceManager {
    pub fn new(
        records: Arc<dyn MaintenanceRepository>,
        qr_codes: Arc<dyn QrCodeRepository>,
    ) -> Self {
        Self { records, qr_codes }
    }
}

#[async_trait]
impl MaintenanceService for MaintenanceManager {
    async fn create(&self, record: NewMaintenanceRecord) -> AppResult<MaintenanceRecord> {
        let qr_code = self
            .qr_codes
            .find_by_id(record.qr_code_id)
            .await?
            .ok_or_not_found("QR code")?;

        let record = self.records.create(record).await?;
        tracing::info!(
            record_id = %record.id,
            qr_code = %qr_code.code,
            maintenance_type = %record.maintenance_type,
            total_cost = record.total_cost,
            quality_check_required = record.quality_check_required,
            "Maintenance recorded"
        );
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> AppResult<MaintenanceRecord> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_not_found("Maintenance record")
    }

    async fn quality_check(&self, id: Uuid, check: QualityCheck) -> AppResult<MaintenanceRecord> {
        let record = self.get(id).await?;
        record.ensure_quality_check_required()?;

        let passed = check.passed;
        let record = self.records.record_quality_check(id, check).await?;
        tracing::info!(
            record_id = %id,
            passed,
            status = %record.status,
            "Quality check recorded"
        );
        Ok(record)
    }
}
