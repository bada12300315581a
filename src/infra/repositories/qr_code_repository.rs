//! QR code repository: issued codes and their scan logs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use super::base::find_mapped;
use super::entities::{self, fitting_batch, qr_code, qr_scan_log, to_i32};
use common::{AppError, AppResult, OptionExt};
use domain::{NewQrCode, NewScan, QrCode, QrCodeStatus, QrVerification, ScanLog};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Rows per INSERT statement; keeps bind parameters under the backend limits.
const INSERT_CHUNK_SIZE: usize = 500;

/// QR code repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait QrCodeRepository: Send + Sync {
    /// Insert a generated batch of codes and advance the batch's counter in
    /// one transaction.
    ///
    /// `previous_count` is the counter the sequences were derived from; if
    /// another generation advanced it in the meantime nothing is written and
    /// a conflict is returned.
    async fn insert_batch(
        &self,
        batch_id: Uuid,
        previous_count: u32,
        codes: Vec<NewQrCode>,
    ) -> AppResult<Vec<QrCode>>;

    async fn find_by_code(&self, code: &str) -> AppResult<Option<QrCode>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<QrCode>>;

    /// Append a scan log and stamp the code's last-scanned fields atomically.
    async fn record_scan(&self, qr_code: QrCode, scan: NewScan) -> AppResult<ScanLog>;

    async fn apply_verification(&self, id: Uuid, verification: QrVerification)
        -> AppResult<QrCode>;

    /// Most recent scans first
    async fn recent_scans(&self, qr_code_id: Uuid, limit: u64) -> AppResult<Vec<ScanLog>>;
}

/// Concrete implementation of QrCodeRepository
pub struct QrCodeStore {
    db: DatabaseConnection,
}

impl QrCodeStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn generated_model(new: NewQrCode, now: DateTime<Utc>) -> qr_code::Model {
    qr_code::Model {
        id: Uuid::new_v4(),
        code: new.code,
        batch_id: new.batch_id,
        sequence_number: to_i32(new.sequence_number),
        status: QrCodeStatus::Generated.to_string(),
        marking_machine_id: new.marking_machine_id,
        marking_operator_id: new.marking_operator_id,
        generated_at: now,
        verification_status: None,
        print_quality_score: None,
        verification_remarks: None,
        verified_by: None,
        verified_at: None,
        installed_at: None,
        last_scanned_at: None,
        last_scanned_by: None,
        created_at: now,
        updated_at: now,
    }
}

fn insertable(model: &qr_code::Model) -> qr_code::ActiveModel {
    qr_code::ActiveModel {
        id: Set(model.id),
        code: Set(model.code.clone()),
        batch_id: Set(model.batch_id),
        sequence_number: Set(model.sequence_number),
        status: Set(model.status.clone()),
        marking_machine_id: Set(model.marking_machine_id.clone()),
        marking_operator_id: Set(model.marking_operator_id.clone()),
        generated_at: Set(model.generated_at),
        verification_status: Set(None),
        print_quality_score: Set(None),
        verification_remarks: Set(None),
        verified_by: Set(None),
        verified_at: Set(None),
        installed_at: Set(None),
        last_scanned_at: Set(None),
        last_scanned_by: Set(None),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
    }
}

#[async_trait]
impl QrCodeRepository for QrCodeStore {
    async fn insert_batch(
        &self,
        batch_id: Uuid,
        previous_count: u32,
        codes: Vec<NewQrCode>,
    ) -> AppResult<Vec<QrCode>> {
        let now = Utc::now();
        let new_count = previous_count.saturating_add(codes.len() as u32);
        let models: Vec<qr_code::Model> = codes
            .into_iter()
            .map(|new| generated_model(new, now))
            .collect();

        let txn = self.db.begin().await?;

        // Claim the sequence range first so concurrent generations cannot overlap
        let claimed = fitting_batch::Entity::update_many()
            .col_expr(fitting_batch::Column::QrCodeCount, Expr::value(to_i32(new_count)))
            .col_expr(fitting_batch::Column::QrGeneratedAt, Expr::value(now))
            .col_expr(fitting_batch::Column::UpdatedAt, Expr::value(now))
            .filter(fitting_batch::Column::Id.eq(batch_id))
            .filter(fitting_batch::Column::QrCodeCount.eq(to_i32(previous_count)))
            .exec(&txn)
            .await?;

        if claimed.rows_affected == 0 {
            txn.rollback().await?;
            return Err(AppError::conflict("QR sequence range for this batch"));
        }

        for chunk in models.chunks(INSERT_CHUNK_SIZE) {
            qr_code::Entity::insert_many(chunk.iter().map(insertable))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;

        Ok(models.into_iter().map(QrCode::from).collect())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<QrCode>> {
        let model = qr_code::Entity::find()
            .filter(qr_code::Column::Code.eq(code))
            .one(&self.db)
            .await?;

        Ok(model.map(QrCode::from))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<QrCode>> {
        find_mapped::<qr_code::Entity, _, _>(&self.db, id).await
    }

    async fn record_scan(&self, qr: QrCode, scan: NewScan) -> AppResult<ScanLog> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let log = qr_scan_log::ActiveModel {
            id: Set(Uuid::new_v4()),
            qr_code_id: Set(qr.id),
            code: Set(qr.code),
            scanned_by: Set(scan.scanned_by.clone()),
            scan_location: Set(scan.scan_location),
            latitude: Set(entities::latitude(scan.scan_coordinates)),
            longitude: Set(entities::longitude(scan.scan_coordinates)),
            scan_purpose: Set(scan.scan_purpose),
            device_info: Set(scan.device_info),
            ip_address: Set(scan.ip_address),
            user_agent: Set(scan.user_agent),
            scanned_at: Set(now),
        }
        .insert(&txn)
        .await?;

        qr_code::Entity::update_many()
            .col_expr(qr_code::Column::LastScannedAt, Expr::value(now))
            .col_expr(qr_code::Column::LastScannedBy, Expr::value(scan.scanned_by))
            .col_expr(qr_code::Column::UpdatedAt, Expr::value(now))
            .filter(qr_code::Column::Id.eq(qr.id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(ScanLog::from(log))
    }

    async fn apply_verification(
        &self,
        id: Uuid,
        verification: QrVerification,
    ) -> AppResult<QrCode> {
        let qr = qr_code::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("QR code")?;

        let now = Utc::now();
        let mut active: qr_code::ActiveModel = qr.into();
        active.status = Set(QrCodeStatus::from(verification.status).to_string());
        active.verification_status = Set(Some(verification.status.to_string()));
        // Fields left out of a re-verification keep their recorded values
        if verification.print_quality_score.is_some() {
            active.print_quality_score = Set(verification.print_quality_score);
        }
        if verification.remarks.is_some() {
            active.verification_remarks = Set(verification.remarks);
        }
        if verification.verified_by.is_some() {
            active.verified_by = Set(verification.verified_by);
        }
        active.verified_at = Set(Some(now));
        active.updated_at = Set(now);

        let model = active.update(&self.db).await?;
        Ok(QrCode::from(model))
    }

    async fn recent_scans(&self, qr_code_id: Uuid, limit: u64) -> AppResult<Vec<ScanLog>> {
        let models = qr_scan_log::Entity::find()
            .filter(qr_scan_log::Column::QrCodeId.eq(qr_code_id))
            .order_by_desc(qr_scan_log::Column::ScannedAt)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(ScanLog::from).collect())
    }
}
