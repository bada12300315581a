//! Installation repository. Writes mirror the installation status onto the QR code.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, Set, TransactionTrait,
};
use uuid::Uuid;

use super::base::find_mapped;
use super::entities::{self, installation, qr_code};
use common::{AppResult, OptionExt};
use domain::{Installation, InstallationStatus, NewInstallation, QrCodeStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Installation repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait InstallationRepository: Send + Sync {
    /// Record an installation and mark its QR code as installed.
    async fn create(
        &self,
        installation: NewInstallation,
        warranty_end: DateTime<Utc>,
    ) -> AppResult<Installation>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Installation>>;

    async fn find_by_qr_code(&self, qr_code_id: Uuid) -> AppResult<Option<Installation>>;

    async fn update_status(
        &self,
        id: Uuid,
        status: InstallationStatus,
        remarks: Option<String>,
    ) -> AppResult<Installation>;
}

/// Concrete implementation of InstallationRepository
pub struct InstallationStore {
    db: DatabaseConnection,
}

impl InstallationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl InstallationRepository for InstallationStore {
    async fn create(
        &self,
        new: NewInstallation,
        warranty_end: DateTime<Utc>,
    ) -> AppResult<Installation> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let model = installation::ActiveModel {
            id: Set(Uuid::new_v4()),
            qr_code_id: Set(new.qr_code_id),
            zone_id: Set(new.zone_id),
            division_id: Set(new.division_id),
            station_id: Set(new.station_id),
            track_section: Set(new.track_section),
            kilometer_post: Set(new.kilometer_post),
            latitude: Set(entities::latitude(new.coordinates)),
            longitude: Set(entities::longitude(new.coordinates)),
            status: Set(InstallationStatus::Installed.to_string()),
            installed_by: Set(new.installed_by),
            installation_date: Set(now),
            warranty_start: Set(now),
            warranty_end: Set(warranty_end),
            replaced_at: Set(None),
            retired_at: Set(None),
            remarks: Set(new.remarks),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        qr_code::Entity::update_many()
            .col_expr(
                qr_code::Column::Status,
                Expr::value(QrCodeStatus::Installed.to_string()),
            )
            .col_expr(qr_code::Column::InstalledAt, Expr::value(now))
            .col_expr(qr_code::Column::UpdatedAt, Expr::value(now))
            .filter(qr_code::Column::Id.eq(new.qr_code_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(Installation::from(model))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Installation>> {
        find_mapped::<installation::Entity, _, _>(&self.db, id).await
    }

    async fn find_by_qr_code(&self, qr_code_id: Uuid) -> AppResult<Option<Installation>> {
        let model = installation::Entity::find()
            .filter(installation::Column::QrCodeId.eq(qr_code_id))
            .one(&self.db)
            .await?;

        Ok(model.map(Installation::from))
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: InstallationStatus,
        remarks: Option<String>,
    ) -> AppResult<Installation> {
        let txn = self.db.begin().await?;

        let existing = installation::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_not_found("Installation")?;
        let qr_code_id = existing.qr_code_id;

        let now = Utc::now();
        let mut active: installation::ActiveModel = existing.into();
        active.status = Set(status.to_string());
        match status {
            InstallationStatus::Replaced => active.replaced_at = Set(Some(now)),
            InstallationStatus::Retired => active.retired_at = Set(Some(now)),
            _ => {}
        }
        if remarks.is_some() {
            active.remarks = Set(remarks);
        }
        active.updated_at = Set(now);

        let model = active.update(&txn).await?;

        qr_code::Entity::update_many()
            .col_expr(
                qr_code::Column::Status,
                Expr::value(QrCodeStatus::from(status).to_string()),
            )
            .col_expr(qr_code::Column::UpdatedAt, Expr::value(now))
            .filter(qr_code::Column::Id.eq(qr_code_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;

        Ok(Installation::from(model))
    }
}
