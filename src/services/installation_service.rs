//! Installation service - placing QR-tagged fittings on the track.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    installation::warranty_end, Installation, InstallationStatus, NewInstallation,
    DEFAULT_WARRANTY_MONTHS,
};

use super::hierarchy_service::validate_coordinates;
use crate::infra::{HierarchyRepository, InstallationRepository, QrCodeRepository, SupplyRepository};

/// Installation service trait for dependency injection.
#[async_trait]
pub trait InstallationService: Send + Sync {
    /// Install a fitting. A QR code can be installed once.
    async fn create(&self, installation: NewInstallation) -> AppResult<Installation>;

    async fn get(&self, id: Uuid) -> AppResult<Installation>;

    async fn update_status(
        &self,
        id: Uuid,
        status: InstallationStatus,
        remarks: Option<String>,
    ) -> AppResult<Installation>;
}

pub struct InstallationManager {
    installations: Arc<dyn InstallationRepository>,
    qr_codes: Arc<dyn QrCodeRepository>,
    hierarchy: Arc<dyn HierarchyRepository>,
    supply: Arc<dyn SupplyRepository>,
}

impl InstallationManager {
    pub fn new(
        installations: Arc<dyn InstallationRepository>,
        qr_codes: Arc<dyn QrCodeRepository>,
        hierarchy: Arc<dyn HierarchyRepository>,
        supply: Arc<dyn SupplyRepository>,
    ) -> Self {
        Self {
            installations,
            qr_codes,
            hierarchy,
            supply,
        }
    }

    /// Warranty of the code's fitting type, falling back to the default.
    async fn warranty_months(&self, batch_id: Uuid) -> AppResult<u32> {
        let fitting_type = match self.supply.find_batch(batch_id).await? {
            Some(batch) => self.supply.find_fitting_type(batch.fitting_type_id).await?,
            None => None,
        };

        Ok(fitting_type
            .map(|t| t.warranty_months)
            .unwrap_or(DEFAULT_WARRANTY_MONTHS))
    }
}

#[async_trait]
impl InstallationService for InstallationManager {
    async fn create(&self, installation: NewInstallation) -> AppResult<Installation> {
        validate_coordinates(installation.coordinates.as_ref())?;

        let qr_code = self
            .qr_codes
            .find_by_id(installation.qr_code_id)
            .await?
            .ok_or_not_found("QR code")?;

        self.hierarchy
            .find_zone(installation.zone_id)
            .await?
            .ok_or_not_found("Zone")?;
        if let Some(division_id) = installation.division_id {
            self.hierarchy
                .find_division(division_id)
                .await?
                .ok_or_not_found("Division")?;
        }
        if let Some(station_id) = installation.station_id {
            self.hierarchy
                .find_station(station_id)
                .await?
                .ok_or_not_found("Station")?;
        }

        if self
            .installations
            .find_by_qr_code(qr_code.id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Installation for QR code '{}'",
                qr_code.code
            )));
        }

        let months = self.warranty_months(qr_code.batch_id).await?;
        let warranty_end = warranty_end(Utc::now(), months)?;

        let installation = self.installations.create(installation, warranty_end).await?;
        tracing::info!(
            installation_id = %installation.id,
            qr_code = %qr_code.code,
            track_section = %installation.track_section,
            warranty_months = months,
            "Fitting installed"
        );
        Ok(installation)
    }

    async fn get(&self, id: Uuid) -> AppResult<Installation> {
        self.installations
            .find_by_id(id)
            .await?
            .ok_or_not_found("Installation")
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: InstallationStatus,
        remarks: Option<String>,
    ) -> AppResult<Installation> {
        let installation = self.installations.update_status(id, status, remarks).await?;
        tracing::info!(installation_id = %id, status = %status, "Installation status updated");
        Ok(installation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MockHierarchyRepository, MockInstallationRepository, MockQrCodeRepository,
        MockSupplyRepository,
    };
    use chrono::{DateTime, Months};
    use domain::{QrCode, QrCodeStatus, Zone};

    fn qr_code(id: Uuid) -> QrCode {
        let now = Utc::now();
        QrCode {
            id,
            code: "QRTF_test".to_string(),
            batch_id: Uuid::new_v4(),
            sequence_number: 1,
            status: QrCodeStatus::Verified,
            marking_machine_id: None,
            marking_operator_id: None,
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

    fn zone(id: Uuid) -> Zone {
        Zone {
            id,
            name: "Southern Railway".to_string(),
            code: "SR".to_string(),
            description: None,
            headquarters: None,
            coordinates: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn installed(new: NewInstallation, warranty_end: DateTime<Utc>) -> Installation {
        let now = Utc::now();
        Installation {
            id: Uuid::new_v4(),
            qr_code_id: new.qr_code_id,
            zone_id: new.zone_id,
            division_id: new.division_id,
            station_id: new.station_id,
            track_section: new.track_section,
            kilometer_post: new.kilometer_post,
            coordinates: new.coordinates,
            status: InstallationStatus::Installed,
            installed_by: new.installed_by,
            installation_date: now,
            warranty_start: now,
            warranty_end,
            replaced_at: None,
            retired_at: None,
            remarks: new.remarks,
            created_at: now,
            updated_at: now,
        }
    }

    fn new_installation() -> NewInstallation {
        NewInstallation {
            qr_code_id: Uuid::new_v4(),
            zone_id: Uuid::new_v4(),
            division_id: None,
            station_id: None,
            track_section: "MAS-AJJ UP line".to_string(),
            kilometer_post: Some("12/4".to_string()),
            coordinates: None,
            installed_by: Some("PWI-042".to_string()),
            remarks: None,
        }
    }

    fn manager(
        installations: MockInstallationRepository,
        qr_codes: MockQrCodeRepository,
        hierarchy: MockHierarchyRepository,
        supply: MockSupplyRepository,
    ) -> InstallationManager {
        InstallationManager::new(
            Arc::new(installations),
            Arc::new(qr_codes),
            Arc::new(hierarchy),
            Arc::new(supply),
        )
    }

    #[tokio::test]
    async fn second_installation_of_a_code_conflicts() {
        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes
            .expect_find_by_id()
            .returning(|id| Ok(Some(qr_code(id))));
        let mut hierarchy = MockHierarchyRepository::new();
        hierarchy.expect_find_zone().returning(|id| Ok(Some(zone(id))));
        let mut installations = MockInstallationRepository::new();
        installations
            .expect_find_by_qr_code()
            .returning(|_| Ok(Some(installed(new_installation(), Utc::now()))));
        installations.expect_create().never();

        let err = manager(installations, qr_codes, hierarchy, MockSupplyRepository::new())
            .create(new_installation())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn unknown_fitting_type_falls_back_to_default_warranty() {
        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes
            .expect_find_by_id()
            .returning(|id| Ok(Some(qr_code(id))));
        let mut hierarchy = MockHierarchyRepository::new();
        hierarchy.expect_find_zone().returning(|id| Ok(Some(zone(id))));
        let mut supply = MockSupplyRepository::new();
        supply.expect_find_batch().returning(|_| Ok(None));
        let mut installations = MockInstallationRepository::new();
        installations.expect_find_by_qr_code().returning(|_| Ok(None));
        installations
            .expect_create()
            .returning(|new, end| Ok(installed(new, end)));

        let installation = manager(installations, qr_codes, hierarchy, supply)
            .create(new_installation())
            .await
            .unwrap();

        let expected = installation
            .warranty_start
            .checked_add_months(Months::new(DEFAULT_WARRANTY_MONTHS))
            .unwrap();
        // Start and end are stamped a few microseconds apart
        let drift = (installation.warranty_end - expected).num_seconds().abs();
        assert!(drift < 5);
    }

    #[tokio::test]
    async fn missing_zone_is_not_found() {
        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes
            .expect_find_by_id()
            .returning(|id| Ok(Some(qr_code(id))));
        let mut hierarchy = MockHierarchyRepository::new();
        hierarchy.expect_find_zone().returning(|_| Ok(None));

        let err = manager(
            MockInstallationRepository::new(),
            qr_codes,
            hierarchy,
            MockSupplyRepository::new(),
        )
        .create(new_installation())
        .await
        .unwrap_err();

        assert!(matches!(err, AppError::NotFound(entity) if entity == "Zone"));
    }
}
