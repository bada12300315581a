//! Service Container - Centralized service access.
//!
//! Builds every store once from the connection pool and wires the managers
//! that depend on them.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::{
    HierarchyManager, HierarchyService, InspectionManager, InspectionService,
    InstallationManager, InstallationService, MaintenanceManager, MaintenanceService,
    QrCodeManager, QrCodeRepositories, QrCodeService, SupplyManager, SupplyService,
};
use crate::config::Config;
use crate::infra::{
    HierarchyStore, InspectionStore, InstallationStore, MaintenanceStore, QrCodeStore,
    SupplyStore,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn hierarchy(&self) -> Arc<dyn HierarchyService>;

    fn supply(&self) -> Arc<dyn SupplyService>;

    fn qr_codes(&self) -> Arc<dyn QrCodeService>;

    fn installations(&self) -> Arc<dyn InstallationService>;

    fn inspections(&self) -> Arc<dyn InspectionService>;

    fn maintenance(&self) -> Arc<dyn MaintenanceService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    hierarchy: Arc<dyn HierarchyService>,
    supply: Arc<dyn SupplyService>,
    qr_codes: Arc<dyn QrCodeService>,
    installations: Arc<dyn InstallationService>,
    inspections: Arc<dyn InspectionService>,
    maintenance: Arc<dyn MaintenanceService>,
}

impl Services {
    /// Create service container from database connection and config
    pub fn from_connection(db: DatabaseConnection, config: &Config) -> Self {
        let hierarchy_repo = Arc::new(HierarchyStore::new(db.clone()));
        let supply_repo = Arc::new(SupplyStore::new(db.clone()));
        let qr_repo = Arc::new(QrCodeStore::new(db.clone()));
        let installation_repo = Arc::new(InstallationStore::new(db.clone()));
        let inspection_repo = Arc::new(InspectionStore::new(db.clone()));
        let maintenance_repo = Arc::new(MaintenanceStore::new(db));

        let qr_codes = QrCodeManager::new(
            QrCodeRepositories {
                qr_codes: qr_repo.clone(),
                supply: supply_repo.clone(),
                installations: installation_repo.clone(),
                inspections: inspection_repo.clone(),
                maintenance: maintenance_repo.clone(),
            },
            config.qr.clone(),
        );

        Self {
            hierarchy: Arc::new(HierarchyManager::new(hierarchy_repo.clone())),
            supply: Arc::new(SupplyManager::new(supply_repo.clone())),
            qr_codes: Arc::new(qr_codes),
            installations: Arc::new(InstallationManager::new(
                installation_repo,
                qr_repo.clone(),
                hierarchy_repo,
                supply_repo,
            )),
            inspections: Arc::new(InspectionManager::new(inspection_repo, qr_repo.clone())),
            maintenance: Arc::new(MaintenanceManager::new(maintenance_repo, qr_repo)),
        }
    }
}

impl ServiceContainer for Services {
    fn hierarchy(&self) -> Arc<dyn HierarchyService> {
        self.hierarchy.clone()
    }

    fn supply(&self) -> Arc<dyn SupplyService> {
        self.supply.clone()
    }

    fn qr_codes(&self) -> Arc<dyn QrCodeService> {
        self.qr_codes.clone()
    }

    fn installations(&self) -> Arc<dyn InstallationService> {
        self.installations.clone()
    }

    fn inspections(&self) -> Arc<dyn InspectionService> {
        self.inspections.clone()
    }

    fn maintenance(&self) -> Arc<dyn MaintenanceService> {
        self.maintenance.clone()
    }
}
