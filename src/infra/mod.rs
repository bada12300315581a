//! Infrastructure layer - External systems integration
//!
//! Database connection, migrations and the SeaORM-backed repositories.

pub mod db;
pub mod repositories;

pub use db::{Database, Migrator};
pub use repositories::{
    HierarchyRepository, HierarchyStore, InspectionRepository, InspectionStore,
    InstallationRepository, InstallationStore, MaintenanceRepository, MaintenanceStore,
    QrCodeRepository, QrCodeStore, SupplyRepository, SupplyStore,
};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{
    MockHierarchyRepository, MockInspectionRepository, MockInstallationRepository,
    MockMaintenanceRepository, MockQrCodeRepository, MockSupplyRepository,
};
