//! Repository layer - Data access abstraction
//!
//! One trait per aggregate with a SeaORM-backed store. Services depend on
//! the traits so they can be tested against mocks.

mod base;
pub(crate) mod entities;
mod hierarchy_repository;
mod inspection_repository;
mod installation_repository;
mod maintenance_repository;
mod qr_code_repository;
mod supply_repository;

pub use hierarchy_repository::{HierarchyRepository, HierarchyStore};
pub use inspection_repository::{InspectionRepository, InspectionStore};
pub use installation_repository::{InstallationRepository, InstallationStore};
pub use maintenance_repository::{MaintenanceRepository, MaintenanceStore};
pub use qr_code_repository::{QrCodeRepository, QrCodeStore};
pub use supply_repository::{SupplyRepository, SupplyStore};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use hierarchy_repository::MockHierarchyRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use inspection_repository::MockInspectionRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use installation_repository::MockInstallationRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use maintenance_repository::MockMaintenanceRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use qr_code_repository::MockQrCodeRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use supply_repository::MockSupplyRepository;
