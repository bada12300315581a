//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on repository traits so each one can
//! be tested against mocks.

pub mod container;
mod hierarchy_service;
mod inspection_service;
mod installation_service;
mod maintenance_service;
mod qr_service;
mod supply_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use hierarchy_service::{HierarchyManager, HierarchyService};
pub use inspection_service::{InspectionManager, InspectionService};
pub use installation_service::{InstallationManager, InstallationService};
pub use maintenance_service::{MaintenanceManager, MaintenanceService};
pub use qr_service::{
    GenerateQrBatch, QrCodeManager, QrCodeRepositories, QrCodeService, QrValidation,
};
pub use supply_service::{SupplyManager, SupplyService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
