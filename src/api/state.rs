//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::config::Config;
use crate::infra::Database;
use crate::services::{
    HierarchyService, InspectionService, InstallationService, MaintenanceService,
    QrCodeService, ServiceContainer, Services, SupplyService,
};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    pub hierarchy_service: Arc<dyn HierarchyService>,
    pub supply_service: Arc<dyn SupplyService>,
    pub qr_service: Arc<dyn QrCodeService>,
    pub installation_service: Arc<dyn InstallationService>,
    pub inspection_service: Arc<dyn InspectionService>,
    pub maintenance_service: Arc<dyn MaintenanceService>,
    /// Database handle, used by the health check
    pub database: Arc<Database>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: Config) -> Self {
        let container = Services::from_connection(database.get_connection(), &config);
        Self::with_services(&container, database, config)
    }

    /// Create application state around an existing service container.
    pub fn with_services(
        services: &dyn ServiceContainer,
        database: Arc<Database>,
        config: Config,
    ) -> Self {
        Self {
            hierarchy_service: services.hierarchy(),
            supply_service: services.supply(),
            qr_service: services.qr_codes(),
            installation_service: services.installations(),
            inspection_service: services.inspections(),
            maintenance_service: services.maintenance(),
            database,
            config: Arc::new(config),
        }
    }
}
