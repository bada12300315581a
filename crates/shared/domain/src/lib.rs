//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the railway hierarchy, the supply chain, QR codes and the field records
//! (installations, inspections, maintenance) attached to them.

#[macro_use]
mod macros;

pub mod constants;
pub mod error;
pub mod geo;
pub mod hierarchy;
pub mod inspection;
pub mod installation;
pub mod maintenance;
pub mod qr_code;
pub mod qr_payload;
pub mod supply;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use geo::Coordinates;
pub use hierarchy::{Division, NewDivision, NewStation, NewZone, Station, Zone};
pub use inspection::{
    ChecklistItem, ChecklistStatus, Inspection, InspectionCompletion, InspectionStatus,
    InspectionType, NewInspection, Recommendation, VisualCondition,
};
pub use installation::{Installation, InstallationStatus, NewInstallation};
pub use maintenance::{
    MaintenanceRecord, MaintenanceStatus, MaintenanceType, NewMaintenanceRecord, PartReplaced,
    QualityCheck,
};
pub use qr_code::{
    BatchSummary, GeneratedBatch, NewQrCode, NewScan, QrCode, QrCodeDetails, QrCodeHistory,
    QrCodeStatus, QrVerification, ScanLog, VerificationStatus,
};
pub use qr_payload::QrPayload;
pub use supply::{
    BatchStatus, FittingBatch, FittingCategory, FittingType, Manufacturer, NewFittingBatch,
    NewFittingType, NewManufacturer, NewSupplyOrder, OrderItem, OrderStatus, SupplyOrder,
};
