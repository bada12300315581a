//! OpenAPI documentation configuration.
//!
//! Served by Swagger UI at `/swagger-ui`.

use utoipa::OpenApi;

use crate::api::handlers::{
    hierarchy_handler, inspection_handler, installation_handler, maintenance_handler,
    qr_handler, supply_handler,
};
use crate::services::QrValidation;
use domain::{
    BatchStatus, BatchSummary, ChecklistItem, ChecklistStatus, Coordinates, Division,
    FittingBatch, FittingCategory, FittingType, GeneratedBatch, Inspection, InspectionStatus,
    InspectionType, Installation, InstallationStatus, MaintenanceRecord, MaintenanceStatus,
    MaintenanceType, Manufacturer, OrderItem, OrderStatus, PartReplaced, QrCode, QrCodeDetails,
    QrCodeHistory, QrCodeStatus, Recommendation, ScanLog, Station, SupplyOrder,
    VerificationStatus, VisualCondition, Zone,
};

/// OpenAPI documentation for the QR Track API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "QR Track Fittings System",
        version = "0.1.0",
        description = "Traceability of railway track fittings through QR codes: network hierarchy, supply chain, QR issuing and field records"
    ),
    servers(
        (url = "http://localhost:8000", description = "Local development server")
    ),
    paths(
        // Hierarchy
        hierarchy_handler::create_zone,
        hierarchy_handler::get_zone,
        hierarchy_handler::create_division,
        hierarchy_handler::get_division,
        hierarchy_handler::create_station,
        hierarchy_handler::get_station,
        // Supply
        supply_handler::create_manufacturer,
        supply_handler::get_manufacturer,
        supply_handler::create_fitting_type,
        supply_handler::get_fitting_type,
        supply_handler::create_supply_order,
        supply_handler::get_supply_order,
        supply_handler::update_supply_order_status,
        supply_handler::create_batch,
        supply_handler::get_batch,
        supply_handler::update_batch_status,
        // QR codes
        qr_handler::generate_batch,
        qr_handler::validate_payload,
        qr_handler::get_details,
        qr_handler::get_image,
        qr_handler::get_history,
        qr_handler::scan,
        qr_handler::verify,
        // Field records
        installation_handler::create_installation,
        installation_handler::get_installation,
        installation_handler::update_installation_status,
        inspection_handler::create_inspection,
        inspection_handler::get_inspection,
        inspection_handler::complete_inspection,
        maintenance_handler::create_maintenance_record,
        maintenance_handler::get_maintenance_record,
        maintenance_handler::quality_check,
    ),
    components(
        schemas(
            // Domain types
            Coordinates,
            Zone,
            Division,
            Station,
            Manufacturer,
            FittingCategory,
            FittingType,
            OrderItem,
            OrderStatus,
            SupplyOrder,
            BatchStatus,
            FittingBatch,
            QrCodeStatus,
            VerificationStatus,
            QrCode,
            ScanLog,
            BatchSummary,
            GeneratedBatch,
            QrCodeDetails,
            QrCodeHistory,
            QrValidation,
            InstallationStatus,
            Installation,
            InspectionType,
            InspectionStatus,
            VisualCondition,
            ChecklistStatus,
            ChecklistItem,
            Recommendation,
            Inspection,
            MaintenanceType,
            MaintenanceStatus,
            PartReplaced,
            MaintenanceRecord,
            // Request bodies
            hierarchy_handler::CreateZoneRequest,
            hierarchy_handler::CreateDivisionRequest,
            hierarchy_handler::CreateStationRequest,
            supply_handler::CreateManufacturerRequest,
            supply_handler::CreateFittingTypeRequest,
            supply_handler::OrderItemRequest,
            supply_handler::CreateSupplyOrderRequest,
            supply_handler::CreateBatchRequest,
            supply_handler::UpdateOrderStatusRequest,
            supply_handler::UpdateBatchStatusRequest,
            qr_handler::GenerateBatchRequest,
            qr_handler::ValidateQrRequest,
            qr_handler::ScanRequest,
            qr_handler::VerifyRequest,
            installation_handler::CreateInstallationRequest,
            installation_handler::UpdateInstallationStatusRequest,
            inspection_handler::ChecklistItemRequest,
            inspection_handler::CreateInspectionRequest,
            inspection_handler::CompleteInspectionRequest,
            maintenance_handler::PartReplacedRequest,
            maintenance_handler::CreateMaintenanceRequest,
            maintenance_handler::QualityCheckRequest,
        )
    ),
    tags(
        (name = "Hierarchy", description = "Zones, divisions and stations"),
        (name = "Supply", description = "Manufacturers, fitting types, supply orders and batches"),
        (name = "QR Codes", description = "QR issuing, lookup, scanning and verification"),
        (name = "Installations", description = "Fittings placed on the track"),
        (name = "Inspections", description = "Field inspections"),
        (name = "Maintenance", description = "Maintenance work and quality checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_qr_routes() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/qr-codes/generate-batch"));
        assert!(doc.paths.paths.contains_key("/api/qr-codes/{code}/scan"));
    }
}
