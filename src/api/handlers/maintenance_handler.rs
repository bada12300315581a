//! Maintenance record handlers.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{MaintenanceRecord, MaintenanceType, NewMaintenanceRecord, PartReplaced, QualityCheck};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartReplacedRequest {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    #[schema(example = "GFN liner")]
    pub part_name: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub part_number: Option<String>,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: u32,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub unit_cost: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMaintenanceRequest {
    pub qr_code_id: Uuid,
    #[serde(default)]
    pub maintenance_type: MaintenanceType,
    #[validate(length(min = 1, max = 1000, message = "must be 1-1000 characters"))]
    #[schema(example = "Replaced worn liner and re-seated clip")]
    pub work_description: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub performed_by: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub parts_replaced: Vec<PartReplacedRequest>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub labor_hours: Option<f64>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub remarks: Option<String>,
}

impl From<CreateMaintenanceRequest> for NewMaintenanceRecord {
    fn from(req: CreateMaintenanceRequest) -> Self {
        Self {
            qr_code_id: req.qr_code_id,
            maintenance_type: req.maintenance_type,
            work_description: req.work_description,
            performed_by: req.performed_by,
            parts_replaced: req
                .parts_replaced
                .into_iter()
                .map(|part| PartReplaced {
                    part_name: part.part_name,
                    part_number: part.part_number,
                    quantity: part.quantity,
                    unit_cost: part.unit_cost,
                })
                .collect(),
            labor_hours: req.labor_hours,
            remarks: req.remarks,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QualityCheckRequest {
    pub passed: bool,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub remarks: Option<String>,
    pub next_maintenance_due: Option<NaiveDate>,
}

impl From<QualityCheckRequest> for QualityCheck {
    fn from(req: QualityCheckRequest) -> Self {
        Self {
            passed: req.passed,
            remarks: req.remarks,
            next_maintenance_due: req.next_maintenance_due,
        }
    }
}

/// Create maintenance routes
pub fn maintenance_routes() -> Router<AppState> {
    Router::new()
        .route("/maintenance-records", post(create_maintenance_record))
        .route("/maintenance-records/:id", get(get_maintenance_record))
        .route("/maintenance-records/:id/quality-check", put(quality_check))
}

/// Record maintenance work on a fitting
#[utoipa::path(
    post,
    path = "/api/maintenance-records",
    tag = "Maintenance",
    request_body = CreateMaintenanceRequest,
    responses(
        (status = 201, description = "Maintenance recorded", body = MaintenanceRecord),
        (status = 404, description = "QR code not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_maintenance_record(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateMaintenanceRequest>,
) -> AppResult<Created<MaintenanceRecord>> {
    let record = state.maintenance_service.create(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        record,
        "Maintenance record created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/maintenance-records/{id}",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "Maintenance record ID")),
    responses(
        (status = 200, description = "Maintenance record", body = MaintenanceRecord),
        (status = 404, description = "Maintenance record not found")
    )
)]
pub async fn get_maintenance_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<MaintenanceRecord>> {
    let record = state.maintenance_service.get(id).await?;
    Ok(ApiResponse::success(record))
}

/// Sign off corrective or emergency work
#[utoipa::path(
    put,
    path = "/api/maintenance-records/{id}/quality-check",
    tag = "Maintenance",
    params(("id" = Uuid, Path, description = "Maintenance record ID")),
    request_body = QualityCheckRequest,
    responses(
        (status = 200, description = "Quality check recorded", body = MaintenanceRecord),
        (status = 400, description = "Record does not require a quality check"),
        (status = 404, description = "Maintenance record not found")
    )
)]
pub async fn quality_check(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<QualityCheckRequest>,
) -> AppResult<ApiResponse<MaintenanceRecord>> {
    let record = state
        .maintenance_service
        .quality_check(id, payload.into())
        .await?;
    Ok(ApiResponse::with_message(record, "Quality check recorded"))
}
