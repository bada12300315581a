//! Inspection handlers.

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
use domain::{
    ChecklistItem, ChecklistStatus, Coordinates, Inspection, InspectionCompletion,
    InspectionType, NewInspection, Recommendation, VisualCondition,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemRequest {
    #[validate(length(min = 1, max = 200, message = "must be 1-200 characters"))]
    #[schema(example = "Clip seated correctly")]
    pub item: String,
    pub status: ChecklistStatus,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectionRequest {
    pub qr_code_id: Uuid,
    #[serde(default)]
    pub inspection_type: InspectionType,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub inspector_id: Option<String>,
    pub visual_condition: Option<VisualCondition>,
    #[serde(default)]
    #[validate(nested)]
    pub checklist: Vec<ChecklistItemRequest>,
    pub coordinates: Option<Coordinates>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub remarks: Option<String>,
}

impl From<CreateInspectionRequest> for NewInspection {
    fn from(req: CreateInspectionRequest) -> Self {
        Self {
            qr_code_id: req.qr_code_id,
            inspection_type: req.inspection_type,
            inspector_id: req.inspector_id,
            visual_condition: req.visual_condition,
            checklist: req
                .checklist
                .into_iter()
                .map(|item| ChecklistItem {
                    item: item.item,
                    status: item.status,
                    remarks: item.remarks,
                })
                .collect(),
            coordinates: req.coordinates,
            remarks: req.remarks,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CompleteInspectionRequest {
    pub recommendation: Recommendation,
    pub next_inspection_due: Option<NaiveDate>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub remarks: Option<String>,
}

impl From<CompleteInspectionRequest> for InspectionCompletion {
    fn from(req: CompleteInspectionRequest) -> Self {
        Self {
            recommendation: req.recommendation,
            next_inspection_due: req.next_inspection_due,
            remarks: req.remarks,
        }
    }
}

/// Create inspection routes
pub fn inspection_routes() -> Router<AppState> {
    Router::new()
        .route("/inspections", post(create_inspection))
        .route("/inspections/:id", get(get_inspection))
        .route("/inspections/:id/complete", put(complete_inspection))
}

/// Start an inspection of an installed fitting
#[utoipa::path(
    post,
    path = "/api/inspections",
    tag = "Inspections",
    request_body = CreateInspectionRequest,
    responses(
        (status = 201, description = "Inspection started", body = Inspection),
        (status = 404, description = "QR code not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_inspection(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInspectionRequest>,
) -> AppResult<Created<Inspection>> {
    let inspection = state.inspection_service.create(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        inspection,
        "Inspection created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/inspections/{id}",
    tag = "Inspections",
    params(("id" = Uuid, Path, description = "Inspection ID")),
    responses(
        (status = 200, description = "Inspection", body = Inspection),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn get_inspection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Inspection>> {
    let inspection = state.inspection_service.get(id).await?;
    Ok(ApiResponse::success(inspection))
}

#[utoipa::path(
    put,
    path = "/api/inspections/{id}/complete",
    tag = "Inspections",
    params(("id" = Uuid, Path, description = "Inspection ID")),
    request_body = CompleteInspectionRequest,
    responses(
        (status = 200, description = "Inspection completed", body = Inspection),
        (status = 400, description = "Inspection is not in progress"),
        (status = 404, description = "Inspection not found")
    )
)]
pub async fn complete_inspection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<CompleteInspectionRequest>,
) -> AppResult<ApiResponse<Inspection>> {
    let inspection = state
        .inspection_service
        .complete(id, payload.into())
        .await?;
    Ok(ApiResponse::with_message(inspection, "Inspection completed"))
}
