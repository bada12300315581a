//! Installation handlers.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Coordinates, Installation, InstallationStatus, NewInstallation};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstallationRequest {
    pub qr_code_id: Uuid,
    pub zone_id: Uuid,
    pub division_id: Option<Uuid>,
    pub station_id: Option<Uuid>,
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    #[schema(example = "MAS-AJJ UP line")]
    pub track_section: String,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    #[schema(example = "12/4")]
    pub kilometer_post: Option<String>,
    pub coordinates: Option<Coordinates>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub installed_by: Option<String>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub remarks: Option<String>,
}

impl From<CreateInstallationRequest> for NewInstallation {
    fn from(req: CreateInstallationRequest) -> Self {
        Self {
            qr_code_id: req.qr_code_id,
            zone_id: req.zone_id,
            division_id: req.division_id,
            station_id: req.station_id,
            track_section: req.track_section,
            kilometer_post: req.kilometer_post,
            coordinates: req.coordinates,
            installed_by: req.installed_by,
            remarks: req.remarks,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstallationStatusRequest {
    pub status: InstallationStatus,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub remarks: Option<String>,
}

/// Create installation routes
pub fn installation_routes() -> Router<AppState> {
    Router::new()
        .route("/installations", post(create_installation))
        .route("/installations/:id", get(get_installation))
        .route("/installations/:id/status", put(update_installation_status))
}

/// Install a QR-tagged fitting on the track
#[utoipa::path(
    post,
    path = "/api/installations",
    tag = "Installations",
    request_body = CreateInstallationRequest,
    responses(
        (status = 201, description = "Installation recorded", body = Installation),
        (status = 404, description = "QR code, zone, division or station not found"),
        (status = 409, description = "QR code is already installed"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_installation(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateInstallationRequest>,
) -> AppResult<Created<Installation>> {
    let installation = state.installation_service.create(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        installation,
        "Installation recorded successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/installations/{id}",
    tag = "Installations",
    params(("id" = Uuid, Path, description = "Installation ID")),
    responses(
        (status = 200, description = "Installation", body = Installation),
        (status = 404, description = "Installation not found")
    )
)]
pub async fn get_installation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Installation>> {
    let installation = state.installation_service.get(id).await?;
    Ok(ApiResponse::success(installation))
}

/// Change the service state of an installation; mirrored onto its QR code
#[utoipa::path(
    put,
    path = "/api/installations/{id}/status",
    tag = "Installations",
    params(("id" = Uuid, Path, description = "Installation ID")),
    request_body = UpdateInstallationStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = Installation),
        (status = 404, description = "Installation not found"),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn update_installation_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateInstallationStatusRequest>,
) -> AppResult<ApiResponse<Installation>> {
    let installation = state
        .installation_service
        .update_status(id, payload.status, payload.remarks)
        .await?;
    Ok(ApiResponse::with_message(
        installation,
        "Installation status updated",
    ))
}
