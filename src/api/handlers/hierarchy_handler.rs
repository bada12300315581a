//! Railway hierarchy handlers: zones, divisions and stations.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{Coordinates, Division, NewDivision, NewStation, NewZone, Station, Zone};

use crate::api::extractors::ValidatedJson;
use crate::api::validation::UPPERCASE_CODE;
use crate::api::AppState;
use crate::types::{ApiResponse, Created};

/// Zone creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateZoneRequest {
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    #[schema(example = "Southern Railway")]
    pub name: String,
    /// Uppercase letters and digits
    #[validate(
        length(min = 2, max = 10, message = "must be 2-10 characters"),
        regex(path = *UPPERCASE_CODE, message = "must be uppercase letters or digits")
    )]
    #[schema(example = "SR")]
    pub code: String,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub description: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    #[schema(example = "Chennai")]
    pub headquarters: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl From<CreateZoneRequest> for NewZone {
    fn from(req: CreateZoneRequest) -> Self {
        Self {
            name: req.name,
            code: req.code,
            description: req.description,
            headquarters: req.headquarters,
            coordinates: req.coordinates,
        }
    }
}

/// Division creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDivisionRequest {
    pub zone_id: Uuid,
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    #[schema(example = "Chennai Division")]
    pub name: String,
    #[validate(
        length(min = 2, max = 10, message = "must be 2-10 characters"),
        regex(path = *UPPERCASE_CODE, message = "must be uppercase letters or digits")
    )]
    #[schema(example = "MAS")]
    pub code: String,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub headquarters: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl From<CreateDivisionRequest> for NewDivision {
    fn from(req: CreateDivisionRequest) -> Self {
        Self {
            zone_id: req.zone_id,
            name: req.name,
            code: req.code,
            headquarters: req.headquarters,
            coordinates: req.coordinates,
        }
    }
}

/// Station creation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStationRequest {
    pub division_id: Uuid,
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    #[schema(example = "Chennai Central")]
    pub name: String,
    #[validate(
        length(min = 2, max = 10, message = "must be 2-10 characters"),
        regex(path = *UPPERCASE_CODE, message = "must be uppercase letters or digits")
    )]
    #[schema(example = "MAS")]
    pub code: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    #[schema(example = "junction")]
    pub station_type: Option<String>,
    #[validate(range(min = 0, message = "cannot be negative"))]
    pub platform_count: Option<i32>,
    pub coordinates: Option<Coordinates>,
}

impl From<CreateStationRequest> for NewStation {
    fn from(req: CreateStationRequest) -> Self {
        Self {
            division_id: req.division_id,
            name: req.name,
            code: req.code,
            station_type: req.station_type,
            platform_count: req.platform_count,
            coordinates: req.coordinates,
        }
    }
}

/// Create hierarchy routes
pub fn hierarchy_routes() -> Router<AppState> {
    Router::new()
        .route("/zones", post(create_zone))
        .route("/zones/:id", get(get_zone))
        .route("/divisions", post(create_division))
        .route("/divisions/:id", get(get_division))
        .route("/stations", post(create_station))
        .route("/stations/:id", get(get_station))
}

/// Create a zone
#[utoipa::path(
    post,
    path = "/api/zones",
    tag = "Hierarchy",
    request_body = CreateZoneRequest,
    responses(
        (status = 201, description = "Zone created", body = Zone),
        (status = 409, description = "Zone code already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_zone(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateZoneRequest>,
) -> AppResult<Created<Zone>> {
    let zone = state.hierarchy_service.create_zone(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(zone, "Zone created successfully")))
}

/// Get a zone by ID
#[utoipa::path(
    get,
    path = "/api/zones/{id}",
    tag = "Hierarchy",
    params(("id" = Uuid, Path, description = "Zone ID")),
    responses(
        (status = 200, description = "Zone", body = Zone),
        (status = 404, description = "Zone not found")
    )
)]
pub async fn get_zone(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Zone>> {
    let zone = state.hierarchy_service.get_zone(id).await?;
    Ok(ApiResponse::success(zone))
}

/// Create a division under a zone
#[utoipa::path(
    post,
    path = "/api/divisions",
    tag = "Hierarchy",
    request_body = CreateDivisionRequest,
    responses(
        (status = 201, description = "Division created", body = Division),
        (status = 404, description = "Zone not found"),
        (status = 409, description = "Division code already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_division(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateDivisionRequest>,
) -> AppResult<Created<Division>> {
    let division = state
        .hierarchy_service
        .create_division(payload.into())
        .await?;
    Ok(Created(ApiResponse::with_message(
        division,
        "Division created successfully",
    )))
}

/// Get a division by ID
#[utoipa::path(
    get,
    path = "/api/divisions/{id}",
    tag = "Hierarchy",
    params(("id" = Uuid, Path, description = "Division ID")),
    responses(
        (status = 200, description = "Division", body = Division),
        (status = 404, description = "Division not found")
    )
)]
pub async fn get_division(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Division>> {
    let division = state.hierarchy_service.get_division(id).await?;
    Ok(ApiResponse::success(division))
}

/// Create a station under a division
#[utoipa::path(
    post,
    path = "/api/stations",
    tag = "Hierarchy",
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Station created", body = Station),
        (status = 404, description = "Division not found"),
        (status = 409, description = "Station code already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_station(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateStationRequest>,
) -> AppResult<Created<Station>> {
    let station = state.hierarchy_service.create_station(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        station,
        "Station created successfully",
    )))
}

/// Get a station by ID
#[utoipa::path(
    get,
    path = "/api/stations/{id}",
    tag = "Hierarchy",
    params(("id" = Uuid, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station", body = Station),
        (status = 404, description = "Station not found")
    )
)]
pub async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Station>> {
    let station = state.hierarchy_service.get_station(id).await?;
    Ok(ApiResponse::success(station))
}
