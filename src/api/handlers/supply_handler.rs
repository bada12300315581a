//! Supply chain handlers.

use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{
    BatchStatus, FittingBatch, FittingCategory, FittingType, Manufacturer, NewFittingBatch,
    NewFittingType, NewManufacturer, NewSupplyOrder, OrderItem, OrderStatus, SupplyOrder,
    DEFAULT_WARRANTY_MONTHS,
};

use crate::api::extractors::ValidatedJson;
use crate::api::validation::{IDENTIFIER, PINCODE, UPPERCASE_CODE};
use crate::api::AppState;
use crate::types::{ApiResponse, Created};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateManufacturerRequest {
    #[validate(length(min = 2, max = 200, message = "must be 2-200 characters"))]
    #[schema(example = "Jindal Rail Components")]
    pub name: String,
    #[validate(
        length(min = 2, max = 20, message = "must be 2-20 characters"),
        regex(path = *UPPERCASE_CODE, message = "must be uppercase letters or digits")
    )]
    #[schema(example = "JRC")]
    pub code: String,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub license_number: Option<String>,
    #[validate(email(message = "must be a valid email address"))]
    pub contact_email: Option<String>,
    #[validate(length(max = 20, message = "must be at most 20 characters"))]
    pub contact_phone: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub city: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub state: Option<String>,
    #[validate(regex(path = *PINCODE, message = "must be 6 digits"))]
    #[schema(example = "600001")]
    pub pincode: Option<String>,
}

impl From<CreateManufacturerRequest> for NewManufacturer {
    fn from(req: CreateManufacturerRequest) -> Self {
        Self {
            name: req.name,
            code: req.code,
            license_number: req.license_number,
            contact_email: req.contact_email,
            contact_phone: req.contact_phone,
            city: req.city,
            state: req.state,
            pincode: req.pincode,
        }
    }
}

fn default_warranty_months() -> u32 {
    DEFAULT_WARRANTY_MONTHS
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFittingTypeRequest {
    #[validate(length(min = 2, max = 100, message = "must be 2-100 characters"))]
    #[schema(example = "Elastic Rail Clip Mk-III")]
    pub name: String,
    #[validate(
        length(min = 2, max = 20, message = "must be 2-20 characters"),
        regex(path = *UPPERCASE_CODE, message = "must be uppercase letters or digits")
    )]
    #[schema(example = "ERC3")]
    pub code: String,
    pub category: FittingCategory,
    #[validate(
        length(min = 2, max = 50, message = "must be 2-50 characters"),
        regex(
            path = *IDENTIFIER,
            message = "must contain only letters, digits, hyphens and underscores"
        )
    )]
    #[schema(example = "ERC-MK3")]
    pub model: Option<String>,
    pub manufacturer_id: Option<Uuid>,
    #[serde(default = "default_warranty_months")]
    #[validate(range(min = 1, max = 240, message = "must be between 1 and 240"))]
    #[schema(example = 24)]
    pub warranty_months: u32,
}

impl From<CreateFittingTypeRequest> for NewFittingType {
    fn from(req: CreateFittingTypeRequest) -> Self {
        Self {
            name: req.name,
            code: req.code,
            category: req.category,
            model: req.model,
            manufacturer_id: req.manufacturer_id,
            warranty_months: req.warranty_months,
        }
    }
}

/// Serialize is required by the length check on `items`
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub fitting_type_id: Uuid,
    #[validate(range(min = 1, message = "must be at least 1"))]
    #[schema(example = 5000)]
    pub quantity: u32,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    #[schema(example = 42.5)]
    pub unit_price: f64,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplyOrderRequest {
    #[validate(
        length(min = 5, max = 50, message = "must be 5-50 characters"),
        regex(
            path = *IDENTIFIER,
            message = "must contain only letters, digits, hyphens and underscores"
        )
    )]
    #[schema(example = "PO-2024-0001")]
    pub order_number: String,
    pub manufacturer_id: Uuid,
    #[validate(length(min = 1, message = "must contain at least one item"), nested)]
    pub items: Vec<OrderItemRequest>,
    pub expected_delivery: Option<NaiveDate>,
}

impl From<CreateSupplyOrderRequest> for NewSupplyOrder {
    fn from(req: CreateSupplyOrderRequest) -> Self {
        Self {
            order_number: req.order_number,
            manufacturer_id: req.manufacturer_id,
            items: req
                .items
                .into_iter()
                .map(|item| OrderItem {
                    fitting_type_id: item.fitting_type_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect(),
            expected_delivery: req.expected_delivery,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRequest {
    #[validate(
        length(min = 5, max = 50, message = "must be 5-50 characters"),
        regex(
            path = *IDENTIFIER,
            message = "must contain only letters, digits, hyphens and underscores"
        )
    )]
    #[schema(example = "BATCH-2024-0001")]
    pub batch_number: String,
    pub supply_order_id: Uuid,
    pub fitting_type_id: Uuid,
    pub manufacturer_id: Uuid,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub quantity: u32,
    pub manufacture_date: Option<NaiveDate>,
}

impl From<CreateBatchRequest> for NewFittingBatch {
    fn from(req: CreateBatchRequest) -> Self {
        Self {
            batch_number: req.batch_number,
            supply_order_id: req.supply_order_id,
            fitting_type_id: req.fitting_type_id,
            manufacturer_id: req.manufacturer_id,
            quantity: req.quantity,
            manufacture_date: req.manufacture_date,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBatchStatusRequest {
    pub status: BatchStatus,
}

/// Create supply chain routes
pub fn supply_routes() -> Router<AppState> {
    Router::new()
        .route("/manufacturers", post(create_manufacturer))
        .route("/manufacturers/:id", get(get_manufacturer))
        .route("/fitting-types", post(create_fitting_type))
        .route("/fitting-types/:id", get(get_fitting_type))
        .route("/supply-orders", post(create_supply_order))
        .route("/supply-orders/:id", get(get_supply_order))
        .route("/supply-orders/:id/status", put(update_supply_order_status))
        .route("/fitting-batches", post(create_batch))
        .route("/fitting-batches/:id", get(get_batch))
        .route("/fitting-batches/:id/status", put(update_batch_status))
}

#[utoipa::path(
    post,
    path = "/api/manufacturers",
    tag = "Supply",
    request_body = CreateManufacturerRequest,
    responses(
        (status = 201, description = "Manufacturer created", body = Manufacturer),
        (status = 409, description = "Manufacturer code already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_manufacturer(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateManufacturerRequest>,
) -> AppResult<Created<Manufacturer>> {
    let manufacturer = state
        .supply_service
        .create_manufacturer(payload.into())
        .await?;
    Ok(Created(ApiResponse::with_message(
        manufacturer,
        "Manufacturer created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/manufacturers/{id}",
    tag = "Supply",
    params(("id" = Uuid, Path, description = "Manufacturer ID")),
    responses(
        (status = 200, description = "Manufacturer", body = Manufacturer),
        (status = 404, description = "Manufacturer not found")
    )
)]
pub async fn get_manufacturer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<Manufacturer>> {
    let manufacturer = state.supply_service.get_manufacturer(id).await?;
    Ok(ApiResponse::success(manufacturer))
}

#[utoipa::path(
    post,
    path = "/api/fitting-types",
    tag = "Supply",
    request_body = CreateFittingTypeRequest,
    responses(
        (status = 201, description = "Fitting type created", body = FittingType),
        (status = 404, description = "Manufacturer not found"),
        (status = 409, description = "Fitting type code already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_fitting_type(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateFittingTypeRequest>,
) -> AppResult<Created<FittingType>> {
    let fitting_type = state
        .supply_service
        .create_fitting_type(payload.into())
        .await?;
    Ok(Created(ApiResponse::with_message(
        fitting_type,
        "Fitting type created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/fitting-types/{id}",
    tag = "Supply",
    params(("id" = Uuid, Path, description = "Fitting type ID")),
    responses(
        (status = 200, description = "Fitting type", body = FittingType),
        (status = 404, description = "Fitting type not found")
    )
)]
pub async fn get_fitting_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<FittingType>> {
    let fitting_type = state.supply_service.get_fitting_type(id).await?;
    Ok(ApiResponse::success(fitting_type))
}

/// Place a supply order; the total is derived from its items
#[utoipa::path(
    post,
    path = "/api/supply-orders",
    tag = "Supply",
    request_body = CreateSupplyOrderRequest,
    responses(
        (status = 201, description = "Supply order created", body = SupplyOrder),
        (status = 404, description = "Manufacturer or fitting type not found"),
        (status = 409, description = "Order number already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_supply_order(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateSupplyOrderRequest>,
) -> AppResult<Created<SupplyOrder>> {
    let order = state
        .supply_service
        .create_supply_order(payload.into())
        .await?;
    Ok(Created(ApiResponse::with_message(
        order,
        "Supply order created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/supply-orders/{id}",
    tag = "Supply",
    params(("id" = Uuid, Path, description = "Supply order ID")),
    responses(
        (status = 200, description = "Supply order", body = SupplyOrder),
        (status = 404, description = "Supply order not found")
    )
)]
pub async fn get_supply_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<SupplyOrder>> {
    let order = state.supply_service.get_supply_order(id).await?;
    Ok(ApiResponse::success(order))
}

#[utoipa::path(
    put,
    path = "/api/supply-orders/{id}/status",
    tag = "Supply",
    params(("id" = Uuid, Path, description = "Supply order ID")),
    request_body = UpdateOrderStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = SupplyOrder),
        (status = 404, description = "Supply order not found"),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn update_supply_order_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateOrderStatusRequest>,
) -> AppResult<ApiResponse<SupplyOrder>> {
    let order = state
        .supply_service
        .update_supply_order_status(id, payload.status)
        .await?;
    Ok(ApiResponse::with_message(order, "Supply order status updated"))
}

#[utoipa::path(
    post,
    path = "/api/fitting-batches",
    tag = "Supply",
    request_body = CreateBatchRequest,
    responses(
        (status = 201, description = "Fitting batch created", body = FittingBatch),
        (status = 404, description = "Order, fitting type or manufacturer not found"),
        (status = 409, description = "Batch number already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_batch(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateBatchRequest>,
) -> AppResult<Created<FittingBatch>> {
    let batch = state.supply_service.create_batch(payload.into()).await?;
    Ok(Created(ApiResponse::with_message(
        batch,
        "Fitting batch created successfully",
    )))
}

#[utoipa::path(
    get,
    path = "/api/fitting-batches/{id}",
    tag = "Supply",
    params(("id" = Uuid, Path, description = "Fitting batch ID")),
    responses(
        (status = 200, description = "Fitting batch", body = FittingBatch),
        (status = 404, description = "Fitting batch not found")
    )
)]
pub async fn get_batch(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<ApiResponse<FittingBatch>> {
    let batch = state.supply_service.get_batch(id).await?;
    Ok(ApiResponse::success(batch))
}

#[utoipa::path(
    put,
    path = "/api/fitting-batches/{id}/status",
    tag = "Supply",
    params(("id" = Uuid, Path, description = "Fitting batch ID")),
    request_body = UpdateBatchStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = FittingBatch),
        (status = 404, description = "Fitting batch not found"),
        (status = 422, description = "Unknown status")
    )
)]
pub async fn update_batch_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBatchStatusRequest>,
) -> AppResult<ApiResponse<FittingBatch>> {
    let batch = state
        .supply_service
        .update_batch_status(id, payload.status)
        .await?;
    Ok(ApiResponse::with_message(batch, "Fitting batch status updated"))
}
