//! QR code handlers: generation, lookup, scanning, verification and images.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Path, Query, State},
    http::{header, HeaderMap},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{
    Coordinates, GeneratedBatch, NewScan, QrCode, QrCodeDetails, QrCodeHistory, QrVerification,
    ScanLog, VerificationStatus, DEFAULT_SCAN_PURPOSE,
};

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::services::{GenerateQrBatch, QrValidation};
use crate::types::{ApiResponse, Created, Svg};

/// Batch generation request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBatchRequest {
    #[serde(rename = "fittingBatchId", alias = "batchId")]
    pub batch_id: Uuid,
    /// Number of codes to issue; capped by QR_MAX_BATCH_QUANTITY
    #[validate(range(min = 1, message = "must be at least 1"))]
    #[schema(example = 100)]
    pub quantity: u32,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub marking_machine_id: Option<String>,
    #[validate(length(max = 50, message = "must be at most 50 characters"))]
    pub marking_operator_id: Option<String>,
}

impl From<GenerateBatchRequest> for GenerateQrBatch {
    fn from(req: GenerateBatchRequest) -> Self {
        Self {
            batch_id: req.batch_id,
            quantity: req.quantity,
            marking_machine_id: req.marking_machine_id,
            marking_operator_id: req.marking_operator_id,
        }
    }
}

/// Raw scanned string to check offline
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateQrRequest {
    #[validate(length(min = 1, max = 500, message = "must be 1-500 characters"))]
    pub payload: String,
}

fn default_scan_purpose() -> String {
    DEFAULT_SCAN_PURPOSE.to_string()
}

fn empty_object() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub scanned_by: Option<String>,
    #[validate(length(max = 200, message = "must be at most 200 characters"))]
    pub scan_location: Option<String>,
    pub scan_coordinates: Option<Coordinates>,
    #[serde(default = "default_scan_purpose")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    #[schema(example = "inspection")]
    pub scan_purpose: String,
    /// Free-form device details reported by the scanner
    #[serde(default = "empty_object")]
    #[schema(value_type = Object)]
    pub device_info: serde_json::Value,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub verification_status: VerificationStatus,
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0 and 1"))]
    #[schema(example = 0.93)]
    pub print_quality_score: Option<f64>,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub remarks: Option<String>,
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub verified_by: Option<String>,
}

impl From<VerifyRequest> for QrVerification {
    fn from(req: VerifyRequest) -> Self {
        Self {
            status: req.verification_status,
            print_quality_score: req.print_quality_score,
            remarks: req.remarks,
            verified_by: req.verified_by,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ImageQuery {
    /// Print the code text under the symbol
    #[serde(default)]
    pub caption: bool,
}

/// Create QR code routes
pub fn qr_routes() -> Router<AppState> {
    Router::new()
        .route("/qr-codes/generate-batch", post(generate_batch))
        .route("/qr-codes/validate", post(validate_payload))
        .route("/qr-codes/:code", get(get_details))
        .route("/qr-codes/:code/image", get(get_image))
        .route("/qr-codes/:code/history", get(get_history))
        .route("/qr-codes/:code/scan", post(scan))
        .route("/qr-codes/:code/verify", put(verify))
}

/// Issue a run of QR codes for a fitting batch
#[utoipa::path(
    post,
    path = "/api/qr-codes/generate-batch",
    tag = "QR Codes",
    request_body = GenerateBatchRequest,
    responses(
        (status = 201, description = "QR codes generated", body = GeneratedBatch),
        (status = 404, description = "Fitting batch not found"),
        (status = 409, description = "Concurrent generation for the same batch"),
        (status = 422, description = "Quantity out of range")
    )
)]
pub async fn generate_batch(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<GenerateBatchRequest>,
) -> AppResult<Created<GeneratedBatch>> {
    let generated = state.qr_service.generate_batch(payload.into()).await?;
    let message = format!(
        "Generated {} QR codes",
        generated.batch_summary.total_generated
    );
    Ok(Created(ApiResponse::with_message(generated, message)))
}

/// Check a scanned string without looking it up
#[utoipa::path(
    post,
    path = "/api/qr-codes/validate",
    tag = "QR Codes",
    request_body = ValidateQrRequest,
    responses(
        (status = 200, description = "Validation report", body = QrValidation),
        (status = 422, description = "Validation error")
    )
)]
pub async fn validate_payload(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ValidateQrRequest>,
) -> AppResult<ApiResponse<QrValidation>> {
    Ok(ApiResponse::success(
        state.qr_service.validate(&payload.payload),
    ))
}

/// QR code with batch, fitting type, installation and latest inspection
#[utoipa::path(
    get,
    path = "/api/qr-codes/{code}",
    tag = "QR Codes",
    params(("code" = String, Path, description = "QR payload string")),
    responses(
        (status = 200, description = "QR code details", body = QrCodeDetails),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn get_details(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<ApiResponse<QrCodeDetails>> {
    let details = state.qr_service.get_details(&code).await?;
    Ok(ApiResponse::success(details))
}

/// SVG image of a QR code
#[utoipa::path(
    get,
    path = "/api/qr-codes/{code}/image",
    tag = "QR Codes",
    params(("code" = String, Path, description = "QR payload string"), ImageQuery),
    responses(
        (status = 200, description = "SVG image", content_type = "image/svg+xml", body = String),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<ImageQuery>,
) -> AppResult<Svg> {
    let svg = state.qr_service.render_image(&code, query.caption).await?;
    Ok(Svg(svg))
}

/// Offline history bundle for field devices
#[utoipa::path(
    get,
    path = "/api/qr-codes/{code}/history",
    tag = "QR Codes",
    params(("code" = String, Path, description = "QR payload string")),
    responses(
        (status = 200, description = "History bundle", body = QrCodeHistory),
        (status = 404, description = "QR code not found")
    )
)]
pub async fn get_history(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<ApiResponse<QrCodeHistory>> {
    let history = state.qr_service.history(&code).await?;
    Ok(ApiResponse::success(history))
}

/// Record a scan of a QR code
#[utoipa::path(
    post,
    path = "/api/qr-codes/{code}/scan",
    tag = "QR Codes",
    params(("code" = String, Path, description = "QR payload string")),
    request_body = ScanRequest,
    responses(
        (status = 201, description = "Scan recorded", body = ScanLog),
        (status = 404, description = "QR code not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn scan(
    State(state): State<AppState>,
    Path(code): Path<String>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    ValidatedJson(payload): ValidatedJson<ScanRequest>,
) -> AppResult<Created<ScanLog>> {
    if !payload.device_info.is_object() {
        return Err(AppError::validation("device_info: must be a JSON object"));
    }

    let scan = NewScan {
        scanned_by: payload.scanned_by,
        scan_location: payload.scan_location,
        scan_coordinates: payload.scan_coordinates,
        scan_purpose: payload.scan_purpose,
        device_info: payload.device_info,
        ip_address: client_ip(&headers, connect_info.map(|ConnectInfo(addr)| addr)),
        user_agent: header_value(&headers, header::USER_AGENT.as_str()),
    };

    let log = state.qr_service.scan(&code, scan).await?;
    Ok(Created(ApiResponse::with_message(log, "Scan recorded")))
}

/// Record the print quality verification of a code
#[utoipa::path(
    put,
    path = "/api/qr-codes/{code}/verify",
    tag = "QR Codes",
    params(("code" = String, Path, description = "QR payload string")),
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "QR code verified", body = QrCode),
        (status = 404, description = "QR code not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn verify(
    State(state): State<AppState>,
    Path(code): Path<String>,
    ValidatedJson(payload): ValidatedJson<VerifyRequest>,
) -> AppResult<ApiResponse<QrCode>> {
    let qr_code = state.qr_service.verify(&code, payload.into()).await?;
    Ok(ApiResponse::with_message(qr_code, "QR code verification recorded"))
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
}

/// First hop of X-Forwarded-For, else the socket peer
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    header_value(headers, "x-forwarded-for")
        .and_then(|forwarded| {
            forwarded
                .split(',')
                .next()
                .map(|ip| ip.trim().to_string())
        })
        .filter(|ip| !ip.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn forwarded_for_takes_precedence_over_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let peer: SocketAddr = "192.0.2.1:4000".parse().unwrap();

        assert_eq!(
            client_ip(&headers, Some(peer)),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn falls_back_to_peer_address() {
        let peer: SocketAddr = "192.0.2.1:4000".parse().unwrap();

        assert_eq!(
            client_ip(&HeaderMap::new(), Some(peer)),
            Some("192.0.2.1".to_string())
        );
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }

    #[test]
    fn scan_request_defaults_purpose_and_device_info() {
        let request: ScanRequest = serde_json::from_str("{}").unwrap();

        assert_eq!(request.scan_purpose, DEFAULT_SCAN_PURPOSE);
        assert_eq!(request.device_info, serde_json::json!({}));
    }
}
