//! Railway network hierarchy: Zone → Division → Station.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;

/// Top-level administrative zone (e.g. Southern Railway)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Zone {
    pub id: Uuid,
    pub name: String,
    /// Unique uppercase short code (e.g. "SR")
    pub code: String,
    pub description: Option<String>,
    pub headquarters: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Division within a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Division {
    pub id: Uuid,
    pub zone_id: Uuid,
    pub name: String,
    pub code: String,
    pub headquarters: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Station within a division
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Station {
    pub id: Uuid,
    pub division_id: Uuid,
    pub name: String,
    pub code: String,
    pub station_type: Option<String>,
    pub platform_count: Option<i32>,
    pub coordinates: Option<Coordinates>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Zone registration data
#[derive(Debug, Clone, PartialEq)]
pub struct NewZone {
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub headquarters: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Division registration data
#[derive(Debug, Clone, PartialEq)]
pub struct NewDivision {
    pub zone_id: Uuid,
    pub name: String,
    pub code: String,
    pub headquarters: Option<String>,
    pub coordinates: Option<Coordinates>,
}

/// Station registration data
#[derive(Debug, Clone, PartialEq)]
pub struct NewStation {
    pub division_id: Uuid,
    pub name: String,
    pub code: String,
    pub station_type: Option<String>,
    pub platform_count: Option<i32>,
    pub coordinates: Option<Coordinates>,
}
