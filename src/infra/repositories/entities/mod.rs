//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Coordinates are stored as a nullable latitude/longitude column pair and
//! nested lists live in JSON columns.

pub mod division;
pub mod fitting_batch;
pub mod fitting_type;
pub mod inspection;
pub mod installation;
pub mod maintenance_record;
pub mod manufacturer;
pub mod qr_code;
pub mod qr_scan_log;
pub mod station;
pub mod supply_order;
pub mod zone;

use domain::Coordinates;

/// Rebuild coordinates from their column pair; half-filled pairs read as absent.
pub(crate) fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Option<Coordinates> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ => None,
    }
}

pub(crate) fn latitude(coordinates: Option<Coordinates>) -> Option<f64> {
    coordinates.map(|c| c.lat)
}

pub(crate) fn longitude(coordinates: Option<Coordinates>) -> Option<f64> {
    coordinates.map(|c| c.lng)
}

pub(crate) fn to_u32(value: i32) -> u32 {
    u32::try_from(value).unwrap_or_default()
}

pub(crate) fn to_i32(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
