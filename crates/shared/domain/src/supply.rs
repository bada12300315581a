//! Supply chain records: manufacturers, fitting types, supply orders and
//! manufacturing batches.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

string_enum! {
    /// Kind of track fitting
    pub enum FittingCategory ("fitting category") {
        ElasticRailClip => "elastic_rail_clip",
        Liner => "liner",
        RubberPad => "rubber_pad",
        Sleeper => "sleeper",
        #[default]
        Other => "other",
    }
}

string_enum! {
    /// Supply order lifecycle
    pub enum OrderStatus ("order status") {
        #[default]
        Pending => "pending",
        Confirmed => "confirmed",
        InProduction => "in_production",
        Dispatched => "dispatched",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

string_enum! {
    /// Manufacturing batch lifecycle
    pub enum BatchStatus ("batch status") {
        #[default]
        Manufacturing => "manufacturing",
        Manufactured => "manufactured",
        QualityCheck => "quality_check",
        Approved => "approved",
        Rejected => "rejected",
        Shipped => "shipped",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Manufacturer {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub license_number: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FittingType {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub category: FittingCategory,
    pub model: Option<String>,
    pub manufacturer_id: Option<Uuid>,
    /// Warranty period granted from the installation date
    pub warranty_months: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One line of a supply order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct OrderItem {
    pub fitting_type_id: Uuid,
    pub quantity: u32,
    pub unit_price: f64,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        f64::from(self.quantity) * self.unit_price
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SupplyOrder {
    pub id: Uuid,
    pub order_number: String,
    pub manufacturer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub currency: String,
    pub status: OrderStatus,
    pub expected_delivery: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SupplyOrder {
    /// Check whether a fitting type is ordered on any line
    pub fn includes_fitting_type(&self, fitting_type_id: Uuid) -> bool {
        self.items
            .iter()
            .any(|item| item.fitting_type_id == fitting_type_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct FittingBatch {
    pub id: Uuid,
    pub batch_number: String,
    pub supply_order_id: Uuid,
    pub fitting_type_id: Uuid,
    pub manufacturer_id: Uuid,
    pub quantity: u32,
    pub manufacture_date: Option<NaiveDate>,
    pub status: BatchStatus,
    /// Number of QR codes issued so far; the next code gets `qr_code_count + 1`
    pub qr_code_count: u32,
    pub qr_generated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FittingBatch {
    /// First sequence number available for new QR codes
    pub fn next_sequence(&self) -> u32 {
        self.qr_code_count + 1
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewManufacturer {
    pub name: String,
    pub code: String,
    pub license_number: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFittingType {
    pub name: String,
    pub code: String,
    pub category: FittingCategory,
    pub model: Option<String>,
    pub manufacturer_id: Option<Uuid>,
    pub warranty_months: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewSupplyOrder {
    pub order_number: String,
    pub manufacturer_id: Uuid,
    pub items: Vec<OrderItem>,
    pub expected_delivery: Option<NaiveDate>,
}

impl NewSupplyOrder {
    /// Order value across all lines
    pub fn total_amount(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFittingBatch {
    pub batch_number: String,
    pub supply_order_id: Uuid,
    pub fitting_type_id: Uuid,
    pub manufacturer_id: Uuid,
    pub quantity: u32,
    pub manufacture_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_total_sums_lines() {
        let order = NewSupplyOrder {
            order_number: "SO-2024-001".to_string(),
            manufacturer_id: Uuid::new_v4(),
            items: vec![
                OrderItem {
                    fitting_type_id: Uuid::new_v4(),
                    quantity: 100,
                    unit_price: 12.5,
                },
                OrderItem {
                    fitting_type_id: Uuid::new_v4(),
                    quantity: 4,
                    unit_price: 250.0,
                },
            ],
            expected_delivery: None,
        };

        assert_eq!(order.total_amount(), 2250.0);
    }

    #[test]
    fn status_round_trips_through_strings() {
        assert_eq!("quality_check".parse::<BatchStatus>(), Ok(BatchStatus::QualityCheck));
        assert_eq!(OrderStatus::InProduction.to_string(), "in_production");
    }

    #[test]
    fn unknown_status_lists_accepted_values() {
        let err = "lost".parse::<OrderStatus>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("order status"));
        assert!(msg.contains("pending, confirmed"));
    }
}
