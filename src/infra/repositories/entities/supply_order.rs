//! Supply order database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use domain::{OrderItem, SupplyOrder};

/// Line items, stored as a JSON array.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct OrderItems(pub Vec<OrderItem>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "supply_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub manufacturer_id: Uuid,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: OrderItems,
    pub total_amount: f64,
    pub currency: String,
    pub status: String,
    pub expected_delivery: Option<Date>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for SupplyOrder {
    fn from(model: Model) -> Self {
        SupplyOrder {
            id: model.id,
            order_number: model.order_number,
            manufacturer_id: model.manufacturer_id,
            items: model.items.0,
            total_amount: model.total_amount,
            currency: model.currency,
            status: model.status.parse().unwrap_or_default(),
            expected_delivery: model.expected_delivery,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
