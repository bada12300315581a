//! Fitting batch database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::FittingBatch;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fitting_batches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub batch_number: String,
    pub supply_order_id: Uuid,
    pub fitting_type_id: Uuid,
    pub manufacturer_id: Uuid,
    pub quantity: i32,
    pub manufacture_date: Option<Date>,
    pub status: String,
    /// Highest sequence issued so far
    pub qr_code_count: i32,
    pub qr_generated_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FittingBatch {
    fn from(model: Model) -> Self {
        FittingBatch {
            id: model.id,
            batch_number: model.batch_number,
            supply_order_id: model.supply_order_id,
            fitting_type_id: model.fitting_type_id,
            manufacturer_id: model.manufacturer_id,
            quantity: super::to_u32(model.quantity),
            manufacture_date: model.manufacture_date,
            status: model.status.parse().unwrap_or_default(),
            qr_code_count: super::to_u32(model.qr_code_count),
            qr_generated_at: model.qr_generated_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
