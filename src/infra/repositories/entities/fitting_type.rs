//! Fitting type database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::FittingType;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fitting_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub category: String,
    pub model: Option<String>,
    pub manufacturer_id: Option<Uuid>,
    pub warranty_months: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for FittingType {
    fn from(model: Model) -> Self {
        FittingType {
            id: model.id,
            name: model.name,
            code: model.code,
            category: model.category.parse().unwrap_or_default(),
            model: model.model,
            manufacturer_id: model.manufacturer_id,
            warranty_months: super::to_u32(model.warranty_months),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
