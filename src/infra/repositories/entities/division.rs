//! Division database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Division;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "divisions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub zone_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub headquarters: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Division {
    fn from(model: Model) -> Self {
        Division {
            id: model.id,
            zone_id: model.zone_id,
            name: model.name,
            code: model.code,
            headquarters: model.headquarters,
            coordinates: super::coordinates(model.latitude, model.longitude),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
