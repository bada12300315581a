//! Station database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Station;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub division_id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub station_type: Option<String>,
    pub platform_count: Option<i32>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Station {
    fn from(model: Model) -> Self {
        Station {
            id: model.id,
            division_id: model.division_id,
            name: model.name,
            code: model.code,
            station_type: model.station_type,
            platform_count: model.platform_count,
            coordinates: super::coordinates(model.latitude, model.longitude),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
