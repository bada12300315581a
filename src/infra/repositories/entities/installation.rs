//! Installation database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Installation;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "installations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// One installation per QR code
    #[sea_orm(unique)]
    pub qr_code_id: Uuid,
    pub zone_id: Uuid,
    pub division_id: Option<Uuid>,
    pub station_id: Option<Uuid>,
    pub track_section: String,
    pub kilometer_post: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: String,
    pub installed_by: Option<String>,
    pub installation_date: DateTimeUtc,
    pub warranty_start: DateTimeUtc,
    pub warranty_end: DateTimeUtc,
    pub replaced_at: Option<DateTimeUtc>,
    pub retired_at: Option<DateTimeUtc>,
    pub remarks: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Installation {
    fn from(model: Model) -> Self {
        Installation {
            id: model.id,
            qr_code_id: model.qr_code_id,
            zone_id: model.zone_id,
            division_id: model.division_id,
            station_id: model.station_id,
            track_section: model.track_section,
            kilometer_post: model.kilometer_post,
            coordinates: super::coordinates(model.latitude, model.longitude),
            status: model.status.parse().unwrap_or_default(),
            installed_by: model.installed_by,
            installation_date: model.installation_date,
            warranty_start: model.warranty_start,
            warranty_end: model.warranty_end,
            replaced_at: model.replaced_at,
            retired_at: model.retired_at,
            remarks: model.remarks,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
