//! Scan log database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::ScanLog;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "qr_scan_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub code: String,
    pub scanned_by: Option<String>,
    pub scan_location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub scan_purpose: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub device_info: Json,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub scanned_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ScanLog {
    fn from(model: Model) -> Self {
        ScanLog {
            id: model.id,
            qr_code_id: model.qr_code_id,
            code: model.code,
            scanned_by: model.scanned_by,
            scan_location: model.scan_location,
            scan_coordinates: super::coordinates(model.latitude, model.longitude),
            scan_purpose: model.scan_purpose,
            device_info: model.device_info,
            ip_address: model.ip_address,
            user_agent: model.user_agent,
            scanned_at: model.scanned_at,
        }
    }
}
