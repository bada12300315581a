//! Maintenance record database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use domain::{MaintenanceRecord, PartReplaced};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct PartsReplaced(pub Vec<PartReplaced>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "maintenance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub maintenance_type: String,
    pub status: String,
    pub work_description: String,
    pub performed_by: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub parts_replaced: PartsReplaced,
    pub labor_hours: Option<f64>,
    pub total_cost: f64,
    pub remarks: Option<String>,
    pub maintenance_date: DateTimeUtc,
    pub next_maintenance_due: Option<Date>,
    pub quality_check_required: bool,
    pub quality_check_passed: Option<bool>,
    pub quality_checked_at: Option<DateTimeUtc>,
    pub quality_remarks: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MaintenanceRecord {
    fn from(model: Model) -> Self {
        MaintenanceRecord {
            id: model.id,
            qr_code_id: model.qr_code_id,
            maintenance_type: model.maintenance_type.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            work_description: model.work_description,
            performed_by: model.performed_by,
            parts_replaced: model.parts_replaced.0,
            labor_hours: model.labor_hours,
            total_cost: model.total_cost,
            remarks: model.remarks,
            maintenance_date: model.maintenance_date,
            next_maintenance_due: model.next_maintenance_due,
            quality_check_required: model.quality_check_required,
            quality_check_passed: model.quality_check_passed,
            quality_checked_at: model.quality_checked_at,
            quality_remarks: model.quality_remarks,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
