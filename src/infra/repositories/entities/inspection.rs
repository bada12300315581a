//! Inspection database entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

use domain::{ChecklistItem, Inspection};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Checklist(pub Vec<ChecklistItem>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inspections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub qr_code_id: Uuid,
    pub inspection_type: String,
    pub status: String,
    pub inspector_id: Option<String>,
    pub visual_condition: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub checklist: Checklist,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub remarks: Option<String>,
    pub recommendation: Option<String>,
    pub next_inspection_due: Option<Date>,
    pub inspection_date: DateTimeUtc,
    pub completed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Inspection {
    fn from(model: Model) -> Self {
        Inspection {
            id: model.id,
            qr_code_id: model.qr_code_id,
            inspection_type: model.inspection_type.parse().unwrap_or_default(),
            status: model.status.parse().unwrap_or_default(),
            inspector_id: model.inspector_id,
            visual_condition: model.visual_condition.and_then(|v| v.parse().ok()),
            checklist: model.checklist.0,
            coordinates: super::coordinates(model.latitude, model.longitude),
            remarks: model.remarks,
            recommendation: model.recommendation.and_then(|r| r.parse().ok()),
            next_inspection_due: model.next_inspection_due,
            inspection_date: model.inspection_date,
            completed_at: model.completed_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
