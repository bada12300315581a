//! QR code database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::QrCode;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "qr_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub batch_id: Uuid,
    pub sequence_number: i32,
    pub status: String,
    pub marking_machine_id: Option<String>,
    pub marking_operator_id: Option<String>,
    pub generated_at: DateTimeUtc,
    pub verification_status: Option<String>,
    pub print_quality_score: Option<f64>,
    pub verification_remarks: Option<String>,
    pub verified_by: Option<String>,
    pub verified_at: Option<DateTimeUtc>,
    pub installed_at: Option<DateTimeUtc>,
    pub last_scanned_at: Option<DateTimeUtc>,
    pub last_scanned_by: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for QrCode {
    fn from(model: Model) -> Self {
        QrCode {
            id: model.id,
            code: model.code,
            batch_id: model.batch_id,
            sequence_number: super::to_u32(model.sequence_number),
            status: model.status.parse().unwrap_or_default(),
            marking_machine_id: model.marking_machine_id,
            marking_operator_id: model.marking_operator_id,
            generated_at: model.generated_at,
            verification_status: model
                .verification_status
                .and_then(|status| status.parse().ok()),
            print_quality_score: model.print_quality_score,
            verification_remarks: model.verification_remarks,
            verified_by: model.verified_by,
            verified_at: model.verified_at,
            installed_at: model.installed_at,
            last_scanned_at: model.last_scanned_at,
            last_scanned_by: model.last_scanned_by,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
