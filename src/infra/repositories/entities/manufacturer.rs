//! Manufacturer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::Manufacturer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "manufacturers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub code: String,
    pub license_number: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Manufacturer {
    fn from(model: Model) -> Self {
        Manufacturer {
            id: model.id,
            name: model.name,
            code: model.code,
            license_number: model.license_number,
            contact_email: model.contact_email,
            contact_phone: model.contact_phone,
            city: model.city,
            state: model.state,
            pincode: model.pincode,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
