//! Supply chain repository: manufacturers, fitting types, supply orders and batches.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use super::base::{exists_where, find_mapped};
use super::entities::{
    fitting_batch, fitting_type, manufacturer,
    supply_order::{self, OrderItems},
    to_i32,
};
use common::{AppResult, OptionExt};
use domain::{
    BatchStatus, FittingBatch, FittingType, Manufacturer, NewFittingBatch, NewFittingType,
    NewManufacturer, NewSupplyOrder, OrderStatus, SupplyOrder, DEFAULT_CURRENCY,
};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Supply repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SupplyRepository: Send + Sync {
    async fn create_manufacturer(&self, manufacturer: NewManufacturer) -> AppResult<Manufacturer>;

    async fn find_manufacturer(&self, id: Uuid) -> AppResult<Option<Manufacturer>>;

    async fn manufacturer_code_exists(&self, code: &str) -> AppResult<bool>;

    async fn create_fitting_type(&self, fitting_type: NewFittingType) -> AppResult<FittingType>;

    async fn find_fitting_type(&self, id: Uuid) -> AppResult<Option<FittingType>>;

    async fn fitting_type_code_exists(&self, code: &str) -> AppResult<bool>;

    /// Persist an order; the total is derived from its line items
    async fn create_supply_order(&self, order: NewSupplyOrder) -> AppResult<SupplyOrder>;

    async fn find_supply_order(&self, id: Uuid) -> AppResult<Option<SupplyOrder>>;

    async fn order_number_exists(&self, order_number: &str) -> AppResult<bool>;

    async fn update_supply_order_status(&self, id: Uuid, status: OrderStatus)
        -> AppResult<SupplyOrder>;

    async fn create_batch(&self, batch: NewFittingBatch) -> AppResult<FittingBatch>;

    async fn find_batch(&self, id: Uuid) -> AppResult<Option<FittingBatch>>;

    async fn batch_number_exists(&self, batch_number: &str) -> AppResult<bool>;

    async fn update_batch_status(&self, id: Uuid, status: BatchStatus) -> AppResult<FittingBatch>;
}

/// Concrete implementation of SupplyRepository
pub struct SupplyStore {
    db: DatabaseConnection,
}

impl SupplyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SupplyRepository for SupplyStore {
    async fn create_manufacturer(&self, new: NewManufacturer) -> AppResult<Manufacturer> {
        let now = chrono::Utc::now();
        let active_model = manufacturer::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            code: Set(new.code),
            license_number: Set(new.license_number),
            contact_email: Set(new.contact_email),
            contact_phone: Set(new.contact_phone),
            city: Set(new.city),
            state: Set(new.state),
            pincode: Set(new.pincode),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Manufacturer::from(model))
    }

    async fn find_manufacturer(&self, id: Uuid) -> AppResult<Option<Manufacturer>> {
        find_mapped::<manufacturer::Entity, _, _>(&self.db, id).await
    }

    async fn manufacturer_code_exists(&self, code: &str) -> AppResult<bool> {
        exists_where::<manufacturer::Entity, _>(&self.db, manufacturer::Column::Code.eq(code))
            .await
    }

    async fn create_fitting_type(&self, new: NewFittingType) -> AppResult<FittingType> {
        let now = chrono::Utc::now();
        let active_model = fitting_type::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(new.name),
            code: Set(new.code),
            category: Set(new.category.to_string()),
            model: Set(new.model),
            manufacturer_id: Set(new.manufacturer_id),
            warranty_months: Set(to_i32(new.warranty_months)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(FittingType::from(model))
    }

    async fn find_fitting_type(&self, id: Uuid) -> AppResult<Option<FittingType>> {
        find_mapped::<fitting_type::Entity, _, _>(&self.db, id).await
    }

    async fn fitting_type_code_exists(&self, code: &str) -> AppResult<bool> {
        exists_where::<fitting_type::Entity, _>(&self.db, fitting_type::Column::Code.eq(code))
            .await
    }

    async fn create_supply_order(&self, new: NewSupplyOrder) -> AppResult<SupplyOrder> {
        let now = chrono::Utc::now();
        let total_amount = new.total_amount();
        let active_model = supply_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_number: Set(new.order_number),
            manufacturer_id: Set(new.manufacturer_id),
            items: Set(OrderItems(new.items)),
            total_amount: Set(total_amount),
            currency: Set(DEFAULT_CURRENCY.to_string()),
            status: Set(OrderStatus::Pending.to_string()),
            expected_delivery: Set(new.expected_delivery),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(SupplyOrder::from(model))
    }

    async fn find_supply_order(&self, id: Uuid) -> AppResult<Option<SupplyOrder>> {
        find_mapped::<supply_order::Entity, _, _>(&self.db, id).await
    }

    async fn order_number_exists(&self, order_number: &str) -> AppResult<bool> {
        exists_where::<supply_order::Entity, _>(
            &self.db,
            supply_order::Column::OrderNumber.eq(order_number),
        )
        .await
    }

    async fn update_supply_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> AppResult<SupplyOrder> {
        let order = supply_order::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Supply order")?;

        let mut active: supply_order::ActiveModel = order.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(SupplyOrder::from(model))
    }

    async fn create_batch(&self, new: NewFittingBatch) -> AppResult<FittingBatch> {
        let now = chrono::Utc::now();
        let active_model = fitting_batch::ActiveModel {
            id: Set(Uuid::new_v4()),
            batch_number: Set(new.batch_number),
            supply_order_id: Set(new.supply_order_id),
            fitting_type_id: Set(new.fitting_type_id),
            manufacturer_id: Set(new.manufacturer_id),
            quantity: Set(to_i32(new.quantity)),
            manufacture_date: Set(new.manufacture_date),
            status: Set(BatchStatus::Manufacturing.to_string()),
            qr_code_count: Set(0),
            qr_generated_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await?;
        Ok(FittingBatch::from(model))
    }

    async fn find_batch(&self, id: Uuid) -> AppResult<Option<FittingBatch>> {
        find_mapped::<fitting_batch::Entity, _, _>(&self.db, id).await
    }

    async fn batch_number_exists(&self, batch_number: &str) -> AppResult<bool> {
        exists_where::<fitting_batch::Entity, _>(
            &self.db,
            fitting_batch::Column::BatchNumber.eq(batch_number),
        )
        .await
    }

    async fn update_batch_status(&self, id: Uuid, status: BatchStatus) -> AppResult<FittingBatch> {
        let batch = fitting_batch::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found("Fitting batch")?;

        let mut active: fitting_batch::ActiveModel = batch.into();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(FittingBatch::from(model))
    }
}
