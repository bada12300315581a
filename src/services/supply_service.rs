//! Supply service - manufacturers, fitting types, supply orders and fitting batches.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt};
use domain::{
    BatchStatus, FittingBatch, FittingType, Manufacturer, NewFittingBatch, NewFittingType,
    NewManufacturer, NewSupplyOrder, OrderStatus, SupplyOrder,
};

use crate::infra::SupplyRepository;

/// Supply service trait for dependency injection.
#[async_trait]
pub trait SupplyService: Send + Sync {
    async fn create_manufacturer(&self, manufacturer: NewManufacturer) -> AppResult<Manufacturer>;

    async fn get_manufacturer(&self, id: Uuid) -> AppResult<Manufacturer>;

    async fn create_fitting_type(&self, fitting_type: NewFittingType) -> AppResult<FittingType>;

    async fn get_fitting_type(&self, id: Uuid) -> AppResult<FittingType>;

    async fn create_supply_order(&self, order: NewSupplyOrder) -> AppResult<SupplyOrder>;

    async fn get_supply_order(&self, id: Uuid) -> AppResult<SupplyOrder>;

    async fn update_supply_order_status(&self, id: Uuid, status: OrderStatus)
        -> AppResult<SupplyOrder>;

    async fn create_batch(&self, batch: NewFittingBatch) -> AppResult<FittingBatch>;

    async fn get_batch(&self, id: Uuid) -> AppResult<FittingBatch>;

    async fn update_batch_status(&self, id: Uuid, status: BatchStatus) -> AppResult<FittingBatch>;
}

pub struct SupplyManager {
    repo: Arc<dyn SupplyRepository>,
}

impl SupplyManager {
    pub fn new(repo: Arc<dyn SupplyRepository>) -> Self {
        Self { repo }
    }

    async fn ensure_manufacturer(&self, id: Uuid) -> AppResult<Manufacturer> {
        self.repo
            .find_manufacturer(id)
            .await?
            .ok_or_not_found("Manufacturer")
    }
}

#[async_trait]
impl SupplyService for SupplyManager {
    async fn create_manufacturer(&self, manufacturer: NewManufacturer) -> AppResult<Manufacturer> {
        if self.repo.manufacturer_code_exists(&manufacturer.code).await? {
            return Err(AppError::conflict(format!(
                "Manufacturer code '{}'",
                manufacturer.code
            )));
        }

        let manufacturer = self.repo.create_manufacturer(manufacturer).await?;
        tracing::info!(
            manufacturer_id = %manufacturer.id,
            code = %manufacturer.code,
            "Manufacturer registered"
        );
        Ok(manufacturer)
    }

    async fn get_manufacturer(&self, id: Uuid) -> AppResult<Manufacturer> {
        self.ensure_manufacturer(id).await
    }

    async fn create_fitting_type(&self, fitting_type: NewFittingType) -> AppResult<FittingType> {
        if let Some(manufacturer_id) = fitting_type.manufacturer_id {
            self.ensure_manufacturer(manufacturer_id).await?;
        }

        if self.repo.fitting_type_code_exists(&fitting_type.code).await? {
            return Err(AppError::conflict(format!(
                "Fitting type code '{}'",
                fitting_type.code
            )));
        }

        let fitting_type = self.repo.create_fitting_type(fitting_type).await?;
        tracing::info!(
            fitting_type_id = %fitting_type.id,
            code = %fitting_type.code,
            category = %fitting_type.category,
            "Fitting type created"
        );
        Ok(fitting_type)
    }

    async fn get_fitting_type(&self, id: Uuid) -> AppResult<FittingType> {
        self.repo
            .find_fitting_type(id)
            .await?
            .ok_or_not_found("Fitting type")
    }

    async fn create_supply_order(&self, order: NewSupplyOrder) -> AppResult<SupplyOrder> {
        if order.items.is_empty() {
            return Err(AppError::validation(
                "A supply order needs at least one item",
            ));
        }

        self.ensure_manufacturer(order.manufacturer_id).await?;

        let fitting_type_ids: HashSet<Uuid> =
            order.items.iter().map(|item| item.fitting_type_id).collect();
        for fitting_type_id in fitting_type_ids {
            self.repo
                .find_fitting_type(fitting_type_id)
                .await?
                .ok_or_not_found("Fitting type")?;
        }

        if self.repo.order_number_exists(&order.order_number).await? {
            return Err(AppError::conflict(format!(
                "Supply order '{}'",
                order.order_number
            )));
        }

        let order = self.repo.create_supply_order(order).await?;
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            items = order.items.len(),
            total_amount = order.total_amount,
            "Supply order created"
        );
        Ok(order)
    }

    async fn get_supply_order(&self, id: Uuid) -> AppResult<SupplyOrder> {
        self.repo
            .find_supply_order(id)
            .await?
            .ok_or_not_found("Supply order")
    }

    async fn update_supply_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> AppResult<SupplyOrder> {
        let order = self.repo.update_supply_order_status(id, status).await?;
        tracing::info!(order_id = %id, status = %status, "Supply order status updated");
        Ok(order)
    }

    async fn create_batch(&self, batch: NewFittingBatch) -> AppResult<FittingBatch> {
        let order = self
            .repo
            .find_supply_order(batch.supply_order_id)
            .await?
            .ok_or_not_found("Supply order")?;

        self.repo
            .find_fitting_type(batch.fitting_type_id)
            .await?
            .ok_or_not_found("Fitting type")?;

        self.ensure_manufacturer(batch.manufacturer_id).await?;

        if !order.includes_fitting_type(batch.fitting_type_id) {
            return Err(AppError::validation(
                "Fitting type is not part of the supply order",
            ));
        }

        if self.repo.batch_number_exists(&batch.batch_number).await? {
            return Err(AppError::conflict(format!(
                "Batch number '{}'",
                batch.batch_number
            )));
        }

        let batch = self.repo.create_batch(batch).await?;
        tracing::info!(
            batch_id = %batch.id,
            batch_number = %batch.batch_number,
            quantity = batch.quantity,
            "Fitting batch created"
        );
        Ok(batch)
    }

    async fn get_batch(&self, id: Uuid) -> AppResult<FittingBatch> {
        self.repo.find_batch(id).await?.ok_or_not_found("Fitting batch")
    }

    async fn update_batch_status(&self, id: Uuid, status: BatchStatus) -> AppResult<FittingBatch> {
        let batch = self.repo.update_batch_status(id, status).await?;
        tracing::info!(batch_id = %id, status = %status, "Fitting batch status updated");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockSupplyRepository;
    use chrono::Utc;
    use domain::{FittingCategory, OrderItem};

    fn manufacturer(id: Uuid) -> Manufacturer {
        Manufacturer {
            id,
            name: "Rail Clips Ltd".to_string(),
            code: "RCL".to_string(),
            license_number: None,
            contact_email: None,
            contact_phone: None,
            city: None,
            state: None,
            pincode: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn fitting_type(id: Uuid) -> FittingType {
        FittingType {
            id,
            name: "ERC Mk-V".to_string(),
            code: "ERC5".to_string(),
            category: FittingCategory::ElasticRailClip,
            model: Some("MK-V".to_string()),
            manufacturer_id: None,
            warranty_months: 36,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn order(fitting_type_id: Uuid) -> SupplyOrder {
        SupplyOrder {
            id: Uuid::new_v4(),
            order_number: "SO-2024-001".to_string(),
            manufacturer_id: Uuid::new_v4(),
            items: vec![OrderItem {
                fitting_type_id,
                quantity: 1000,
                unit_price: 45.0,
            }],
            total_amount: 45_000.0,
            currency: "INR".to_string(),
            status: OrderStatus::Pending,
            expected_delivery: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn new_batch(supply_order_id: Uuid, fitting_type_id: Uuid) -> NewFittingBatch {
        NewFittingBatch {
            batch_number: "BATCH-0001".to_string(),
            supply_order_id,
            fitting_type_id,
            manufacturer_id: Uuid::new_v4(),
            quantity: 500,
            manufacture_date: None,
        }
    }

    #[tokio::test]
    async fn order_without_items_is_rejected() {
        let repo = MockSupplyRepository::new();
        let service = SupplyManager::new(Arc::new(repo));

        let err = service
            .create_supply_order(NewSupplyOrder {
                order_number: "SO-2024-001".to_string(),
                manufacturer_id: Uuid::new_v4(),
                items: vec![],
                expected_delivery: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn order_with_unknown_fitting_type_is_not_found() {
        let mut repo = MockSupplyRepository::new();
        repo.expect_find_manufacturer()
            .returning(|id| Ok(Some(manufacturer(id))));
        repo.expect_find_fitting_type().returning(|_| Ok(None));
        repo.expect_create_supply_order().never();

        let service = SupplyManager::new(Arc::new(repo));
        let err = service
            .create_supply_order(NewSupplyOrder {
                order_number: "SO-2024-001".to_string(),
                manufacturer_id: Uuid::new_v4(),
                items: vec![OrderItem {
                    fitting_type_id: Uuid::new_v4(),
                    quantity: 10,
                    unit_price: 1.0,
                }],
                expected_delivery: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(entity) if entity == "Fitting type"));
    }

    #[tokio::test]
    async fn batch_fitting_type_must_be_on_the_order() {
        let ordered_type = Uuid::new_v4();
        let other_type = Uuid::new_v4();
        let order = order(ordered_type);
        let order_id = order.id;

        let mut repo = MockSupplyRepository::new();
        repo.expect_find_supply_order()
            .returning(move |_| Ok(Some(order.clone())));
        repo.expect_find_fitting_type()
            .returning(|id| Ok(Some(fitting_type(id))));
        repo.expect_find_manufacturer()
            .returning(|id| Ok(Some(manufacturer(id))));
        repo.expect_create_batch().never();

        let service = SupplyManager::new(Arc::new(repo));
        let err = service
            .create_batch(new_batch(order_id, other_type))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(msg) if msg.contains("supply order")));
    }

    #[tokio::test]
    async fn duplicate_batch_number_conflicts() {
        let fitting_type_id = Uuid::new_v4();
        let order = order(fitting_type_id);
        let order_id = order.id;

        let mut repo = MockSupplyRepository::new();
        repo.expect_find_supply_order()
            .returning(move |_| Ok(Some(order.clone())));
        repo.expect_find_fitting_type()
            .returning(|id| Ok(Some(fitting_type(id))));
        repo.expect_find_manufacturer()
            .returning(|id| Ok(Some(manufacturer(id))));
        repo.expect_batch_number_exists().returning(|_| Ok(true));
        repo.expect_create_batch().never();

        let service = SupplyManager::new(Arc::new(repo));
        let err = service
            .create_batch(new_batch(order_id, fitting_type_id))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn fitting_type_with_unknown_manufacturer_is_not_found() {
        let mut repo = MockSupplyRepository::new();
        repo.expect_find_manufacturer().returning(|_| Ok(None));

        let service = SupplyManager::new(Arc::new(repo));
        let err = service
            .create_fitting_type(NewFittingType {
                name: "Liner".to_string(),
                code: "GFNL".to_string(),
                category: FittingCategory::Liner,
                model: None,
                manufacturer_id: Some(Uuid::new_v4()),
                warranty_months: 24,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(entity) if entity == "Manufacturer"));
    }
}
