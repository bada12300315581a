//! Migration: Create manufacturers, fitting types, supply orders and fitting batches.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Manufacturers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Manufacturers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Manufacturers::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Manufacturers::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Manufacturers::LicenseNumber).string_len(50).null())
                    .col(ColumnDef::new(Manufacturers::ContactEmail).string_len(255).null())
                    .col(ColumnDef::new(Manufacturers::ContactPhone).string_len(20).null())
                    .col(ColumnDef::new(Manufacturers::City).string_len(100).null())
                    .col(ColumnDef::new(Manufacturers::State).string_len(100).null())
                    .col(ColumnDef::new(Manufacturers::Pincode).string_len(6).null())
                    .col(
                        ColumnDef::new(Manufacturers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Manufacturers::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FittingTypes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FittingTypes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(FittingTypes::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(FittingTypes::Code)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FittingTypes::Category).string_len(30).not_null())
                    .col(ColumnDef::new(FittingTypes::Model).string_len(50).null())
                    .col(ColumnDef::new(FittingTypes::ManufacturerId).uuid().null())
                    .col(
                        ColumnDef::new(FittingTypes::WarrantyMonths)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FittingTypes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FittingTypes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SupplyOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SupplyOrders::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(SupplyOrders::OrderNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(SupplyOrders::ManufacturerId).uuid().not_null())
                    .col(ColumnDef::new(SupplyOrders::Items).json_binary().not_null())
                    .col(ColumnDef::new(SupplyOrders::TotalAmount).double().not_null())
                    .col(ColumnDef::new(SupplyOrders::Currency).string_len(3).not_null())
                    .col(ColumnDef::new(SupplyOrders::Status).string_len(20).not_null())
                    .col(ColumnDef::new(SupplyOrders::ExpectedDelivery).date().null())
                    .col(
                        ColumnDef::new(SupplyOrders::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(SupplyOrders::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_supply_orders_manufacturer_id")
                            .from(SupplyOrders::Table, SupplyOrders::ManufacturerId)
                            .to(Manufacturers::Table, Manufacturers::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FittingBatches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(FittingBatches::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(FittingBatches::BatchNumber)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(FittingBatches::SupplyOrderId).uuid().not_null())
                    .col(ColumnDef::new(FittingBatches::FittingTypeId).uuid().not_null())
                    .col(ColumnDef::new(FittingBatches::ManufacturerId).uuid().not_null())
                    .col(ColumnDef::new(FittingBatches::Quantity).integer().not_null())
                    .col(ColumnDef::new(FittingBatches::ManufactureDate).date().null())
                    .col(ColumnDef::new(FittingBatches::Status).string_len(20).not_null())
                    .col(
                        ColumnDef::new(FittingBatches::QrCodeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(FittingBatches::QrGeneratedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(FittingBatches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(FittingBatches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fitting_batches_supply_order_id")
                            .from(FittingBatches::Table, FittingBatches::SupplyOrderId)
                            .to(SupplyOrders::Table, SupplyOrders::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_fitting_batches_fitting_type_id")
                            .from(FittingBatches::Table, FittingBatches::FittingTypeId)
                            .to(FittingTypes::Table, FittingTypes::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FittingBatches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SupplyOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(FittingTypes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Manufacturers::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Manufacturers {
    Table,
    Id,
    Name,
    Code,
    LicenseNumber,
    ContactEmail,
    ContactPhone,
    City,
    State,
    Pincode,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum FittingTypes {
    Table,
    Id,
    Name,
    Code,
    Category,
    Model,
    ManufacturerId,
    WarrantyMonths,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum SupplyOrders {
    Table,
    Id,
    OrderNumber,
    ManufacturerId,
    Items,
    TotalAmount,
    Currency,
    Status,
    ExpectedDelivery,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum FittingBatches {
    Table,
    Id,
    BatchNumber,
    SupplyOrderId,
    FittingTypeId,
    ManufacturerId,
    Quantity,
    ManufactureDate,
    Status,
    QrCodeCount,
    QrGeneratedAt,
    CreatedAt,
    UpdatedAt,
}
