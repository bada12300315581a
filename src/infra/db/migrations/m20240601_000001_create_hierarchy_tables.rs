//! Migration: Create zones, divisions and stations tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Zones::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Zones::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Zones::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Zones::Code).string_len(10).not_null().unique_key())
                    .col(ColumnDef::new(Zones::Description).string_len(500).null())
                    .col(ColumnDef::new(Zones::Headquarters).string_len(100).null())
                    .col(ColumnDef::new(Zones::Latitude).double().null())
                    .col(ColumnDef::new(Zones::Longitude).double().null())
                    .col(
                        ColumnDef::new(Zones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Zones::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Divisions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Divisions::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Divisions::ZoneId).uuid().not_null())
                    .col(ColumnDef::new(Divisions::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Divisions::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Divisions::Headquarters).string_len(100).null())
                    .col(ColumnDef::new(Divisions::Latitude).double().null())
                    .col(ColumnDef::new(Divisions::Longitude).double().null())
                    .col(
                        ColumnDef::new(Divisions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Divisions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_divisions_zone_id")
                            .from(Divisions::Table, Divisions::ZoneId)
                            .to(Zones::Table, Zones::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Stations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Stations::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Stations::DivisionId).uuid().not_null())
                    .col(ColumnDef::new(Stations::Name).string_len(100).not_null())
                    .col(
                        ColumnDef::new(Stations::Code)
                            .string_len(10)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Stations::StationType).string_len(50).null())
                    .col(ColumnDef::new(Stations::PlatformCount).integer().null())
                    .col(ColumnDef::new(Stations::Latitude).double().null())
                    .col(ColumnDef::new(Stations::Longitude).double().null())
                    .col(
                        ColumnDef::new(Stations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Stations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stations_division_id")
                            .from(Stations::Table, Stations::DivisionId)
                            .to(Divisions::Table, Divisions::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Stations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Divisions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Zones::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum Zones {
    Table,
    Id,
    Name,
    Code,
    Description,
    Headquarters,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Divisions {
    Table,
    Id,
    ZoneId,
    Name,
    Code,
    Headquarters,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub(super) enum Stations {
    Table,
    Id,
    DivisionId,
    Name,
    Code,
    StationType,
    PlatformCount,
    Latitude,
    Longitude,
    CreatedAt,
    UpdatedAt,
}
