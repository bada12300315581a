//! Migration: Create installations, inspections and maintenance_records tables.

use sea_orm_migration::prelude::*;

use super::m20240601_000001_create_hierarchy_tables::{Divisions, Stations, Zones};
use super::m20240601_000003_create_qr_code_tables::QrCodes;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Installations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Installations::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // One installation per QR code
                    .col(
                        ColumnDef::new(Installations::QrCodeId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Installations::ZoneId).uuid().not_null())
                    .col(ColumnDef::new(Installations::DivisionId).uuid().null())
                    .col(ColumnDef::new(Installations::StationId).uuid().null())
                    .col(
                        ColumnDef::new(Installations::TrackSection)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Installations::KilometerPost).string_len(20).null())
                    .col(ColumnDef::new(Installations::Latitude).double().null())
                    .col(ColumnDef::new(Installations::Longitude).double().null())
                    .col(ColumnDef::new(Installations::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Installations::InstalledBy).string_len(50).null())
                    .col(
                        ColumnDef::new(Installations::InstallationDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Installations::WarrantyStart)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Installations::WarrantyEnd)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Installations::ReplacedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Installations::RetiredAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(Installations::Remarks).string_len(1000).null())
                    .col(
                        ColumnDef::new(Installations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Installations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_installations_qr_code_id")
                            .from(Installations::Table, Installations::QrCodeId)
                            .to(QrCodes::Table, QrCodes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_installations_zone_id")
                            .from(Installations::Table, Installations::ZoneId)
                            .to(Zones::Table, Zones::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_installations_division_id")
                            .from(Installations::Table, Installations::DivisionId)
                            .to(Divisions::Table, Divisions::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_installations_station_id")
                            .from(Installations::Table, Installations::StationId)
                            .to(Stations::Table, Stations::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Inspections::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inspections::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inspections::QrCodeId).uuid().not_null())
                    .col(
                        ColumnDef::new(Inspections::InspectionType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Inspections::Status).string_len(20).not_null())
                    .col(ColumnDef::new(Inspections::InspectorId).string_len(50).null())
                    .col(ColumnDef::new(Inspections::VisualCondition).string_len(20).null())
                    .col(ColumnDef::new(Inspections::Checklist).json_binary().not_null())
                    .col(ColumnDef::new(Inspections::Latitude).double().null())
                    .col(ColumnDef::new(Inspections::Longitude).double().null())
                    .col(ColumnDef::new(Inspections::Remarks).string_len(1000).null())
                    .col(ColumnDef::new(Inspections::Recommendation).string_len(20).null())
                    .col(ColumnDef::new(Inspections::NextInspectionDue).date().null())
                    .col(
                        ColumnDef::new(Inspections::InspectionDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inspections::CompletedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Inspections::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Inspections::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inspections_qr_code_id")
                            .from(Inspections::Table, Inspections::QrCodeId)
                            .to(QrCodes::Table, QrCodes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inspections_qr_code_date")
                    .table(Inspections::Table)
                    .col(Inspections::QrCodeId)
                    .col(Inspections::InspectionDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MaintenanceRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MaintenanceRecords::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::QrCodeId).uuid().not_null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::MaintenanceType)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::Status)
                            .string_len(20)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::WorkDescription)
                            .string_len(1000)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::PerformedBy)
                            .string_len(50)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::PartsReplaced)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::LaborHours).double().null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::TotalCost)
                            .double()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::Remarks).string_len(1000).null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::MaintenanceDate)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MaintenanceRecords::NextMaintenanceDue).date().null())
                    .col(
                        ColumnDef::new(MaintenanceRecords::QualityCheckRequired)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::QualityCheckPassed)
                            .boolean()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::QualityCheckedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::QualityRemarks)
                            .string_len(1000)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaintenanceRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_maintenance_records_qr_code_id")
                            .from(MaintenanceRecords::Table, MaintenanceRecords::QrCodeId)
                            .to(QrCodes::Table, QrCodes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_maintenance_records_qr_code_id")
                    .table(MaintenanceRecords::Table)
                    .col(MaintenanceRecords::QrCodeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaintenanceRecords::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Inspections::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Installations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Installations {
    Table,
    Id,
    QrCodeId,
    ZoneId,
    DivisionId,
    StationId,
    TrackSection,
    KilometerPost,
    Latitude,
    Longitude,
    Status,
    InstalledBy,
    InstallationDate,
    WarrantyStart,
    WarrantyEnd,
    ReplacedAt,
    RetiredAt,
    Remarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Inspections {
    Table,
    Id,
    QrCodeId,
    InspectionType,
    Status,
    InspectorId,
    VisualCondition,
    Checklist,
    Latitude,
    Longitude,
    Remarks,
    Recommendation,
    NextInspectionDue,
    InspectionDate,
    CompletedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MaintenanceRecords {
    Table,
    Id,
    QrCodeId,
    MaintenanceType,
    Status,
    WorkDescription,
    PerformedBy,
    PartsReplaced,
    LaborHours,
    TotalCost,
    Remarks,
    MaintenanceDate,
    NextMaintenanceDue,
    QualityCheckRequired,
    QualityCheckPassed,
    QualityCheckedAt,
    QualityRemarks,
    CreatedAt,
    UpdatedAt,
}
