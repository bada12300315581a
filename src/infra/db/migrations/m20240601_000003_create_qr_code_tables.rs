//! Migration: Create qr_codes and qr_scan_logs tables.
//!
//! Uniqueness of issued codes is enforced here: `code` is unique and each
//! batch position `(batch_id, sequence_number)` can be issued only once.

use sea_orm_migration::prelude::*;

use super::m20240601_000002_create_supply_tables::FittingBatches;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(QrCodes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QrCodes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(QrCodes::Code).string_len(100).not_null().unique_key())
                    .col(ColumnDef::new(QrCodes::BatchId).uuid().not_null())
                    .col(ColumnDef::new(QrCodes::SequenceNumber).integer().not_null())
                    .col(ColumnDef::new(QrCodes::Status).string_len(20).not_null())
                    .col(ColumnDef::new(QrCodes::MarkingMachineId).string_len(50).null())
                    .col(ColumnDef::new(QrCodes::MarkingOperatorId).string_len(50).null())
                    .col(
                        ColumnDef::new(QrCodes::GeneratedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(QrCodes::VerificationStatus).string_len(20).null())
                    .col(ColumnDef::new(QrCodes::PrintQualityScore).double().null())
                    .col(ColumnDef::new(QrCodes::VerificationRemarks).string_len(500).null())
                    .col(ColumnDef::new(QrCodes::VerifiedBy).string_len(50).null())
                    .col(
                        ColumnDef::new(QrCodes::VerifiedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::InstalledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::LastScannedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(QrCodes::LastScannedBy).string_len(50).null())
                    .col(
                        ColumnDef::new(QrCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(QrCodes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_qr_codes_batch_id")
                            .from(QrCodes::Table, QrCodes::BatchId)
                            .to(FittingBatches::Table, FittingBatches::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_qr_codes_batch_sequence")
                    .table(QrCodes::Table)
                    .col(QrCodes::BatchId)
                    .col(QrCodes::SequenceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(QrScanLogs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(QrScanLogs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(QrScanLogs::QrCodeId).uuid().not_null())
                    .col(ColumnDef::new(QrScanLogs::Code).string_len(100).not_null())
                    .col(ColumnDef::new(QrScanLogs::ScannedBy).string_len(50).null())
                    .col(ColumnDef::new(QrScanLogs::ScanLocation).string_len(200).null())
                    .col(ColumnDef::new(QrScanLogs::Latitude).double().null())
                    .col(ColumnDef::new(QrScanLogs::Longitude).double().null())
                    .col(ColumnDef::new(QrScanLogs::ScanPurpose).string_len(50).not_null())
                    .col(ColumnDef::new(QrScanLogs::DeviceInfo).json_binary().not_null())
                    .col(ColumnDef::new(QrScanLogs::IpAddress).string_len(45).null())
                    .col(ColumnDef::new(QrScanLogs::UserAgent).string_len(500).null())
                    .col(
                        ColumnDef::new(QrScanLogs::ScannedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_qr_scan_logs_qr_code_id")
                            .from(QrScanLogs::Table, QrScanLogs::QrCodeId)
                            .to(QrCodes::Table, QrCodes::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_qr_scan_logs_qr_code_id")
                    .table(QrScanLogs::Table)
                    .col(QrScanLogs::QrCodeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(QrScanLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(QrCodes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum QrCodes {
    Table,
    Id,
    Code,
    BatchId,
    SequenceNumber,
    Status,
    MarkingMachineId,
    MarkingOperatorId,
    GeneratedAt,
    VerificationStatus,
    PrintQualityScore,
    VerificationRemarks,
    VerifiedBy,
    VerifiedAt,
    InstalledAt,
    LastScannedAt,
    LastScannedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum QrScanLogs {
    Table,
    Id,
    QrCodeId,
    Code,
    ScannedBy,
    ScanLocation,
    Latitude,
    Longitude,
    ScanPurpose,
    DeviceInfo,
    IpAddress,
    UserAgent,
    ScannedAt,
}
