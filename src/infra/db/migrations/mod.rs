//! Database migrations.
//!
//! Each migration is a separate module following SeaORM conventions.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20240601_000001_create_hierarchy_tables;
mod m20240601_000002_create_supply_tables;
mod m20240601_000003_create_qr_code_tables;
mod m20240601_000004_create_field_record_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_hierarchy_tables::Migration),
            Box::new(m20240601_000002_create_supply_tables::Migration),
            Box::new(m20240601_000003_create_qr_code_tables::Migration),
            Box::new(m20240601_000004_create_field_record_tables::Migration),
        ]
    }
}
