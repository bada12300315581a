//! Repository integration tests against an in-memory SQLite database.
//!
//! Every test gets its own migrated database, so the stores are exercised
//! with the real schema: unique keys, transactions and the batch counter.

use chrono::{Duration, Utc};
use uuid::Uuid;

use common::{AppError, DatabaseConfig};
use domain::{
    FittingBatch, FittingCategory, InstallationStatus, NewFittingBatch, NewFittingType,
    NewInstallation, NewManufacturer, NewQrCode, NewScan, NewSupplyOrder, NewZone, OrderItem,
    OrderStatus, QrCodeStatus, QrVerification, VerificationStatus, Zone,
};
use qr_track::infra::{
    Database, HierarchyRepository, HierarchyStore, InstallationRepository, InstallationStore,
    QrCodeRepository, QrCodeStore, SupplyRepository, SupplyStore,
};

// =============================================================================
// Test Helpers
// =============================================================================

async fn setup() -> Database {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };
    Database::connect(&config)
        .await
        .expect("in-memory database should migrate")
}

async fn seed_zone(db: &Database) -> Zone {
    HierarchyStore::new(db.get_connection())
        .create_zone(NewZone {
            name: "Southern Railway".to_string(),
            code: "SR".to_string(),
            description: None,
            headquarters: Some("Chennai".to_string()),
            coordinates: None,
        })
        .await
        .expect("zone insert")
}

/// Manufacturer, fitting type, order and one batch of 100 fittings
async fn seed_batch(db: &Database) -> FittingBatch {
    let supply = SupplyStore::new(db.get_connection());

    let manufacturer = supply
        .create_manufacturer(NewManufacturer {
            name: "Jindal Rail Components".to_string(),
            code: "JRC".to_string(),
            license_number: None,
            contact_email: None,
            contact_phone: None,
            city: None,
            state: None,
            pincode: None,
        })
        .await
        .expect("manufacturer insert");

    let fitting_type = supply
        .create_fitting_type(NewFittingType {
            name: "Elastic Rail Clip Mk-III".to_string(),
            code: "ERC3".to_string(),
            category: FittingCategory::ElasticRailClip,
            model: None,
            manufacturer_id: Some(manufacturer.id),
            warranty_months: 36,
        })
        .await
        .expect("fitting type insert");

    let order = supply
        .create_supply_order(NewSupplyOrder {
            order_number: "PO-2024-0001".to_string(),
            manufacturer_id: manufacturer.id,
            items: vec![OrderItem {
                fitting_type_id: fitting_type.id,
                quantity: 100,
                unit_price: 12.5,
            }],
            expected_delivery: None,
        })
        .await
        .expect("order insert");

    supply
        .create_batch(NewFittingBatch {
            batch_number: "BATCH-2024-0001".to_string(),
            supply_order_id: order.id,
            fitting_type_id: fitting_type.id,
            manufacturer_id: manufacturer.id,
            quantity: 100,
            manufacture_date: None,
        })
        .await
        .expect("batch insert")
}

fn new_codes(batch_id: Uuid, sequences: std::ops::RangeInclusive<u32>) -> Vec<NewQrCode> {
    sequences
        .map(|sequence| NewQrCode {
            code: format!("QRTF_{}_{:06}_ABCDEF12", batch_id.simple(), sequence),
            batch_id,
            sequence_number: sequence,
            marking_machine_id: Some("LASER-01".to_string()),
            marking_operator_id: None,
        })
        .collect()
}

fn scan(scanned_by: &str) -> NewScan {
    NewScan {
        scanned_by: Some(scanned_by.to_string()),
        scan_location: Some("Km 12/4".to_string()),
        scan_coordinates: None,
        scan_purpose: "inspection".to_string(),
        device_info: serde_json::json!({ "model": "TC52" }),
        ip_address: Some("203.0.113.7".to_string()),
        user_agent: None,
    }
}

// =============================================================================
// Migrations
// =============================================================================

#[tokio::test]
async fn test_migration_status_lists_applied_migrations() {
    let db = setup().await;

    let status = db.migration_status().await.unwrap();

    assert!(!status.is_empty());
    assert!(status.iter().all(|(_, applied)| *applied));
}

// =============================================================================
// Hierarchy
// =============================================================================

#[tokio::test]
async fn test_zone_round_trips_and_reports_code() {
    let db = setup().await;
    let repo = HierarchyStore::new(db.get_connection());
    let zone = seed_zone(&db).await;

    let found = repo.find_zone(zone.id).await.unwrap().unwrap();
    assert_eq!(found.code, "SR");
    assert_eq!(found.headquarters.as_deref(), Some("Chennai"));
    assert!(repo.zone_code_exists("SR").await.unwrap());
    assert!(!repo.zone_code_exists("NR").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_zone_code_is_a_conflict() {
    let db = setup().await;
    seed_zone(&db).await;

    let result = HierarchyStore::new(db.get_connection())
        .create_zone(NewZone {
            name: "Another".to_string(),
            code: "SR".to_string(),
            description: None,
            headquarters: None,
            coordinates: None,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

// =============================================================================
// Supply
// =============================================================================

#[tokio::test]
async fn test_supply_order_total_is_derived_from_items() {
    let db = setup().await;
    let batch = seed_batch(&db).await;
    let supply = SupplyStore::new(db.get_connection());

    let order = supply
        .find_supply_order(batch.supply_order_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(order.items.len(), 1);
    assert!((order.total_amount - 1250.0).abs() < f64::EPSILON);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.includes_fitting_type(batch.fitting_type_id));

    let updated = supply
        .update_supply_order_status(order.id, OrderStatus::Confirmed)
        .await
        .unwrap();
    assert_eq!(updated.status, OrderStatus::Confirmed);
}

#[tokio::test]
async fn test_new_batch_starts_without_codes() {
    let db = setup().await;
    let batch = seed_batch(&db).await;

    assert_eq!(batch.qr_code_count, 0);
    assert!(batch.qr_generated_at.is_none());
    assert_eq!(batch.next_sequence(), 1);
    assert!(SupplyStore::new(db.get_connection())
        .batch_number_exists("BATCH-2024-0001")
        .await
        .unwrap());
}

#[tokio::test]
async fn test_status_update_of_missing_batch_is_not_found() {
    let db = setup().await;

    let result = SupplyStore::new(db.get_connection())
        .update_batch_status(Uuid::new_v4(), domain::BatchStatus::Approved)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

// =============================================================================
// QR codes
// =============================================================================

#[tokio::test]
async fn test_insert_batch_advances_counter() {
    let db = setup().await;
    let batch = seed_batch(&db).await;
    let qr_codes = QrCodeStore::new(db.get_connection());

    let inserted = qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 1..=5))
        .await
        .unwrap();

    assert_eq!(inserted.len(), 5);
    assert!(inserted.iter().all(|qr| qr.status == QrCodeStatus::Generated));
    assert_eq!(inserted[4].sequence_number, 5);

    let batch = SupplyStore::new(db.get_connection())
        .find_batch(batch.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(batch.qr_code_count, 5);
    assert!(batch.qr_generated_at.is_some());
}

#[tokio::test]
async fn test_stale_counter_is_rejected_without_writing() {
    let db = setup().await;
    let batch = seed_batch(&db).await;
    let qr_codes = QrCodeStore::new(db.get_connection());

    qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 1..=3))
        .await
        .unwrap();

    // A second writer that still believes the batch is empty
    let result = qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 4..=6))
        .await;
    assert!(matches!(result, Err(AppError::Conflict(_))));

    let orphan = format!("QRTF_{}_{:06}_ABCDEF12", batch.id.simple(), 4);
    assert!(qr_codes.find_by_code(&orphan).await.unwrap().is_none());
}

#[tokio::test]
async fn test_large_batch_is_inserted_in_chunks() {
    let db = setup().await;
    let batch = seed_batch(&db).await;
    let qr_codes = QrCodeStore::new(db.get_connection());

    let inserted = qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 1..=1200))
        .await
        .unwrap();

    assert_eq!(inserted.len(), 1200);
    let last = format!("QRTF_{}_{:06}_ABCDEF12", batch.id.simple(), 1200);
    assert!(qr_codes.find_by_code(&last).await.unwrap().is_some());
}

#[tokio::test]
async fn test_record_scan_stamps_last_scanned_fields() {
    let db = setup().await;
    let batch = seed_batch(&db).await;
    let qr_codes = QrCodeStore::new(db.get_connection());
    let qr = qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 1..=1))
        .await
        .unwrap()
        .remove(0);

    let log = qr_codes.record_scan(qr.clone(), scan("INSP-7")).await.unwrap();
    assert_eq!(log.code, qr.code);
    assert_eq!(log.device_info["model"], "TC52");

    let refreshed = qr_codes.find_by_id(qr.id).await.unwrap().unwrap();
    assert_eq!(refreshed.last_scanned_by.as_deref(), Some("INSP-7"));
    assert!(refreshed.last_scanned_at.is_some());

    let scans = qr_codes.recent_scans(qr.id, 20).await.unwrap();
    assert_eq!(scans.len(), 1);
    assert_eq!(scans[0].scan_purpose, "inspection");
}

#[tokio::test]
async fn test_rejected_verification_marks_code_rejected() {
    let db = setup().await;
    let batch = seed_batch(&db).await;
    let qr_codes = QrCodeStore::new(db.get_connection());
    let qr = qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 1..=1))
        .await
        .unwrap()
        .remove(0);

    let verified = qr_codes
        .apply_verification(
            qr.id,
            QrVerification {
                status: VerificationStatus::Rejected,
                print_quality_score: Some(0.2),
                remarks: Some("Smudged".to_string()),
                verified_by: Some("QA-1".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(verified.status, QrCodeStatus::Rejected);
    assert_eq!(verified.verification_status, Some(VerificationStatus::Rejected));
    assert!(verified.verified_at.is_some());
}

// =============================================================================
// Installations
// =============================================================================

#[tokio::test]
async fn test_installation_status_is_mirrored_onto_qr_code() {
    let db = setup().await;
    let zone = seed_zone(&db).await;
    let batch = seed_batch(&db).await;
    let qr_codes = QrCodeStore::new(db.get_connection());
    let installations = InstallationStore::new(db.get_connection());
    let qr = qr_codes
        .insert_batch(batch.id, 0, new_codes(batch.id, 1..=1))
        .await
        .unwrap()
        .remove(0);

    let warranty_end = Utc::now() + Duration::days(730);
    let installation = installations
        .create(
            NewInstallation {
                qr_code_id: qr.id,
                zone_id: zone.id,
                division_id: None,
                station_id: None,
                track_section: "MAS-AJJ UP line".to_string(),
                kilometer_post: Some("12/4".to_string()),
                coordinates: None,
                installed_by: Some("GANG-3".to_string()),
                remarks: None,
            },
            warranty_end,
        )
        .await
        .unwrap();

    assert_eq!(installation.status, InstallationStatus::Installed);
    let installed = qr_codes.find_by_id(qr.id).await.unwrap().unwrap();
    assert_eq!(installed.status, QrCodeStatus::Installed);
    assert!(installed.installed_at.is_some());

    let retired = installations
        .update_status(installation.id, InstallationStatus::Retired, None)
        .await
        .unwrap();
    assert!(retired.retired_at.is_some());

    let refreshed = qr_codes.find_by_id(qr.id).await.unwrap().unwrap();
    assert_eq!(refreshed.status, QrCodeStatus::Retired);

    let by_code = installations.find_by_qr_code(qr.id).await.unwrap().unwrap();
    assert_eq!(by_code.id, installation.id);
}
