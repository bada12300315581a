//! QR code service - batch generation, lookups, scans, verification and rendering.
//!
//! Generated payloads follow `QRTF_{batch}_{sequence}_{digest}` (see
//! [`domain::QrPayload`]). Sequences for a batch continue from its current
//! `qr_code_count`, so repeated generations never reissue an identifier.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use common::{AppError, AppResult, OptionExt, QrCodeConfig};
use domain::{
    BatchSummary, GeneratedBatch, NewQrCode, NewScan, QrCode, QrCodeDetails, QrCodeHistory,
    QrPayload, QrVerification, ScanLog, HISTORY_LIMIT, MAX_QR_SEQUENCE,
};

use crate::infra::{
    InspectionRepository, InstallationRepository, MaintenanceRepository, QrCodeRepository,
    SupplyRepository,
};
use crate::utils::qr_image::{self, RenderOptions};

/// Request to issue a run of QR codes for a fitting batch.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateQrBatch {
    pub batch_id: Uuid,
    pub quantity: u32,
    pub marking_machine_id: Option<String>,
    pub marking_operator_id: Option<String>,
}

/// Result of checking a raw scanned string offline.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrValidation {
    pub payload: String,
    pub valid_structure: bool,
    pub digest_valid: bool,
    pub batch_id: Option<Uuid>,
    pub sequence_number: Option<u32>,
    pub digest: Option<String>,
    /// Why the structure was rejected
    pub error: Option<String>,
}

impl QrValidation {
    /// Validate a payload against the signing key without touching storage.
    pub fn check(payload: &str, signing_key: &str) -> Self {
        match QrPayload::parse(payload) {
            Ok(parsed) => Self {
                payload: payload.to_string(),
                valid_structure: true,
                digest_valid: parsed.verify_digest(signing_key),
                batch_id: Some(parsed.batch_id()),
                sequence_number: Some(parsed.sequence()),
                digest: Some(parsed.digest().to_string()),
                error: None,
            },
            Err(e) => Self {
                payload: payload.to_string(),
                valid_structure: false,
                digest_valid: false,
                batch_id: None,
                sequence_number: None,
                digest: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// QR code service trait for dependency injection.
#[async_trait]
pub trait QrCodeService: Send + Sync {
    /// Issue `quantity` new codes for a batch in one transaction.
    async fn generate_batch(&self, request: GenerateQrBatch) -> AppResult<GeneratedBatch>;

    /// Code with its batch, fitting type, installation and latest inspection
    async fn get_details(&self, code: &str) -> AppResult<QrCodeDetails>;

    async fn scan(&self, code: &str, scan: NewScan) -> AppResult<ScanLog>;

    async fn verify(&self, code: &str, verification: QrVerification) -> AppResult<QrCode>;

    /// Offline structure and digest check
    fn validate(&self, payload: &str) -> QrValidation;

    /// SVG image of a known code
    async fn render_image(&self, code: &str, caption: bool) -> AppResult<String>;

    /// Details plus recent scans, inspections and maintenance, newest first
    async fn history(&self, code: &str) -> AppResult<QrCodeHistory>;
}

/// Repositories the QR code service reads across.
pub struct QrCodeRepositories {
    pub qr_codes: Arc<dyn QrCodeRepository>,
    pub supply: Arc<dyn SupplyRepository>,
    pub installations: Arc<dyn InstallationRepository>,
    pub inspections: Arc<dyn InspectionRepository>,
    pub maintenance: Arc<dyn MaintenanceRepository>,
}

pub struct QrCodeManager {
    repos: QrCodeRepositories,
    config: QrCodeConfig,
}

impl QrCodeManager {
    pub fn new(repos: QrCodeRepositories, config: QrCodeConfig) -> Self {
        Self { repos, config }
    }

    async fn find_code(&self, code: &str) -> AppResult<QrCode> {
        self.repos
            .qr_codes
            .find_by_code(code)
            .await?
            .ok_or_not_found("QR code")
    }
}

#[async_trait]
impl QrCodeService for QrCodeManager {
    async fn generate_batch(&self, request: GenerateQrBatch) -> AppResult<GeneratedBatch> {
        let max = self.config.max_batch_quantity;
        if request.quantity == 0 || request.quantity > max {
            return Err(AppError::validation(format!(
                "Quantity must be between 1 and {}",
                max
            )));
        }

        let batch = self
            .repos
            .supply
            .find_batch(request.batch_id)
            .await?
            .ok_or_not_found("Fitting batch")?;

        let first_sequence = batch.next_sequence();
        let last_sequence = batch.qr_code_count.saturating_add(request.quantity);
        if last_sequence > MAX_QR_SEQUENCE {
            return Err(AppError::validation(format!(
                "Batch already has {} QR codes; at most {} can be issued per batch",
                batch.qr_code_count, MAX_QR_SEQUENCE
            )));
        }

        let codes = (first_sequence..=last_sequence)
            .map(|sequence| -> AppResult<NewQrCode> {
                let payload = QrPayload::issue(batch.id, sequence, &self.config.signing_key)?;
                Ok(NewQrCode {
                    code: payload.to_string(),
                    batch_id: batch.id,
                    sequence_number: sequence,
                    marking_machine_id: request.marking_machine_id.clone(),
                    marking_operator_id: request.marking_operator_id.clone(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let qr_codes = self
            .repos
            .qr_codes
            .insert_batch(batch.id, batch.qr_code_count, codes)
            .await?;

        let generated_at = qr_codes
            .first()
            .map(|qr| qr.generated_at)
            .unwrap_or_else(Utc::now);

        tracing::info!(
            batch_id = %batch.id,
            quantity = request.quantity,
            first_sequence,
            last_sequence,
            "QR codes generated"
        );

        Ok(GeneratedBatch {
            batch_summary: BatchSummary {
                batch_id: batch.id,
                total_generated: qr_codes.len() as u32,
                first_sequence,
                last_sequence,
                batch_qr_code_count: last_sequence,
                generated_at,
            },
            qr_codes,
        })
    }

    async fn get_details(&self, code: &str) -> AppResult<QrCodeDetails> {
        let qr_code = self.find_code(code).await?;

        let (batch, installation, last_inspection) = futures::try_join!(
            self.repos.supply.find_batch(qr_code.batch_id),
            self.repos.installations.find_by_qr_code(qr_code.id),
            self.repos.inspections.latest_for_qr_code(qr_code.id),
        )?;

        let fitting_type = match &batch {
            Some(batch) => {
                self.repos
                    .supply
                    .find_fitting_type(batch.fitting_type_id)
                    .await?
            }
            None => None,
        };

        Ok(QrCodeDetails {
            qr_code,
            batch,
            fitting_type,
            installation,
            last_inspection,
        })
    }

    async fn scan(&self, code: &str, scan: NewScan) -> AppResult<ScanLog> {
        if let Some(coordinates) = &scan.scan_coordinates {
            coordinates.validate()?;
        }

        let qr_code = self.find_code(code).await?;
        let log = self.repos.qr_codes.record_scan(qr_code, scan).await?;

        tracing::info!(
            qr_code = %log.code,
            scan_purpose = %log.scan_purpose,
            scanned_by = ?log.scanned_by,
            "QR code scanned"
        );
        Ok(log)
    }

    async fn verify(&self, code: &str, verification: QrVerification) -> AppResult<QrCode> {
        if let Some(score) = verification.print_quality_score {
            if !(0.0..=1.0).contains(&score) {
                return Err(AppError::validation(
                    "Print quality score must be between 0 and 1",
                ));
            }
        }

        let qr_code = self.find_code(code).await?;
        let status = verification.status;
        let updated = self
            .repos
            .qr_codes
            .apply_verification(qr_code.id, verification)
            .await?;

        tracing::info!(qr_code = %updated.code, status = %status, "QR code verified");
        Ok(updated)
    }

    fn validate(&self, payload: &str) -> QrValidation {
        QrValidation::check(payload, &self.config.signing_key)
    }

    async fn render_image(&self, code: &str, caption: bool) -> AppResult<String> {
        let qr_code = self.find_code(code).await?;
        let options = RenderOptions::from_config(&self.config)?;
        let caption = caption.then_some(qr_code.code.as_str());

        qr_image::render_svg(&qr_code.code, &options, caption)
    }

    async fn history(&self, code: &str) -> AppResult<QrCodeHistory> {
        let details = self.get_details(code).await?;
        let qr_code_id = details.qr_code.id;

        let (recent_scans, inspections, maintenance_records) = futures::try_join!(
            self.repos.qr_codes.recent_scans(qr_code_id, HISTORY_LIMIT),
            self.repos.inspections.list_for_qr_code(qr_code_id, HISTORY_LIMIT),
            self.repos.maintenance.list_for_qr_code(qr_code_id, HISTORY_LIMIT),
        )?;

        Ok(QrCodeHistory {
            details,
            recent_scans,
            inspections,
            maintenance_records,
            generated_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MockInspectionRepository, MockInstallationRepository, MockMaintenanceRepository,
        MockQrCodeRepository, MockSupplyRepository,
    };
    use domain::{BatchStatus, FittingBatch, QrCodeStatus, VerificationStatus};

    const KEY: &str = "unit-test-signing-key";

    fn config() -> QrCodeConfig {
        QrCodeConfig {
            signing_key: KEY.to_string(),
            max_batch_quantity: 100,
            ..QrCodeConfig::default()
        }
    }

    fn batch(qr_code_count: u32) -> FittingBatch {
        FittingBatch {
            id: Uuid::new_v4(),
            batch_number: "BATCH-0001".to_string(),
            supply_order_id: Uuid::new_v4(),
            fitting_type_id: Uuid::new_v4(),
            manufacturer_id: Uuid::new_v4(),
            quantity: 1000,
            manufacture_date: None,
            status: BatchStatus::Manufactured,
            qr_code_count,
            qr_generated_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn stored(new: NewQrCode) -> QrCode {
        let now = Utc::now();
        QrCode {
            id: Uuid::new_v4(),
            code: new.code,
            batch_id: new.batch_id,
            sequence_number: new.sequence_number,
            status: QrCodeStatus::Generated,
            marking_machine_id: new.marking_machine_id,
            marking_operator_id: new.marking_operator_id,
            generated_at: now,
            verification_status: None,
            print_quality_score: None,
            verification_remarks: None,
            verified_by: None,
            verified_at: None,
            installed_at: None,
            last_scanned_at: None,
            last_scanned_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn manager(qr_codes: MockQrCodeRepository, supply: MockSupplyRepository) -> QrCodeManager {
        QrCodeManager::new(
            QrCodeRepositories {
                qr_codes: Arc::new(qr_codes),
                supply: Arc::new(supply),
                installations: Arc::new(MockInstallationRepository::new()),
                inspections: Arc::new(MockInspectionRepository::new()),
                maintenance: Arc::new(MockMaintenanceRepository::new()),
            },
            config(),
        )
    }

    fn request(batch_id: Uuid, quantity: u32) -> GenerateQrBatch {
        GenerateQrBatch {
            batch_id,
            quantity,
            marking_machine_id: Some("LASER-01".to_string()),
            marking_operator_id: None,
        }
    }

    #[tokio::test]
    async fn sequences_continue_after_existing_codes() {
        let existing = batch(5);
        let batch_id = existing.id;

        let mut supply = MockSupplyRepository::new();
        supply
            .expect_find_batch()
            .returning(move |_| Ok(Some(existing.clone())));

        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes
            .expect_insert_batch()
            .withf(|_, previous, codes| *previous == 5 && codes.len() == 3)
            .returning(|_, _, codes| Ok(codes.into_iter().map(stored).collect()));

        let generated = manager(qr_codes, supply)
            .generate_batch(request(batch_id, 3))
            .await
            .unwrap();

        let sequences: Vec<u32> = generated
            .qr_codes
            .iter()
            .map(|qr| qr.sequence_number)
            .collect();
        assert_eq!(sequences, vec![6, 7, 8]);
        assert_eq!(generated.batch_summary.first_sequence, 6);
        assert_eq!(generated.batch_summary.last_sequence, 8);
        assert_eq!(generated.batch_summary.total_generated, 3);

        for qr in &generated.qr_codes {
            let payload = QrPayload::parse(&qr.code).unwrap();
            assert_eq!(payload.batch_id(), batch_id);
            assert!(payload.verify_digest(KEY));
        }
    }

    #[tokio::test]
    async fn quantity_outside_limits_is_rejected() {
        let manager = manager(MockQrCodeRepository::new(), MockSupplyRepository::new());

        for quantity in [0, 101] {
            let err = manager
                .generate_batch(request(Uuid::new_v4(), quantity))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn unknown_batch_is_not_found() {
        let mut supply = MockSupplyRepository::new();
        supply.expect_find_batch().returning(|_| Ok(None));
        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes.expect_insert_batch().never();

        let err = manager(qr_codes, supply)
            .generate_batch(request(Uuid::new_v4(), 1))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(entity) if entity == "Fitting batch"));
    }

    #[tokio::test]
    async fn sequence_space_cannot_overflow() {
        let full = batch(MAX_QR_SEQUENCE - 1);
        let batch_id = full.id;
        let mut supply = MockSupplyRepository::new();
        supply
            .expect_find_batch()
            .returning(move |_| Ok(Some(full.clone())));

        let err = manager(MockQrCodeRepository::new(), supply)
            .generate_batch(request(batch_id, 2))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn verify_rejects_out_of_range_score() {
        let err = manager(MockQrCodeRepository::new(), MockSupplyRepository::new())
            .verify(
                "QRTF_x",
                QrVerification {
                    status: VerificationStatus::Verified,
                    print_quality_score: Some(1.5),
                    remarks: None,
                    verified_by: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn scan_of_unknown_code_is_not_found() {
        let mut qr_codes = MockQrCodeRepository::new();
        qr_codes.expect_find_by_code().returning(|_| Ok(None));
        qr_codes.expect_record_scan().never();

        let err = manager(qr_codes, MockSupplyRepository::new())
            .scan(
                "QRTF_missing",
                NewScan {
                    scanned_by: None,
                    scan_location: None,
                    scan_coordinates: None,
                    scan_purpose: "general".to_string(),
                    device_info: serde_json::json!({}),
                    ip_address: None,
                    user_agent: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn validation_reports_parts_and_digest() {
        let batch_id = Uuid::new_v4();
        let payload = QrPayload::issue(batch_id, 42, KEY).unwrap().to_string();

        let valid = QrValidation::check(&payload, KEY);
        assert!(valid.valid_structure);
        assert!(valid.digest_valid);
        assert_eq!(valid.batch_id, Some(batch_id));
        assert_eq!(valid.sequence_number, Some(42));

        let forged = QrValidation::check(&payload, "another-signing-key");
        assert!(forged.valid_structure);
        assert!(!forged.digest_valid);

        let garbage = QrValidation::check("NOT-A-CODE", KEY);
        assert!(!garbage.valid_structure);
        assert!(garbage.error.is_some());
    }
}
