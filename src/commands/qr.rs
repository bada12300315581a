//! QR command - Offline payload checks and rendering.
//!
//! Neither action touches the database, so both work on a field laptop
//! that only has the signing key.

use common::{AppError, AppResult};

use crate::cli::args::{QrAction, QrArgs};
use crate::config::Config;
use crate::services::QrValidation;
use crate::utils::qr_image::{self, RenderOptions};

/// Execute the qr command
pub async fn execute(args: QrArgs, config: Config) -> AppResult<()> {
    match args.action {
        QrAction::Parse { payload } => {
            let report = QrValidation::check(&payload, &config.qr.signing_key);
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| AppError::internal(e.to_string()))?;
            println!("{}", json);
        }
        QrAction::Render {
            payload,
            output,
            caption,
        } => {
            if !QrValidation::check(&payload, &config.qr.signing_key).valid_structure {
                tracing::warn!(payload = %payload, "Rendering a payload that is not a QR Track code");
            }

            let options = RenderOptions::from_config(&config.qr)?;
            let svg = qr_image::render_svg(&payload, &options, caption.then_some(payload.as_str()))?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, svg).await.map_err(|e| {
                        AppError::internal(format!("Failed to write {}: {}", path.display(), e))
                    })?;
                    tracing::info!(path = %path.display(), "QR image written");
                }
                None => println!("{}", svg),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{DatabaseConfig, QrCodeConfig, ServiceConfig};

    fn config() -> Config {
        Config {
            server: ServiceConfig::default(),
            database: DatabaseConfig::default(),
            qr: QrCodeConfig {
                signing_key: "command-test-signing-key".to_string(),
                ..QrCodeConfig::default()
            },
        }
    }

    #[test]
    fn render_writes_captioned_svg() {
        let path = std::env::temp_dir().join(format!("qr-track-{}.svg", uuid::Uuid::new_v4()));
        let args = QrArgs {
            action: QrAction::Render {
                payload: "QRTF_FIELD_TEST".to_string(),
                output: Some(path.clone()),
                caption: true,
            },
        };

        tokio_test::block_on(execute(args, config())).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("QRTF_FIELD_TEST"));
    }

    #[test]
    fn parse_accepts_any_payload() {
        let args = QrArgs {
            action: QrAction::Parse {
                payload: "not-a-code".to_string(),
            },
        };

        assert!(tokio_test::block_on(execute(args, config())).is_ok());
    }
}
