//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use common::{DatabaseConfig, QrCodeConfig, ServiceConfig};
use domain::DEFAULT_MAX_BATCH_QUANTITY;

use crate::utils::qr_image::parse_ec_level;

use super::constants::{
    APP_NAME, DEFAULT_ALLOWED_ORIGINS, DEFAULT_DATABASE_URL, DEFAULT_DB_MAX_CONNECTIONS,
    DEFAULT_DB_MIN_CONNECTIONS, DEFAULT_QR_BORDER, DEFAULT_QR_ERROR_CORRECTION,
    DEFAULT_QR_MODULE_SIZE, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEV_QR_SIGNING_KEY,
    MIN_QR_SIGNING_KEY_LENGTH,
};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServiceConfig,
    pub database: DatabaseConfig,
    pub qr: QrCodeConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if QR_SIGNING_KEY is missing in a release build or shorter
    /// than the minimum length, or if QR_ERROR_CORRECTION is not a known level.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let signing_key = env::var("QR_SIGNING_KEY").unwrap_or_else(|_| {
            if cfg!(debug_assertions) {
                tracing::warn!("QR_SIGNING_KEY not set, using insecure default for development");
                DEV_QR_SIGNING_KEY.to_string()
            } else {
                panic!("QR_SIGNING_KEY environment variable must be set in production");
            }
        });

        if signing_key.len() < MIN_QR_SIGNING_KEY_LENGTH {
            panic!(
                "QR_SIGNING_KEY must be at least {} characters long",
                MIN_QR_SIGNING_KEY_LENGTH
            );
        }

        let error_correction = env::var("QR_ERROR_CORRECTION")
            .unwrap_or_else(|_| DEFAULT_QR_ERROR_CORRECTION.to_string());
        ensure_error_correction(&error_correction);

        Self {
            server: ServiceConfig {
                service_name: APP_NAME.to_string(),
                host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
                port: parse_var("SERVER_PORT", DEFAULT_SERVER_PORT),
                allowed_origins: split_list(
                    &env::var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
                ),
            },
            database: DatabaseConfig {
                url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
                max_connections: parse_var("DATABASE_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS),
                min_connections: parse_var("DATABASE_MIN_CONNECTIONS", DEFAULT_DB_MIN_CONNECTIONS),
            },
            qr: QrCodeConfig {
                signing_key,
                module_size: parse_var("QR_CODE_SIZE", DEFAULT_QR_MODULE_SIZE),
                border: parse_var("QR_CODE_BORDER", DEFAULT_QR_BORDER),
                error_correction,
                max_batch_quantity: parse_var("QR_MAX_BATCH_QUANTITY", DEFAULT_MAX_BATCH_QUANTITY),
            },
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn ensure_error_correction(level: &str) {
    if let Err(e) = parse_ec_level(level) {
        panic!("QR_ERROR_CORRECTION is invalid: {}", e);
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empty_entries() {
        assert_eq!(
            split_list(" https://a.example , ,https://b.example"),
            vec!["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn known_error_correction_levels_are_accepted() {
        ensure_error_correction("M");
        ensure_error_correction("h");
    }

    #[test]
    #[should_panic(expected = "QR_ERROR_CORRECTION is invalid")]
    fn unknown_error_correction_level_fails_at_startup() {
        ensure_error_correction("X");
    }

    #[test]
    fn server_addr_joins_host_and_port() {
        let config = Config {
            server: ServiceConfig {
                host: "127.0.0.1".to_string(),
                port: 9000,
                ..ServiceConfig::default()
            },
            database: DatabaseConfig::default(),
            qr: QrCodeConfig::default(),
        };

        assert_eq!(config.server_addr(), "127.0.0.1:9000");
    }
}
