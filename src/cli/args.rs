//! CLI argument definitions.
//!
//! Uses clap derive macros for type-safe argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// QR Track - traceability backend for railway track fittings
#[derive(Parser, Debug)]
#[command(name = "qr-track")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),

    /// Run database migrations
    Migrate(MigrateArgs),

    /// Inspect and render QR payloads offline
    Qr(QrArgs),
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Host to bind to (defaults to SERVER_HOST)
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Port to listen on (defaults to SERVER_PORT)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(subcommand)]
    pub action: MigrateAction,
}

/// Migration actions
#[derive(Subcommand, Debug)]
pub enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset and re-run all migrations
    Fresh,
}

/// Arguments for the qr command
#[derive(Parser, Debug)]
pub struct QrArgs {
    #[command(subcommand)]
    pub action: QrAction,
}

/// Offline QR payload tools
#[derive(Subcommand, Debug)]
pub enum QrAction {
    /// Check the structure and digest of a payload
    Parse {
        /// Payload string, e.g. QRTF_<batch>_000001_<digest>
        payload: String,
    },
    /// Render a payload as SVG
    Render {
        payload: String,

        /// Write the SVG here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the payload text under the symbol
        #[arg(long)]
        caption: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_qr_render_flags() {
        let cli = Cli::parse_from([
            "qr-track",
            "qr",
            "render",
            "QRTF_x",
            "--output",
            "code.svg",
            "--caption",
        ]);

        match cli.command {
            Commands::Qr(QrArgs {
                action:
                    QrAction::Render {
                        payload,
                        output,
                        caption,
                    },
            }) => {
                assert_eq!(payload, "QRTF_x");
                assert_eq!(output, Some(PathBuf::from("code.svg")));
                assert!(caption);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn serve_overrides_are_optional() {
        let cli = Cli::parse_from(["qr-track", "serve", "--port", "9000"]);

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert!(args.host.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
