//! Binary entry point for trustscore.
//!
//! Serves the HTTP surface and exposes the pipeline operations on the
//! command line.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr/print_stdout in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use trustscore::config::TrustConfig;
use trustscore::observability::{self, InitOptions};
use trustscore::services::{BackendFactory, ContentHasher};

/// Exit code for a verification that found nothing.
const EXIT_NOT_FOUND: u8 = 2;

/// Trustscore - content identity and trust-score resolution.
#[derive(Parser)]
#[command(name = "trustscore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve {
        /// Port to listen on (overrides config and PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Address to bind.
        #[arg(long)]
        host: Option<String>,
    },

    /// Score and store a piece of text.
    Submit {
        /// The text to submit.
        text: String,
    },

    /// Look up the trust score for a content hash.
    Verify {
        /// The content hash (`0x` + 64 hex characters).
        hash: String,
    },

    /// Print the content hash a submission of this text would get.
    Hash {
        /// The text to hash.
        text: String,
    },

    /// Manage configuration.
    Config {
        /// Show the effective configuration.
        #[arg(long)]
        show: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match TrustConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    let expose_metrics = matches!(cli.command, Commands::Serve { .. });
    let observability = match observability::init_from_settings(
        &config.observability,
        InitOptions {
            verbose: cli.verbose,
            metrics_expose: expose_metrics,
        },
    ) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Failed to initialize observability: {e}");
            return ExitCode::FAILURE;
        },
    };

    let code = match run_command(cli.command, config) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind(), "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    };

    // One-shot commands have no scrape endpoint; leave their counters in the log.
    if !expose_metrics && let Some(metrics) = observability.metrics() {
        tracing::debug!(snapshot = %metrics.render(), "Metrics snapshot");
    }

    code
}

/// Runs the selected command.
fn run_command(command: Commands, mut config: TrustConfig) -> trustscore::Result<ExitCode> {
    match command {
        Commands::Serve { port, host } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            cmd_serve(&config)
        },
        Commands::Submit { text } => {
            let pipeline = BackendFactory::create_pipeline(&config)?;
            let result = pipeline.submit(&text)?;
            println!("{}", to_json(&result)?);
            Ok(ExitCode::SUCCESS)
        },
        Commands::Verify { hash } => {
            let pipeline = BackendFactory::create_pipeline(&config)?;
            match pipeline.verify(&hash)? {
                Some(verification) => {
                    println!("{}", to_json(&verification)?);
                    Ok(ExitCode::SUCCESS)
                },
                None => {
                    eprintln!("Content not found: {hash}");
                    Ok(ExitCode::from(EXIT_NOT_FOUND))
                },
            }
        },
        Commands::Hash { text } => {
            println!("{}", ContentHasher::hash(text.trim()));
            Ok(ExitCode::SUCCESS)
        },
        Commands::Config { show } => {
            if show {
                print!("{}", config.to_toml()?);
            } else {
                println!("Use --show to display the effective configuration");
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

#[cfg(feature = "http")]
fn cmd_serve(config: &TrustConfig) -> trustscore::Result<ExitCode> {
    use std::net::{IpAddr, SocketAddr};
    use std::sync::Arc;
    use trustscore::Error;

    let host: IpAddr = config.server.host.parse().map_err(|e| Error::OperationFailed {
        operation: "parse_host".to_string(),
        cause: format!("{}: {e}", config.server.host),
    })?;
    let addr = SocketAddr::new(host, config.server.port);

    // Built before the runtime so blocking clients are created and dropped
    // outside async context.
    let pipeline = Arc::new(BackendFactory::create_pipeline(config)?);

    let rt = tokio::runtime::Runtime::new().map_err(|e| Error::OperationFailed {
        operation: "create_runtime".to_string(),
        cause: e.to_string(),
    })?;
    rt.block_on(trustscore::server::serve(Arc::clone(&pipeline), addr))?;
    drop(rt);
    drop(pipeline);

    Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "http"))]
fn cmd_serve(_config: &TrustConfig) -> trustscore::Result<ExitCode> {
    Err(trustscore::Error::FeatureNotEnabled("http".to_string()))
}

fn to_json<T: serde::Serialize>(value: &T) -> trustscore::Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| trustscore::Error::OperationFailed {
        operation: "serialize_output".to_string(),
        cause: e.to_string(),
    })
}
