use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use flight_relay::app::{DialectOutcome, RelaySettings, RelayUseCase};
use flight_relay::config::RelayConfig;
use flight_relay::infra::FileQueuePublisher;
use flight_relay::logging;
use flight_relay::observability;

#[derive(Parser)]
#[command(name = "flight_relay")]
#[command(about = "Relays operational flight events as AF/KL AIDX and KL CDM messages")]
#[command(version = "0.1.0")]
struct Cli {
    /// Configuration file (defaults to $RELAY_CONFIG, then config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relay inbound messages, one per file, to their destinations
    Process {
        /// Inbound SOAP message files
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print Prometheus metrics after the run
        #[arg(long)]
        metrics: bool,
    },
    /// Print the outbound messages for one inbound message without publishing
    Transform {
        file: PathBuf,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<RelayConfig> {
    let config = match path {
        Some(path) => RelayConfig::from_path(path),
        None => RelayConfig::load(),
    };
    config.context("Failed to load configuration")
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    info!(
        hub = %config.rules.hub_airport,
        output_dir = %config.publisher.output_dir.display(),
        "Configuration loaded"
    );

    let publisher = FileQueuePublisher::new(&config.publisher.output_dir);
    let use_case = RelayUseCase::with_defaults(RelaySettings::from(&config), Box::new(publisher));

    match cli.command {
        Commands::Process { files, metrics } => {
            if metrics {
                if let Err(e) = observability::init() {
                    warn!("Metrics recorder not installed: {}", e);
                }
            }

            let mut messages = Vec::with_capacity(files.len());
            for file in &files {
                let message = tokio::fs::read_to_string(file)
                    .await
                    .with_context(|| format!("Failed to read {}", file.display()))?;
                messages.push(message);
            }

            let batch = use_case.process_batch(&messages).await;
            for (file, result) in files.iter().zip(&batch.results) {
                match result {
                    Ok(report) => {
                        println!(
                            "{}: {}{} ({})",
                            file.display(),
                            report.airline,
                            report.flight_number,
                            report.event_id
                        );
                        for dialect in &report.dialects {
                            let outcome = match &dialect.outcome {
                                DialectOutcome::Published { destination } => {
                                    format!("published to {}", destination)
                                }
                                DialectOutcome::Discarded { reason } => format!("discarded: {}", reason),
                                DialectOutcome::OutputInvalid => "failed output validation".to_string(),
                                DialectOutcome::PublishFailed { error } => {
                                    format!("publish failed: {}", error)
                                }
                            };
                            println!("   {}: {}", dialect.dialect, outcome);
                        }
                    }
                    Err(e) => {
                        error!("{}: {}", file.display(), e);
                        println!("{}: rejected ({})", file.display(), e);
                    }
                }
            }

            let summary = &batch.summary;
            println!("\nReceived: {}", summary.received);
            println!("Rejected: {}", summary.rejected);
            println!("Published: {}", summary.published);
            println!("Discarded: {}", summary.discarded);
            println!("Output invalid: {}", summary.output_invalid);
            println!("Publish failed: {}", summary.publish_failed);

            if metrics {
                if let Some(rendered) = observability::render() {
                    println!("\n{}", rendered);
                }
            }
        }
        Commands::Transform { file } => {
            let message = tokio::fs::read_to_string(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;

            for transformed in use_case.transform(&message)? {
                match (&transformed.text, transformed.decision) {
                    (Some(text), _) => println!("# {}\n{}\n", transformed.dialect, text),
                    (None, decision) => println!("# {}\n{:?}\n", transformed.dialect, decision),
                }
            }
        }
    }
    Ok(())
}
