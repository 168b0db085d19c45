use anyhow::{bail, Context, Result};
use clap::Parser;
use std::{fs, path::PathBuf};

use flight_relay::app::ports::SchemaId;
use flight_relay::infra::JsonSchemaValidator;

/// Validate an XML message against one of the bundled schemas.
#[derive(Parser, Debug)]
#[command(name = "validate-message", version, about = "Validate an XML message against a bundled schema")]
struct Cli {
    /// Path to the XML message to validate
    path: PathBuf,

    /// Schema name: operational_flight, aidx_flight_leg_notif or cdm_flight_info
    #[arg(long, default_value = "operational_flight")]
    schema: String,
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let Some(schema) = SchemaId::parse(&args.schema) else {
        bail!("Unknown schema {:?}", args.schema);
    };

    let xml = fs::read_to_string(&args.path)
        .with_context(|| format!("Failed to read {}", args.path.display()))?;

    let violations = JsonSchemaValidator::new().violations(&xml, schema);
    if violations.is_empty() {
        println!("valid");
        return Ok(());
    }

    eprintln!("invalid:");
    for violation in violations {
        eprintln!("- {}", violation);
    }
    std::process::exit(1)
}
