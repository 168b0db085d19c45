use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use serde_json::Value;
use tracing::{error, warn};

use crate::app::ports::{SchemaId, SchemaValidatorPort};
use crate::pipeline::processing::parser::xml_to_json;

type Compiled = Result<JSONSchema, String>;

static OPERATIONAL_FLIGHT: Lazy<Compiled> =
    Lazy::new(|| compile(include_str!("../../schemas/operational_flight.v1.json")));
static AIDX_FLIGHT_LEG_NOTIF: Lazy<Compiled> =
    Lazy::new(|| compile(include_str!("../../schemas/aidx_flight_leg_notif.v1.json")));
static CDM_FLIGHT_INFO: Lazy<Compiled> =
    Lazy::new(|| compile(include_str!("../../schemas/cdm_flight_info.v1.json")));

fn compile(source: &str) -> Compiled {
    let schema: Value = serde_json::from_str(source).map_err(|e| e.to_string())?;
    // jsonschema 0.17 ties compile errors to the schema lifetime
    let schema: &'static Value = Box::leak(Box::new(schema));
    JSONSchema::options()
        .compile(schema)
        .map_err(|e| format!("Failed to compile JSON Schema: {}", e))
}

fn compiled(schema: SchemaId) -> &'static Compiled {
    match schema {
        SchemaId::OperationalFlight => &*OPERATIONAL_FLIGHT,
        SchemaId::AidxFlightLegNotification => &*AIDX_FLIGHT_LEG_NOTIF,
        SchemaId::CdmFlightInfo => &*CDM_FLIGHT_INFO,
    }
}

/// Validates XML documents by checking their JSON projection against the
/// bundled JSON Schemas.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonSchemaValidator;

impl JsonSchemaValidator {
    pub fn new() -> Self {
        Self
    }

    /// Every violation of `schema` found in `xml`; empty when the document conforms
    pub fn violations(&self, xml: &str, schema: SchemaId) -> Vec<String> {
        let instance = match xml_to_json(xml) {
            Ok(instance) => instance,
            Err(e) => return vec![format!("not well-formed XML: {}", e)],
        };
        let compiled = match compiled(schema) {
            Ok(compiled) => compiled,
            Err(e) => return vec![e.clone()],
        };
        let violations = match compiled.validate(&instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| format!("{} at {}", error, error.instance_path))
                .collect(),
        };
        violations
    }
}

impl SchemaValidatorPort for JsonSchemaValidator {
    fn validate(&self, text: &str, schema: SchemaId) -> bool {
        let violations = self.violations(text, schema);
        if violations.is_empty() {
            return true;
        }
        if let Err(e) = compiled(schema) {
            error!("Schema {} unavailable: {}", schema, e);
        }
        for violation in &violations {
            warn!("Schema {} violation: {}", schema, violation);
        }
        false
    }
}
