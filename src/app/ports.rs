use async_trait::async_trait;

use crate::pipeline::processing::assemble::AssembledMessage;

/// Schemas known to the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    /// Inbound operational flight event
    OperationalFlight,
    /// IATA AIDX flight leg notification
    AidxFlightLegNotification,
    /// CDM flight info
    CdmFlightInfo,
}

impl SchemaId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaId::OperationalFlight => "operational_flight",
            SchemaId::AidxFlightLegNotification => "aidx_flight_leg_notif",
            SchemaId::CdmFlightInfo => "cdm_flight_info",
        }
    }

    pub fn parse(name: &str) -> Option<SchemaId> {
        match name {
            "operational_flight" => Some(SchemaId::OperationalFlight),
            "aidx_flight_leg_notif" => Some(SchemaId::AidxFlightLegNotification),
            "cdm_flight_info" => Some(SchemaId::CdmFlightInfo),
            _ => None,
        }
    }
}

impl std::fmt::Display for SchemaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structural conformance oracle. Implementations log the details and
/// answer pass/fail.
pub trait SchemaValidatorPort: Send + Sync {
    fn validate(&self, text: &str, schema: SchemaId) -> bool;
}

pub trait MessageSerializerPort: Send + Sync {
    fn to_text(&self, message: &AssembledMessage) -> Result<String, String>;
}

#[async_trait]
pub trait PublisherPort: Send + Sync {
    async fn publish(&self, text: &str, destination: &str, label: &str) -> Result<(), String>;
}
