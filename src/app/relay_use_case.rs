use std::time::Instant;

use serde::Serialize;
use tracing::{debug, error, info, info_span, Instrument};
use uuid::Uuid;

use crate::app::ports::{MessageSerializerPort, PublisherPort, SchemaId, SchemaValidatorPort};
use crate::config::RelayConfig;
use crate::domain::{MessageHeader, OperationalFlightEvent};
use crate::error::{RelayError, Result};
use crate::infra::schema_validator::JsonSchemaValidator;
use crate::infra::xml_serializer::XmlMessageSerializer;
use crate::logging::sanitize_for_log;
use crate::observability::metrics::{dialect as dialect_metrics, intake};
use crate::pipeline::ingestion::{parse_header, read_event, split_envelope};
use crate::pipeline::processing::assemble::{assemble, AssembledMessage, AssemblyContext, Dialect};
use crate::pipeline::processing::normalize::{RandomSequence, SequenceSource};
use crate::pipeline::processing::router::Carrier;
use crate::pipeline::processing::validity_gate::{DefaultValidityGate, GateDecision, ValidityGate};

/// Rule settings and destination names the use case needs from configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RelaySettings {
    pub hub_airport: String,
    pub cdm_result: String,
    pub af_aidx_destination: String,
    pub kl_aidx_destination: String,
    pub kl_cdm_destination: String,
}

impl From<&RelayConfig> for RelaySettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            hub_airport: config.rules.hub_airport.clone(),
            cdm_result: config.cdm.result.clone(),
            af_aidx_destination: config.destinations.af_aidx.clone(),
            kl_aidx_destination: config.destinations.kl_aidx.clone(),
            kl_cdm_destination: config.destinations.kl_cdm.clone(),
        }
    }
}

impl RelaySettings {
    pub fn destination(&self, dialect: Dialect) -> &str {
        match dialect {
            Dialect::AfNotification => &self.af_aidx_destination,
            Dialect::KlNotification => &self.kl_aidx_destination,
            Dialect::KlMilestones => &self.kl_cdm_destination,
        }
    }
}

/// Schema every serialized message of a dialect must satisfy
pub fn output_schema(dialect: Dialect) -> SchemaId {
    match dialect {
        Dialect::AfNotification | Dialect::KlNotification => SchemaId::AidxFlightLegNotification,
        Dialect::KlMilestones => SchemaId::CdmFlightInfo,
    }
}

/// What happened to one dialect of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DialectOutcome {
    Published { destination: String },
    Discarded { reason: String },
    OutputInvalid,
    PublishFailed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialectReport {
    pub dialect: Dialect,
    #[serde(flatten)]
    pub outcome: DialectOutcome,
}

/// Per-event result of a relay run
#[derive(Debug, Clone, Serialize)]
pub struct EventReport {
    pub event_id: Uuid,
    pub airline: String,
    pub flight_number: String,
    pub dialects: Vec<DialectReport>,
}

/// A dry-run result: the gate decision and, when kept, the serialized text
#[derive(Debug, Clone)]
pub struct TransformedMessage {
    pub dialect: Dialect,
    pub decision: GateDecision,
    pub text: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub received: usize,
    pub rejected: usize,
    pub published: usize,
    pub discarded: usize,
    pub output_invalid: usize,
    pub publish_failed: usize,
}

impl BatchSummary {
    fn record(&mut self, report: &EventReport) {
        for dialect in &report.dialects {
            match dialect.outcome {
                DialectOutcome::Published { .. } => self.published += 1,
                DialectOutcome::Discarded { .. } => self.discarded += 1,
                DialectOutcome::OutputInvalid => self.output_invalid += 1,
                DialectOutcome::PublishFailed { .. } => self.publish_failed += 1,
            }
        }
    }
}

pub struct BatchResult {
    pub summary: BatchSummary,
    pub results: Vec<Result<EventReport>>,
}

struct PreparedEvent {
    event: OperationalFlightEvent,
    header: Option<MessageHeader>,
    carrier: Carrier,
}

/// Use case relaying inbound operational flight messages to the carrier
/// specific outbound destinations
pub struct RelayUseCase {
    validator: Box<dyn SchemaValidatorPort>,
    serializer: Box<dyn MessageSerializerPort>,
    publisher: Box<dyn PublisherPort>,
    gate: Box<dyn ValidityGate>,
    sequence: Box<dyn SequenceSource>,
    settings: RelaySettings,
}

impl RelayUseCase {
    pub fn new(
        validator: Box<dyn SchemaValidatorPort>,
        serializer: Box<dyn MessageSerializerPort>,
        publisher: Box<dyn PublisherPort>,
        gate: Box<dyn ValidityGate>,
        sequence: Box<dyn SequenceSource>,
        settings: RelaySettings,
    ) -> Self {
        Self {
            validator,
            serializer,
            publisher,
            gate,
            sequence,
            settings,
        }
    }

    /// Create a use case with the bundled schemas, XML serializer, default
    /// gate and random sequence numbers
    pub fn with_defaults(settings: RelaySettings, publisher: Box<dyn PublisherPort>) -> Self {
        Self::new(
            Box::new(JsonSchemaValidator::new()),
            Box::new(XmlMessageSerializer::new()),
            publisher,
            Box::new(DefaultValidityGate::new()),
            Box::new(RandomSequence),
            settings,
        )
    }

    /// Relay one inbound message. Errors are scoped to this message.
    pub async fn process_message(&self, message: &str) -> Result<EventReport> {
        let event_id = Uuid::new_v4();
        intake::event_received();
        let started = Instant::now();

        let result = match self.prepare(message) {
            Ok(prepared) => {
                let span = info_span!(
                    "flight_event",
                    %event_id,
                    airline = %prepared.carrier,
                    flight_number = %prepared.event.flight.flight_number
                );
                self.relay(event_id, prepared).instrument(span).await
            }
            Err(e) => Err(e),
        };

        intake::transform_duration(started.elapsed().as_secs_f64());
        if let Err(e) = &result {
            let reason = e.code().unwrap_or("transform");
            intake::event_rejected(reason);
            error!(%event_id, code = reason, "{}", e);
        }
        result
    }

    /// Relay messages one after another; a failing message never stops the batch
    pub async fn process_batch<S: AsRef<str>>(&self, messages: &[S]) -> BatchResult {
        let mut summary = BatchSummary::default();
        let mut results = Vec::with_capacity(messages.len());

        for message in messages {
            summary.received += 1;
            let result = self.process_message(message.as_ref()).await;
            match &result {
                Ok(report) => summary.record(report),
                Err(_) => summary.rejected += 1,
            }
            results.push(result);
        }

        info!(
            "Batch processed: received={} rejected={} published={} discarded={} output_invalid={} publish_failed={}",
            summary.received,
            summary.rejected,
            summary.published,
            summary.discarded,
            summary.output_invalid,
            summary.publish_failed
        );
        BatchResult { summary, results }
    }

    /// Assemble and gate without validating or publishing the output
    pub fn transform(&self, message: &str) -> Result<Vec<TransformedMessage>> {
        let prepared = self.prepare(message)?;
        let mut transformed = Vec::new();
        for assembled in self.assemble_all(&prepared)? {
            let decision = self.gate.assess(&assembled);
            let text = match decision {
                GateDecision::Publish => Some(
                    self.serializer
                        .to_text(&assembled)
                        .map_err(RelayError::Serialization)?,
                ),
                GateDecision::Discard { .. } => None,
            };
            transformed.push(TransformedMessage {
                dialect: assembled.dialect(),
                decision,
                text,
            });
        }
        Ok(transformed)
    }

    fn prepare(&self, message: &str) -> Result<PreparedEvent> {
        let parts = split_envelope(message)?;
        debug!("Received message body: {}", sanitize_for_log(&parts.body));

        if !self.validator.validate(&parts.body, SchemaId::OperationalFlight) {
            return Err(RelayError::InvalidInput {
                schema: SchemaId::OperationalFlight.to_string(),
            });
        }
        let event = read_event(&parts.body)?;
        let header = parts.header.as_deref().and_then(parse_header);
        let carrier = Carrier::route(&event.flight.airline_code)?;

        Ok(PreparedEvent {
            event,
            header,
            carrier,
        })
    }

    fn assemble_all(&self, prepared: &PreparedEvent) -> Result<Vec<AssembledMessage>> {
        let ctx = AssemblyContext {
            hub_airport: &self.settings.hub_airport,
            cdm_result: &self.settings.cdm_result,
            sequence: self.sequence.as_ref(),
        };
        prepared
            .carrier
            .dialects()
            .iter()
            .map(|dialect| assemble(*dialect, &prepared.event, prepared.header.as_ref(), &ctx))
            .collect()
    }

    async fn relay(&self, event_id: Uuid, prepared: PreparedEvent) -> Result<EventReport> {
        let assembled = self.assemble_all(&prepared)?;
        info!("Routing {} flight event to {} dialect(s)", prepared.carrier, assembled.len());

        let mut dialects = Vec::with_capacity(assembled.len());
        for message in &assembled {
            let dialect = message.dialect();
            dialect_metrics::assembled(dialect.as_str());
            let outcome = self.deliver(message).await;
            dialects.push(DialectReport { dialect, outcome });
        }

        Ok(EventReport {
            event_id,
            airline: prepared.event.flight.airline_code,
            flight_number: prepared.event.flight.flight_number,
            dialects,
        })
    }

    async fn deliver(&self, message: &AssembledMessage) -> DialectOutcome {
        let dialect = message.dialect();
        let label = dialect.label();

        if let GateDecision::Discard { reason } = self.gate.assess(message) {
            info!("{}: {}. Message not published", label, reason);
            dialect_metrics::discarded(dialect.as_str());
            return DialectOutcome::Discarded {
                reason: reason.to_string(),
            };
        }

        let text = match self.serializer.to_text(message) {
            Ok(text) => text,
            Err(e) => {
                error!("{} message could not be serialized: {}", label, e);
                dialect_metrics::output_invalid(dialect.as_str());
                return DialectOutcome::OutputInvalid;
            }
        };

        if !self.validator.validate(&text, output_schema(dialect)) {
            error!(
                "{} message failed {} validation, not published: {}",
                label,
                output_schema(dialect),
                sanitize_for_log(&text)
            );
            dialect_metrics::output_invalid(dialect.as_str());
            return DialectOutcome::OutputInvalid;
        }

        let destination = self.settings.destination(dialect);
        match self.publisher.publish(&text, destination, label).await {
            Ok(()) => {
                dialect_metrics::published(dialect.as_str());
                DialectOutcome::Published {
                    destination: destination.to_string(),
                }
            }
            Err(e) => {
                dialect_metrics::publish_failed(dialect.as_str());
                DialectOutcome::PublishFailed { error: e }
            }
        }
    }
}
