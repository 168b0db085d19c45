//! Relay metrics recorded through the `metrics` facade and exported in the
//! Prometheus text format.

use std::fmt;
use std::sync::OnceLock;

use metrics_exporter_prometheus::PrometheusHandle;
use tracing::info;

/// Enum representing all metric names used by the relay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricName {
    // Intake
    EventsReceived,
    EventsRejected,
    TransformDuration,

    // Per dialect
    MessagesAssembled,
    MessagesDiscarded,
    MessagesPublished,
    MessagesOutputInvalid,
    MessagesPublishFailed,
}

impl MetricName {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::EventsReceived => "relay_events_received_total",
            MetricName::EventsRejected => "relay_events_rejected_total",
            MetricName::TransformDuration => "relay_transform_duration_seconds",
            MetricName::MessagesAssembled => "relay_messages_assembled_total",
            MetricName::MessagesDiscarded => "relay_messages_discarded_total",
            MetricName::MessagesPublished => "relay_messages_published_total",
            MetricName::MessagesOutputInvalid => "relay_messages_output_invalid_total",
            MetricName::MessagesPublishFailed => "relay_messages_publish_failed_total",
        }
    }

    pub fn all_metrics() -> impl Iterator<Item = MetricName> {
        use MetricName::*;
        [
            EventsReceived,
            EventsRejected,
            TransformDuration,
            MessagesAssembled,
            MessagesDiscarded,
            MessagesPublished,
            MessagesOutputInvalid,
            MessagesPublishFailed,
        ]
        .into_iter()
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it again is a no-op.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }
    let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {}", e))?;
    METRICS_HANDLE.set(handle).ok();
    info!("Metrics system initialized");
    Ok(())
}

/// Prometheus text rendering of everything recorded so far
pub fn render() -> Option<String> {
    METRICS_HANDLE.get().map(|handle| handle.render())
}

pub mod intake {
    use super::MetricName;

    pub fn event_received() {
        ::metrics::counter!(MetricName::EventsReceived.as_str()).increment(1);
    }

    /// `reason` is an error code (`E0001`..) or a short failure class
    pub fn event_rejected(reason: &str) {
        ::metrics::counter!(MetricName::EventsRejected.as_str(), "reason" => reason.to_string())
            .increment(1);
    }

    pub fn transform_duration(seconds: f64) {
        ::metrics::histogram!(MetricName::TransformDuration.as_str()).record(seconds);
    }
}

pub mod dialect {
    use super::MetricName;

    fn bump(name: MetricName, dialect: &'static str) {
        ::metrics::counter!(name.as_str(), "dialect" => dialect).increment(1);
    }

    pub fn assembled(dialect: &'static str) {
        bump(MetricName::MessagesAssembled, dialect);
    }

    pub fn discarded(dialect: &'static str) {
        bump(MetricName::MessagesDiscarded, dialect);
    }

    pub fn published(dialect: &'static str) {
        bump(MetricName::MessagesPublished, dialect);
    }

    pub fn output_invalid(dialect: &'static str) {
        bump(MetricName::MessagesOutputInvalid, dialect);
    }

    pub fn publish_failed(dialect: &'static str) {
        bump(MetricName::MessagesPublishFailed, dialect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names_are_prefixed_and_unique() {
        let names: Vec<&str> = MetricName::all_metrics().map(|m| m.as_str()).collect();
        assert!(names.iter().all(|n| n.starts_with("relay_")));
        let mut deduped = names.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }

    #[test]
    fn test_recording_without_recorder_is_harmless() {
        intake::event_received();
        intake::event_rejected("E0001");
        dialect::discarded("kl_cdm");
    }
}
