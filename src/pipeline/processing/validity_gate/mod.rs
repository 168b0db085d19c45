use serde::Serialize;

use crate::pipeline::processing::assemble::AssembledMessage;

/// Validity gate decision for an assembled message
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum GateDecision {
    /// The message carries payload and proceeds to serialization
    Publish,
    /// The message is content-free and is dropped; not an error
    Discard { reason: &'static str },
}

impl GateDecision {
    pub fn is_publish(&self) -> bool {
        matches!(self, GateDecision::Publish)
    }
}

/// Trait for deciding whether an assembled message is worth forwarding
pub trait ValidityGate: Send + Sync {
    fn assess(&self, message: &AssembledMessage) -> GateDecision;
}

/// Default gate: notifications need resources or operation times,
/// milestone messages need at least one date.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidityGate;

impl DefaultValidityGate {
    pub fn new() -> Self {
        Self
    }
}

impl ValidityGate for DefaultValidityGate {
    fn assess(&self, message: &AssembledMessage) -> GateDecision {
        match message {
            AssembledMessage::Notification { notification, .. } => {
                if notification.resources.is_empty() && notification.operation_times.is_empty() {
                    GateDecision::Discard {
                        reason: "LegData is empty, no resources or operation times to publish",
                    }
                } else {
                    GateDecision::Publish
                }
            }
            AssembledMessage::Milestones(info) => {
                if info.dates.is_empty() {
                    GateDecision::Discard {
                        reason: "No CDM dates to publish",
                    }
                } else {
                    GateDecision::Publish
                }
            }
        }
    }
}
