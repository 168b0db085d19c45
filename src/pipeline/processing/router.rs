//! Carrier routing: picks the dialects an event is translated into.

use crate::constants::{AIR_FRANCE, KLM};
use crate::error::{RelayError, Result};
use crate::pipeline::processing::assemble::Dialect;

/// Carriers the relay knows how to translate for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Carrier {
    AirFrance,
    Klm,
}

impl Carrier {
    /// Route on the airline code of the event. Matching is exact.
    pub fn route(airline_code: &str) -> Result<Carrier> {
        match airline_code {
            AIR_FRANCE => Ok(Carrier::AirFrance),
            KLM => Ok(Carrier::Klm),
            other => Err(RelayError::UnknownCarrier(other.to_string())),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Carrier::AirFrance => AIR_FRANCE,
            Carrier::Klm => KLM,
        }
    }

    /// Dialects produced for this carrier, in emission order
    pub fn dialects(&self) -> &'static [Dialect] {
        match self {
            Carrier::AirFrance => &[Dialect::AfNotification],
            Carrier::Klm => &[Dialect::KlNotification, Dialect::KlMilestones],
        }
    }
}

impl std::fmt::Display for Carrier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}
