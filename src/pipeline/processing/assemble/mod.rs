//! Dialect assemblers: compose normalized identifiers and collected entries
//! into the outbound message records.

pub mod milestone;
pub mod notification;

use serde::Serialize;

use crate::domain::{CdmFlightInfo, FlightLegNotification, MessageHeader, OperationalFlightEvent};
use crate::error::Result;
use crate::pipeline::processing::normalize::SequenceSource;

pub use milestone::assemble_milestones;
pub use notification::assemble_notification;

/// One output dialect; each carrier produces one or more of these
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dialect {
    /// AF AIDX flight leg notification
    AfNotification,
    /// KL AIDX flight leg notification
    KlNotification,
    /// KL CDM flight info
    KlMilestones,
}

impl Dialect {
    /// Human label used in publish logs
    pub fn label(&self) -> &'static str {
        match self {
            Dialect::AfNotification => "AF AIDX",
            Dialect::KlNotification => "KL AIDX",
            Dialect::KlMilestones => "KL CDM",
        }
    }

    /// Value of the `dialect` metric label
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::AfNotification => "af_aidx",
            Dialect::KlNotification => "kl_aidx",
            Dialect::KlMilestones => "kl_cdm",
        }
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs that are not part of the event but shape the assembled messages
pub struct AssemblyContext<'a> {
    pub hub_airport: &'a str,
    /// Correlation token stamped on every CDM date
    pub cdm_result: &'a str,
    pub sequence: &'a dyn SequenceSource,
}

/// An assembled message, tagged with the dialect it was built for
#[derive(Debug, Clone, PartialEq)]
pub enum AssembledMessage {
    Notification {
        dialect: Dialect,
        notification: FlightLegNotification,
    },
    Milestones(CdmFlightInfo),
}

impl AssembledMessage {
    pub fn dialect(&self) -> Dialect {
        match self {
            AssembledMessage::Notification { dialect, .. } => *dialect,
            AssembledMessage::Milestones(_) => Dialect::KlMilestones,
        }
    }
}

/// Build the record for `dialect` from the first leg of `event`.
pub fn assemble(
    dialect: Dialect,
    event: &OperationalFlightEvent,
    header: Option<&MessageHeader>,
    ctx: &AssemblyContext<'_>,
) -> Result<AssembledMessage> {
    match dialect {
        Dialect::AfNotification | Dialect::KlNotification => {
            let notification = assemble_notification(dialect, event, header, ctx.hub_airport)?;
            Ok(AssembledMessage::Notification {
                dialect,
                notification,
            })
        }
        Dialect::KlMilestones => Ok(AssembledMessage::Milestones(assemble_milestones(event, ctx)?)),
    }
}
