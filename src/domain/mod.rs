//! Domain data shapes shared across layers: the canonical inbound flight
//! event and the three outbound message records assembled from it.

pub mod aidx;
pub mod cdm;
pub mod flight;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aidx::{FlightLegNotification, LegIdentifier, OperationTime, Resource, Side};
pub use cdm::{CdmDate, CdmFlightInfo, FlightSlot};
pub use flight::{
    ArrivalSide, DepartureSide, FlightHandlingTimes, FlightIdentifier, FlightLeg, MessageHeader,
    OperationalFlightEvent, Times,
};
