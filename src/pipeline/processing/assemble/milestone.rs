use crate::domain::{CdmFlightInfo, FlightSlot, OperationalFlightEvent};
use crate::error::Result;
use crate::pipeline::processing::collect::collect_milestones;
use crate::pipeline::processing::normalize::{
    format_cdm_flight_date, format_cdm_timestamp, normalize_flight_number,
};

use super::AssemblyContext;

/// Assemble the KL CDM flight info message.
///
/// Draws exactly one sequence number from the context per call.
pub fn assemble_milestones(
    event: &OperationalFlightEvent,
    ctx: &AssemblyContext<'_>,
) -> Result<CdmFlightInfo> {
    let leg = event.first_leg()?;
    let flight = FlightSlot {
        airline: event.flight.airline_code.clone(),
        flight_number: normalize_flight_number(&event.flight.flight_number)?,
        flight_date: format_cdm_flight_date(&event.flight.scheduled_date),
        departure_airport: leg.departure.airport_code.clone(),
        arrival_airport: leg.arrival.airport_code.clone(),
    };

    Ok(CdmFlightInfo {
        timestamp: event.message_timestamp.as_ref().map(format_cdm_timestamp),
        sequence_number: ctx.sequence.next_sequence(),
        flight,
        dates: collect_milestones(leg, ctx.hub_airport, ctx.cdm_result),
    })
}
