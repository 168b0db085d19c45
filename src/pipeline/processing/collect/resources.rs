use crate::domain::{FlightLeg, Resource, Side};

use super::is_outstation;

/// How runway designators are treated when collecting resources
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunwayPolicy {
    /// Runways are never reported (AF)
    Omit,
    /// Runways are reported only for sides whose airport is an outstation (KL)
    OutstationOnly,
}

/// Collect departure then arrival resources from a leg.
///
/// The gate is the first gate code of the side, unless that code is blank.
/// A side with no
/// parking position, no gate and no runway after policy is applied yields
/// nothing.
pub fn collect_resources(leg: &FlightLeg, policy: RunwayPolicy, hub: &str) -> Vec<Resource> {
    let departure = Resource {
        side: Side::Departure,
        parking_position: leg.departure.parking_position.clone(),
        gate: first_gate(&leg.departure.gate_codes),
        runway: runway(
            policy,
            leg.departure_airport(),
            leg.departure.take_off_runway.as_ref(),
            hub,
        ),
    };
    let arrival = Resource {
        side: Side::Arrival,
        parking_position: leg.arrival.parking_position.clone(),
        gate: first_gate(&leg.arrival.gate_codes),
        runway: runway(
            policy,
            leg.arrival_airport(),
            leg.arrival.landing_runway.as_ref(),
            hub,
        ),
    };

    [departure, arrival]
        .into_iter()
        .filter(|resource| !resource.is_empty())
        .collect()
}

fn first_gate(gate_codes: &[String]) -> Option<String> {
    gate_codes.first().filter(|code| !code.is_empty()).cloned()
}

fn runway(
    policy: RunwayPolicy,
    airport: Option<&str>,
    runway: Option<&String>,
    hub: &str,
) -> Option<String> {
    match policy {
        RunwayPolicy::Omit => None,
        RunwayPolicy::OutstationOnly if is_outstation(airport, hub) => runway.cloned(),
        RunwayPolicy::OutstationOnly => None,
    }
}
