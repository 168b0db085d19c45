use chrono::{DateTime, FixedOffset};

use crate::constants::{ACTUAL, OFF_BLOCK, STARTUP_APPROVAL, STARTUP_REQUEST, TAKE_OFF, TARGET};
use crate::domain::{FlightLeg, OperationTime};
use crate::pipeline::processing::normalize::format_iso_utc;

use super::is_outstation;

/// Collect the departure operation times reported in the KL notification.
///
/// Only legs departing from an outstation carry operation times. Sources are
/// inspected in a fixed priority order and each present one takes the next
/// repeat index, starting at 1.
pub fn collect_operation_times(leg: &FlightLeg, hub: &str) -> Vec<OperationTime> {
    if !is_outstation(leg.departure_airport(), hub) {
        return Vec::new();
    }

    let handling = &leg.departure.handling;
    let times = &leg.departure.times;
    let sources: [(Option<&DateTime<FixedOffset>>, &'static str, &'static str); 4] = [
        (handling.target_take_off.as_ref(), TAKE_OFF, TARGET),
        (handling.actual_startup_request.as_ref(), STARTUP_REQUEST, ACTUAL),
        (times.target_startup_approval.as_ref(), STARTUP_APPROVAL, TARGET),
        (times.target_off_block.as_ref(), OFF_BLOCK, TARGET),
    ];

    sources
        .into_iter()
        .filter_map(|(timestamp, qualifier, time_type)| {
            timestamp.map(|ts| (format_iso_utc(ts), qualifier, time_type))
        })
        .zip(1u32..)
        .map(|((value, operation_qualifier, time_type), repeat_index)| OperationTime {
            value,
            operation_qualifier,
            time_type,
            repeat_index,
        })
        .collect()
}
