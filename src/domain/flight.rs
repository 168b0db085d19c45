use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RelayError, Result};

/// Canonical operational flight event, as extracted from the inbound message body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationalFlightEvent {
    pub message_timestamp: Option<DateTime<FixedOffset>>,
    pub flight: FlightIdentifier,
    /// Never empty once extracted; only the first leg is transformed
    pub legs: Vec<FlightLeg>,
}

impl OperationalFlightEvent {
    /// The leg every dialect is built from
    pub fn first_leg(&self) -> Result<&FlightLeg> {
        self.legs
            .first()
            .ok_or_else(|| RelayError::MissingField("FlightLeg".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlightIdentifier {
    pub airline_code: String,
    pub flight_number: String,
    pub operational_suffix: Option<String>,
    pub scheduled_date: NaiveDate,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightLeg {
    pub departure: DepartureSide,
    pub arrival: ArrivalSide,
}

impl FlightLeg {
    pub fn departure_airport(&self) -> Option<&str> {
        self.departure.airport_code.as_deref()
    }

    pub fn arrival_airport(&self) -> Option<&str> {
        self.arrival.airport_code.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DepartureSide {
    pub airport_code: Option<String>,
    pub times: Times,
    pub handling: FlightHandlingTimes,
    pub parking_position: Option<String>,
    /// Boarding gates in assignment order
    pub gate_codes: Vec<String>,
    pub take_off_runway: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArrivalSide {
    pub airport_code: Option<String>,
    pub times: Times,
    pub parking_position: Option<String>,
    /// Disembarking gates in assignment order
    pub gate_codes: Vec<String>,
    pub landing_runway: Option<String>,
}

/// Scheduled, estimated and actual block/runway times of one side of a leg
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Times {
    pub scheduled: Option<DateTime<FixedOffset>>,
    pub estimated: Option<DateTime<FixedOffset>>,
    pub estimated_internal: Option<DateTime<FixedOffset>>,
    pub actual: Option<DateTime<FixedOffset>>,
    pub estimated_touch_down: Option<DateTime<FixedOffset>>,
    pub actual_touch_down: Option<DateTime<FixedOffset>>,
    pub actual_take_off: Option<DateTime<FixedOffset>>,
    pub target_startup_approval: Option<DateTime<FixedOffset>>,
    pub target_off_block: Option<DateTime<FixedOffset>>,
}

/// Ground-handling times reported for the departure side
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FlightHandlingTimes {
    pub target_take_off: Option<DateTime<FixedOffset>>,
    pub actual_startup_request: Option<DateTime<FixedOffset>>,
}

/// Correlation header carried next to the event body
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MessageHeader {
    pub message_id: Option<String>,
}
