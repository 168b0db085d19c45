//! Event builders for unit tests.

use chrono::{DateTime, FixedOffset, NaiveDate};

use super::flight::{FlightIdentifier, FlightLeg, OperationalFlightEvent};

pub fn ts(value: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(value).unwrap()
}

pub fn leg(departure: Option<&str>, arrival: Option<&str>) -> FlightLeg {
    let mut leg = FlightLeg::default();
    leg.departure.airport_code = departure.map(str::to_string);
    leg.arrival.airport_code = arrival.map(str::to_string);
    leg
}

pub fn event(airline: &str, flight_number: &str, leg: FlightLeg) -> OperationalFlightEvent {
    OperationalFlightEvent {
        message_timestamp: Some(ts("2024-05-01T08:30:15.250Z")),
        flight: FlightIdentifier {
            airline_code: airline.to_string(),
            flight_number: flight_number.to_string(),
            operational_suffix: None,
            scheduled_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        },
        legs: vec![leg],
    }
}
