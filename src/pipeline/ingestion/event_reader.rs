//! Maps the JSON projection of an inbound event document onto
//! [`OperationalFlightEvent`].

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::domain::{
    ArrivalSide, DepartureSide, FlightHandlingTimes, FlightIdentifier, FlightLeg,
    OperationalFlightEvent, Times,
};
use crate::error::{RelayError, Result};
use crate::pipeline::processing::parser::{one_or_many, text_of, xml_to_json};

/// Parse an event document from its XML text
pub fn read_event(xml: &str) -> Result<OperationalFlightEvent> {
    extract_event(&xml_to_json(xml)?)
}

/// Extract the canonical event from a projected document `{Root: {...}}`
pub fn extract_event(document: &Value) -> Result<OperationalFlightEvent> {
    let root = document
        .as_object()
        .and_then(|map| map.values().next())
        .ok_or_else(|| RelayError::MissingField("event root".to_string()))?;

    let flight = root
        .get("OperationalFlight")
        .ok_or_else(|| RelayError::MissingField("OperationalFlight".to_string()))?;
    let identifier = flight
        .get("FlightIdentifier")
        .ok_or_else(|| RelayError::MissingField("FlightIdentifier".to_string()))?;

    let legs: Vec<FlightLeg> = one_or_many(flight.get("FlightLeg"))
        .into_iter()
        .map(read_leg)
        .collect::<Result<_>>()?;
    if legs.is_empty() {
        return Err(RelayError::MissingField("FlightLeg".to_string()));
    }

    Ok(OperationalFlightEvent {
        message_timestamp: timestamp(root.get("MessageTimeStamp"), "MessageTimeStamp")?,
        flight: FlightIdentifier {
            airline_code: required_text(identifier, "AirlineCode")?,
            flight_number: required_text(identifier, "FlightNumber")?,
            operational_suffix: text(identifier.get("OperationalSuffix")),
            scheduled_date: scheduled_date(&required_text(identifier, "ScheduledDate")?)?,
        },
        legs,
    })
}

fn read_leg(leg: &Value) -> Result<FlightLeg> {
    let departure = leg.get("Departure");
    let arrival = leg.get("Arrival");

    Ok(FlightLeg {
        departure: DepartureSide {
            airport_code: code(departure.and_then(|d| d.get("Airport"))),
            times: read_times(departure.and_then(|d| d.get("Times")))?,
            handling: read_handling(departure.and_then(|d| d.get("FlightHandlingTimes")))?,
            parking_position: code(departure.and_then(|d| d.get("ParkingPosition"))),
            gate_codes: gate_codes(departure.and_then(|d| d.get("Boarding"))),
            take_off_runway: text(departure.and_then(|d| d.get("TakeOffRunwayCode"))),
        },
        arrival: ArrivalSide {
            airport_code: code(arrival.and_then(|a| a.get("Airport"))),
            times: read_times(arrival.and_then(|a| a.get("Times")))?,
            parking_position: code(arrival.and_then(|a| a.get("ParkingPosition"))),
            gate_codes: gate_codes(arrival.and_then(|a| a.get("Disembarking"))),
            landing_runway: text(arrival.and_then(|a| a.get("LandingRunwayCode"))),
        },
    })
}

fn read_times(times: Option<&Value>) -> Result<Times> {
    let Some(times) = times else {
        return Ok(Times::default());
    };
    let field = |name: &str| timestamp(times.get(name), name);
    Ok(Times {
        scheduled: field("ScheduledDateTime")?,
        estimated: field("EstimatedDateTime")?,
        estimated_internal: field("EstimatedDateTimeInternal")?,
        actual: field("ActualDateTime")?,
        estimated_touch_down: field("EstimatedTouchDownTime")?,
        actual_touch_down: field("ActualTouchDownTime")?,
        actual_take_off: field("ActualTakeOffTime")?,
        target_startup_approval: field("TargetStartupApprovalTime")?,
        target_off_block: field("TargetOffBlockTime")?,
    })
}

fn read_handling(handling: Option<&Value>) -> Result<FlightHandlingTimes> {
    let Some(handling) = handling else {
        return Ok(FlightHandlingTimes::default());
    };
    Ok(FlightHandlingTimes {
        target_take_off: timestamp(handling.get("TargetTakeOffTime"), "TargetTakeOffTime")?,
        actual_startup_request: timestamp(
            handling.get("ActualStartupRequestTime"),
            "ActualStartupRequestTime",
        )?,
    })
}

/// Gate codes of a boarding/disembarking block, in document order
fn gate_codes(block: Option<&Value>) -> Vec<String> {
    one_or_many(block.and_then(|b| b.get("Location")))
        .into_iter()
        .flat_map(|location| one_or_many(location.get("GateCode")))
        .map(|gate| text_of(gate).unwrap_or_default().to_string())
        .collect()
}

fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(text_of).map(str::to_string)
}

fn code(value: Option<&Value>) -> Option<String> {
    text(value.and_then(|v| v.get("Code")))
}

fn required_text(parent: &Value, name: &str) -> Result<String> {
    text(parent.get(name)).ok_or_else(|| RelayError::MissingField(name.to_string()))
}

/// Parse an XML dateTime. Values without an offset are taken as UTC.
fn timestamp(value: Option<&Value>, field: &str) -> Result<Option<DateTime<FixedOffset>>> {
    let Some(raw) = value.and_then(text_of) else {
        return Ok(None);
    };
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(parsed));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc().fixed_offset()))
        .map_err(|_| RelayError::invalid_field(field, raw))
}

/// `YYYY-MM-DD`, optionally followed by a zone designator
fn scheduled_date(raw: &str) -> Result<NaiveDate> {
    raw.get(..10)
        .and_then(|date| NaiveDate::parse_from_str(date, "%Y-%m-%d").ok())
        .ok_or_else(|| RelayError::invalid_field("ScheduledDate", raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENT: &str = r#"<ns2:OperationalFlightEvent xmlns:ns2="urn:afkl:ops">
  <ns2:MessageTimeStamp>2024-05-01T08:30:15.250+02:00</ns2:MessageTimeStamp>
  <ns2:OperationalFlight>
    <ns2:FlightIdentifier>
      <ns2:AirlineCode>KL</ns2:AirlineCode>
      <ns2:FlightNumber>25</ns2:FlightNumber>
      <ns2:OperationalSuffix>D</ns2:OperationalSuffix>
      <ns2:ScheduledDate>2024-05-01Z</ns2:ScheduledDate>
    </ns2:FlightIdentifier>
    <ns2:FlightLeg>
      <ns2:Departure>
        <ns2:Airport><ns2:Code>LHR</ns2:Code></ns2:Airport>
        <ns2:Times>
          <ns2:ScheduledDateTime>2024-05-01T10:00:00</ns2:ScheduledDateTime>
          <ns2:TargetOffBlockTime>2024-05-01T10:05:00Z</ns2:TargetOffBlockTime>
        </ns2:Times>
        <ns2:FlightHandlingTimes>
          <ns2:ActualStartupRequestTime>2024-05-01T09:50:00Z</ns2:ActualStartupRequestTime>
        </ns2:FlightHandlingTimes>
        <ns2:ParkingPosition><ns2:Code>R12</ns2:Code></ns2:ParkingPosition>
        <ns2:Boarding>
          <ns2:Location><ns2:GateCode>A4</ns2:GateCode><ns2:GateCode>A6</ns2:GateCode></ns2:Location>
        </ns2:Boarding>
        <ns2:TakeOffRunwayCode>27L</ns2:TakeOffRunwayCode>
      </ns2:Departure>
      <ns2:Arrival>
        <ns2:Airport><ns2:Code>AMS</ns2:Code></ns2:Airport>
        <ns2:Disembarking><ns2:Location><ns2:GateCode>D3</ns2:GateCode></ns2:Location></ns2:Disembarking>
      </ns2:Arrival>
    </ns2:FlightLeg>
    <ns2:FlightLeg>
      <ns2:Departure><ns2:Airport><ns2:Code>AMS</ns2:Code></ns2:Airport></ns2:Departure>
    </ns2:FlightLeg>
  </ns2:OperationalFlight>
</ns2:OperationalFlightEvent>"#;

    #[test]
    fn test_read_event() {
        let event = read_event(EVENT).unwrap();

        assert_eq!(event.flight.airline_code, "KL");
        assert_eq!(event.flight.flight_number, "25");
        assert_eq!(event.flight.operational_suffix.as_deref(), Some("D"));
        assert_eq!(
            event.flight.scheduled_date,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(event.legs.len(), 2);

        let leg = event.first_leg().unwrap();
        assert_eq!(leg.departure_airport(), Some("LHR"));
        assert_eq!(leg.arrival_airport(), Some("AMS"));
        assert_eq!(leg.departure.parking_position.as_deref(), Some("R12"));
        assert_eq!(leg.departure.gate_codes, vec!["A4", "A6"]);
        assert_eq!(leg.arrival.gate_codes, vec!["D3"]);
        assert_eq!(leg.departure.take_off_runway.as_deref(), Some("27L"));
        assert!(leg.departure.handling.actual_startup_request.is_some());
        assert!(leg.departure.handling.target_take_off.is_none());
        assert_eq!(
            leg.departure.times.scheduled.unwrap().to_rfc3339(),
            "2024-05-01T10:00:00+00:00"
        );
        assert_eq!(
            event.message_timestamp.unwrap().to_rfc3339(),
            "2024-05-01T08:30:15.250+02:00"
        );
    }

    #[test]
    fn test_missing_legs_is_an_error() {
        let xml = r#"<E><OperationalFlight><FlightIdentifier>
            <AirlineCode>AF</AirlineCode><FlightNumber>1</FlightNumber><ScheduledDate>2024-05-01</ScheduledDate>
            </FlightIdentifier></OperationalFlight></E>"#;
        assert!(matches!(read_event(xml), Err(RelayError::MissingField(f)) if f == "FlightLeg"));
    }

    #[test]
    fn test_bad_timestamp_is_an_invalid_field() {
        let xml = r#"<E><MessageTimeStamp>yesterday</MessageTimeStamp><OperationalFlight><FlightIdentifier>
            <AirlineCode>AF</AirlineCode><FlightNumber>1</FlightNumber><ScheduledDate>2024-05-01</ScheduledDate>
            </FlightIdentifier><FlightLeg/></OperationalFlight></E>"#;
        let err = read_event(xml).unwrap_err();
        assert!(matches!(err, RelayError::InvalidField { ref field, .. } if field == "MessageTimeStamp"));
    }
}
