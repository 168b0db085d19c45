use chrono::SecondsFormat;

use crate::domain::{FlightLegNotification, LegIdentifier, MessageHeader, OperationalFlightEvent};
use crate::error::{RelayError, Result};
use crate::pipeline::processing::collect::{collect_operation_times, collect_resources, RunwayPolicy};
use crate::pipeline::processing::normalize::{extract_transaction_identifier, normalize_flight_number};

use super::Dialect;

/// Assemble an AIDX flight leg notification.
///
/// Both notification dialects share the leg identifier. AF reports resources
/// without runways and no operation times; KL suppresses hub runways and adds
/// departure operation times.
pub fn assemble_notification(
    dialect: Dialect,
    event: &OperationalFlightEvent,
    header: Option<&MessageHeader>,
    hub: &str,
) -> Result<FlightLegNotification> {
    let leg = event.first_leg()?;
    let (resources, operation_times) = match dialect {
        Dialect::KlNotification => (
            collect_resources(leg, RunwayPolicy::OutstationOnly, hub),
            collect_operation_times(leg, hub),
        ),
        Dialect::AfNotification => (collect_resources(leg, RunwayPolicy::Omit, hub), Vec::new()),
        Dialect::KlMilestones => return Err(RelayError::NotNotificationDialect(dialect.label())),
    };

    Ok(FlightLegNotification {
        timestamp: event
            .message_timestamp
            .map(|ts| ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        transaction_identifier: extract_transaction_identifier(
            header.and_then(|h| h.message_id.as_deref()),
        ),
        leg: leg_identifier(event)?,
        resources,
        operation_times,
    })
}

fn leg_identifier(event: &OperationalFlightEvent) -> Result<LegIdentifier> {
    let leg = event.first_leg()?;
    Ok(LegIdentifier {
        airline: event.flight.airline_code.clone(),
        flight_number: normalize_flight_number(&event.flight.flight_number)?,
        operational_suffix: event.flight.operational_suffix.clone(),
        departure_airport: leg.departure.airport_code.clone(),
        arrival_airport: leg.arrival.airport_code.clone(),
        origin_date: event.flight.scheduled_date.format("%Y-%m-%d").to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::{event, leg, ts};
    use crate::domain::Side;
    use crate::error::RelayError;

    #[test]
    fn test_af_notification_from_hub_departure() {
        let mut leg = leg(Some("AMS"), Some("CDG"));
        leg.departure.times.scheduled = Some(ts("2024-05-01T10:00:00Z"));
        leg.departure.parking_position = Some("D14".into());
        leg.departure.gate_codes = vec!["D7".into()];
        leg.departure.take_off_runway = Some("24".into());
        let event = event("AF", "25", leg);
        let header = MessageHeader {
            message_id: Some("urn:abc-123-xyz".into()),
        };

        let n = assemble_notification(Dialect::AfNotification, &event, Some(&header), "AMS").unwrap();

        assert_eq!(n.leg.airline, "AF");
        assert_eq!(n.leg.flight_number, "025");
        assert_eq!(n.leg.origin_date, "2024-05-01");
        assert_eq!(n.leg.departure_airport.as_deref(), Some("AMS"));
        assert_eq!(n.transaction_identifier.as_deref(), Some("abc123xyz"));
        assert_eq!(n.timestamp.as_deref(), Some("2024-05-01T08:30:15.250Z"));
        assert_eq!(n.resources.len(), 1);
        assert_eq!(n.resources[0].side, Side::Departure);
        assert_eq!(n.resources[0].parking_position.as_deref(), Some("D14"));
        assert_eq!(n.resources[0].gate.as_deref(), Some("D7"));
        assert_eq!(n.resources[0].runway, None);
        assert!(n.operation_times.is_empty());
    }

    #[test]
    fn test_af_ignores_operation_time_sources() {
        let mut leg = leg(Some("LHR"), Some("CDG"));
        leg.departure.handling.target_take_off = Some(ts("2024-05-01T10:15:00Z"));
        let n = assemble_notification(Dialect::AfNotification, &event("AF", "1001", leg), None, "AMS")
            .unwrap();
        assert!(n.operation_times.is_empty());
        assert_eq!(n.transaction_identifier, None);
    }

    #[test]
    fn test_kl_notification_with_outstation_departure() {
        let mut leg = leg(Some("LHR"), Some("AMS"));
        leg.departure.take_off_runway = Some("27L".into());
        leg.arrival.landing_runway = Some("18R".into());
        leg.arrival.gate_codes = vec!["C5".into()];
        leg.departure.times.target_off_block = Some(ts("2024-05-01T10:00:00Z"));

        let n = assemble_notification(Dialect::KlNotification, &event("KL", "1000", leg), None, "AMS")
            .unwrap();

        assert_eq!(n.resources.len(), 2);
        assert_eq!(n.resources[0].runway.as_deref(), Some("27L"));
        assert_eq!(n.resources[1].runway, None);
        assert_eq!(n.resources[1].gate.as_deref(), Some("C5"));
        assert_eq!(n.operation_times.len(), 1);
        assert_eq!(n.operation_times[0].operation_qualifier, "OFB");
        assert_eq!(n.operation_times[0].repeat_index, 1);
    }

    #[test]
    fn test_kl_hub_both_sides_has_no_runway() {
        let mut leg = leg(Some("AMS"), Some("AMS"));
        leg.departure.take_off_runway = Some("36L".into());
        leg.departure.parking_position = Some("E20".into());
        leg.arrival.landing_runway = Some("18R".into());
        leg.arrival.parking_position = Some("E22".into());

        let n = assemble_notification(Dialect::KlNotification, &event("KL", "1000", leg), None, "AMS")
            .unwrap();
        assert_eq!(n.resources.len(), 2);
        assert!(n.resources.iter().all(|r| r.runway.is_none()));
    }

    #[test]
    fn test_non_numeric_flight_number_fails() {
        let err = assemble_notification(
            Dialect::KlNotification,
            &event("KL", "12A", leg(Some("LHR"), Some("AMS"))),
            None,
            "AMS",
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::InvalidField { .. }));
    }

    #[test]
    fn test_milestone_dialect_is_not_a_notification() {
        let mut leg = leg(Some("AMS"), Some("CDG"));
        leg.departure.parking_position = Some("D14".into());

        let err = assemble_notification(Dialect::KlMilestones, &event("KL", "1001", leg), None, "AMS")
            .unwrap_err();
        assert!(matches!(err, RelayError::NotNotificationDialect("KL CDM")));
    }
}
