use jsonschema::JSONSchema;
use serde_json::{json, Value};

fn compile(schema: &str) -> JSONSchema {
    let schema_json: Value = serde_json::from_str(schema).unwrap();
    let schema_static: &'static Value = Box::leak(Box::new(schema_json));
    JSONSchema::options().compile(schema_static).unwrap()
}

fn cdm_instance() -> Value {
    json!({
        "CdmFlightInfo": {
            "@xmlns": "urn:aoml",
            "@TimeStamp": "01/05/2024 09:40:02.007",
            "@Source": "SOFI",
            "@Action": "update",
            "@SequenceNmbr": "4821907",
            "FlightID": {
                "AirportSlot": {
                    "Airline": { "@CodeContext": "IATA", "$text": "KL" },
                    "FlightNumber": "1001",
                    "FlightDate": { "@DateID": "IOBT", "$text": "01/05/2024 00:00" },
                    "DepartureAirport": { "@CodeContext": "IATA", "@MessageIssued": "true", "$text": "AMS" },
                    "ArrivalAirport": { "@CodeContext": "IATA", "$text": "LHR" }
                }
            },
            "Dates": {
                "CdmDate": [
                    {
                        "@DateName": "SIBT",
                        "@DateType": "date",
                        "@Result": "SOFI-CDM",
                        "@Source": "CDM",
                        "@Message": "CDM",
                        "DateValue": "01/05/2024 10:20"
                    }
                ]
            }
        }
    })
}

#[test]
fn cdm_example_is_valid() {
    let compiled = compile(include_str!("../schemas/cdm_flight_info.v1.json"));
    assert!(compiled.is_valid(&cdm_instance()));
}

#[test]
fn cdm_short_sequence_number_is_rejected() {
    let compiled = compile(include_str!("../schemas/cdm_flight_info.v1.json"));
    let mut invalid = cdm_instance();
    invalid["CdmFlightInfo"]["@SequenceNmbr"] = json!("12345");
    assert!(!compiled.is_valid(&invalid), "sequence must be seven digits");
}

#[test]
fn cdm_without_dates_is_rejected() {
    let compiled = compile(include_str!("../schemas/cdm_flight_info.v1.json"));
    let mut invalid = cdm_instance();
    invalid["CdmFlightInfo"].as_object_mut().unwrap().remove("Dates");
    assert!(!compiled.is_valid(&invalid));
}

#[test]
fn aidx_operation_time_must_be_utc_iso() {
    let compiled = compile(include_str!("../schemas/aidx_flight_leg_notif.v1.json"));
    let mut instance = json!({
        "IATA_AIDX_FlightLegNotifRQ": {
            "@xmlns": "http://www.iata.org/IATA/2007/00",
            "@Version": "16.1",
            "Originator": { "@CompanyShortName": "SOFI" },
            "FlightLeg": {
                "LegIdentifier": {
                    "Airline": { "@CodeContext": "3", "$text": "KL" },
                    "FlightNumber": "642",
                    "OriginDate": "2024-05-01"
                },
                "LegData": {
                    "OperationTime": {
                        "@OperationQualifier": "TKO",
                        "@CodeContext": "9750",
                        "@TimeType": "TAR",
                        "@RepeatIndex": "1",
                        "$text": "2024-04-30T22:15:00Z"
                    }
                }
            }
        }
    });
    assert!(compiled.is_valid(&instance));

    instance["IATA_AIDX_FlightLegNotifRQ"]["FlightLeg"]["LegData"]["OperationTime"]["$text"] =
        json!("30/04/2024 22:15");
    assert!(!compiled.is_valid(&instance));
}

#[test]
fn inbound_event_requires_flight_identifier() {
    let compiled = compile(include_str!("../schemas/operational_flight.v1.json"));
    let instance = json!({
        "OperationalFlightEvent": {
            "MessageTimeStamp": "2024-05-01T13:05:00Z",
            "OperationalFlight": {
                "FlightLeg": { "Departure": { "Airport": { "Code": "JFK" } } }
            }
        }
    });
    assert!(!compiled.is_valid(&instance));
}
