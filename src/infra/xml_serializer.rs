use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::app::ports::MessageSerializerPort;
use crate::constants::{
    AIDX_NAMESPACE, AIDX_ROOT, AIDX_VERSION, CDM_ACTION, CDM_CODE_CONTEXT, CDM_DATE_TYPE,
    CDM_NAMESPACE, CDM_ROOT, CDM_SOURCE, CODE_CONTEXT, FLIGHT_DATE_ID, GATE_REPEAT_INDEX,
    OPERATION_TIME_CODE_CONTEXT, ORIGINATOR, PARKING_QUALIFIER, RESOURCE_USAGE,
};
use crate::domain::{CdmFlightInfo, FlightLegNotification};
use crate::error::Result;
use crate::pipeline::processing::assemble::AssembledMessage;

/// Renders assembled messages as indented XML documents
#[derive(Debug, Default, Clone, Copy)]
pub struct XmlMessageSerializer;

impl XmlMessageSerializer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, message: &AssembledMessage) -> Result<String> {
        match message {
            AssembledMessage::Notification { notification, .. } => render_notification(notification),
            AssembledMessage::Milestones(info) => render_milestones(info),
        }
    }
}

impl MessageSerializerPort for XmlMessageSerializer {
    fn to_text(&self, message: &AssembledMessage) -> std::result::Result<String, String> {
        self.render(message).map_err(|e| e.to_string())
    }
}

fn new_writer() -> Result<Writer<Vec<u8>>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    Ok(writer)
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner()).map_err(|e| {
        std::io::Error::new(std::io::ErrorKind::InvalidData, e).into()
    })
}

/// Write `<name attrs...>text</name>`
fn write_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn open<W: Write>(writer: &mut Writer<W>, name: &str, attributes: &[(&str, &str)]) -> Result<()> {
    let mut start = BytesStart::new(name);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))?;
    Ok(())
}

fn close<W: Write>(writer: &mut Writer<W>, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub fn render_notification(notification: &FlightLegNotification) -> Result<String> {
    let mut writer = new_writer()?;

    let mut root = vec![("xmlns", AIDX_NAMESPACE)];
    if let Some(ts) = notification.timestamp.as_deref() {
        root.push(("TimeStamp", ts));
    }
    root.push(("Version", AIDX_VERSION));
    if let Some(id) = notification.transaction_identifier.as_deref() {
        root.push(("TransactionIdentifier", id));
    }
    open(&mut writer, AIDX_ROOT, &root)?;

    let mut originator = BytesStart::new("Originator");
    originator.push_attribute(("CompanyShortName", ORIGINATOR));
    writer.write_event(Event::Empty(originator))?;

    open(&mut writer, "FlightLeg", &[])?;

    let leg = &notification.leg;
    open(&mut writer, "LegIdentifier", &[])?;
    write_element(&mut writer, "Airline", &[("CodeContext", CODE_CONTEXT)], &leg.airline)?;
    write_element(&mut writer, "FlightNumber", &[], &leg.flight_number)?;
    if let Some(suffix) = leg.operational_suffix.as_deref() {
        write_element(&mut writer, "OperationalSuffix", &[], suffix)?;
    }
    if let Some(airport) = leg.departure_airport.as_deref() {
        write_element(&mut writer, "DepartureAirport", &[("CodeContext", CODE_CONTEXT)], airport)?;
    }
    if let Some(airport) = leg.arrival_airport.as_deref() {
        write_element(&mut writer, "ArrivalAirport", &[("CodeContext", CODE_CONTEXT)], airport)?;
    }
    write_element(&mut writer, "OriginDate", &[], &leg.origin_date)?;
    close(&mut writer, "LegIdentifier")?;

    open(&mut writer, "LegData", &[])?;
    for time in &notification.operation_times {
        let repeat_index = time.repeat_index.to_string();
        write_element(
            &mut writer,
            "OperationTime",
            &[
                ("OperationQualifier", time.operation_qualifier),
                ("CodeContext", OPERATION_TIME_CODE_CONTEXT),
                ("TimeType", time.time_type),
                ("RepeatIndex", repeat_index.as_str()),
            ],
            &time.value,
        )?;
    }
    if !notification.resources.is_empty() {
        open(&mut writer, "AirportResources", &[("Usage", RESOURCE_USAGE)])?;
        for resource in &notification.resources {
            open(
                &mut writer,
                "Resource",
                &[("DepartureOrArrival", resource.side.as_str())],
            )?;
            if let Some(runway) = resource.runway.as_deref() {
                write_element(&mut writer, "Runway", &[], runway)?;
            }
            if let Some(parking) = resource.parking_position.as_deref() {
                write_element(
                    &mut writer,
                    "AircraftParkingPosition",
                    &[("Qualifier", PARKING_QUALIFIER)],
                    parking,
                )?;
            }
            if let Some(gate) = resource.gate.as_deref() {
                write_element(
                    &mut writer,
                    "PassengerGate",
                    &[("RepeatIndex", GATE_REPEAT_INDEX)],
                    gate,
                )?;
            }
            close(&mut writer, "Resource")?;
        }
        close(&mut writer, "AirportResources")?;
    }
    close(&mut writer, "LegData")?;

    close(&mut writer, "FlightLeg")?;
    close(&mut writer, AIDX_ROOT)?;
    finish(writer)
}

pub fn render_milestones(info: &CdmFlightInfo) -> Result<String> {
    let mut writer = new_writer()?;

    let sequence = info.sequence_number.to_string();
    let mut root = vec![("xmlns", CDM_NAMESPACE)];
    if let Some(ts) = info.timestamp.as_deref() {
        root.push(("TimeStamp", ts));
    }
    root.push(("Source", ORIGINATOR));
    root.push(("Action", CDM_ACTION));
    root.push(("SequenceNmbr", sequence.as_str()));
    open(&mut writer, CDM_ROOT, &root)?;

    let flight = &info.flight;
    open(&mut writer, "FlightID", &[])?;
    open(&mut writer, "AirportSlot", &[])?;
    write_element(&mut writer, "Airline", &[("CodeContext", CDM_CODE_CONTEXT)], &flight.airline)?;
    write_element(&mut writer, "FlightNumber", &[], &flight.flight_number)?;
    write_element(&mut writer, "FlightDate", &[("DateID", FLIGHT_DATE_ID)], &flight.flight_date)?;
    match flight.departure_airport.as_deref() {
        Some(airport) => write_element(
            &mut writer,
            "DepartureAirport",
            &[("CodeContext", CDM_CODE_CONTEXT), ("MessageIssued", "true")],
            airport,
        )?,
        None => write_element(&mut writer, "DepartureAirport", &[("MessageIssued", "true")], "")?,
    }
    if let Some(airport) = flight.arrival_airport.as_deref() {
        write_element(&mut writer, "ArrivalAirport", &[("CodeContext", CDM_CODE_CONTEXT)], airport)?;
    }
    close(&mut writer, "AirportSlot")?;
    close(&mut writer, "FlightID")?;

    if !info.dates.is_empty() {
        open(&mut writer, "Dates", &[])?;
        for date in &info.dates {
            open(
                &mut writer,
                "CdmDate",
                &[
                    ("DateName", date.name),
                    ("DateType", CDM_DATE_TYPE),
                    ("Result", date.result.as_str()),
                    ("Source", CDM_SOURCE),
                    ("Message", CDM_SOURCE),
                ],
            )?;
            write_element(&mut writer, "DateValue", &[], &date.value)?;
            close(&mut writer, "CdmDate")?;
        }
        close(&mut writer, "Dates")?;
    }

    close(&mut writer, CDM_ROOT)?;
    finish(writer)
}
