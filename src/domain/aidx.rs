use serde::Serialize;

/// IATA AIDX flight leg notification for one leg
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightLegNotification {
    /// Message timestamp, RFC 3339 as received
    pub timestamp: Option<String>,
    pub transaction_identifier: Option<String>,
    pub leg: LegIdentifier,
    pub resources: Vec<Resource>,
    /// Always empty for the AF dialect
    pub operation_times: Vec<OperationTime>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LegIdentifier {
    pub airline: String,
    pub flight_number: String,
    pub operational_suffix: Option<String>,
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
    /// `YYYY-MM-DD`
    pub origin_date: String,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Side {
    Departure,
    Arrival,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Departure => "Departure",
            Side::Arrival => "Arrival",
        }
    }
}

/// Ground resources assigned to one side of the leg
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Resource {
    pub side: Side,
    pub parking_position: Option<String>,
    pub gate: Option<String>,
    pub runway: Option<String>,
}

impl Resource {
    pub fn is_empty(&self) -> bool {
        self.parking_position.is_none() && self.gate.is_none() && self.runway.is_none()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OperationTime {
    /// ISO pattern, e.g. `2024-05-01T10:15:00Z`
    pub value: String,
    /// Role code (`TKO`, `SRT`, `SAT`, `OFB`)
    pub operation_qualifier: &'static str,
    /// `TAR` or `ACT`
    pub time_type: &'static str,
    /// 1-based, gapless across the emitted entries
    pub repeat_index: u32,
}
