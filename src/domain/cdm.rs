use serde::Serialize;

/// CDM flight info message carrying named milestone timestamps
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CdmFlightInfo {
    /// `dd/MM/yyyy HH:mm:ss.SSS`
    pub timestamp: Option<String>,
    pub sequence_number: u32,
    pub flight: FlightSlot,
    pub dates: Vec<CdmDate>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlightSlot {
    pub airline: String,
    pub flight_number: String,
    /// `dd/MM/yyyy HH:mm`
    pub flight_date: String,
    pub departure_airport: Option<String>,
    pub arrival_airport: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CdmDate {
    /// Milestone name (`SIBT`, `AOBT`, ...)
    pub name: &'static str,
    /// `dd/MM/yyyy HH:mm`
    pub value: String,
    /// Correlation token from configuration
    pub result: String,
}
