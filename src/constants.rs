/// Carrier, airport and message vocabulary shared by the collectors and writers.

// Carriers recognised by the router
pub const AIR_FRANCE: &str = "AF";
pub const KLM: &str = "KL";

/// Airport whose ground resources and milestones are handled locally
pub const HUB_AIRPORT: &str = "AMS";

// AIDX flight leg notification
pub const AIDX_NAMESPACE: &str = "http://www.iata.org/IATA/2007/00";
pub const AIDX_ROOT: &str = "IATA_AIDX_FlightLegNotifRQ";
pub const AIDX_VERSION: &str = "16.1";
pub const ORIGINATOR: &str = "SOFI";
pub const CODE_CONTEXT: &str = "3";
pub const OPERATION_TIME_CODE_CONTEXT: &str = "9750";
pub const RESOURCE_USAGE: &str = "Actual";
pub const PARKING_QUALIFIER: &str = "Public";
pub const GATE_REPEAT_INDEX: &str = "1";

// Operation time roles
pub const TAKE_OFF: &str = "TKO";
pub const STARTUP_REQUEST: &str = "SRT";
pub const STARTUP_APPROVAL: &str = "SAT";
pub const OFF_BLOCK: &str = "OFB";

// Operation time qualifiers
pub const TARGET: &str = "TAR";
pub const ACTUAL: &str = "ACT";

// CDM flight info
pub const CDM_NAMESPACE: &str = "urn:aoml";
pub const CDM_ROOT: &str = "CdmFlightInfo";
pub const CDM_SOURCE: &str = "CDM";
pub const CDM_ACTION: &str = "update";
pub const CDM_DATE_TYPE: &str = "date";
pub const CDM_CODE_CONTEXT: &str = "IATA";
pub const FLIGHT_DATE_ID: &str = "IOBT";

// Timestamp patterns
pub const ISO_UTC_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";
pub const CDM_DATE_PATTERN: &str = "%d/%m/%Y %H:%M";
pub const CDM_TIMESTAMP_PATTERN: &str = "%d/%m/%Y %H:%M:%S%.3f";
