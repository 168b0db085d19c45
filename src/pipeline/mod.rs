// Message pipeline: inbound extraction, then per-dialect processing

pub mod ingestion;
pub mod processing;
