// Pipeline ingestion: transport envelope handling and canonical event extraction

pub mod envelope;
pub mod event_reader;

pub use envelope::{parse_header, split_envelope, SoapParts};
pub use event_reader::{extract_event, read_event};
