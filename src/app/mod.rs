pub mod ports;
pub mod relay_use_case;

pub use relay_use_case::{
    BatchResult, BatchSummary, DialectOutcome, DialectReport, EventReport, RelaySettings,
    RelayUseCase, TransformedMessage,
};
