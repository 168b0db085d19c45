// Routing, collection, assembly and gating of outbound messages

pub mod assemble;
pub mod collect;
pub mod normalize;
pub mod parser;
pub mod router;
pub mod validity_gate;

pub use assemble::{assemble, AssembledMessage, AssemblyContext, Dialect};
pub use router::Carrier;
pub use validity_gate::{DefaultValidityGate, GateDecision, ValidityGate};
