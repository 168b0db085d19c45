//! Collectors pull the per-dialect entries out of the first leg of an event.

pub mod milestones;
pub mod operation_times;
pub mod resources;

pub use milestones::{collect_milestones, Milestone};
pub use operation_times::collect_operation_times;
pub use resources::{collect_resources, RunwayPolicy};

/// An airport is an outstation when it is known and is not the hub.
///
/// A missing airport code counts as the hub.
pub fn is_outstation(airport: Option<&str>, hub: &str) -> bool {
    matches!(airport, Some(code) if code != hub)
}
