use chrono::{DateTime, FixedOffset};

use crate::domain::{CdmDate, FlightLeg};
use crate::pipeline::processing::normalize::format_cdm_date;

use super::is_outstation;

/// Named CDM milestones, arrival side first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    ScheduledInBlock,
    EstimatedInBlock,
    ActualInBlock,
    ActualLanding,
    EstimatedLanding,
    ScheduledOffBlock,
    ActualOffBlock,
    ActualTakeOff,
    EstimatedOffBlock,
}

impl Milestone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Milestone::ScheduledInBlock => "SIBT",
            Milestone::EstimatedInBlock => "EIBT",
            Milestone::ActualInBlock => "AIBT",
            Milestone::ActualLanding => "ALDT",
            Milestone::EstimatedLanding => "ETDT",
            Milestone::ScheduledOffBlock => "SOBT",
            Milestone::ActualOffBlock => "AOBT",
            Milestone::ActualTakeOff => "ATOT",
            Milestone::EstimatedOffBlock => "EOBT",
        }
    }
}

impl std::fmt::Display for Milestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collect the CDM milestone dates of a leg.
///
/// A side contributes only when its airport is an outstation. Arrival
/// milestones precede departure milestones. Every entry carries the
/// configured `result` token.
pub fn collect_milestones(leg: &FlightLeg, hub: &str, result: &str) -> Vec<CdmDate> {
    let mut sources: Vec<(Milestone, Option<&DateTime<FixedOffset>>)> = Vec::with_capacity(9);

    if is_outstation(leg.arrival_airport(), hub) {
        let times = &leg.arrival.times;
        sources.extend([
            (Milestone::ScheduledInBlock, times.scheduled.as_ref()),
            (Milestone::EstimatedInBlock, times.estimated.as_ref()),
            (Milestone::ActualInBlock, times.actual.as_ref()),
        ]);
    }

    if is_outstation(leg.departure_airport(), hub) {
        let times = &leg.departure.times;
        sources.extend([
            (Milestone::ActualLanding, times.actual_touch_down.as_ref()),
            (Milestone::EstimatedLanding, times.estimated_touch_down.as_ref()),
            (Milestone::ScheduledOffBlock, times.scheduled.as_ref()),
            (Milestone::ActualOffBlock, times.actual.as_ref()),
            (Milestone::ActualTakeOff, times.actual_take_off.as_ref()),
            (Milestone::EstimatedOffBlock, times.estimated_internal.as_ref()),
        ]);
    }

    sources
        .into_iter()
        .filter_map(|(milestone, timestamp)| {
            timestamp.map(|ts| CdmDate {
                name: milestone.as_str(),
                value: format_cdm_date(ts),
                result: result.to_string(),
            })
        })
        .collect()
}
