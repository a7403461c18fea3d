//! Preference ordering across all maneuvers of a run.

use itertools::Itertools;
use math::Angle;

use crate::classify::ResolutionResult;
use crate::scenario::{ScenarioKind, ScenarioReport};


/// One (scenario, bank angle, direction) resolution in preference order.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct RankedManeuver {
    /// 1-based position in the preference order.
    pub rank:       usize,
    pub kind:       ScenarioKind,
    pub bank:       Angle,
    pub resolution: ResolutionResult,
    /// Whether the required separation is kept throughout.
    pub compliant:  bool,
}

/// Orders every resolution by type, then by smaller turn angle, then by shorter resolution time.
///
/// Non-compliant resolutions are kept and flagged.
#[must_use]
pub fn rank(reports: &[ScenarioReport]) -> Vec<RankedManeuver> {
    reports
        .iter()
        .flat_map(|report| {
            report.directions().map(|direction| (report.kind, report.bank, direction.resolution))
        })
        .sorted_by_key(|(_, _, resolution)| {
            (resolution.kind, resolution.angle.abs().as_ordered(), resolution.time)
        })
        .enumerate()
        .map(|(index, (kind, bank, resolution))| RankedManeuver {
            rank: index + 1,
            kind,
            bank,
            resolution,
            compliant: resolution.kind.is_compliant(),
        })
        .collect()
}
