//! Resolution classification of a sampled half curve.

use std::time::Duration;

use itertools::Itertools;
use math::{Angle, Length, TurnDirection};

use crate::Error;
use crate::sampler::{HalfCurve, SeparationSample};


/// Resolution categories in decreasing order of preference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ResolutionType {
    /// A turn followed by straight flight keeps the required separation in time.
    #[strum(serialize = "1")]
    #[serde(rename = "1")]
    One,
    /// The straight-phase resolution is late or unstable,
    /// but the turn-phase minimum alone keeps the required separation.
    #[strum(serialize = "1a")]
    #[serde(rename = "1a")]
    OneA,
    /// Separation is lost during the turn.
    /// Only an intermediate verdict, always refined into [`TwoA`](Self::TwoA) or [`TwoB`](Self::TwoB).
    #[strum(serialize = "2")]
    #[serde(rename = "2")]
    Two,
    /// A larger turn regains the required separation after the turn-phase minimum.
    #[strum(serialize = "2a")]
    #[serde(rename = "2a")]
    TwoA,
    /// The required separation cannot be regained within the sweep.
    /// The turn with the largest separation is reported as the best effort.
    #[strum(serialize = "2b")]
    #[serde(rename = "2b")]
    TwoB,
}

impl ResolutionType {
    /// Whether the required separation is kept throughout the maneuver.
    #[must_use]
    pub fn is_compliant(self) -> bool { matches!(self, Self::One | Self::OneA) }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ClassifierConfig {
    /// A straight-phase resolution is late if it takes longer than this multiple
    /// of the time to turn to the turn-phase minimum.
    pub timeliness_factor: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self { Self { timeliness_factor: 1.2 } }
}

/// The selected resolution of one turn direction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ResolutionResult {
    pub kind:                ResolutionType,
    pub direction:           TurnDirection,
    pub angle:               Angle,
    pub time:                Duration,
    pub achieved_separation: Length<f64>,
    /// Index of the selected sample in the half curve.
    pub index:               usize,
}

/// Indices of strict interior local maxima.
#[must_use]
pub fn local_maxima<T: PartialOrd>(values: &[T]) -> Vec<usize> {
    values
        .iter()
        .tuple_windows()
        .positions(|(before, value, after)| value > before && value > after)
        .map(|index| index + 1)
        .collect()
}

/// Selects the resolution of a half curve against the `required` separation.
///
/// Always returns one of types 1, 1a, 2a and 2b.
///
/// # Errors
/// [`Error::EmptySweep`] if `half` has no sample at its turn-phase minimum index.
pub fn classify(
    half: &HalfCurve,
    required: Length<f64>,
    config: &ClassifierConfig,
) -> Result<ResolutionResult, Error> {
    let turn_minimum = half.turn_minimum_sample().ok_or(Error::EmptySweep)?;
    let straight: Vec<_> = half.samples.iter().map(|sample| sample.straight_separation).collect();
    let maxima: Vec<_> =
        local_maxima(&straight).into_iter().filter(|&index| index < half.turn_minimum).collect();

    let resolves_after_turn = turn_minimum.turn_separation >= required
        || maxima.iter().any(|&index| straight[index] >= required);

    let result = if resolves_after_turn {
        classify_after_turn(half, turn_minimum, required, config, &maxima)
    } else {
        bevy::log::debug!("{}: separation is lost during the turn", half.direction);
        classify_during_turn(half, turn_minimum, required)
    };

    if result.kind == ResolutionType::TwoB {
        bevy::log::warn!(
            "Turning {} cannot regain {:.0} m, best effort {:.0} m at {:.1} degrees",
            half.direction,
            required.into_meters(),
            result.achieved_separation.into_meters(),
            result.angle.into_degrees(),
        );
    } else {
        bevy::log::info!(
            "Turning {} resolves as type {} at {:.1} degrees after {:.0} s",
            half.direction,
            result.kind,
            result.angle.into_degrees(),
            result.time.as_secs_f64(),
        );
    }

    Ok(result)
}

fn classify_after_turn(
    half: &HalfCurve,
    turn_minimum: &SeparationSample,
    required: Length<f64>,
    config: &ClassifierConfig,
    maxima: &[usize],
) -> ResolutionResult {
    let deadline =
        Duration::try_from_secs_f64(turn_minimum.turn_time.as_secs_f64() * config.timeliness_factor)
            .unwrap_or(Duration::MAX);

    let candidate = half.samples.iter().position(|sample| sample.straight_separation > required);

    if let Some(index) = candidate {
        let sample = &half.samples[index];
        let timely = sample.resolution_time <= deadline;
        let unstable = maxima.iter().any(|&maximum| maximum < index && index < half.turn_minimum);

        if timely && !unstable {
            return result_from(
                half,
                ResolutionType::One,
                index,
                sample.resolution_time,
                sample.straight_separation,
            );
        }
    }

    if turn_minimum.turn_separation > required {
        result_from(
            half,
            ResolutionType::OneA,
            half.turn_minimum,
            turn_minimum.turn_time,
            turn_minimum.turn_separation,
        )
    } else {
        classify_during_turn(half, turn_minimum, required)
    }
}

fn classify_during_turn(
    half: &HalfCurve,
    turn_minimum: &SeparationSample,
    required: Length<f64>,
) -> ResolutionResult {
    let beyond = || half.samples.iter().enumerate().skip(half.turn_minimum);

    let regained = beyond()
        .filter(|(_, sample)| sample.turn_separation > required)
        .min_by_key(|(_, sample)| sample.turn_separation.as_ordered());

    if let Some((index, sample)) = regained {
        return result_from(
            half,
            ResolutionType::TwoA,
            index,
            sample.turn_time,
            turn_minimum.turn_separation,
        );
    }

    let (index, best) = beyond()
        .max_by_key(|(_, sample)| sample.turn_separation.as_ordered())
        .unwrap_or((half.turn_minimum, turn_minimum));
    result_from(half, ResolutionType::TwoB, index, best.turn_time, best.turn_separation)
}

fn result_from(
    half: &HalfCurve,
    kind: ResolutionType,
    index: usize,
    time: Duration,
    achieved_separation: Length<f64>,
) -> ResolutionResult {
    let SeparationSample { angle, .. } = half.samples[index];
    ResolutionResult { kind, direction: half.direction, angle, time, achieved_separation, index }
}
