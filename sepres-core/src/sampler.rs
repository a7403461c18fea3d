//! Sweeps turn angles into separation curves.

use std::time::Duration;

use itertools::Itertools;
use math::{Angle, Length, TurnDirection, half_open_steps};

use crate::Error;
use crate::kinematics::KinematicsError;
use crate::separation::ManeuverPair;

#[cfg(test)]
mod tests;

/// Bisection stops once the bracket is narrower than this.
const REFINE_TOLERANCE: Angle = Angle::from_degrees(1e-6);
const REFINE_MAX_ITERATIONS: usize = 64;

/// Which aircraft turn during the turn phase.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum Maneuver {
    /// `a` turns, `b` holds its heading.
    ATurns,
    /// `b` turns, `a` holds its heading.
    BTurns,
    /// Both turn at their own bank angles for the same duration.
    BothTurn,
}

impl Maneuver {
    /// Bank angle of the aircraft whose turn drives the sweep.
    #[must_use]
    pub fn bank_angle(self, pair: &ManeuverPair) -> Angle {
        match self {
            Self::ATurns | Self::BothTurn => pair.a.bank_angle(),
            Self::BTurns => pair.b.bank_angle(),
        }
    }

    /// Time the maneuvering aircraft needs to turn by `angle`.
    pub fn turn_time(self, pair: &ManeuverPair, angle: Angle) -> Result<Duration, KinematicsError> {
        match self {
            Self::ATurns | Self::BothTurn => pair.a.time_to_turn(angle),
            Self::BTurns => pair.b.time_to_turn(angle),
        }
    }

    #[must_use]
    pub fn turn_separation(self, pair: &ManeuverPair, time: Duration) -> Length<f64> {
        match self {
            Self::ATurns => pair.separation_a_turns(time),
            Self::BTurns => pair.separation_b_turns(time),
            Self::BothTurn => pair.separation_both_turn(time),
        }
    }

    /// Heading changes of `a` and `b` when the maneuvering aircraft turns by `angle`.
    pub fn straight_angles(
        self,
        pair: &ManeuverPair,
        angle: Angle,
    ) -> Result<(Angle, Angle), KinematicsError> {
        Ok(match self {
            Self::ATurns => (angle, Angle::ZERO),
            Self::BTurns => (Angle::ZERO, angle),
            Self::BothTurn => (angle, pair.cooperative_turn_angle(angle)?),
        })
    }
}

/// Range of turn angles scanned in each direction.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SweepConfig {
    /// Exclusive bound of the turn angle magnitude.
    pub limit: Angle,
    pub step:  Angle,
}

impl Default for SweepConfig {
    fn default() -> Self { Self { limit: Angle::from_degrees(150.), step: Angle::from_degrees(2.) } }
}

/// Separation figures for one sampled turn angle.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct SeparationSample {
    /// Signed heading change of the maneuvering aircraft.
    pub angle:               Angle,
    pub turn_time:           Duration,
    /// Separation at the end of the turn.
    pub turn_separation:     Length<f64>,
    /// Minimum separation along the straight legs after the turn.
    pub straight_separation: Length<f64>,
    /// Time from turn initiation to the minimum separation.
    pub resolution_time:     Duration,
}

/// The samples of one turn direction, in increasing angle magnitude.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HalfCurve {
    pub direction:    TurnDirection,
    pub samples:      Vec<SeparationSample>,
    /// Index of the smallest turn-phase separation.
    /// `straight_separation` equals `turn_separation` from this index on.
    pub turn_minimum: usize,
}

impl HalfCurve {
    /// Returns `None` if `turn_minimum` is out of bounds.
    #[must_use]
    pub fn turn_minimum_sample(&self) -> Option<&SeparationSample> {
        self.samples.get(self.turn_minimum)
    }
}

/// Both half curves joined by signed turn angle, from the leftmost to the rightmost sample.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SeparationCurve {
    pub samples: Vec<SeparationSample>,
}

impl SeparationCurve {
    /// Joins the reversed left half with the right half, keeping a single zero-angle sample.
    #[must_use]
    pub fn merge(left: &HalfCurve, right: &HalfCurve) -> Self {
        let samples =
            left.samples.iter().rev().chain(right.samples.iter().skip(1)).copied().collect();
        Self { samples }
    }
}

/// Evaluates a single turn angle without the merge rule.
pub fn sample_at(
    pair: &ManeuverPair,
    maneuver: Maneuver,
    angle: Angle,
) -> Result<SeparationSample, Error> {
    let turn_time = maneuver.turn_time(pair, angle)?;
    let turn_separation = maneuver.turn_separation(pair, turn_time);
    if !turn_separation.is_finite() {
        return Err(Error::NonFinite {
            quantity: "turn-phase separation",
            degrees:  angle.into_degrees(),
        });
    }

    let (angle_a, angle_b) = maneuver.straight_angles(pair, angle)?;
    let phase = pair.straight_phase(angle_a, angle_b)?;

    let (straight_separation, resolution_time) = match phase.approach {
        Some(approach) if approach.distance.is_finite() => {
            (approach.distance, phase.start + approach.time_ahead().unwrap_or_default())
        }
        _ => {
            bevy::log::warn!(
                "No closest approach after turning {:.1} degrees under {maneuver}, using the \
                 turn-phase separation",
                angle.into_degrees(),
            );
            (turn_separation, turn_time)
        }
    };

    Ok(SeparationSample { angle, turn_time, turn_separation, straight_separation, resolution_time })
}

/// Sweeps one turn direction and applies the merge rule past the turn-phase minimum.
///
/// # Errors
/// Fails with [`KinematicsError::AgainstBank`] up front
/// if the maneuvering aircraft is banked opposite to `direction`.
pub fn sample_half(
    pair: &ManeuverPair,
    maneuver: Maneuver,
    direction: TurnDirection,
    sweep: &SweepConfig,
) -> Result<HalfCurve, Error> {
    let bank = maneuver.bank_angle(pair);
    if TurnDirection::from_angle(bank).is_some_and(|banked| banked != direction) {
        return Err(KinematicsError::AgainstBank { angle: sweep.step * direction, bank }.into());
    }

    let mut samples: Vec<_> = half_open_steps(sweep.limit, sweep.step * direction)
        .map(|angle| sample_at(pair, maneuver, angle))
        .collect::<Result<_, _>>()?;

    let turn_minimum = samples
        .iter()
        .position_min_by_key(|sample| sample.turn_separation.as_ordered())
        .ok_or(Error::EmptySweep)?;

    for sample in &mut samples[turn_minimum..] {
        sample.straight_separation = sample.turn_separation;
    }

    let minimum = &samples[turn_minimum];
    bevy::log::debug!(
        "{maneuver} {direction}: turn-phase minimum {:.0} m at {:.1} degrees",
        minimum.turn_separation.into_meters(),
        minimum.angle.into_degrees(),
    );

    Ok(HalfCurve { direction, samples, turn_minimum })
}

/// Bisects between two samples bracketing `required` on the unmerged straight-phase curve.
///
/// Returns the sample closest to the crossing on the side above `required`,
/// or `None` if the samples do not bracket it.
pub fn refine_crossing(
    pair: &ManeuverPair,
    maneuver: Maneuver,
    lower: &SeparationSample,
    upper: &SeparationSample,
    required: Length<f64>,
) -> Result<Option<SeparationSample>, Error> {
    let is_below = |sample: &SeparationSample| sample.straight_separation <= required;
    if is_below(lower) == is_below(upper) {
        return Ok(None);
    }

    let (mut below, mut above) = if is_below(lower) { (*lower, *upper) } else { (*upper, *lower) };

    for _ in 0..REFINE_MAX_ITERATIONS {
        if (above.angle - below.angle).abs() < REFINE_TOLERANCE {
            break;
        }

        let mid = sample_at(pair, maneuver, (below.angle + above.angle) * 0.5)?;
        if is_below(&mid) {
            below = mid;
        } else {
            above = mid;
        }
    }

    bevy::log::debug!(
        "{maneuver}: required separation crossed at {:.3} degrees",
        above.angle.into_degrees()
    );
    Ok(Some(above))
}
