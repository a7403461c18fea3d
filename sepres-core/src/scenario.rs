//! Maneuver archetypes driven over both turn directions.

use math::{Angle, Length, TurnDirection};

use crate::Error;
use crate::classify::{ClassifierConfig, ResolutionResult, ResolutionType, classify};
use crate::kinematics::Aircraft;
use crate::sampler::{
    HalfCurve, Maneuver, SeparationCurve, SeparationSample, SweepConfig, refine_crossing,
    sample_half,
};
use crate::separation::ManeuverPair;

#[cfg(test)]
mod tests;

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
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScenarioKind {
    /// The reference aircraft turns, the intruder holds its heading.
    ATurnsBStraight,
    /// The intruder turns, the reference aircraft holds its heading.
    AStraightBTurns,
    /// Both turn, with the intruder banked right.
    ATurnsBRight,
    /// Both turn, with the intruder banked left.
    ATurnsBLeft,
}

impl ScenarioKind {
    #[must_use]
    pub fn maneuver(self) -> Maneuver {
        match self {
            Self::ATurnsBStraight => Maneuver::ATurns,
            Self::AStraightBTurns => Maneuver::BTurns,
            Self::ATurnsBRight | Self::ATurnsBLeft => Maneuver::BothTurn,
        }
    }

    #[must_use]
    pub fn is_cooperative(self) -> bool { self.maneuver() == Maneuver::BothTurn }

    /// Sets the bank angles of both aircraft for a sweep in `direction`.
    fn set_banks(self, pair: &mut ManeuverPair, bank: Angle, direction: TurnDirection) {
        let (bank_a, bank_b) = match self {
            Self::ATurnsBStraight => (bank * direction, Angle::ZERO),
            Self::AStraightBTurns => (Angle::ZERO, bank * direction),
            Self::ATurnsBRight => (bank * direction, bank * TurnDirection::Clockwise),
            Self::ATurnsBLeft => (bank * direction, bank * TurnDirection::CounterClockwise),
        };
        pair.a.set_bank_angle(bank_a);
        pair.b.set_bank_angle(bank_b);
    }
}

/// A validated conflict between the reference aircraft and an intruder.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub reference:           Aircraft,
    pub intruder:            Aircraft,
    pub required_separation: Length<f64>,
}

impl Conflict {
    /// Returns a fresh maneuver pair with both aircraft flying straight.
    #[must_use]
    pub fn pair(&self) -> ManeuverPair {
        ManeuverPair {
            a:                   self.reference.clone().with_bank_angle(Angle::ZERO),
            b:                   self.intruder.clone().with_bank_angle(Angle::ZERO),
            required_separation: self.required_separation,
        }
    }
}

/// Parameters shared by every scenario of a run.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioSettings {
    pub sweep:                  SweepConfig,
    pub classifier:             ClassifierConfig,
    /// Bank angle magnitudes for the single-aircraft scenarios.
    pub bank_angles:            Vec<Angle>,
    /// Bank angle magnitude of both aircraft in the cooperative scenarios.
    pub cooperative_bank_angle: Angle,
    /// Bisect type 1 resolutions down to the exact crossing of the required separation.
    pub refine_crossings:       bool,
}

impl Default for ScenarioSettings {
    fn default() -> Self {
        Self {
            sweep:                  SweepConfig::default(),
            classifier:             ClassifierConfig::default(),
            bank_angles:            vec![Angle::from_degrees(15.), Angle::from_degrees(30.)],
            cooperative_bank_angle: Angle::from_degrees(30.),
            refine_crossings:       false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DirectionReport {
    pub direction:    TurnDirection,
    pub turn_minimum: SeparationSample,
    pub resolution:   ResolutionResult,
    pub curve:        HalfCurve,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScenarioReport {
    pub kind:  ScenarioKind,
    /// Bank angle magnitude of the maneuvering aircraft.
    pub bank:  Angle,
    pub left:  DirectionReport,
    pub right: DirectionReport,
    /// Left and right half curves joined by signed turn angle.
    pub curve: SeparationCurve,
}

impl ScenarioReport {
    pub fn directions(&self) -> impl Iterator<Item = &DirectionReport> {
        [&self.left, &self.right].into_iter()
    }
}

/// Runs one scenario at the bank angle magnitude `bank` in both directions.
pub fn run_scenario(
    conflict: &Conflict,
    kind: ScenarioKind,
    bank: Angle,
    settings: &ScenarioSettings,
) -> Result<ScenarioReport, Error> {
    let bank = bank.abs();
    let left = run_direction(conflict, kind, bank, TurnDirection::CounterClockwise, settings)?;
    let right = run_direction(conflict, kind, bank, TurnDirection::Clockwise, settings)?;
    let curve = SeparationCurve::merge(&left.curve, &right.curve);

    Ok(ScenarioReport { kind, bank, left, right, curve })
}

fn run_direction(
    conflict: &Conflict,
    kind: ScenarioKind,
    bank: Angle,
    direction: TurnDirection,
    settings: &ScenarioSettings,
) -> Result<DirectionReport, Error> {
    let mut pair = conflict.pair();
    kind.set_banks(&mut pair, bank, direction);

    let maneuver = kind.maneuver();
    let curve = sample_half(&pair, maneuver, direction, &settings.sweep)?;
    let mut resolution = classify(&curve, pair.required_separation, &settings.classifier)?;

    if settings.refine_crossings && resolution.kind == ResolutionType::One {
        refine_resolution(&pair, maneuver, &curve, &mut resolution)?;
    }

    let turn_minimum = *curve.turn_minimum_sample().ok_or(Error::EmptySweep)?;
    Ok(DirectionReport { direction, turn_minimum, resolution, curve })
}

/// Moves a type 1 resolution from its sample onto the exact crossing of the required separation.
///
/// Only crossings before the turn-phase minimum are refined,
/// since merged samples no longer carry straight-phase values.
fn refine_resolution(
    pair: &ManeuverPair,
    maneuver: Maneuver,
    curve: &HalfCurve,
    resolution: &mut ResolutionResult,
) -> Result<(), Error> {
    let index = resolution.index;
    if index == 0 || index >= curve.turn_minimum {
        return Ok(());
    }

    let (lower, upper) = (&curve.samples[index - 1], &curve.samples[index]);
    if let Some(refined) =
        refine_crossing(pair, maneuver, lower, upper, pair.required_separation)?
    {
        resolution.angle = refined.angle;
        resolution.time = refined.resolution_time;
        resolution.achieved_separation = refined.straight_separation;
    }

    Ok(())
}

/// Runs the single-aircraft scenarios at every configured bank angle
/// and the cooperative scenarios at the cooperative bank angle.
pub fn run_all(
    conflict: &Conflict,
    settings: &ScenarioSettings,
) -> Result<Vec<ScenarioReport>, Error> {
    run_selected(conflict, settings, <ScenarioKind as strum::IntoEnumIterator>::iter())
}

/// Like [`run_all`], restricted to the given scenario kinds.
pub fn run_selected(
    conflict: &Conflict,
    settings: &ScenarioSettings,
    kinds: impl IntoIterator<Item = ScenarioKind>,
) -> Result<Vec<ScenarioReport>, Error> {
    let mut reports = Vec::new();
    for kind in kinds {
        if kind.is_cooperative() {
            reports.push(run_scenario(conflict, kind, settings.cooperative_bank_angle, settings)?);
        } else {
            for &bank in &settings.bank_angles {
                reports.push(run_scenario(conflict, kind, bank, settings)?);
            }
        }
    }
    Ok(reports)
}
