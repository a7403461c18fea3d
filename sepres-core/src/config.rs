//! Scenario files.
//!
//! Every physical input states its unit explicitly,
//! e.g. `{"knots": 480}` or `{"nautical_miles": [4.0, 5.83]}`.

use bevy_math::DVec2;
use math::{
    Accel, Angle, DEFAULT_GRAVITY, Heading, Length, LengthUnit, Position, Speed, SpeedUnit,
    UnitEnum,
};
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::classify::ClassifierConfig;
use crate::kinematics::{Aircraft, Placement};
use crate::sampler::SweepConfig;
use crate::scenario::{Conflict, ScenarioSettings};
use crate::separation::DEFAULT_REQUIRED_SEPARATION;

#[cfg(test)]
mod tests;

/// A complete analysis input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ScenarioFile {
    /// The two aircraft in conflict.
    pub conflict: ConflictConfig,
    /// Sweep and classification parameters.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl ScenarioFile {
    /// Validates the file into a conflict and the settings to analyze it with.
    pub fn build(&self) -> Result<(Conflict, ScenarioSettings), Error> {
        Ok((self.conflict.build()?, self.analysis.build()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ConflictConfig {
    /// The reference aircraft, placed at the origin heading along +y.
    pub reference:           ReferenceConfig,
    /// The conflicting aircraft, placed relative to the reference aircraft.
    pub intruder:            IntruderConfig,
    /// Minimum separation to maintain.
    #[serde(default = "default_required_separation")]
    pub required_separation: LengthInput,
    /// Gravitational acceleration in m/s².
    #[serde(default = "default_gravity")]
    pub gravity:             f64,
}

fn default_required_separation() -> LengthInput {
    LengthInput::Meters(DEFAULT_REQUIRED_SEPARATION.into_meters())
}

fn default_gravity() -> f64 { DEFAULT_GRAVITY.into_meters_per_sec2() }

impl ConflictConfig {
    pub fn build(&self) -> Result<Conflict, Error> {
        if !(self.gravity.is_finite() && self.gravity > 0.) {
            return Err(Error::invalid("gravity", format!("{} is not positive", self.gravity)));
        }
        let gravity = Accel::from_meters_per_sec2(self.gravity);

        let required_separation = self.required_separation.into_length();
        if !(required_separation.is_finite() && required_separation.is_positive()) {
            return Err(Error::invalid(
                "required_separation",
                format!("{} m is not positive", required_separation.into_meters()),
            ));
        }

        let reference = Aircraft::new(
            positive_speed("reference.airspeed", self.reference.airspeed)?,
            Placement::Reference,
        )
        .with_gravity(gravity);

        let position = self.intruder.position.into_position();
        if !position.get().is_finite() {
            return Err(Error::invalid("intruder.position", "coordinates must be finite"));
        }
        let heading = self.intruder.heading.into_angle();
        if !heading.is_finite() {
            return Err(Error::invalid("intruder.heading", "heading must be finite"));
        }
        let intruder = Aircraft::new(
            positive_speed("intruder.airspeed", self.intruder.airspeed)?,
            Placement::Offset { position, heading: Heading::from_radians(heading) },
        )
        .with_gravity(gravity);

        Ok(Conflict { reference, intruder, required_separation })
    }
}

fn positive_speed(field: &'static str, input: SpeedInput) -> Result<Speed<f64>, Error> {
    let speed = input.into_speed();
    if speed.is_finite() && speed.is_positive() {
        Ok(speed)
    } else {
        Err(Error::invalid(field, format!("{} m/s is not positive", speed.into_meters_per_sec())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct ReferenceConfig {
    /// True airspeed.
    pub airspeed: SpeedInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct IntruderConfig {
    /// True airspeed.
    pub airspeed: SpeedInput,
    /// Initial position relative to the reference aircraft.
    pub position: PositionInput,
    /// Initial heading relative to the reference aircraft's heading, clockwise.
    pub heading:  AngleInput,
}

/// Sweep and classification parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(default)]
pub struct AnalysisSettings {
    /// Exclusive bound of the turn angle magnitude.
    pub sweep_limit:            AngleInput,
    /// Turn angle resolution.
    pub sweep_step:             AngleInput,
    /// Bank angle magnitudes for the single-aircraft scenarios.
    pub bank_angles:            Vec<AngleInput>,
    /// Bank angle magnitude of both aircraft in the cooperative scenarios.
    pub cooperative_bank_angle: AngleInput,
    /// A straight-phase resolution taking longer than this multiple of
    /// the time to the turn-phase minimum is considered late.
    pub timeliness_factor:      f64,
    /// Bisect type 1 resolutions down to the exact crossing of the required separation.
    pub refine_crossings:       bool,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            sweep_limit:            AngleInput::Degrees(150.),
            sweep_step:             AngleInput::Degrees(2.),
            bank_angles:            vec![AngleInput::Degrees(15.), AngleInput::Degrees(30.)],
            cooperative_bank_angle: AngleInput::Degrees(30.),
            timeliness_factor:      ClassifierConfig::default().timeliness_factor,
            refine_crossings:       false,
        }
    }
}

impl AnalysisSettings {
    pub fn build(&self) -> Result<ScenarioSettings, Error> {
        let limit = self.sweep_limit.into_angle();
        let step = self.sweep_step.into_angle();
        if !(limit.is_finite() && limit.is_positive()) {
            return Err(Error::invalid("sweep_limit", "must be positive"));
        }
        if !(step.is_finite() && step.is_positive() && step <= limit) {
            return Err(Error::invalid("sweep_step", "must be positive and not exceed sweep_limit"));
        }

        if self.bank_angles.is_empty() {
            return Err(Error::invalid("bank_angles", "at least one bank angle is required"));
        }
        let bank_angles: Vec<_> = self
            .bank_angles
            .iter()
            .map(|&bank| checked_bank("bank_angles", bank))
            .collect::<Result<_, Error>>()?;
        let cooperative_bank_angle =
            checked_bank("cooperative_bank_angle", self.cooperative_bank_angle)?;

        if !(self.timeliness_factor.is_finite() && self.timeliness_factor >= 1.) {
            return Err(Error::invalid("timeliness_factor", "must be at least 1"));
        }

        Ok(ScenarioSettings {
            sweep: SweepConfig { limit, step },
            classifier: ClassifierConfig { timeliness_factor: self.timeliness_factor },
            bank_angles,
            cooperative_bank_angle,
            refine_crossings: self.refine_crossings,
        })
    }
}

fn checked_bank(field: &'static str, input: AngleInput) -> Result<Angle, Error> {
    let bank = input.into_angle();
    if bank.is_positive() && bank < Angle::RIGHT {
        Ok(bank)
    } else {
        Err(Error::invalid(
            field,
            format!("{:.1} degrees is not strictly between 0 and 90", bank.into_degrees()),
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum SpeedInput {
    Knots(f64),
    KilometersPerHour(f64),
    MetersPerSecond(f64),
}

impl SpeedInput {
    #[must_use]
    pub fn into_speed(self) -> Speed<f64> {
        let (unit, value) = match self {
            Self::Knots(value) => (SpeedUnit::Knots, value),
            Self::KilometersPerHour(value) => (SpeedUnit::KilometersPerHour, value),
            Self::MetersPerSecond(value) => (SpeedUnit::MetersPerSecond, value),
        };
        unit.float_to_quantity()(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum LengthInput {
    NauticalMiles(f64),
    Kilometers(f64),
    Feet(f64),
    Meters(f64),
}

impl LengthInput {
    fn split(self) -> (LengthUnit, f64) {
        match self {
            Self::NauticalMiles(value) => (LengthUnit::NauticalMiles, value),
            Self::Kilometers(value) => (LengthUnit::Kilometers, value),
            Self::Feet(value) => (LengthUnit::Feet, value),
            Self::Meters(value) => (LengthUnit::Meters, value),
        }
    }

    #[must_use]
    pub fn into_length(self) -> Length<f64> {
        let (unit, value) = self.split();
        unit.float_to_quantity()(value)
    }
}

/// A position as `[x, y]`, with +y along the reference aircraft's initial heading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum PositionInput {
    NauticalMiles([f64; 2]),
    Kilometers([f64; 2]),
    Meters([f64; 2]),
}

impl PositionInput {
    #[must_use]
    pub fn into_position(self) -> Position<DVec2> {
        let (unit, [x, y]) = match self {
            Self::NauticalMiles(xy) => (LengthUnit::NauticalMiles, xy),
            Self::Kilometers(xy) => (LengthUnit::Kilometers, xy),
            Self::Meters(xy) => (LengthUnit::Meters, xy),
        };
        let convert = unit.float_to_quantity();
        Position((convert(x), convert(y)).into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum AngleInput {
    Degrees(f64),
    Radians(f64),
}

impl AngleInput {
    #[must_use]
    pub fn into_angle(self) -> Angle {
        match self {
            Self::Degrees(degrees) => Angle::from_degrees(degrees),
            Self::Radians(radians) => Angle::from_radians(radians),
        }
    }
}

/// Built-in scenario files.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
pub enum Preset {
    /// Intruder at (12, 12.5) nm, crossing from the right.
    #[strum(serialize = "erz2010-case1")]
    Erz2010Case1,
    /// Intruder at (4, 5.83) nm, crossing from the right.
    #[strum(serialize = "erz2010-case2")]
    Erz2010Case2,
}

impl Preset {
    #[must_use]
    pub fn scenario_file(self) -> ScenarioFile {
        let position = match self {
            Self::Erz2010Case1 => [12., 12.5],
            Self::Erz2010Case2 => [4., 5.83],
        };

        ScenarioFile {
            conflict: ConflictConfig {
                reference:           ReferenceConfig {
                    airspeed: SpeedInput::MetersPerSecond(205.6),
                },
                intruder:            IntruderConfig {
                    airspeed: SpeedInput::MetersPerSecond(246.72),
                    position: PositionInput::NauticalMiles(position),
                    heading:  AngleInput::Degrees(270.),
                },
                required_separation: default_required_separation(),
                gravity:             default_gravity(),
            },
            analysis: AnalysisSettings::default(),
        }
    }
}
