//! Turn-phase and straight-phase separation of a maneuver pair.

use std::time::Duration;

use bevy_math::DVec2;
use math::{Angle, ClosestApproach, Length, Position, Speed, closest_approach};

use crate::kinematics::{Aircraft, KinematicsError};


/// Five nautical miles.
pub const DEFAULT_REQUIRED_SEPARATION: Length<f64> = Length::from_meters(9260.);

/// The reference aircraft `a` and the conflicting aircraft `b`,
/// with `b` placed relative to `a`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManeuverPair {
    pub a:                   Aircraft,
    pub b:                   Aircraft,
    pub required_separation: Length<f64>,
}

/// State of one aircraft once both aircraft fly straight again.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StraightLeg {
    /// Time this aircraft needs for its own heading change.
    pub turn_time: Duration,
    /// Position at [`StraightPhase::start`].
    pub position:  Position<DVec2>,
    pub velocity:  Speed<DVec2>,
}

/// Both aircraft on their post-turn straight legs.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct StraightPhase {
    /// When the later of the two turns completes.
    pub start:    Duration,
    pub a:        StraightLeg,
    pub b:        StraightLeg,
    /// Closest approach of the two legs, relative to `start`.
    ///
    /// `None` if the relative velocity vanishes.
    pub approach: Option<ClosestApproach>,
}

impl ManeuverPair {
    #[must_use]
    pub fn new(a: Aircraft, b: Aircraft) -> Self {
        Self { a, b, required_separation: DEFAULT_REQUIRED_SEPARATION }
    }

    /// Separation while `a` turns and `b` holds its initial heading.
    #[must_use]
    pub fn separation_a_turns(&self, time: Duration) -> Length<f64> {
        self.a.turn_position(time).distance_exact(self.b.straight_position(time))
    }

    /// Separation while `b` turns and `a` holds its initial heading.
    #[must_use]
    pub fn separation_b_turns(&self, time: Duration) -> Length<f64> {
        self.a.straight_position(time).distance_exact(self.b.turn_position(time))
    }

    /// Separation while both aircraft turn at their own bank angles.
    #[must_use]
    pub fn separation_both_turn(&self, time: Duration) -> Length<f64> {
        self.a.turn_position(time).distance_exact(self.b.turn_position(time))
    }

    /// Heading change of `b` at the moment `a` completes `angle_a` in a cooperative turn.
    ///
    /// With equal bank magnitudes this is `angle_a * v_a / v_b`.
    pub fn cooperative_turn_angle(&self, angle_a: Angle) -> Result<Angle, KinematicsError> {
        Ok(self.b.turn_angle_at(self.a.time_to_turn(angle_a)?))
    }

    /// Computes the straight legs after `a` turns by `angle_a` and `b` by `angle_b`.
    ///
    /// An aircraft with a zero angle, or one that completes its turn first,
    /// flies straight until the other turn completes.
    pub fn straight_phase(
        &self,
        angle_a: Angle,
        angle_b: Angle,
    ) -> Result<StraightPhase, KinematicsError> {
        let time_a = turn_time(&self.a, angle_a)?;
        let time_b = turn_time(&self.b, angle_b)?;
        let start = time_a.max(time_b);

        let a = straight_leg(&self.a, angle_a, time_a, start);
        let b = straight_leg(&self.b, angle_b, time_b, start);
        let approach = closest_approach(b.position - a.position, b.velocity - a.velocity);

        Ok(StraightPhase { start, a, b, approach })
    }

    /// Minimum separation along the straight legs after both turns.
    ///
    /// Returns `Ok(None)` if the legs are parallel at equal speed,
    /// where the closest approach is undefined.
    pub fn min_separation_after_turns(
        &self,
        angle_a: Angle,
        angle_b: Angle,
    ) -> Result<Option<Length<f64>>, KinematicsError> {
        Ok(self.straight_phase(angle_a, angle_b)?.approach.map(|approach| approach.distance))
    }
}

fn turn_time(aircraft: &Aircraft, angle: Angle) -> Result<Duration, KinematicsError> {
    if angle.is_zero() { Ok(Duration::ZERO) } else { aircraft.time_to_turn(angle) }
}

fn straight_leg(
    aircraft: &Aircraft,
    angle: Angle,
    turn_time: Duration,
    start: Duration,
) -> StraightLeg {
    let velocity = aircraft.velocity_after(angle);
    let turn_end = if angle.is_zero() {
        aircraft.straight_position(turn_time)
    } else {
        aircraft.turn_position(turn_time)
    };

    StraightLeg { turn_time, position: turn_end + velocity * (start - turn_time), velocity }
}
