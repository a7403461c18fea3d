//! Constant-bank turn geometry of a single aircraft.

use std::time::Duration;

use bevy_math::DVec2;
use math::{
    Accel, Angle, AngularSpeed, DEFAULT_GRAVITY, Heading, Length, Position, Speed,
    arc_displacement, turn_radius, turn_rate,
};


/// Where an aircraft starts in the shared conflict frame.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub enum Placement {
    /// At the origin, heading along +y.
    Reference,
    /// At an arbitrary position and heading relative to the reference aircraft.
    Offset { position: Position<DVec2>, heading: Heading },
}

impl Placement {
    #[must_use]
    pub fn position(self) -> Position<DVec2> {
        match self {
            Self::Reference => Position::ORIGIN,
            Self::Offset { position, .. } => position,
        }
    }

    #[must_use]
    pub fn heading(self) -> Heading {
        match self {
            Self::Reference => Heading::NORTH,
            Self::Offset { heading, .. } => heading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TurnState {
    Straight,
    Banked { bank: Angle, radius: Length<f64>, rate: AngularSpeed },
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum KinematicsError {
    #[error("aircraft is not banked and cannot resolve a turn angle")]
    StraightFlight,
    #[error("turn angle {angle:?} is against the bank angle {bank:?}")]
    AgainstBank { angle: Angle, bank: Angle },
}

/// One aircraft of a conflict pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Aircraft {
    airspeed:  Speed<f64>,
    placement: Placement,
    gravity:   Accel<f64>,
    turn:      TurnState,
}

impl Aircraft {
    /// Creates a straight-flying aircraft.
    #[must_use]
    pub fn new(airspeed: Speed<f64>, placement: Placement) -> Self {
        Self { airspeed, placement, gravity: DEFAULT_GRAVITY, turn: TurnState::Straight }
    }

    #[must_use]
    pub fn with_gravity(mut self, gravity: Accel<f64>) -> Self {
        self.gravity = gravity;
        let bank = self.bank_angle();
        self.set_bank_angle(bank);
        self
    }

    #[must_use]
    pub fn with_bank_angle(mut self, bank: Angle) -> Self {
        self.set_bank_angle(bank);
        self
    }

    /// Sets the bank angle, recomputing the turn radius and rate.
    ///
    /// A positive angle banks right (clockwise), a negative one left, zero flies straight.
    pub fn set_bank_angle(&mut self, bank: Angle) {
        self.turn = match turn_radius(self.airspeed, bank, self.gravity) {
            None => TurnState::Straight,
            Some(radius) => TurnState::Banked {
                bank,
                radius,
                rate: turn_rate(self.airspeed, bank, self.gravity),
            },
        };
    }

    #[must_use]
    pub fn airspeed(&self) -> Speed<f64> { self.airspeed }

    #[must_use]
    pub fn placement(&self) -> Placement { self.placement }

    #[must_use]
    pub fn gravity(&self) -> Accel<f64> { self.gravity }

    #[must_use]
    pub fn bank_angle(&self) -> Angle {
        match self.turn {
            TurnState::Straight => Angle::ZERO,
            TurnState::Banked { bank, .. } => bank,
        }
    }

    /// Returns `None` when flying straight, where the radius is infinite.
    #[must_use]
    pub fn turn_radius(&self) -> Option<Length<f64>> {
        match self.turn {
            TurnState::Straight => None,
            TurnState::Banked { radius, .. } => Some(radius),
        }
    }

    #[must_use]
    pub fn turn_rate(&self) -> AngularSpeed {
        match self.turn {
            TurnState::Straight => AngularSpeed::ZERO,
            TurnState::Banked { rate, .. } => rate,
        }
    }

    /// Heading change after turning for `time`, signed like the bank angle.
    #[must_use]
    pub fn turn_angle_at(&self, time: Duration) -> Angle { self.turn_rate() * time }

    /// Time needed to change heading by `angle`.
    ///
    /// # Errors
    /// - [`KinematicsError::StraightFlight`] if the aircraft is not banked.
    /// - [`KinematicsError::AgainstBank`] if `angle` turns away from the bank direction.
    pub fn time_to_turn(&self, angle: Angle) -> Result<Duration, KinematicsError> {
        let TurnState::Banked { bank, rate, .. } = self.turn else {
            return Err(KinematicsError::StraightFlight);
        };

        if angle.is_zero() {
            return Ok(Duration::ZERO);
        }

        angle.try_div(rate).ok_or(KinematicsError::AgainstBank { angle, bank })
    }

    /// Position after flying straight on the initial heading for `time`.
    #[must_use]
    pub fn straight_position(&self, time: Duration) -> Position<DVec2> {
        self.placement.position() + self.airspeed.with_heading(self.placement.heading()) * time
    }

    /// Position after turning for `time` at the current bank angle.
    ///
    /// A straight-flying aircraft keeps its initial heading.
    #[must_use]
    pub fn turn_position(&self, time: Duration) -> Position<DVec2> {
        let TurnState::Banked { radius, .. } = self.turn else {
            return self.straight_position(time);
        };

        let swept = self.turn_angle_at(time);
        self.placement.position() + arc_displacement(self.placement.heading(), radius, swept)
    }

    #[must_use]
    pub fn heading_after(&self, angle: Angle) -> Heading { self.placement.heading() + angle }

    /// Velocity after completing a heading change of `angle`.
    #[must_use]
    pub fn velocity_after(&self, angle: Angle) -> Speed<DVec2> {
        self.airspeed.with_heading(self.heading_after(angle))
    }
}
