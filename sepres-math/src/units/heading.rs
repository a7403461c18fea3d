use std::f64::consts::{FRAC_PI_2, PI};
use std::{fmt, ops};

use bevy_math::DVec2;

use super::{Angle, AngularSpeed};


/// An absolute directional bearing.
///
/// Zero points towards +y and positive angles rotate clockwise towards +x.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Heading(
    Angle, // always -PI < heading <= PI
);

impl Heading {
    /// Heading north.
    pub const NORTH: Self = Self(Angle::new(0.));
    /// Heading east.
    pub const EAST: Self = Self(Angle::new(FRAC_PI_2));
    /// Heading south.
    pub const SOUTH: Self = Self(Angle::new(PI));
    /// Heading west.
    pub const WEST: Self = Self(Angle::new(-FRAC_PI_2));

    /// Returns the heading of the vector.
    ///
    /// Returns a NaN heading if and only if the argument contains NaN components.
    /// The zero vector is treated as northward.
    #[must_use]
    pub fn from_dvec2(vec: DVec2) -> Self { Self(Angle::new(vec.x.atan2(vec.y))) }

    /// Converts the heading into a unit direction vector.
    #[must_use]
    pub fn into_dvec2(self) -> DVec2 {
        let (x, y) = self.0.0.sin_cos();
        DVec2 { x, y }
    }

    /// Creates a heading from an absolute bearing.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self { Self::from_radians(Angle::from_degrees(degrees)) }

    /// Returns the heading in degrees in the range 0..360.
    #[must_use]
    pub fn degrees(self) -> f64 {
        let degrees = self.0.into_degrees();
        if degrees < 0. { degrees + 360. } else { degrees }
    }

    /// Creates a heading from an absolute bearing in radians.
    #[must_use]
    pub fn from_radians(radians: Angle) -> Self { Self::NORTH + radians }

    /// Returns the heading in radians in the range `-STRAIGHT < value <= STRAIGHT`.
    #[must_use]
    pub fn radians(self) -> Angle { self.0 }

    /// Returns the opposite direction of this heading.
    #[must_use]
    pub fn opposite(self) -> Self { self + Angle::STRAIGHT }
}

impl fmt::Debug for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heading")
            .field("radians", &self.radians().0)
            .field("degrees", &self.degrees())
            .finish()
    }
}

/// Returns the shortest bearing change such that
/// adding the return value to `other` approximately yields `self`.
impl ops::Sub for Heading {
    type Output = Angle;
    fn sub(self, other: Self) -> Angle {
        if (self.0 - other.0).abs() <= Angle::STRAIGHT {
            self.0 - other.0
        } else if self.0 > other.0 {
            self.0 - (other.0 + Angle::FULL)
        } else {
            self.0 + Angle::FULL - other.0
        }
    }
}

impl ops::Add<Angle> for Heading {
    type Output = Self;
    /// Offsets `self` by `angle` clockwise.
    fn add(mut self, angle: Angle) -> Self {
        self.0 += angle;
        self.0 %= Angle::FULL;
        if self.0 > Angle::STRAIGHT {
            self.0 -= Angle::FULL;
        } else if self.0 <= -Angle::STRAIGHT {
            self.0 += Angle::FULL;
        }
        self
    }
}

impl ops::AddAssign<Angle> for Heading {
    /// Offsets `self` by `angle` clockwise.
    fn add_assign(&mut self, angle: Angle) { *self = *self + angle; }
}

impl ops::Sub<Angle> for Heading {
    type Output = Self;
    /// Offsets `self` by `angle` counter-clockwise.
    fn sub(self, angle: Angle) -> Self { self + (-angle) }
}

/// The direction of a turn.
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
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    /// A left, counter-clockwise turn with a negative turn angle.
    #[strum(serialize = "left")]
    CounterClockwise,
    /// A right, clockwise turn with a positive turn angle.
    #[strum(serialize = "right")]
    Clockwise,
}

impl TurnDirection {
    /// Returns the direction a signed turn angle turns towards.
    ///
    /// Returns `None` for a zero or NaN angle.
    #[must_use]
    pub fn from_angle(angle: Angle) -> Option<Self> {
        if angle.is_positive() {
            Some(Self::Clockwise)
        } else if angle.is_negative() {
            Some(Self::CounterClockwise)
        } else {
            None
        }
    }

    /// Returns `1.0` for a clockwise turn and `-1.0` for a counter-clockwise turn.
    #[must_use]
    pub fn signum(self) -> f64 {
        match self {
            Self::CounterClockwise => -1.,
            Self::Clockwise => 1.,
        }
    }
}

impl ops::Neg for TurnDirection {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            TurnDirection::CounterClockwise => TurnDirection::Clockwise,
            TurnDirection::Clockwise => TurnDirection::CounterClockwise,
        }
    }
}

macro_rules! impl_angle_mul_dir {
    ($ty:ty) => {
        impl ops::Mul<TurnDirection> for $ty {
            type Output = Self;

            fn mul(mut self, dir: TurnDirection) -> Self {
                if dir == TurnDirection::CounterClockwise {
                    self.0 = -self.0;
                }
                self
            }
        }
    };
}

impl_angle_mul_dir!(Angle);
impl_angle_mul_dir!(AngularSpeed);
