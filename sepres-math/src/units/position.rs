use std::{fmt, ops};

use bevy_math::DVec2;

use super::Length;

/// An absolute position in the local conflict plane.
///
/// The difference of two positions is a [`Length`] displacement.
#[derive(Clone, Copy, PartialEq, serde::Serialize)]
pub struct Position<T>(pub Length<T>);

impl<'de, T: serde::Deserialize<'de> + super::IsFinite> serde::Deserialize<'de> for Position<T> {
    fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        <Length<T> as serde::Deserialize<'de>>::deserialize(d).map(Self)
    }
}

impl<T> Position<T> {
    pub const fn new(value: T) -> Self { Position(Length::new(value)) }

    pub fn get(self) -> T { self.0.0 }
}

impl Position<DVec2> {
    pub const ORIGIN: Self = Self(Length::new(DVec2::ZERO));

    #[must_use]
    pub fn from_origin_nm(x: f64, y: f64) -> Self { Position(Length::vec2_from_nm(DVec2 { x, y })) }

    #[must_use]
    pub fn distance_exact(self, other: Self) -> Length<f64> { (self - other).magnitude_exact() }
}

impl fmt::Debug for Position<DVec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position").field("x", &self.0.0.x).field("y", &self.0.0.y).finish()
    }
}

impl<T: ops::AddAssign> ops::Add<Length<T>> for Position<T> {
    type Output = Self;

    fn add(mut self, rhs: Length<T>) -> Self::Output {
        self.0 += rhs;
        self
    }
}

impl<T: ops::AddAssign> ops::AddAssign<Length<T>> for Position<T> {
    fn add_assign(&mut self, rhs: Length<T>) { self.0 += rhs; }
}

impl<T: ops::SubAssign> ops::Sub<Length<T>> for Position<T> {
    type Output = Self;

    fn sub(mut self, rhs: Length<T>) -> Self::Output {
        self.0 -= rhs;
        self
    }
}

impl<T: ops::Sub<Output = T>> ops::Sub for Position<T> {
    type Output = Length<T>;

    fn sub(self, rhs: Self) -> Length<T> { self.0 - rhs.0 }
}
