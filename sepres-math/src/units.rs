use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::marker::PhantomData;
use std::time::Duration;
use std::{cmp, fmt, iter, ops};

use bevy_math::DVec2;
use ordered_float::OrderedFloat;

mod display;
pub use display::{LengthUnit, SpeedUnit, UnitEnum};
mod heading;
pub use heading::{Heading, TurnDirection};
mod position;
pub use position::Position;

#[cfg(test)]
mod tests;

/// Converts nautical miles to meters.
pub const METERS_PER_NM: f64 = 1852.;
/// Converts nautical miles to feet.
pub const FEET_PER_NM: f64 = 6076.12;
/// Converts nautical miles to statute miles.
pub const MILES_PER_NM: f64 = 1.15078;
/// Converts minutes to seconds.
pub const SECONDS_PER_MINUTE: f64 = 60.;
/// Converts hours to seconds.
pub const SECONDS_PER_HOUR: f64 = 3600.;

pub struct Quantity<T, Base, Dt, Pow>(pub T, pub PhantomData<(Base, Dt, Pow)>);

impl<T, Base, Dt, Pow> Quantity<T, Base, Dt, Pow> {
    pub const fn new(value: T) -> Self { Self(value, PhantomData) }
}

pub trait QuantityTrait: Sized {
    /// The type of the raw value of this unit.
    type Raw;
    /// Returns a unit with the same dimensional characteristics but with a different raw value type.
    type WithRaw<U>;

    fn into_raw(self) -> Self::Raw;
    fn from_raw(value: Self::Raw) -> Self;
}

impl<T, Base, Dt, Pow> QuantityTrait for Quantity<T, Base, Dt, Pow> {
    type Raw = T;
    type WithRaw<U> = Quantity<U, Base, Dt, Pow>;

    fn into_raw(self) -> T { self.0 }

    fn from_raw(value: T) -> Self { Self(value, PhantomData) }
}

impl<T, Base, Dt, Pow> Default for Quantity<T, Base, Dt, Pow>
where
    T: Default,
{
    fn default() -> Self { Self(T::default(), PhantomData) }
}

impl<T, Base, Dt, Pow> Clone for Quantity<T, Base, Dt, Pow>
where
    T: Clone,
{
    fn clone(&self) -> Self { Self(self.0.clone(), PhantomData) }
}

impl<T, Base, Dt, Pow> Copy for Quantity<T, Base, Dt, Pow> where T: Copy {}

impl<T, Base, Dt, Pow> PartialEq for Quantity<T, Base, Dt, Pow>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool { self.0 == other.0 }
}

impl<T, Base, Dt, Pow> PartialOrd for Quantity<T, Base, Dt, Pow>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<cmp::Ordering> { self.0.partial_cmp(&other.0) }
}

impl<T, Base, Dt, Pow> ops::Add for Quantity<T, Base, Dt, Pow>
where
    T: ops::Add<Output = T>,
{
    type Output = Self;

    fn add(self, other: Self) -> Self { Self(self.0 + other.0, PhantomData) }
}

impl<T, Base, Dt, Pow> ops::AddAssign for Quantity<T, Base, Dt, Pow>
where
    T: ops::AddAssign,
{
    fn add_assign(&mut self, other: Self) { self.0 += other.0; }
}

impl<T, Base, Dt, Pow> ops::Sub for Quantity<T, Base, Dt, Pow>
where
    T: ops::Sub<Output = T>,
{
    type Output = Self;

    fn sub(self, other: Self) -> Self { Self(self.0 - other.0, PhantomData) }
}

impl<T, Base, Dt, Pow> ops::SubAssign for Quantity<T, Base, Dt, Pow>
where
    T: ops::SubAssign,
{
    fn sub_assign(&mut self, other: Self) { self.0 -= other.0; }
}

impl<T, Base, Dt, Pow> ops::Mul<f64> for Quantity<T, Base, Dt, Pow>
where
    T: ops::Mul<f64, Output = T>,
{
    type Output = Self;

    fn mul(self, other: f64) -> Self { Self(self.0 * other, PhantomData) }
}

impl<T, Base, Dt, Pow> ops::Div<f64> for Quantity<T, Base, Dt, Pow>
where
    T: ops::Div<f64, Output = T>,
{
    type Output = Self;

    fn div(self, other: f64) -> Self { Self(self.0 / other, PhantomData) }
}

impl<T, Base, Dt, Pow> ops::Div for Quantity<T, Base, Dt, Pow>
where
    T: ops::Div,
{
    type Output = T::Output;

    fn div(self, other: Self) -> Self::Output { self.0 / other.0 }
}

impl<T, Base, Dt, Pow> ops::Rem for Quantity<T, Base, Dt, Pow>
where
    T: ops::Rem<Output = T>,
{
    type Output = Self;

    fn rem(self, other: Self) -> Self { Self(self.0 % other.0, PhantomData) }
}

impl<T, Base, Dt, Pow> ops::RemAssign for Quantity<T, Base, Dt, Pow>
where
    T: ops::RemAssign,
{
    fn rem_assign(&mut self, other: Self) { self.0 %= other.0; }
}

impl<T, Base, Dt, Pow> ops::Neg for Quantity<T, Base, Dt, Pow>
where
    T: ops::Neg<Output = T>,
{
    type Output = Self;

    fn neg(self) -> Self { Self(-self.0, PhantomData) }
}

impl<T: Default + ops::Add<Output = T>, Base, Dt, Pow> iter::Sum for Quantity<T, Base, Dt, Pow> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), |sum, value| sum + value)
    }
}

impl<T, Base, Dt, Pow> From<T> for Quantity<T, Base, Dt, Pow> {
    fn from(value: T) -> Self { Self(value, PhantomData) }
}

/// Used as `Dt` in `Quantity` to indicate that the unit is not a rate of change.
pub struct DtZero;
/// Used as `Dt` in `Quantity` to indicate that the unit is the rate of change of `Quantity<Dt=Dt>`.
pub struct Ddt<Dt>(Dt);

pub type DtOne = Ddt<DtZero>;
pub type DtTwo = Ddt<DtOne>;

/// Used as `Pow` in `Quantity` to indicate that the unit is dimensionless.
pub struct PowZero;

pub struct PowPlusOne<Pow>(Pow);

pub type PowOne = PowPlusOne<PowZero>;

/// Rate times duration integrates the rate away.
impl<T, Base, Dt, Pow> ops::Mul<Duration> for Quantity<T, Base, Ddt<Dt>, Pow>
where
    T: ops::Mul<f64, Output = T>,
{
    type Output = Quantity<T, Base, Dt, Pow>;

    fn mul(self, other: Duration) -> Self::Output {
        Quantity(self.0 * other.as_secs_f64(), PhantomData)
    }
}

impl<T, Base, Dt, Pow> ops::Div<Duration> for Quantity<T, Base, Dt, Pow>
where
    T: ops::Div<f64, Output = T>,
{
    type Output = Quantity<T, Base, Ddt<Dt>, Pow>;

    fn div(self, other: Duration) -> Self::Output {
        Quantity(self.0 / other.as_secs_f64(), PhantomData)
    }
}

/// (B / T^n) / (B / T^(n+1)) = T
impl<Base, Dt, Pow> Quantity<f64, Base, Dt, Pow> {
    /// Returns `None` if the quotient is negative or not finite.
    #[must_use]
    pub fn try_div(self, rhs: Quantity<f64, Base, Ddt<Dt>, Pow>) -> Option<Duration> {
        Duration::try_from_secs_f64(self.0 / rhs.0).ok()
    }
}

impl<Base, Dt, Pow> Quantity<f64, Base, Dt, Pow> {
    pub const ZERO: Self = Self(0., PhantomData);

    #[must_use]
    pub fn is_positive(self) -> bool { self.0 > 0. }

    #[must_use]
    pub fn is_negative(self) -> bool { self.0 < 0. }

    #[must_use]
    pub fn is_zero(self) -> bool { self.0 == 0. }

    #[must_use]
    pub fn is_finite(self) -> bool { self.0.is_finite() }

    #[must_use]
    pub fn abs(self) -> Self { Self(self.0.abs(), PhantomData) }

    #[must_use]
    pub fn signum(self) -> f64 { self.0.signum() }

    #[must_use]
    pub fn min(self, other: Self) -> Self { Self(self.0.min(other.0), PhantomData) }

    #[must_use]
    pub fn max(self, other: Self) -> Self { Self(self.0.max(other.0), PhantomData) }

    #[must_use]
    pub fn clamp(self, min: Self, max: Self) -> Self {
        Self(self.0.clamp(min.0, max.0), PhantomData)
    }

    /// Returns a totally ordered key, for use with `min_by_key` and friends.
    #[must_use]
    pub fn as_ordered(self) -> OrderedFloat<f64> { OrderedFloat(self.0) }

    #[must_use]
    pub fn with_heading(self, heading: Heading) -> Quantity<DVec2, Base, Dt, Pow> {
        Quantity(heading.into_dvec2() * self.0, PhantomData)
    }
}

impl<Base, Dt, Pow> Quantity<DVec2, Base, Dt, Pow> {
    pub const ZERO: Self = Self(DVec2::ZERO, PhantomData);
}

impl<Dt, Pow> Quantity<DVec2, LengthBase, Dt, Pow> {
    #[must_use]
    pub fn x(self) -> Quantity<f64, LengthBase, Dt, Pow> { Quantity(self.0.x, PhantomData) }

    #[must_use]
    pub fn y(self) -> Quantity<f64, LengthBase, Dt, Pow> { Quantity(self.0.y, PhantomData) }

    #[must_use]
    pub fn magnitude_exact(self) -> Quantity<f64, LengthBase, Dt, Pow> {
        Quantity(self.0.length(), PhantomData)
    }

    /// Returns the bearing of this vector.
    #[must_use]
    pub fn heading(self) -> Heading { Heading::from_dvec2(self.0) }

    #[must_use]
    pub fn is_finite(self) -> bool { self.0.is_finite() }
}

impl<Dt, Pow> From<(Quantity<f64, LengthBase, Dt, Pow>, Quantity<f64, LengthBase, Dt, Pow>)>
    for Quantity<DVec2, LengthBase, Dt, Pow>
{
    fn from(
        (x, y): (Quantity<f64, LengthBase, Dt, Pow>, Quantity<f64, LengthBase, Dt, Pow>),
    ) -> Self {
        Self(DVec2 { x: x.0, y: y.0 }, PhantomData)
    }
}

impl<Dt> Quantity<f64, LengthBase, Dt, PowOne> {
    /// Computes the radius of a circle given an arc length (the receiver) and an angular quantity
    /// (the parameter).
    ///
    /// The receiver and parameter must have the same temporal dimension.
    /// The result is always non-negative; it is infinite if `angular` is zero.
    #[must_use]
    pub fn arc_to_radius(self, angular: Quantity<f64, AngleBase, Dt, PowOne>) -> Length<f64> {
        Length::new((self.0 / angular.0).abs())
    }
}

pub struct LengthBase;

/// A distance quantity. Internal representation is in meters.
pub type Length<T> = Quantity<T, LengthBase, DtZero, PowOne>;

/// A linear speed (rate of [length](Length) change) quantity.
pub type Speed<T> = Quantity<T, LengthBase, DtOne, PowOne>;

/// A linear acceleration (rate of linear [speed](Speed) change) quantity.
pub type Accel<T> = Quantity<T, LengthBase, DtTwo, PowOne>;

pub struct AngleBase;

/// A relative angle. Internal representation is in radians.
pub type Angle = Quantity<f64, AngleBase, DtZero, PowOne>;

/// An angular speed (rate of [angle](Angle) change) quantity.
/// Always in rad/s.
pub type AngularSpeed = Quantity<f64, AngleBase, DtOne, PowOne>;

impl fmt::Debug for Length<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length")
            .field("meters", &self.into_meters())
            .field("nm", &self.into_nm())
            .finish()
    }
}

impl fmt::Debug for Length<DVec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Length")
            .field("x.meters", &self.0.x)
            .field("y.meters", &self.0.y)
            .finish()
    }
}

impl fmt::Debug for Speed<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speed")
            .field("m/s", &self.into_meters_per_sec())
            .field("knots", &self.into_knots())
            .finish()
    }
}

impl fmt::Debug for Speed<DVec2> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Speed").field("x.m/s", &self.0.x).field("y.m/s", &self.0.y).finish()
    }
}

impl fmt::Debug for Accel<f64> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accel").field("m/s2", &self.into_meters_per_sec2()).finish()
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Angle").field("degrees", &self.into_degrees()).finish()
    }
}

impl fmt::Debug for AngularSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AngularSpeed").field("degrees/s", &self.into_degrees_per_sec()).finish()
    }
}

impl Length<f64> {
    #[must_use]
    pub const fn into_meters(self) -> f64 { self.0 }

    #[must_use]
    pub const fn from_meters(meters: f64) -> Self { Self(meters, PhantomData) }

    #[must_use]
    pub const fn into_nm(self) -> f64 { self.0 / METERS_PER_NM }

    #[must_use]
    pub const fn from_nm(nm: f64) -> Self { Self(nm * METERS_PER_NM, PhantomData) }

    #[must_use]
    pub const fn into_feet(self) -> f64 { self.into_nm() * FEET_PER_NM }

    #[must_use]
    pub const fn from_feet(feet: f64) -> Self { Self::from_nm(feet / FEET_PER_NM) }

    #[must_use]
    pub const fn into_miles(self) -> f64 { self.into_nm() * MILES_PER_NM }

    #[must_use]
    pub const fn from_miles(miles: f64) -> Self { Self::from_nm(miles / MILES_PER_NM) }

    #[must_use]
    pub const fn into_km(self) -> f64 { self.0 / 1000. }

    #[must_use]
    pub const fn from_km(km: f64) -> Self { Self(km * 1000., PhantomData) }
}

impl Length<DVec2> {
    #[must_use]
    pub const fn into_meters(self) -> DVec2 { self.0 }

    #[must_use]
    pub const fn vec2_from_meters(meters: DVec2) -> Self { Self(meters, PhantomData) }

    #[must_use]
    pub fn into_nm(self) -> DVec2 { self.0 / METERS_PER_NM }

    #[must_use]
    pub fn vec2_from_nm(nm: DVec2) -> Self { Self(nm * METERS_PER_NM, PhantomData) }
}

impl Speed<f64> {
    #[must_use]
    pub const fn into_meters_per_sec(self) -> f64 { self.0 }

    #[must_use]
    pub const fn from_meters_per_sec(mps: f64) -> Self { Self(mps, PhantomData) }

    #[must_use]
    pub const fn into_knots(self) -> f64 { self.0 * SECONDS_PER_HOUR / METERS_PER_NM }

    #[must_use]
    pub const fn from_knots(knots: f64) -> Self {
        Self(knots * METERS_PER_NM / SECONDS_PER_HOUR, PhantomData)
    }

    #[must_use]
    pub const fn into_kmh(self) -> f64 { self.0 * SECONDS_PER_HOUR / 1000. }

    #[must_use]
    pub const fn from_kmh(kmh: f64) -> Self { Self(kmh * 1000. / SECONDS_PER_HOUR, PhantomData) }
}

impl Accel<f64> {
    #[must_use]
    pub const fn into_meters_per_sec2(self) -> f64 { self.0 }

    #[must_use]
    pub const fn from_meters_per_sec2(mps2: f64) -> Self { Self(mps2, PhantomData) }
}

impl Angle {
    pub const RIGHT: Self = Self(FRAC_PI_2, PhantomData);
    pub const STRAIGHT: Self = Self(PI, PhantomData);
    pub const FULL: Self = Self(TAU, PhantomData);

    #[must_use]
    pub const fn from_radians(radians: f64) -> Self { Self(radians, PhantomData) }

    #[must_use]
    pub const fn into_radians(self) -> f64 { self.0 }

    #[must_use]
    pub const fn from_degrees(degrees: f64) -> Self { Self(degrees.to_radians(), PhantomData) }

    #[must_use]
    pub fn into_degrees(self) -> f64 { self.0.to_degrees() }

    #[must_use]
    pub fn sin(self) -> f64 { self.0.sin() }
    #[must_use]
    pub fn cos(self) -> f64 { self.0.cos() }

    /// Returns the tangent of a bank or elevation angle.
    ///
    /// This function clamps the angle between `-Angle::RIGHT..=Angle::RIGHT`,
    /// and defines the following special cases:
    /// - The tangent of `-Angle::RIGHT` is negative infinity.
    /// - The tangent of `Angle::RIGHT` is positive infinity.
    ///
    /// This function is monotonic, and is strictly monotonic within the clamped closed range.
    #[must_use]
    pub fn acute_signed_tan(self) -> f64 {
        if self <= -Self::RIGHT {
            f64::NEG_INFINITY
        } else if self >= Self::RIGHT {
            f64::INFINITY
        } else {
            self.0.tan()
        }
    }
}

impl AngularSpeed {
    #[must_use]
    pub const fn from_radians_per_sec(radians: f64) -> Self { Self(radians, PhantomData) }

    #[must_use]
    pub const fn into_radians_per_sec(self) -> f64 { self.0 }

    #[must_use]
    pub fn into_degrees_per_sec(self) -> f64 { self.0.to_degrees() }
}

/// Returned by `assert_approx` when two quantities differ by more than the tolerance.
#[derive(Debug, thiserror::Error)]
#[error("expected {expect:?} within {epsilon:?}, got {actual:?}")]
pub struct AssertApproxError<T: fmt::Debug, E: fmt::Debug> {
    pub actual:  T,
    pub expect:  T,
    pub epsilon: E,
}

impl<Base, Dt, Pow> Quantity<f64, Base, Dt, Pow>
where
    Self: fmt::Debug,
{
    /// Asserts that the quantity is within `epsilon` of `other`.
    ///
    /// # Errors
    /// If the absolute difference between `self` and `other` is greater than `epsilon`.
    pub fn assert_approx(self, other: Self, epsilon: Self) -> Result<(), AssertApproxError<Self, Self>> {
        if (self - other).abs() > epsilon || !self.is_finite() {
            Err(AssertApproxError { actual: self, expect: other, epsilon })
        } else {
            Ok(())
        }
    }
}

pub trait IsFinite: Copy {
    fn is_finite(self) -> bool;
}

impl IsFinite for f64 {
    fn is_finite(self) -> bool { f64::is_finite(self) }
}

impl IsFinite for DVec2 {
    fn is_finite(self) -> bool { DVec2::is_finite(self) }
}

impl<T, Base, Dt, Pow> serde::Serialize for Quantity<T, Base, Dt, Pow>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de, T, Base, Dt, Pow> serde::Deserialize<'de> for Quantity<T, Base, Dt, Pow>
where
    T: serde::Deserialize<'de> + IsFinite,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        let value = T::deserialize(deserializer)?;

        if !value.is_finite() {
            return Err(<D::Error as serde::de::Error>::custom("non-finite quantity"));
        }

        Ok(Self(value, PhantomData))
    }
}
