//! Coordinated turn physics.

use crate::{Accel, Angle, AngularSpeed, Length, Speed};


/// Gravitational acceleration assumed by the turn equations.
pub const DEFAULT_GRAVITY: Accel<f64> = Accel::from_meters_per_sec2(9.81);

/// Heading change rate of a coordinated turn, `g * tan(bank) / v`.
///
/// The result has the same sign as `bank`.
#[must_use]
pub fn turn_rate(airspeed: Speed<f64>, bank: Angle, gravity: Accel<f64>) -> AngularSpeed {
    AngularSpeed::from_radians_per_sec(
        gravity.into_meters_per_sec2() * bank.acute_signed_tan() / airspeed.into_meters_per_sec(),
    )
}

/// Radius of a coordinated turn, `|v^2 / (g * tan(bank))|`.
///
/// Returns `None` for a zero bank angle, where the radius is infinite.
#[must_use]
pub fn turn_radius(airspeed: Speed<f64>, bank: Angle, gravity: Accel<f64>) -> Option<Length<f64>> {
    if bank.is_zero() {
        return None;
    }

    Some(airspeed.arc_to_radius(turn_rate(airspeed, bank, gravity)))
}
