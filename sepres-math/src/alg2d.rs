//! Planar arc and closest-approach geometry.

use std::time::Duration;

use bevy_math::DVec2;

use crate::{Angle, Heading, Length, Speed};


/// Relative speeds whose squared magnitude (in m²/s²) is below this
/// are treated as parallel equal-speed motion.
pub const RELATIVE_SPEED_SQ_EPSILON: f64 = 1e-6;

/// Displacement after sweeping `swept` along a circle of `radius`,
/// starting tangent to `heading`.
///
/// Positive `swept` turns clockwise (right), negative turns counter-clockwise (left).
#[must_use]
pub fn arc_displacement(heading: Heading, radius: Length<f64>, swept: Angle) -> Length<DVec2> {
    let start = heading.radians();
    let end = start + swept;
    let signed_radius = radius * swept.signum();

    Length::vec2_from_meters(DVec2 {
        x: signed_radius.0 * (start.cos() - end.cos()),
        y: signed_radius.0 * (end.sin() - start.sin()),
    })
}

/// The closest point of approach of two objects in uniform straight motion.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ClosestApproach {
    /// Seconds from the reference instant to the closest approach.
    /// Negative if the approach lies in the past.
    pub time_secs: f64,
    /// Separation at the closest approach.
    pub distance:  Length<f64>,
}

impl ClosestApproach {
    /// Time until the closest approach, or `None` if it already passed.
    #[must_use]
    pub fn time_ahead(&self) -> Option<Duration> {
        if self.time_secs >= 0. { Duration::try_from_secs_f64(self.time_secs).ok() } else { None }
    }
}

/// Solves the closest approach of an object at `rel_position` moving with `rel_velocity`
/// relative to an observer.
///
/// Returns `None` if the relative velocity is too small to define a unique approach time.
#[must_use]
pub fn closest_approach(
    rel_position: Length<DVec2>,
    rel_velocity: Speed<DVec2>,
) -> Option<ClosestApproach> {
    let speed_sq = rel_velocity.0.length_squared();
    if speed_sq.is_nan() || speed_sq < RELATIVE_SPEED_SQ_EPSILON {
        return None;
    }

    let time_secs = -rel_position.0.dot(rel_velocity.0) / speed_sq;
    let at_approach = rel_position + Length::vec2_from_meters(rel_velocity.0 * time_secs);
    Some(ClosestApproach { time_secs, distance: at_approach.magnitude_exact() })
}
