mod units;
pub use units::*;

mod alg2d;
pub use alg2d::*;

mod physics;
pub use physics::*;


/// Returns `0, step, step * 2, ...` while the magnitude stays strictly below `|limit|`.
///
/// Each item is computed by multiplication, so long sweeps do not accumulate rounding error.
/// The direction of the sweep follows the sign of `step`.
/// Yields nothing if `step` is zero or not finite.
pub fn half_open_steps<Base, Dt, Pow>(
    limit: Quantity<f64, Base, Dt, Pow>,
    step: Quantity<f64, Base, Dt, Pow>,
) -> impl Iterator<Item = Quantity<f64, Base, Dt, Pow>> + Clone {
    let valid = step.is_finite() && !step.is_zero();

    (0u32..)
        .take_while(move |_| valid)
        .map(move |index| step * f64::from(index))
        .take_while(move |value| value.abs() < limit.abs())
}
