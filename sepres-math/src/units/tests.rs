use std::time::Duration;

use bevy_math::DVec2;

use crate::{
    Angle, AngularSpeed, Heading, Length, LengthUnit, Position, Speed, SpeedUnit, UnitEnum,
};

fn assert_near(actual: f64, expect: f64, message: &str) {
    assert!((actual - expect).abs() < 1e-6, "{actual} != {expect}: {message}");
}

#[test]
fn length_conversions() {
    assert_near(Length::from_nm(5.).into_meters(), 9260., "5 nm is 9260 m");
    assert_near(Length::from_meters(1852.).into_nm(), 1., "1852 m is 1 nm");
    assert_near(Length::from_km(1.852).into_nm(), 1., "1.852 km is 1 nm");
    assert_near(Length::from_feet(6076.12).into_nm(), 1., "6076.12 ft is 1 nm");
}

#[test]
fn speed_conversions() {
    assert_near(Speed::from_knots(1.).into_meters_per_sec(), 1852. / 3600., "1 kt");
    assert_near(Speed::from_meters_per_sec(10.).into_kmh(), 36., "10 m/s is 36 km/h");
    assert_near(Speed::from_knots(480.).into_knots(), 480., "knots round trip");
}

#[test]
fn speed_times_duration() {
    let distance = Speed::from_meters_per_sec(200.) * Duration::from_secs(30);
    assert_near(distance.into_meters(), 6000., "200 m/s for 30 s");
}

#[test]
fn try_div_rejects_negative() {
    let rate = AngularSpeed::from_radians_per_sec(0.1);
    assert_eq!(Angle::from_radians(1.).try_div(rate).map(|time| time.as_secs()), Some(10));
    assert_eq!(Angle::from_radians(-1.).try_div(rate), None);
    assert_eq!(Angle::from_radians(1.).try_div(AngularSpeed::ZERO), None);
}

#[test]
fn with_heading_projects() {
    let velocity = Speed::from_meters_per_sec(100.).with_heading(Heading::EAST);
    assert!((velocity.0 - DVec2::new(100., 0.)).length() < 1e-9, "{velocity:?}");
}

#[test]
fn position_difference() {
    let a = Position::from_origin_nm(4., 5.83);
    let b = Position::<DVec2>::ORIGIN;
    assert_near(a.distance_exact(b).into_nm(), (16f64 + 5.83 * 5.83).sqrt(), "hypotenuse");
    assert_near((a - b).x().into_nm(), 4., "x component");
}

#[test]
fn assert_approx_reports() {
    let error = Length::from_meters(100.)
        .assert_approx(Length::from_meters(101.), Length::from_meters(0.5))
        .expect_err("outside tolerance");
    assert_near(error.actual.into_meters(), 100., "actual value is kept");
    assert!(
        Length::from_meters(100.)
            .assert_approx(Length::from_meters(100.2), Length::from_meters(0.5))
            .is_ok()
    );
}

#[test]
fn deserialize_rejects_non_finite() {
    assert!(serde_json::from_str::<Length<f64>>("1e400").is_err());
    let length: Length<f64> = serde_json::from_str("9260.0").expect("finite");
    assert_near(length.into_nm(), 5., "raw value is meters");
}

#[test]
fn display_units() {
    assert_eq!("nm".parse::<LengthUnit>().ok(), Some(LengthUnit::NauticalMiles));
    assert_eq!("feet".parse::<LengthUnit>().ok(), Some(LengthUnit::Feet));
    assert_eq!(LengthUnit::Kilometers.to_string(), "km");
    assert_near(
        LengthUnit::NauticalMiles.quantity_to_float()(Length::from_meters(9260.)),
        5.,
        "display in nm",
    );
    assert_near(
        SpeedUnit::Knots.quantity_to_float()(SpeedUnit::Knots.float_to_quantity()(400.)),
        400.,
        "speed unit round trip",
    );
}
