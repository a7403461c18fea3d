use std::time::Duration;

use bevy_math::DVec2;
use math::{Angle, Heading, Length, Position, Speed, TurnDirection};

use super::{Maneuver, SeparationCurve, SweepConfig, refine_crossing, sample_at, sample_half};
use crate::Error;
use crate::kinematics::{Aircraft, KinematicsError, Placement};
use crate::separation::{DEFAULT_REQUIRED_SEPARATION, ManeuverPair};

fn erz_case2(bank_a: f64, bank_b: f64) -> ManeuverPair {
    ManeuverPair::new(
        Aircraft::new(Speed::from_meters_per_sec(205.6), Placement::Reference)
            .with_bank_angle(Angle::from_degrees(bank_a)),
        Aircraft::new(
            Speed::from_meters_per_sec(246.72),
            Placement::Offset {
                position: Position::from_origin_nm(4., 5.83),
                heading:  Heading::from_degrees(270.),
            },
        )
        .with_bank_angle(Angle::from_degrees(bank_b)),
    )
}

/// Head-on encounter far enough ahead that small heading changes already resolve it.
fn distant_head_on(bank_a: f64) -> ManeuverPair {
    ManeuverPair::new(
        Aircraft::new(Speed::from_meters_per_sec(200.), Placement::Reference)
            .with_bank_angle(Angle::from_degrees(bank_a)),
        Aircraft::new(
            Speed::from_meters_per_sec(200.),
            Placement::Offset {
                position: Position::new(DVec2::new(0., 100_000.)),
                heading:  Heading::SOUTH,
            },
        ),
    )
}

#[test]
fn half_sweep_covers_half_open_range() {
    for direction in [TurnDirection::Clockwise, TurnDirection::CounterClockwise] {
        let pair = erz_case2(15. * direction.signum(), 0.);
        let half = sample_half(&pair, Maneuver::ATurns, direction, &SweepConfig::default())
            .expect("a is banked");
        assert_eq!(half.samples.len(), 75);
        assert!(half.samples[0].angle.is_zero());
        assert_eq!(half.samples[0].turn_time, Duration::ZERO);
        let last = half.samples[74].angle.into_degrees();
        assert!((last - 148. * direction.signum()).abs() < 1e-9, "{last}");
    }
}

#[test]
fn sweep_against_bank_fails_up_front() {
    let pair = erz_case2(15., 0.);
    let result =
        sample_half(&pair, Maneuver::ATurns, TurnDirection::CounterClockwise, &SweepConfig::default());
    assert!(matches!(result, Err(Error::Kinematics(KinematicsError::AgainstBank { .. }))));

    let pair = erz_case2(0., -15.);
    assert!(
        sample_half(&pair, Maneuver::BTurns, TurnDirection::Clockwise, &SweepConfig::default())
            .is_err()
    );
    assert!(
        sample_half(&pair, Maneuver::BTurns, TurnDirection::CounterClockwise, &SweepConfig::default())
            .is_ok()
    );
}

#[test]
fn merge_rule_holds_past_turn_minimum() {
    for (maneuver, bank_a, bank_b) in [
        (Maneuver::ATurns, 15., 0.),
        (Maneuver::BTurns, 0., 15.),
        (Maneuver::BothTurn, 30., 30.),
    ] {
        let pair = erz_case2(bank_a, bank_b);
        let half = sample_half(&pair, maneuver, TurnDirection::Clockwise, &SweepConfig::default())
            .expect("maneuvering aircraft is banked");

        let minimum = half.turn_minimum_sample().expect("sweep is not empty").turn_separation;
        for (index, sample) in half.samples.iter().enumerate() {
            assert!(sample.turn_separation >= minimum, "{maneuver}: {sample:?}");
            assert!(!sample.turn_separation.is_negative());
            assert!(!sample.straight_separation.is_negative());
            assert!(sample.resolution_time >= sample.turn_time);
            if index >= half.turn_minimum {
                assert_eq!(sample.straight_separation, sample.turn_separation, "{maneuver}");
            }
        }
    }
}

#[test]
fn merged_curve_is_ordered_by_signed_angle() {
    let sweep = SweepConfig::default();
    let left = sample_half(
        &erz_case2(-15., 0.),
        Maneuver::ATurns,
        TurnDirection::CounterClockwise,
        &sweep,
    )
    .expect("a is banked left");
    let right = sample_half(&erz_case2(15., 0.), Maneuver::ATurns, TurnDirection::Clockwise, &sweep)
        .expect("a is banked right");

    let curve = SeparationCurve::merge(&left, &right);
    assert_eq!(curve.samples.len(), 149);
    assert!((curve.samples[0].angle.into_degrees() + 148.).abs() < 1e-9);
    assert!(curve.samples[74].angle.is_zero());
    assert!((curve.samples[148].angle.into_degrees() - 148.).abs() < 1e-9);
    assert!(curve.samples.windows(2).all(|window| window[0].angle < window[1].angle));
}

#[test]
fn degenerate_approach_falls_back_to_turn_phase() {
    let pair = ManeuverPair::new(
        Aircraft::new(Speed::from_meters_per_sec(200.), Placement::Reference)
            .with_bank_angle(Angle::from_degrees(15.)),
        Aircraft::new(
            Speed::from_meters_per_sec(200.),
            Placement::Offset {
                position: Position::new(DVec2::new(5000., 0.)),
                heading:  Heading::NORTH,
            },
        ),
    );

    let sample = sample_at(&pair, Maneuver::ATurns, Angle::ZERO).expect("zero angle");
    assert_eq!(sample.straight_separation, sample.turn_separation);
    assert_eq!(sample.resolution_time, Duration::ZERO);
    sample
        .turn_separation
        .assert_approx(Length::from_meters(5000.), Length::from_meters(1e-6))
        .unwrap();
}

#[test]
fn refine_crossing_meets_required_separation() {
    let pair = distant_head_on(15.);
    let half =
        sample_half(&pair, Maneuver::ATurns, TurnDirection::Clockwise, &SweepConfig::default())
            .expect("a is banked");

    let upper_index = half
        .samples
        .iter()
        .position(|sample| sample.straight_separation > DEFAULT_REQUIRED_SEPARATION)
        .expect("a distant head-on conflict resolves with a small turn");
    assert!(upper_index > 0 && upper_index < half.turn_minimum);

    let lower = &half.samples[upper_index - 1];
    let upper = &half.samples[upper_index];
    let refined =
        refine_crossing(&pair, Maneuver::ATurns, lower, upper, DEFAULT_REQUIRED_SEPARATION)
            .expect("a is banked")
            .expect("samples bracket the required separation");

    assert!(refined.angle > lower.angle && refined.angle <= upper.angle);
    refined
        .straight_separation
        .assert_approx(DEFAULT_REQUIRED_SEPARATION, Length::from_meters(1.))
        .unwrap();
}

#[test]
fn refine_crossing_needs_bracket() {
    let pair = distant_head_on(15.);
    let first = sample_at(&pair, Maneuver::ATurns, Angle::from_degrees(2.)).expect("banked");
    let second = sample_at(&pair, Maneuver::ATurns, Angle::from_degrees(4.)).expect("banked");
    assert_eq!(
        refine_crossing(&pair, Maneuver::ATurns, &first, &second, Length::from_meters(1e9))
            .expect("banked"),
        None
    );
}
