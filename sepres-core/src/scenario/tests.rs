use bevy_math::DVec2;
use math::{Angle, Heading, Length, Position, Speed, TurnDirection};

use super::{
    Conflict, DirectionReport, ScenarioKind, ScenarioReport, ScenarioSettings, run_all, run_scenario,
};
use crate::classify::ResolutionType;
use crate::kinematics::{Aircraft, Placement};
use crate::separation::DEFAULT_REQUIRED_SEPARATION;

fn erz_conflict(x_nm: f64, y_nm: f64) -> Conflict {
    Conflict {
        reference:           Aircraft::new(Speed::from_meters_per_sec(205.6), Placement::Reference),
        intruder:            Aircraft::new(
            Speed::from_meters_per_sec(246.72),
            Placement::Offset {
                position: Position::from_origin_nm(x_nm, y_nm),
                heading:  Heading::from_degrees(270.),
            },
        ),
        required_separation: DEFAULT_REQUIRED_SEPARATION,
    }
}

fn distant_head_on() -> Conflict {
    Conflict {
        reference:           Aircraft::new(Speed::from_meters_per_sec(200.), Placement::Reference),
        intruder:            Aircraft::new(
            Speed::from_meters_per_sec(200.),
            Placement::Offset {
                position: Position::new(DVec2::new(0., 100_000.)),
                heading:  Heading::SOUTH,
            },
        ),
        required_separation: DEFAULT_REQUIRED_SEPARATION,
    }
}

fn assert_consistent(report: &ScenarioReport, required: Length<f64>) {
    for direction in report.directions() {
        let resolution = &direction.resolution;
        let samples = &direction.curve.samples;
        let turn_minimum = direction.curve.turn_minimum;
        let d_tmin = direction.turn_minimum.turn_separation;

        assert_eq!(resolution.direction, direction.direction);
        assert_eq!(
            resolution.angle,
            samples[resolution.index].angle,
            "{} {}: resolution is taken from its sample",
            report.kind,
            direction.direction,
        );

        match resolution.kind {
            ResolutionType::One => assert!(resolution.achieved_separation > required),
            ResolutionType::OneA => {
                assert_eq!(resolution.achieved_separation, d_tmin);
                assert!(d_tmin > required);
            }
            ResolutionType::TwoA => {
                assert_eq!(resolution.achieved_separation, d_tmin);
                assert!(resolution.index >= turn_minimum);
                assert!(samples[resolution.index].turn_separation > required);
            }
            ResolutionType::TwoB => {
                let best = samples[turn_minimum..]
                    .iter()
                    .map(|sample| sample.turn_separation.as_ordered())
                    .max()
                    .expect("turn minimum is a valid index");
                assert_eq!(resolution.achieved_separation.as_ordered(), best);
            }
            ResolutionType::Two => panic!("type 2 is always refined"),
        }

        for sample in &samples[turn_minimum..] {
            assert_eq!(sample.straight_separation, sample.turn_separation);
        }
    }
}

#[test]
fn every_maneuver_yields_one_resolution() {
    for conflict in [erz_conflict(12., 12.5), erz_conflict(4., 5.83)] {
        let settings = ScenarioSettings::default();
        let reports = run_all(&conflict, &settings).expect("valid conflict");
        assert_eq!(reports.len(), 6);
        assert_eq!(reports.iter().flat_map(ScenarioReport::directions).count(), 12);

        for report in &reports {
            assert_consistent(report, conflict.required_separation);
            assert_eq!(report.left.direction, TurnDirection::CounterClockwise);
            assert_eq!(report.right.direction, TurnDirection::Clockwise);
            assert_eq!(report.curve.samples.len(), 149);
        }
    }
}

#[test]
fn cooperative_scenarios_use_cooperative_bank() {
    let settings = ScenarioSettings::default();
    let reports = run_all(&erz_conflict(4., 5.83), &settings).expect("valid conflict");
    for report in reports.iter().filter(|report| report.kind.is_cooperative()) {
        report
            .bank
            .assert_approx(settings.cooperative_bank_angle, Angle::from_degrees(1e-9))
            .unwrap();
    }
    assert_eq!(
        reports.iter().filter(|report| report.kind == ScenarioKind::ATurnsBStraight).count(),
        settings.bank_angles.len(),
    );
}

/// Checks a direction against `(type, angle in degrees, time in minutes, achieved nm)`
/// and the angle of its turn-phase minimum.
fn assert_direction(
    direction: &DirectionReport,
    (kind, degrees, minutes, nm): (ResolutionType, f64, f64, f64),
    minimum_degrees: f64,
) {
    let resolution = &direction.resolution;
    assert_eq!(resolution.kind, kind, "{}", direction.direction);
    resolution.angle.assert_approx(Angle::from_degrees(degrees), Angle::from_degrees(1e-6)).unwrap();
    assert!(
        (resolution.time.as_secs_f64() / 60. - minutes).abs() < 0.01,
        "{}: {:?}",
        direction.direction,
        resolution.time,
    );
    resolution
        .achieved_separation
        .assert_approx(Length::from_nm(nm), Length::from_nm(0.001))
        .unwrap();
    direction
        .turn_minimum
        .angle
        .assert_approx(Angle::from_degrees(minimum_degrees), Angle::from_degrees(1e-6))
        .unwrap();
}

#[test]
fn deterministic_regression_case() {
    let conflict = erz_conflict(4., 5.83);
    let settings = ScenarioSettings::default();
    let first =
        run_scenario(&conflict, ScenarioKind::ATurnsBStraight, Angle::from_degrees(15.), &settings)
            .expect("valid conflict");
    let second =
        run_scenario(&conflict, ScenarioKind::ATurnsBStraight, Angle::from_degrees(15.), &settings)
            .expect("valid conflict");
    assert_eq!(first, second);
    assert_consistent(&first, conflict.required_separation);

    assert_direction(&first.right, (ResolutionType::TwoA, 40., 0.91, 2.555), 24.);
    assert_direction(&first.left, (ResolutionType::TwoA, -116., 2.64, 1.148), -36.);
}

#[test]
fn refined_crossing_meets_required_separation() {
    let conflict = distant_head_on();
    let mut settings = ScenarioSettings::default();
    settings.classifier.timeliness_factor = 10.;

    let coarse =
        run_scenario(&conflict, ScenarioKind::ATurnsBStraight, Angle::from_degrees(15.), &settings)
            .expect("valid conflict");
    assert_eq!(coarse.right.resolution.kind, ResolutionType::One);

    settings.refine_crossings = true;
    let refined =
        run_scenario(&conflict, ScenarioKind::ATurnsBStraight, Angle::from_degrees(15.), &settings)
            .expect("valid conflict");
    let resolution = refined.right.resolution;
    assert_eq!(resolution.kind, ResolutionType::One);
    assert!(resolution.angle <= coarse.right.resolution.angle);
    resolution
        .achieved_separation
        .assert_approx(conflict.required_separation, Length::from_meters(1.))
        .unwrap();
}

#[test]
fn scenario_kind_names() {
    assert_eq!(ScenarioKind::ATurnsBStraight.to_string(), "a-turns-b-straight");
    assert_eq!("a-turns-b-left".parse::<ScenarioKind>().ok(), Some(ScenarioKind::ATurnsBLeft));
    assert!(ScenarioKind::ATurnsBRight.is_cooperative());
    assert!(!ScenarioKind::AStraightBTurns.is_cooperative());
}
