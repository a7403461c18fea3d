use math::{Angle, Length, Speed};
use strum::IntoEnumIterator;

use super::{AngleInput, Preset, ScenarioFile, SpeedInput};
use crate::Error;
use crate::kinematics::Placement;
use crate::separation::DEFAULT_REQUIRED_SEPARATION;

const MINIMAL: &str = r#"{
    "conflict": {
        "reference": { "airspeed": { "knots": 400 } },
        "intruder": {
            "airspeed": { "knots": 480 },
            "position": { "nautical_miles": [4.0, 5.83] },
            "heading": { "degrees": 270 }
        }
    }
}"#;

fn invalid_field(result: Result<impl std::fmt::Debug, Error>) -> &'static str {
    match result {
        Err(Error::InvalidConfig { field, .. }) => field,
        other => panic!("expected invalid config, got {other:?}"),
    }
}

#[test]
fn minimal_file_uses_defaults() {
    let file: ScenarioFile = serde_json::from_str(MINIMAL).expect("valid json");
    let (conflict, settings) = file.build().expect("valid scenario");

    conflict
        .reference
        .airspeed()
        .assert_approx(Speed::from_knots(400.), Speed::from_meters_per_sec(1e-9))
        .unwrap();
    assert_eq!(conflict.required_separation, DEFAULT_REQUIRED_SEPARATION);

    let Placement::Offset { position, heading } = conflict.intruder.placement() else {
        panic!("intruder must be offset");
    };
    position.0.x().assert_approx(Length::from_nm(4.), Length::from_meters(1e-6)).unwrap();
    assert!((heading.degrees() - 270.).abs() < 1e-9);

    assert_eq!(settings.bank_angles.len(), 2);
    settings.sweep.limit.assert_approx(Angle::from_degrees(150.), Angle::from_degrees(1e-9)).unwrap();
    assert!((settings.classifier.timeliness_factor - 1.2).abs() < f64::EPSILON);
    assert!(!settings.refine_crossings);
}

#[test]
fn presets_round_trip_through_json() {
    for preset in Preset::iter() {
        let file = preset.scenario_file();
        let json = serde_json::to_string_pretty(&file).expect("serializable");
        let parsed: ScenarioFile = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(parsed, file, "{preset}");
        parsed.build().expect("presets are valid");
    }
}

#[test]
fn preset_names() {
    assert_eq!("erz2010-case2".parse::<Preset>().ok(), Some(Preset::Erz2010Case2));
    assert_eq!(Preset::Erz2010Case1.to_string(), "erz2010-case1");

    let (conflict, _) = Preset::Erz2010Case2.scenario_file().build().expect("valid preset");
    conflict
        .intruder
        .airspeed()
        .assert_approx(Speed::from_meters_per_sec(246.72), Speed::from_meters_per_sec(1e-9))
        .unwrap();
}

#[test]
fn rejects_non_positive_airspeed() {
    let mut file = Preset::Erz2010Case1.scenario_file();
    file.conflict.intruder.airspeed = SpeedInput::Knots(0.);
    assert_eq!(invalid_field(file.build()), "intruder.airspeed");
}

#[test]
fn rejects_level_or_vertical_bank() {
    let mut file = Preset::Erz2010Case1.scenario_file();
    file.analysis.bank_angles = vec![AngleInput::Degrees(15.), AngleInput::Degrees(90.)];
    assert_eq!(invalid_field(file.build()), "bank_angles");

    let mut file = Preset::Erz2010Case1.scenario_file();
    file.analysis.cooperative_bank_angle = AngleInput::Degrees(0.);
    assert_eq!(invalid_field(file.build()), "cooperative_bank_angle");

    let mut file = Preset::Erz2010Case1.scenario_file();
    file.analysis.bank_angles.clear();
    assert_eq!(invalid_field(file.build()), "bank_angles");
}

#[test]
fn rejects_bad_sweep() {
    let mut file = Preset::Erz2010Case2.scenario_file();
    file.analysis.sweep_step = AngleInput::Degrees(200.);
    assert_eq!(invalid_field(file.build()), "sweep_step");

    let mut file = Preset::Erz2010Case2.scenario_file();
    file.analysis.sweep_limit = AngleInput::Radians(-1.);
    assert_eq!(invalid_field(file.build()), "sweep_limit");
}

#[test]
fn rejects_early_timeliness() {
    let mut file = Preset::Erz2010Case2.scenario_file();
    file.analysis.timeliness_factor = 0.5;
    assert_eq!(invalid_field(file.build()), "timeliness_factor");
}

#[test]
fn rejects_non_finite_json() {
    let json = MINIMAL.replace("480", "1e999");
    assert!(serde_json::from_str::<ScenarioFile>(&json).is_err());
}
