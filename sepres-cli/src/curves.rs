//! CSV export of merged separation curves.

use std::path::{Path, PathBuf};
use std::{fs, io};

use anyhow::{Context, Result};
use sepres::sampler::SeparationCurve;
use sepres::scenario::ScenarioReport;


#[derive(serde::Serialize)]
struct CurveRow {
    angle_deg:             f64,
    turn_separation_m:     f64,
    straight_separation_m: f64,
    resolution_time_s:     f64,
}

/// Writes one row per sample, from the leftmost to the rightmost turn.
pub fn write_curve(writer: impl io::Write, curve: &SeparationCurve) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for sample in &curve.samples {
        writer
            .serialize(CurveRow {
                angle_deg:             sample.angle.into_degrees(),
                turn_separation_m:     sample.turn_separation.into_meters(),
                straight_separation_m: sample.straight_separation.into_meters(),
                resolution_time_s:     sample.resolution_time.as_secs_f64(),
            })
            .context("write csv row")?;
    }
    writer.flush().context("flush csv")?;
    Ok(())
}

#[must_use]
pub fn file_name(report: &ScenarioReport) -> String {
    format!("{}-bank{:.0}.csv", report.kind, report.bank.into_degrees())
}

/// Writes the merged curve of every report into `dir`, creating it if necessary.
pub fn write_curves(dir: &Path, reports: &[ScenarioReport]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("mkdir {}", dir.display()))?;

    reports
        .iter()
        .map(|report| {
            let path = dir.join(file_name(report));
            let file = fs::File::create(&path)
                .with_context(|| format!("create {}", path.display()))?;
            write_curve(file, &report.curve)
                .with_context(|| format!("write {}", path.display()))?;
            Ok(path)
        })
        .collect()
}
