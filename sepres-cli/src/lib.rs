//! Command line front end of the separation analysis.

use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use math::Length;
use sepres::config::{AngleInput, Preset, ScenarioFile};
use sepres::rank::{RankedManeuver, rank};
use sepres::scenario::{ScenarioKind, ScenarioReport, run_all, run_selected};

pub mod curves;
pub mod report;


/// Where a scenario file comes from.
#[derive(Debug, Clone)]
pub enum Source {
    File(PathBuf),
    Preset(Preset),
}

impl Source {
    pub fn load(&self) -> Result<ScenarioFile> {
        match self {
            Self::File(path) => {
                let file = fs::File::open(path)
                    .with_context(|| format!("open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("parse {}", path.display()))
            }
            Self::Preset(preset) => Ok(preset.scenario_file()),
        }
    }
}

/// Replaces the single-aircraft bank angles of `file`, given in degrees.
/// Leaves the file unchanged if `degrees` is empty.
pub fn override_bank_angles(file: &mut ScenarioFile, degrees: &[f64]) {
    if !degrees.is_empty() {
        file.analysis.bank_angles = degrees.iter().copied().map(AngleInput::Degrees).collect();
    }
}

/// The outcome of one `run` invocation.
#[derive(Debug, serde::Serialize)]
pub struct Analysis {
    pub required_separation: Length<f64>,
    pub reports:             Vec<ScenarioReport>,
    pub ranking:             Vec<RankedManeuver>,
}

/// Runs the scenarios in `kinds` on `file`, or every scenario if `kinds` is empty.
pub fn analyze(file: &ScenarioFile, kinds: &[ScenarioKind]) -> Result<Analysis> {
    let (conflict, settings) = file.build().context("invalid scenario file")?;
    let reports = if kinds.is_empty() {
        run_all(&conflict, &settings)
    } else {
        run_selected(&conflict, &settings, kinds.iter().copied())
    }
    .context("analyze conflict")?;
    let ranking = rank(&reports);

    Ok(Analysis { required_separation: conflict.required_separation, reports, ranking })
}

pub fn write_json(writer: impl io::Write, value: &impl serde::Serialize) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value).context("write json")?;
    io::Write::write_all(&mut writer, b"\n").context("write json")?;
    io::Write::flush(&mut writer).context("flush json")?;
    Ok(())
}

pub fn json_schema(output: &Path, gzip: bool) -> Result<()> {
    let schema = schemars::schema_for!(ScenarioFile);
    let mut file = BufWriter::new(fs::File::create(output).context("create output")?);
    if gzip {
        let mut encoder = flate2::write::GzEncoder::new(&mut file, flate2::Compression::best());
        serde_json::to_writer(&mut encoder, &schema).context("write schema")?;
        encoder.finish().context("finish gzip")?;
    } else {
        serde_json::to_writer(&mut file, &schema).context("write schema")?;
    }
    io::Write::flush(&mut file).context("flush schema")?;
    Ok(())
}
