//! Plain text tables of an [`Analysis`].

use std::io;
use std::time::Duration;

use math::{Length, LengthUnit, UnitEnum};
use sepres::scenario::{DirectionReport, ScenarioReport};

use crate::Analysis;


fn minutes(duration: Duration) -> f64 { duration.as_secs_f64() / 60. }

struct Columns {
    unit: LengthUnit,
}

impl Columns {
    fn length(&self, length: Length<f64>) -> f64 { self.unit.quantity_to_float()(length) }
}

pub fn write_text(mut out: impl io::Write, analysis: &Analysis, unit: LengthUnit) -> io::Result<()> {
    let columns = Columns { unit };

    writeln!(
        out,
        "Required separation: {:.2} {}",
        columns.length(analysis.required_separation),
        unit.to_str(),
    )?;

    for report in &analysis.reports {
        writeln!(out)?;
        write_scenario(&mut out, &columns, report)?;
    }

    writeln!(out)?;
    writeln!(out, "Ranking")?;
    writeln!(
        out,
        "{:>4}  {:<4}  {:<20}  {:>6}  {:<9}  {:>8}  {:>10}  {:>10}  {}",
        "rank",
        "type",
        "scenario",
        "bank",
        "direction",
        "angle",
        "time (min)",
        format!("sep ({})", unit.to_str()),
        "compliant",
    )?;
    for entry in &analysis.ranking {
        let resolution = &entry.resolution;
        writeln!(
            out,
            "{:>4}  {:<4}  {:<20}  {:>6.1}  {:<9}  {:>8.1}  {:>10.2}  {:>10.2}  {}",
            entry.rank,
            resolution.kind.to_string(),
            entry.kind.to_string(),
            entry.bank.into_degrees(),
            resolution.direction.to_string(),
            resolution.angle.into_degrees(),
            minutes(resolution.time),
            columns.length(resolution.achieved_separation),
            if entry.compliant { "yes" } else { "no" },
        )?;
    }

    Ok(())
}

fn write_scenario(
    out: &mut impl io::Write,
    columns: &Columns,
    report: &ScenarioReport,
) -> io::Result<()> {
    let unit = columns.unit.to_str();
    writeln!(out, "{} at {:.1} degrees bank", report.kind, report.bank.into_degrees())?;
    writeln!(
        out,
        "  {:<9}  {:>9}  {:>8}  {:>10}  {:<4}  {:>8}  {:>8}  {:>10}",
        "direction",
        "min angle",
        "min time",
        format!("min ({unit})"),
        "type",
        "angle",
        "time",
        format!("sep ({unit})"),
    )?;
    for direction in report.directions() {
        write_direction(out, columns, direction)?;
    }
    Ok(())
}

fn write_direction(
    out: &mut impl io::Write,
    columns: &Columns,
    direction: &DirectionReport,
) -> io::Result<()> {
    let minimum = &direction.turn_minimum;
    let resolution = &direction.resolution;
    writeln!(
        out,
        "  {:<9}  {:>9.1}  {:>8.2}  {:>10.2}  {:<4}  {:>8.1}  {:>8.2}  {:>10.2}",
        direction.direction.to_string(),
        minimum.angle.into_degrees(),
        minutes(minimum.turn_time),
        columns.length(minimum.turn_separation),
        resolution.kind.to_string(),
        resolution.angle.into_degrees(),
        minutes(resolution.time),
        columns.length(resolution.achieved_separation),
    )
}
