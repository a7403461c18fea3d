use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use math::LengthUnit;
use sepres::config::Preset;
use sepres::scenario::ScenarioKind;
use sepres_cli::{Source, analyze, curves, json_schema, override_bank_angles, report, write_json};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[clap(version, about)]
struct Options {
    /// Log more details. Repeat for more. Overrides `RUST_LOG`.
    #[clap(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Analyze the resolutions of a conflict.
    Run(RunArgs),
    /// Print a built-in scenario file.
    Preset {
        /// One of `erz2010-case1`, `erz2010-case2`.
        name: Preset,
    },
    /// Write the JSON schema of scenario files.
    Schema {
        #[clap(long)]
        output: PathBuf,
        #[clap(long)]
        gzip:   bool,
    },
}

#[derive(clap::Args)]
#[clap(group(clap::ArgGroup::new("source").required(true).args(["config", "preset"])))]
struct RunArgs {
    /// Path to a JSON scenario file.
    #[clap(long)]
    config:      Option<PathBuf>,
    /// Name of a built-in scenario file.
    #[clap(long)]
    preset:      Option<Preset>,
    /// Only run these scenarios, e.g. `a-turns-b-straight`. Runs all if omitted.
    #[clap(long = "scenario")]
    scenarios:   Vec<ScenarioKind>,
    /// Bank angles in degrees for the single-aircraft scenarios, replacing the file's.
    #[clap(long = "bank-angle")]
    bank_angles: Vec<f64>,
    #[clap(long, value_enum, default_value_t = Format::Text)]
    format:      Format,
    /// Unit of separations in text output.
    #[clap(long, default_value = "nm")]
    length_unit: LengthUnit,
    /// Write one CSV curve per scenario and bank angle into this directory.
    #[clap(long)]
    curves_dir:  Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<()> {
    let options = <Options as clap::Parser>::parse();
    init_logging(options.verbose);

    match options.command {
        Command::Run(args) => run(args),
        Command::Preset { name } => write_json(io::stdout().lock(), &name.scenario_file()),
        Command::Schema { output, gzip } => json_schema(&output, gzip),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let source = match (args.config, args.preset) {
        (Some(path), _) => Source::File(path),
        (None, Some(preset)) => Source::Preset(preset),
        (None, None) => anyhow::bail!("either --config or --preset is required"),
    };
    let mut file = source.load()?;
    override_bank_angles(&mut file, &args.bank_angles);

    let analysis = analyze(&file, &args.scenarios)?;

    if let Some(dir) = &args.curves_dir {
        for path in curves::write_curves(dir, &analysis.reports)? {
            eprintln!("Wrote {}", path.display());
        }
    }

    match args.format {
        Format::Text => report::write_text(io::stdout().lock(), &analysis, args.length_unit)
            .context("write report"),
        Format::Json => write_json(io::stdout().lock(), &analysis),
    }
}
