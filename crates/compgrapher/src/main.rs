mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use compgrapher_parser::analysis::{all_employer_series, employer_series, prepare_comparison};
use compgrapher_parser::{CompensationDataParser, Config, Dataset};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use output::{InspectData, Report};

#[derive(Parser, Debug)]
#[command(
    name = "compgrapher",
    author,
    version,
    about = "compgrapher: parse and compare municipal salary surveys",
    long_about = None
)]
struct Cli {
    /// TOML file with parser and analysis settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the parsed survey and its data-quality warnings
    Inspect(InspectArgs),
    /// Compare every employer against the first (baseline) employer
    Compare(CompareArgs),
    /// List each employer's positions sorted by pay
    Employers(EmployersArgs),
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Survey file (.csv, .xls, .xlsx or .ods)
    input: PathBuf,

    /// Print a JSON report instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct InspectArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Skip data-quality validation
    #[arg(long)]
    no_validate: bool,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[command(flatten)]
    input: InputArgs,
}

#[derive(Args, Debug)]
struct EmployersArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Only this employer (all employers when omitted)
    #[arg(short, long)]
    employer: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Inspect(args) => handle_inspect(args, &config),
        Command::Compare(args) => handle_compare(args, &config),
        Command::Employers(args) => handle_employers(args, &config),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let config = Config::load(path)
                .with_context(|| format!("failed to load config '{}'", path.display()))?;
            info!(path = %path.display(), "loaded configuration");
            Ok(config)
        }
        None => Ok(Config::default()),
    }
}

fn load_dataset(input: &Path, config: &Config, validate: bool) -> Result<(Dataset, Vec<String>)> {
    let parser = CompensationDataParser::with_config(input, config.parser.clone())
        .with_context(|| format!("cannot read survey '{}'", input.display()))?;
    let (dataset, warnings) = parser
        .process(validate)
        .with_context(|| format!("failed to process survey '{}'", input.display()))?;

    for warning in &warnings {
        warn!(warning = %warning, "data-quality warning");
    }
    Ok((dataset, warnings))
}

fn print_json<T: Serialize>(report: &Report<'_, T>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    println!("{rendered}");
    Ok(())
}

fn handle_inspect(args: InspectArgs, config: &Config) -> Result<()> {
    let input = &args.input.input;
    let (dataset, warnings) = load_dataset(input, config, !args.no_validate)?;

    if args.input.json {
        let data = InspectData {
            dataset: &dataset,
            warnings: &warnings,
        };
        return print_json(&Report::new(input, "inspect", data));
    }

    println!(
        "{} positions across {} employers (baseline: {})",
        dataset.len(),
        dataset.employers().len(),
        dataset.baseline_employer().unwrap_or("none")
    );
    println!("{}", output::dataset_table(&dataset));
    if !args.no_validate {
        println!("{}", output::warnings_block(&warnings));
    }
    Ok(())
}

fn handle_compare(args: CompareArgs, config: &Config) -> Result<()> {
    let input = &args.input.input;
    let (dataset, _) = load_dataset(input, config, true)?;

    let Some(comparison) = prepare_comparison(&dataset, &config.analysis) else {
        bail!("survey '{}' has no employer columns to compare", input.display());
    };

    if args.input.json {
        return print_json(&Report::new(input, "compare", &comparison));
    }

    if comparison.rows.is_empty() {
        println!(
            "No positions with {} data remain after filtering.",
            comparison.baseline
        );
        return Ok(());
    }

    println!("{} salary comparison", comparison.baseline);
    println!("{}", output::comparison_table(&comparison));
    println!("Difference analysis against {}:", comparison.baseline);
    println!("{}", output::difference_table(&comparison));
    println!(
        "Positions compared: {} | employers: {} | complete data: {}",
        comparison.rows.len(),
        comparison.employers.len(),
        comparison.complete_positions
    );
    Ok(())
}

fn handle_employers(args: EmployersArgs, config: &Config) -> Result<()> {
    let input = &args.input.input;
    let (dataset, _) = load_dataset(input, config, true)?;

    let series = match args.employer.as_deref() {
        Some(employer) => {
            if !dataset.employers().iter().any(|known| known == employer) {
                bail!(
                    "employer '{employer}' not found; available: {}",
                    dataset.employers().join(", ")
                );
            }
            vec![employer_series(&dataset, employer, &config.analysis)]
        }
        None => all_employer_series(&dataset, &config.analysis),
    };

    if args.input.json {
        return print_json(&Report::new(input, "employers", &series));
    }

    for entry in &series {
        if entry.points.is_empty() {
            println!("No valid data for {} after filtering", entry.employer);
            continue;
        }
        println!("{}", output::series_table(entry));
    }
    Ok(())
}
