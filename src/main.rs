//! oneway: CLI entry point.
//!
//! Runs a one-way ANOVA or a long-to-wide reshape over a CSV input.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use oneway::anova;
use oneway::intake::{IntakeConfig, SpooledCsv};
use oneway::report;
use oneway::reshape;

#[derive(Parser)]
#[command(name = "oneway")]
#[command(about = "One-way ANOVA over grouped CSV data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a one-way ANOVA and print the report.
    Anova {
        /// CSV input path, or `-` for stdin.
        input: PathBuf,

        /// Column holding the group labels.
        #[arg(short, long)]
        group: String,

        /// Numeric column to analyze.
        #[arg(short, long)]
        value: String,

        /// Print the result as pretty JSON instead of the text report.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        spool: SpoolArgs,
    },

    /// Reshape a long-format CSV to wide format, one column per group.
    Wide {
        /// CSV input path, or `-` for stdin.
        input: PathBuf,

        /// Column whose labels become column name suffixes.
        #[arg(short, long)]
        key: String,

        /// Value columns to spread, one wide column per (column, label) pair.
        #[arg(short, long, required = true, num_args = 1..)]
        values: Vec<String>,

        /// Write the wide CSV here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        spool: SpoolArgs,
    },
}

#[derive(Args)]
struct SpoolArgs {
    /// Directory for the spooled CSV copy (defaults to the system temp dir).
    #[arg(long, value_name = "DIR")]
    spool_dir: Option<PathBuf>,

    /// Keep the spooled copy instead of deleting it (prints its path).
    #[arg(long)]
    keep_spool: bool,
}

impl SpoolArgs {
    fn config(&self) -> IntakeConfig {
        let defaults = IntakeConfig::default();
        IntakeConfig {
            spool_dir: self.spool_dir.clone().unwrap_or(defaults.spool_dir),
            keep_spool: self.keep_spool,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Anova {
            input,
            group,
            value,
            json,
            spool,
        } => run_anova(&input, &group, &value, json, &spool.config()),
        Command::Wide {
            input,
            key,
            values,
            output,
            spool,
        } => run_wide(&input, &key, &values, output.as_deref(), &spool.config()),
    }
}

fn run_anova(
    input: &Path,
    group: &str,
    value: &str,
    json: bool,
    config: &IntakeConfig,
) -> anyhow::Result<()> {
    let spooled = spool_input(input, config)?;
    let dataset = spooled
        .dataset()
        .with_context(|| format!("Failed to parse {}", spooled.origin()))?;
    let result = anova::compute(&dataset, group, value)
        .with_context(|| format!("ANOVA over {}", spooled.origin()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        report::print_report(&result);
    }

    finish_spool(spooled)
}

fn run_wide(
    input: &Path,
    key: &str,
    values: &[String],
    output: Option<&Path>,
    config: &IntakeConfig,
) -> anyhow::Result<()> {
    let spooled = spool_input(input, config)?;
    let dataset = spooled
        .dataset()
        .with_context(|| format!("Failed to parse {}", spooled.origin()))?;
    let wide = reshape::long_to_wide(&dataset, key, values)
        .with_context(|| format!("Reshape over {}", spooled.origin()))?;

    match output {
        Some(path) => {
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            wide.to_csv_writer(file)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} Wrote {}", "✓".green(), path.display());
        }
        None => {
            wide.to_csv_writer(io::stdout().lock())
                .context("Failed to write CSV to stdout")?;
        }
    }

    finish_spool(spooled)
}

fn spool_input(input: &Path, config: &IntakeConfig) -> anyhow::Result<SpooledCsv> {
    let spooled = if input == Path::new("-") {
        SpooledCsv::from_reader(io::stdin().lock(), "stdin", config)
    } else {
        SpooledCsv::from_path(input, config)
    };
    spooled.with_context(|| format!("Failed to spool {}", input.display()))
}

fn finish_spool(spooled: SpooledCsv) -> anyhow::Result<()> {
    let kept = spooled
        .finish()
        .context("Failed to release the spooled copy")?;
    if let Some(path) = kept {
        eprintln!("Spooled copy kept at {}", path.display());
    }
    Ok(())
}
