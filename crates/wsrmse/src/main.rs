use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wsrmse_core::outputs::OutputFormat;
use wsrmse_core::pipeline::{self, RunOutcome, RunReport};
use wsrmse_core::{interval_totals, BucketPolicy, Config};

#[derive(Parser, Debug)]
#[command(author, version, about = "Wind speed forecast RMSE by lead time", long_about = None)]
struct Cli {
    /// TOML configuration file (also read from WSRMSE_CONFIG)
    #[arg(long, env = "WSRMSE_CONFIG", global = true)]
    config: Option<PathBuf>,
    /// Emit logs as JSON lines instead of human-readable text
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the RMSE curve (the default when no subcommand is given)
    Rmse(RmseArgs),
    /// Summarise per-timeslot production and consumption from an event log
    IntervalTotals(IntervalTotalsArgs),
}

#[derive(Args, Debug, Default)]
struct RmseArgs {
    /// Directory holding the forecast/observation batch files
    #[arg(long)]
    input_dir: Option<PathBuf>,
    /// Where to write the curve document
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long, value_parser = parse_format)]
    format: Option<OutputFormat>,
    /// all_values (true RMSE) or distinct_values (legacy set semantics)
    #[arg(long, value_parser = parse_policy)]
    bucket_policy: Option<BucketPolicy>,
    /// Print the run summary as JSON after the table
    #[arg(long)]
    summary_json: bool,
}

#[derive(Args, Debug)]
struct IntervalTotalsArgs {
    /// JSON-lines event log
    input: PathBuf,
    /// CSV report to write
    output: PathBuf,
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    value.parse()
}

fn parse_policy(value: &str) -> Result<BucketPolicy, String> {
    value.parse()
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        None => handle_rmse(cli.config, RmseArgs::default()),
        Some(Command::Rmse(args)) => handle_rmse(cli.config, args),
        Some(Command::IntervalTotals(args)) => handle_interval_totals(args),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn handle_rmse(config_path: Option<PathBuf>, args: RmseArgs) -> Result<()> {
    let mut config = Config::load(config_path.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = args.input_dir {
        config.input_dir = dir;
    }
    if let Some(output) = args.output {
        config.output_path = output;
    }
    if let Some(format) = args.format {
        config.output_format = Some(format);
    }
    if let Some(policy) = args.bucket_policy {
        config.bucket_policy = policy;
    }

    match pipeline::run(&config).context("RMSE run failed")? {
        RunOutcome::NoInput { input_dir } => {
            println!(
                "No wind speed forecast data files found in {}",
                input_dir.display()
            );
        }
        RunOutcome::Completed(report) => {
            print_report(&report);
            if args.summary_json {
                let summary = serde_json::to_string_pretty(&report.evaluation.summary)
                    .context("failed to serialize run summary")?;
                println!("{summary}");
            }
            info!(path = %report.output_path.display(), "Program completed");
        }
    }

    Ok(())
}

fn print_report(report: &RunReport) {
    let summary = &report.evaluation.summary;

    println!("Processed {} input files:", report.files.len());
    for file in &report.files {
        let duplicate = file
            .duplicate_of
            .as_deref()
            .map(|original| format!(" (same contents as {original})"))
            .unwrap_or_default();
        println!(
            "  {} [{}]: {} observations, {} forecasts{}",
            file.path, file.format, file.observations, file.forecasts, duplicate
        );
    }

    println!(
        "Scored {} of {} forecasts ({} without a matching observation, {} bad IDs)",
        summary.scoring.scored,
        summary.forecasts,
        summary.scoring.unscored,
        summary.audit.bad_ids
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Lead hour", "RMSE", "Samples"]);
    for point in report.evaluation.curve.points() {
        table.add_row(vec![
            point.hour.to_string(),
            format!("{:.4}", point.value),
            point.samples.to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "RMSE curve written to {} ({:?})",
        report.output_path.display(),
        report.output_format
    );
}

fn handle_interval_totals(args: IntervalTotalsArgs) -> Result<()> {
    let rows = interval_totals::summarize_log(&args.input, &args.output).with_context(|| {
        format!(
            "failed to summarise event log '{}'",
            args.input.display()
        )
    })?;
    println!(
        "Wrote {} timeslot rows to {}",
        rows,
        args.output.display()
    );
    Ok(())
}
