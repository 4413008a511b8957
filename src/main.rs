use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use fr_mortgage::{LoanOutcome, LoanResult, Simulation, SolverConfig, first_payment_date};

/// Evaluate a mortgage simulation and print the results as JSON
#[derive(Parser, Debug)]
#[command(name = "fr-mortgage", version, about)]
struct Args {
    /// Simulation JSON file, or `-` to read stdin
    #[arg(long, default_value = "-")]
    input: String,

    /// Due date of the first installment (defaults to one month from today)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Iteration cap of the effective-rate solver
    #[arg(long)]
    max_iterations: Option<u32>,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let blob = read_input(&args.input)?;
    let simulation = Simulation::from_share_json(&blob)
        .with_context(|| format!("Failed to parse simulation from '{}'", args.input))?;

    let start = match args.start_date {
        Some(date) => date,
        None => first_payment_date(Local::now().date_naive())?,
    };
    let mut config = SolverConfig::default();
    if let Some(max_iterations) = args.max_iterations {
        config.max_iterations = max_iterations;
    }

    tracing::info!(%start, lender = %simulation.first.lender, "evaluating simulation");
    let report = simulation.evaluate(start, &config);

    let comparison = match report.comparison() {
        Some(Ok(comparison)) => serde_json::to_value(comparison)?,
        Some(Err(e)) => json!({ "error": e.to_string() }),
        None => Value::Null,
    };
    let output = json!({
        "first": outcome_json(&report.first)?,
        "second": report.second.as_ref().map(outcome_json).transpose()?,
        "comparison": comparison,
    });

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{rendered}");
    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read simulation from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read '{path}'"))
}

fn outcome_json(outcome: &LoanResult<LoanOutcome>) -> Result<Value> {
    Ok(match outcome {
        Ok(outcome) => serde_json::to_value(outcome)?,
        Err(e) => {
            tracing::warn!(error = %e, "offer could not be evaluated");
            json!({ "error": e.to_string() })
        }
    })
}
