//! Pulse CLI - developer tooling around the feedback analytics engine.
//!
//! Three subcommands cover the engine's boundaries end to end:
//! `seed` writes a sample record file, `analyze` runs the per-review
//! analyzers on one text, and `report` aggregates a record file into
//! dashboard statistics and insights.

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

/// Pulse - explainable feedback analytics from the command line.
#[derive(Parser, Debug)]
#[command(name = "pulse")]
#[command(version = "0.1.0")]
#[command(about = "Seed, analyze, and report on product feedback", long_about = None)]
struct Cli {
    /// Base log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Log output format: pretty or json
    #[arg(long, default_value = "pretty", global = true)]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sample feedback record file for dashboard demos
    Seed {
        /// Output record file (JSON Lines, one record per line)
        #[arg(long, default_value = "feedback.jsonl")]
        output: PathBuf,
    },
    /// Analyze a single review text
    Analyze {
        /// The review text to analyze
        text: String,
        /// Include the full scoring trace
        #[arg(long)]
        explain: bool,
    },
    /// Aggregate a record file and evaluate the insight rules
    Report {
        /// Input record file (JSON Lines, one record per line)
        #[arg(long, default_value = "feedback.jsonl")]
        input: PathBuf,
        /// Emit the report as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Override the time-decay half-life in days
        #[arg(long)]
        half_life_days: Option<f64>,
        /// Override the per-record confidence floor
        #[arg(long)]
        min_confidence: Option<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    pulse_common::logging::init_logging(&cli.log_level, &cli.log_format);

    match cli.command {
        Commands::Seed { output } => commands::seed(&output),
        Commands::Analyze { text, explain } => commands::analyze(&text, explain),
        Commands::Report {
            input,
            json,
            half_life_days,
            min_confidence,
        } => commands::report(&input, json, half_life_days, min_confidence),
    }
}
