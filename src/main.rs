use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use ohlc_signals::config::load_config;
use ohlc_signals::pipeline::{self, EvaluationReport, TrainingSummary};

#[derive(Parser)]
#[command(name = "ohlc-signals")]
#[command(version = "0.1.0")]
#[command(about = "Monthly momentum and volatility classification from daily price histories", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "signals.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the momentum and volatility training corpora
    Train {
        /// Price history CSV files, replacing the configured list
        #[arg(short, long)]
        input: Vec<PathBuf>,
    },
    /// Score both models against their test files
    Evaluate {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Train, then evaluate
    Run {
        /// Price history CSV files, replacing the configured list
        #[arg(short, long)]
        input: Vec<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG overrides --verbose
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("OHLC signals v0.1.0");
    let mut config = load_config(&cli.config)?;

    match cli.command {
        Commands::Train { input } => {
            if !input.is_empty() {
                config.input_files = input;
            }
            let summary = pipeline::train(&config)?;
            print_training(&summary);
        }
        Commands::Evaluate { json } => {
            let report = pipeline::evaluate(&config)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print_evaluation(&report);
            }
        }
        Commands::Run { input, json } => {
            if !input.is_empty() {
                config.input_files = input;
            }
            let report = pipeline::run(&config)?;
            if json {
                println!("{}", report.to_json()?);
            } else {
                print_training(&report.training);
                print_evaluation(&report.evaluation);
            }
        }
    }

    Ok(())
}

fn print_training(summary: &TrainingSummary) {
    println!("\n=== Training Data ===");
    println!(
        "Momentum:   {} months -> {}",
        summary.momentum_entries,
        summary.momentum_output.display()
    );
    println!(
        "Volatility: {} months -> {}",
        summary.volatility_entries,
        summary.volatility_output.display()
    );
}

fn print_evaluation(report: &EvaluationReport) {
    println!("\n=== Validation Accuracy ===");
    println!(
        "Momentum (k={}):          {:.1}% over {} test points ({} training)",
        report.k,
        report.momentum_accuracy * 100.0,
        report.momentum_test_points,
        report.momentum_training_points
    );
    println!(
        "Volatility (clusters={}): {:.1}% over {} test points ({} training)",
        report.cluster_count,
        report.volatility_accuracy * 100.0,
        report.volatility_test_points,
        report.volatility_training_points
    );
}
