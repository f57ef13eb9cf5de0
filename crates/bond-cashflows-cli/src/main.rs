mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::bond::{PriceArgs, ScheduleArgs};

/// Bullet bond cash-flow schedules and present value
#[derive(Parser)]
#[command(
    name = "bondcf",
    version,
    about = "Bullet bond cash-flow schedules and present value",
    long_about = "Builds the fixed-coupon cash-flow schedule of a bullet bond and discounts \
                  it at a flat yield with decimal precision. Parameters come from flags, a \
                  JSON file (--input) or JSON piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Round decimal values to this many places (table, csv and minimal output)
    #[arg(long, global = true)]
    round: Option<u32>,

    /// Log debug detail to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the cash-flow schedule of a bullet bond
    Schedule(ScheduleArgs),
    /// Price a bullet bond at a flat yield (schedule plus present values)
    Price(PriceArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Schedule(args) => commands::bond::run_schedule(args),
        Commands::Price(args) => commands::bond::run_price(args),
        Commands::Version => {
            println!("bondcf {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, cli.round, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout carries only the formatted result.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("bond_cashflows_core=debug,bondcf=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
