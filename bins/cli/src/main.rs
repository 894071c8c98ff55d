//! Splitledger command-line tool
//!
//! Reads a project export, computes net balances and prints who pays whom.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use splitledger_core::{InMemoryExpenseStore, SettlementPlanner, SettlementService};
use splitledger_shared::config::LoggingConfig;
use splitledger_shared::{AppConfig, AppError};

mod input;
mod output;

use input::ProjectExport;
use output::Format;

#[derive(Parser, Debug)]
#[command(name = "splitledger")]
#[command(about = "Settle shared expenses with as few payments as possible")]
struct Cli {
    /// Configuration file (also read from `SPLITLEDGER_CONFIG`).
    #[arg(long, global = true, env = "SPLITLEDGER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print each participant's net balance.
    Balances(ReportArgs),
    /// Print balances and the transfers that settle them.
    Settle(ReportArgs),
}

#[derive(Args, Debug)]
struct ReportArgs {
    /// Project export (JSON).
    file: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.error_code());
            return ExitCode::from(err.exit_code());
        }
    };

    init_tracing(&config.logging);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %format!("{err:#}"), "command failed");
            eprintln!("{}", error_line(&err));
            let code = err
                .downcast_ref::<AppError>()
                .map_or(1, AppError::exit_code);
            ExitCode::from(code)
        }
    }
}

/// `error[CODE]: message` for application errors, `error: message` otherwise.
fn error_line(err: &anyhow::Error) -> String {
    match err.downcast_ref::<AppError>() {
        Some(app) => format!("error[{}]: {err:#}", app.error_code()),
        None => format!("error: {err:#}"),
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, AppError> {
    match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    let store = InMemoryExpenseStore::new();
    let planner = SettlementPlanner::from_config(&config.settlement);

    match command {
        Command::Balances(args) => {
            let project = ProjectExport::read(&args.file)?.load_into(&store)?;
            info!(project = %project.name, "computing balances");

            let service = SettlementService::new(&store, planner);
            let balances = service
                .balances(&project.id)?
                .rounded(planner.display_scale());

            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&balances)?),
                Format::Text => print!("{}", output::balances_text(&balances)),
            }
        }
        Command::Settle(args) => {
            let project = ProjectExport::read(&args.file)?.load_into(&store)?;
            info!(project = %project.name, "settling project");

            let service = SettlementService::new(&store, planner);
            let report = service.settle(&project.id)?;

            match args.format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => print!("{}", output::settlement_text(&report)),
            }
        }
    }

    Ok(())
}
