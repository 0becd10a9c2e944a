#![forbid(unsafe_code)]

mod actions;
mod commands;

use clap::{ArgAction, Parser, Subcommand};
use funnelbook_ledger::{
    resolve_data_dir, ExitCode, Ledger, LedgerError, LedgerErrorCode, ENV_FUNNELBOOK_LOG,
};
use funnelbook_store::LocalFsStore;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub json: bool,
}

#[derive(Parser)]
#[command(name = "funnelbook")]
#[command(about = "Append-only sales funnel ledger")]
struct Cli {
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    /// Free-text operator identity; carried on every record as
    /// comercial_id. Required by commands that write.
    #[arg(long, global = true)]
    operator: Option<String>,
    /// Store root directory. Falls back to FUNNELBOOK_DATA_DIR, then the
    /// XDG data home.
    #[arg(long, global = true)]
    data_root: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Opportunity {
        #[command(subcommand)]
        command: commands::OpportunityCommand,
    },
    Plan {
        #[command(subcommand)]
        command: commands::PlanCommand,
    },
    Visit {
        #[command(subcommand)]
        command: commands::VisitCommand,
    },
    Report {
        #[command(subcommand)]
        command: commands::ReportCommand,
    },
    /// Valid products, stages, statuses, and collection names.
    Catalog,
}

fn main() -> ProcessExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(cli) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success as u8),
        Err(err) => {
            eprintln!("{err}");
            ProcessExitCode::from(exit_code_for(&err) as u8)
        }
    }
}

fn run(cli: Cli) -> Result<(), LedgerError> {
    let data_root = cli.data_root.clone().unwrap_or_else(resolve_data_dir);
    let ledger = Ledger::new(LocalFsStore::new(data_root));
    let output_mode = OutputMode { json: cli.json };
    let operator = cli.operator.as_deref();
    match cli.command {
        Commands::Opportunity { command } => {
            actions::opportunity(&ledger, operator, command, output_mode)
        }
        Commands::Plan { command } => actions::plan(&ledger, operator, command, output_mode),
        Commands::Visit { command } => actions::visit(&ledger, operator, command, output_mode),
        Commands::Report { command } => actions::report(&ledger, command, output_mode),
        Commands::Catalog => actions::catalog(output_mode),
    }
}

fn exit_code_for(err: &LedgerError) -> ExitCode {
    match err.code {
        LedgerErrorCode::Validation => ExitCode::Validation,
        LedgerErrorCode::Store => ExitCode::DependencyFailure,
        _ => ExitCode::Internal,
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env(ENV_FUNNELBOOK_LOG)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
