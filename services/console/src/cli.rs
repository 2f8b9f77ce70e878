use bvb_registration::error::AppError;
use clap::{Parser, Subcommand};

use crate::admin::{run_add, run_browse, run_export, run_list, ExportArgs, ListArgs};
use crate::desk::{run_lookup, run_register, run_verify, LookupArgs, VerifyArgs};
use crate::infra::{bootstrap, DraftArgs};

#[derive(Parser, Debug)]
#[command(
    name = "bvb-registration",
    about = "Register, look up, verify and administer BVB event registrations",
    version
)]
struct Cli {
    /// Override REGISTRATION_API_BASE for this invocation
    #[arg(long, global = true)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a new registration; missing fields are prompted for
    Register(DraftArgs),
    /// Find a registration by KEN
    Lookup(LookupArgs),
    /// Verify a registration with the contact number used to register
    Verify(VerifyArgs),
    /// Administrative dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AdminCommand {
    /// Print statistics and the filtered registrations table
    List(ListArgs),
    /// Interactive search with debounced filtering
    Browse,
    /// Register an attendee on their behalf
    Add(DraftArgs),
    /// Download the spreadsheet export
    Export(ExportArgs),
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let console = bootstrap(cli.api_base)?;

    match cli.command {
        Command::Register(args) => run_register(&console, args).await,
        Command::Lookup(args) => run_lookup(&console, args).await,
        Command::Verify(args) => run_verify(&console, args).await,
        Command::Admin { command } => match command {
            AdminCommand::List(args) => run_list(&console, args).await,
            AdminCommand::Browse => run_browse(&console).await,
            AdminCommand::Add(args) => run_add(&console, args).await,
            AdminCommand::Export(args) => run_export(&console, args).await,
        },
    }
}
