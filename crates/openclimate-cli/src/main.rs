//! OpenClimate CLI
//!
//! Command-line gateway over the keyed entity store: record CRUD per kind
//! plus the aggregator's actor views. Every command prints JSON on stdout.

use clap::{Parser, Subcommand};
use openclimate_core::errors::{ExError, ExErrorKind};
use openclimate_core::logging_facility::{self, Profile};
use openclimate_core::{log_op_end, log_op_error, log_op_start};

mod commands;

use commands::GlobalArgs;

#[derive(Debug, Parser)]
#[command(name = "openclimate")]
#[command(about = "OpenClimate - climate actor records and dashboards", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    /// Logging profile (dev, prod, test); logging is off when omitted
    #[arg(long, global = true)]
    log_profile: Option<Profile>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and declare every partition
    Init,
    /// Nation-state records
    Country(commands::records::CountryArgs),
    /// Subnational region records
    State(commands::records::StateArgs),
    /// Multinational company records
    Company(commands::records::CompanyArgs),
    /// Climate pledges (created against an actor)
    Pledge(commands::records::PledgeArgs),
    /// Company assets
    Asset(commands::records::AssetArgs),
    /// User accounts
    User(commands::records::UserArgs),
    /// Dashboards, reviews and the nation-state drill-down
    Actor(commands::actor::ActorArgs),
}

impl Commands {
    fn op(&self) -> &'static str {
        match self {
            Commands::Init => "cli_init",
            Commands::Country(_) => "cli_country",
            Commands::State(_) => "cli_state",
            Commands::Company(_) => "cli_company",
            Commands::Pledge(_) => "cli_pledge",
            Commands::Asset(_) => "cli_asset",
            Commands::User(_) => "cli_user",
            Commands::Actor(_) => "cli_actor",
        }
    }
}

fn run(global: &GlobalArgs, command: Commands) -> Result<serde_json::Value, ExError> {
    let op = command.op();
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = match command {
        Commands::Init => commands::init::execute(global),
        Commands::Country(args) => commands::records::execute_country(global, args),
        Commands::State(args) => commands::records::execute_state(global, args),
        Commands::Company(args) => commands::records::execute_company(global, args),
        Commands::Pledge(args) => commands::records::execute_pledge(global, args),
        Commands::Asset(args) => commands::records::execute_asset(global, args),
        Commands::User(args) => commands::records::execute_user(global, args),
        Commands::Actor(args) => commands::actor::execute(global, args),
    };

    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = start.elapsed().as_millis() as u64);
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = start.elapsed().as_millis() as u64);
        }
    }
    result
}

/// Process exit status for an error kind
fn exit_code(kind: ExErrorKind) -> i32 {
    match kind {
        ExErrorKind::InvalidInput => 2,
        ExErrorKind::NotFound => 3,
        ExErrorKind::DataCorruption => 4,
        _ => 1,
    }
}

fn main() {
    let cli = Cli::parse();
    if let Some(profile) = cli.log_profile {
        logging_facility::init(profile);
    }

    let result = run(&cli.global, cli.command).and_then(|value| commands::print_json(&value));

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        if let Some(cause) = e.source_error() {
            eprintln!("  caused by: {}", cause);
        }
        std::process::exit(exit_code(e.kind()));
    }
}
