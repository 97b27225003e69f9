//! Commons CLI - community governance in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{auth, backup, demo, feed, logs, proposals, status, suggest, users, vote};

/// Commons - community governance in your terminal
#[derive(Parser)]
#[command(name = "cg", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show portal statistics and session info
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log in with a phone number
    Login {
        /// Phone number of the account
        phone: String,
        /// Password (prompted if not given)
        #[arg(long)]
        password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Register a new owner account, pending verification
    Register {
        /// Display name
        name: String,
        /// Phone number used as login identifier
        phone: String,
        /// Residence building
        #[arg(long)]
        building: String,
        /// Residence unit
        #[arg(long)]
        unit: String,
    },

    /// Change the password of the logged-in account
    Passwd,

    /// Show the proposal feed for the current viewer
    Feed {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cast a vote on a proposal
    Vote {
        /// Proposal id
        proposal_id: String,
        /// Option id (e.g., opt1)
        option_id: String,
    },

    /// Manage users and roles
    Users {
        #[command(subcommand)]
        command: users::UserCommands,
    },

    /// Manage proposals
    Proposals {
        #[command(subcommand)]
        command: proposals::ProposalCommands,
    },

    /// Draft a proposal from a free-text topic
    Suggest {
        /// Topic to draft a proposal for
        topic: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage backups of the portal state
    Backup {
        #[command(subcommand)]
        command: backup::BackupCommands,
    },

    /// Show recent portal events
    Logs {
        /// Number of entries to show
        #[arg(long, default_value = "20")]
        limit: usize,
        /// Only show entries with errors
        #[arg(long)]
        errors: bool,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// Export users to a JSON file
    Export {
        /// Output file (defaults to community_users_export_<date>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import users from a JSON file
    Import {
        /// Path to a JSON array of partial user records
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Status { json } => status::run(json),
        Commands::Login { phone, password } => auth::login(&phone, password),
        Commands::Logout => auth::logout(),
        Commands::Register {
            name,
            phone,
            building,
            unit,
        } => auth::register(&name, &phone, &building, &unit),
        Commands::Passwd => auth::change_password(),
        Commands::Feed { json } => feed::run(json),
        Commands::Vote {
            proposal_id,
            option_id,
        } => vote::run(&proposal_id, &option_id),
        Commands::Users { command } => users::run(command),
        Commands::Proposals { command } => proposals::run(command),
        Commands::Suggest { topic, json } => suggest::run(&topic, json),
        Commands::Backup { command } => backup::run(command),
        Commands::Logs { limit, errors } => logs::run(limit, errors),
        Commands::Demo { command } => demo::run(command),
        Commands::Export { out } => users::export(out),
        Commands::Import { file } => users::import(&file),
    }
}
