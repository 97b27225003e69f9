//! User administration commands

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;

use commons_core::services::LogEvent;
use commons_core::{ImportRecord, User, UserRole, UserStatus, UserUpdate};

use super::{get_context, get_logger, log_event, require_login};
use crate::output;

#[derive(Subcommand)]
pub enum UserCommands {
    /// List all users
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List pending owners awaiting verification by the current viewer
    Pending,

    /// List pending owners whose building has no steward
    Orphaned {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Approve or reject a pending owner
    Verify {
        /// User id to settle
        id: String,
        /// Reject instead of approve
        #[arg(long)]
        reject: bool,
    },

    /// Promote an owner to building steward
    Promote {
        /// User id to promote
        id: String,
        /// Building the steward will manage
        #[arg(long)]
        building: String,
    },

    /// Demote a building steward back to owner
    Demote {
        /// User id to demote
        id: String,
    },

    /// Permanently remove a user
    Remove {
        /// User id to remove
        id: String,
    },

    /// Edit a user's profile fields
    Edit {
        /// User id to edit
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        building: Option<String>,
        #[arg(long)]
        unit: Option<String>,
    },
}

pub fn run(command: UserCommands) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let actor = require_login(&ctx)?;

    match command {
        UserCommands::List { json } => {
            let users = ctx.directory_service.all_users()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&users)?);
            } else {
                print_users(&users);
            }
        }
        UserCommands::Pending => {
            let building = match (&actor.role, &actor.managed_building) {
                (UserRole::BuildingAdmin, Some(b)) => b.clone(),
                _ => anyhow::bail!("Only a building steward has a pending queue"),
            };
            let pending = ctx.verification_service.pending_for_building(&building)?;
            print_users(&pending);
        }
        UserCommands::Orphaned { json } => {
            let orphaned = ctx.verification_service.orphaned_pending_owners()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&orphaned)?);
            } else if orphaned.is_empty() {
                output::info("No orphaned pending owners");
            } else {
                output::warning("Pending owners without a steward, needing direct attention:");
                print_users(&orphaned);
            }
        }
        UserCommands::Verify { id, reject } => {
            let settled = ctx.verification_service.verify_user(&actor, &id, !reject)?;
            log_event(
                &logger,
                LogEvent::new("user_verified").with_actor_role(format!("{:?}", actor.role)),
            );
            match settled.status {
                UserStatus::Verified => {
                    output::success(&format!("{} verified", settled.name));
                }
                _ => output::warning(&format!("{} rejected", settled.name)),
            }
        }
        UserCommands::Promote { id, building } => {
            let promoted = ctx.directory_service.promote(&actor, &id, &building)?;
            output::success(&format!(
                "{} is now the steward of {}",
                promoted.name, building
            ));
        }
        UserCommands::Demote { id } => {
            let demoted = ctx.directory_service.demote(&actor, &id)?;
            output::success(&format!("{} is now a regular owner", demoted.name));
        }
        UserCommands::Remove { id } => {
            ctx.directory_service.remove_user(&actor, &id)?;
            log_event(
                &logger,
                LogEvent::new("user_removed").with_actor_role(format!("{:?}", actor.role)),
            );
            output::success(&format!("User {} removed", id));
        }
        UserCommands::Edit {
            id,
            name,
            phone,
            building,
            unit,
        } => {
            let update = UserUpdate {
                name,
                phone_number: phone,
                building,
                unit,
            };
            let edited = ctx.directory_service.edit_user(&actor, &id, &update)?;
            output::success(&format!("Updated {}", edited.name));
        }
    }

    Ok(())
}

/// Export users (minus the super admin) to a JSON file
pub fn export(out: Option<PathBuf>) -> Result<()> {
    let ctx = get_context()?;
    let actor = require_login(&ctx)?;

    let users = ctx.directory_service.export_users(&actor)?;
    let path = out.unwrap_or_else(|| {
        PathBuf::from(format!(
            "community_users_export_{}.json",
            Utc::now().format("%Y-%m-%d")
        ))
    });

    std::fs::write(&path, serde_json::to_string_pretty(&users)?)
        .with_context(|| format!("Failed to write {:?}", path))?;
    output::success(&format!("Exported {} users to {:?}", users.len(), path));
    Ok(())
}

/// Import users from a JSON array of partial records
pub fn import(file: &Path) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let actor = require_login(&ctx)?;

    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let records: Vec<ImportRecord> =
        serde_json::from_str(&content).context("Import file must be a JSON array of records")?;

    let summary = ctx.directory_service.import_users(&actor, &records)?;
    log_event(&logger, LogEvent::new("users_imported"));
    output::success(&format!(
        "Imported {} users ({} skipped)",
        summary.inserted, summary.skipped
    ));
    Ok(())
}

fn print_users(users: &[User]) {
    if users.is_empty() {
        output::info("No users");
        return;
    }

    let mut table = output::table(&[
        "Id", "Name", "Role", "Status", "Building", "Unit", "Phone", "Manages",
    ]);
    for u in users {
        table.add_row(vec![
            u.id.clone(),
            u.name.clone(),
            format!("{:?}", u.role),
            format!("{:?}", u.status),
            u.building.clone(),
            u.unit.clone(),
            u.phone_number.clone(),
            u.managed_building.clone().unwrap_or_default(),
        ]);
    }
    println!("{}", table);
}
