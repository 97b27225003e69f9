//! Logs command - inspect recorded portal events

use anyhow::{Context, Result};
use colored::Colorize;

use commons_core::services::{EntryPoint, LoggingService};

use super::get_data_dir;
use crate::output;

pub fn run(limit: usize, errors: bool) -> Result<()> {
    let data_dir = get_data_dir();
    let logger = LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION"))
        .context("Failed to open the event log")?;

    let entries = if errors {
        logger.get_errors(limit)?
    } else {
        logger.get_recent(limit)?
    };

    if entries.is_empty() {
        output::info("No log entries");
        return Ok(());
    }

    for entry in &entries {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S");
        let mut line = format!("{}  {}", timestamp, entry.event);
        if let Some(command) = &entry.command {
            line.push_str(&format!("  ({})", command));
        }
        if let Some(role) = &entry.actor_role {
            line.push_str(&format!("  [{}]", role));
        }
        if let Some(message) = &entry.error_message {
            println!("{}  {}", line, message.red());
        } else {
            println!("{}", line);
        }
    }

    println!();
    output::info(&format!(
        "{} entries total, log at {:?}",
        logger.count()?,
        logger.log_path()
    ));
    Ok(())
}
