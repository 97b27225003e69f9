//! Demo mode commands
//!
//! Demo mode seeds the portal with sample residents and proposals on first
//! use, for trying the portal out without touching real data.

use anyhow::{Context, Result};
use clap::Subcommand;

use commons_core::Config;

use super::get_data_dir;
use crate::output;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode (seeds sample data on next startup of an empty portal)
    On,
    /// Disable demo mode (existing data is kept)
    Off,
    /// Show whether demo mode is enabled
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
    let mut config = Config::load(&data_dir)?;

    match command.unwrap_or(DemoCommands::Status) {
        DemoCommands::On => {
            config.enable_demo_mode();
            config.save(&data_dir)?;
            output::success("Demo mode enabled");
            output::info("An empty portal will be seeded with sample data on next use");
        }
        DemoCommands::Off => {
            config.disable_demo_mode();
            config.save(&data_dir)?;
            output::success("Demo mode disabled");
        }
        DemoCommands::Status => {
            if config.demo_mode {
                output::info("Demo mode is enabled");
            } else {
                output::info("Demo mode is disabled");
            }
        }
    }

    Ok(())
}
