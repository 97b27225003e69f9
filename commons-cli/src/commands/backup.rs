//! Backup commands - snapshot and list the portal state

use anyhow::Result;
use clap::Subcommand;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a backup of the persisted state
    Create {
        /// Keep at most this many backups, deleting the oldest
        #[arg(long)]
        max: Option<usize>,
    },

    /// List existing backups, newest first
    List,
}

/// Render an archive size in the largest unit that keeps it above 1
fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = "bytes";
    for next in ["KB", "MB", "GB"] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    if unit == "bytes" {
        format!("{} bytes", bytes)
    } else {
        format!("{:.1} {}", value, unit)
    }
}

pub fn run(command: BackupCommands) -> Result<()> {
    let ctx = get_context()?;

    match command {
        BackupCommands::Create { max } => {
            let metadata = ctx.backup_service.create(max)?;
            output::success(format!(
                "Created {} ({})",
                metadata.name,
                format_size(metadata.size_bytes)
            ));
        }
        BackupCommands::List => {
            let backups = ctx.backup_service.list()?;
            if backups.is_empty() {
                output::info("No backups");
                return Ok(());
            }

            let mut table = output::table(&["Name", "Created", "Size"]);
            for b in &backups {
                table.add_row(vec![
                    b.name.clone(),
                    b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                    format_size(b.size_bytes),
                ]);
            }
            println!("{}", table);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_picks_the_right_unit() {
        assert_eq!(format_size(0), "0 bytes");
        assert_eq!(format_size(512), "512 bytes");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.0 GB");
    }
}
