//! CLI command implementations

pub mod auth;
pub mod backup;
pub mod demo;
pub mod feed;
pub mod logs;
pub mod proposals;
pub mod status;
pub mod suggest;
pub mod users;
pub mod vote;

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use commons_core::services::{EntryPoint, LogEvent, LoggingService};
use commons_core::{CommonsContext, User};

/// Stored login session for the CLI
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Session {
    user_id: String,
}

/// Get the data directory from environment or default
pub fn get_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("COMMONS_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .expect("Could not find home directory")
            .join(".commons")
    }
}

/// Get or create the portal context
pub fn get_context() -> Result<CommonsContext> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
    CommonsContext::new(&data_dir).context("Failed to initialize portal context")
}

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let data_dir = get_data_dir();
    std::fs::create_dir_all(&data_dir).ok()?;
    LoggingService::new(&data_dir, EntryPoint::Cli, env!("CARGO_PKG_VERSION")).ok()
}

/// Log an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.log(event);
    }
}

fn session_path() -> PathBuf {
    get_data_dir().join("session.json")
}

/// Persist the logged-in user id
pub fn save_session(user_id: &str) -> Result<()> {
    let session = Session {
        user_id: user_id.to_string(),
    };
    std::fs::write(session_path(), serde_json::to_string_pretty(&session)?)?;
    Ok(())
}

/// Forget the stored session
pub fn clear_session() -> Result<()> {
    let path = session_path();
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Resolve the stored session to a user, if any
///
/// A stale session pointing at a removed user counts as logged out.
pub fn current_user(ctx: &CommonsContext) -> Result<Option<User>> {
    let path = session_path();
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    let session: Session = match serde_json::from_str(&content) {
        Ok(s) => s,
        Err(_) => return Ok(None),
    };
    let users = ctx.directory_service.all_users()?;
    Ok(users.into_iter().find(|u| u.id == session.user_id))
}

/// Resolve the stored session or fail with a login hint
pub fn require_login(ctx: &CommonsContext) -> Result<User> {
    current_user(ctx)?.context("Not logged in. Run `cg login <phone>` first.")
}
