//! Auth commands - login, logout, register, passwd

use anyhow::Result;
use dialoguer::Password;

use commons_core::services::{LogEvent, NewRegistration};

use super::{clear_session, get_context, get_logger, log_event, require_login, save_session};
use crate::output;

pub fn login(phone: &str, password: Option<String>) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let password = match password {
        Some(p) => p,
        None => Password::new().with_prompt("Password").interact()?,
    };

    match ctx.auth_service.login(phone, &password) {
        Ok(user) => {
            save_session(&user.id)?;
            log_event(&logger, LogEvent::new("login_succeeded"));
            output::success(&format!("Logged in as {} ({:?})", user.name, user.role));
            Ok(())
        }
        Err(e) => {
            log_event(
                &logger,
                LogEvent::new("login_failed").with_error(e.to_string()),
            );
            Err(e.into())
        }
    }
}

pub fn logout() -> Result<()> {
    clear_session()?;
    output::info("Logged out");
    Ok(())
}

pub fn register(name: &str, phone: &str, building: &str, unit: &str) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();

    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    let user = ctx.auth_service.register(&NewRegistration {
        name: name.to_string(),
        phone_number: phone.to_string(),
        password,
        building: building.to_string(),
        unit: unit.to_string(),
    })?;

    log_event(&logger, LogEvent::new("user_registered"));
    output::success(&format!(
        "Registered {} (id {}), awaiting verification by the building steward",
        user.name, user.id
    ));
    Ok(())
}

pub fn change_password() -> Result<()> {
    let ctx = get_context()?;
    let user = require_login(&ctx)?;

    let password = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm new password", "Passwords do not match")
        .interact()?;

    ctx.auth_service.change_password(&user.id, &password)?;
    output::success("Password changed");
    Ok(())
}
