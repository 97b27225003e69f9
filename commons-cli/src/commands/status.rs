//! Status command - portal statistics and session info

use anyhow::Result;
use colored::Colorize;

use super::{current_user, get_context};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let stats = ctx.feed_service.stats()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Community Portal Status".bold());
    println!();

    let mut table = output::table(&["Metric", "Value"]);
    table.add_row(vec![
        "Verified owners",
        &stats.verified_owner_count.to_string(),
    ]);
    table.add_row(vec!["Proposals", &stats.proposal_count.to_string()]);
    table.add_row(vec!["Votes cast", &stats.total_votes_cast.to_string()]);
    table.add_row(vec![
        "Participation",
        &format!("{}%", stats.participation_rate),
    ]);
    println!("{}", table);
    println!();

    match current_user(&ctx)? {
        Some(user) => output::info(&format!(
            "Logged in as {} ({:?}, {} {})",
            user.name, user.role, user.building, user.unit
        )),
        None => output::info("Not logged in"),
    }

    Ok(())
}
