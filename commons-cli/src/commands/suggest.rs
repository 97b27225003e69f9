//! Suggest command - draft a proposal from a free-text topic

use anyhow::Result;
use colored::Colorize;

use super::get_context;

pub fn run(topic: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let draft = ctx.suggestion_service.suggest(topic);

    if json {
        println!("{}", serde_json::to_string_pretty(&draft)?);
        return Ok(());
    }

    println!("{}", draft.title.bold());
    println!("{}", draft.description);
    println!();
    for (i, option) in draft.options.iter().enumerate() {
        println!("  opt{}: {}", i + 1, option);
    }
    Ok(())
}
