//! Vote command - cast a vote as a verified owner

use anyhow::Result;

use commons_core::services::LogEvent;

use super::{get_context, get_logger, log_event, require_login};
use crate::output;

pub fn run(proposal_id: &str, option_id: &str) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let user = require_login(&ctx)?;

    let already_voted = ctx
        .proposal_service
        .all_proposals()?
        .iter()
        .any(|p| p.id == proposal_id && p.has_voted(&user.id));

    let proposal = ctx.proposal_service.cast_vote(&user, proposal_id, option_id)?;

    if already_voted {
        output::warning(&format!("Already voted on {}, nothing changed", proposal.title));
    } else {
        log_event(&logger, LogEvent::new("vote_cast").with_command("vote"));
        output::success(&format!(
            "Vote recorded on {} ({} votes so far)",
            proposal.title, proposal.total_votes
        ));
    }
    Ok(())
}
