//! Proposal administration commands

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Subcommand;

use commons_core::services::{LogEvent, NewProposal};
use commons_core::{Proposal, ProposalUpdate};

use super::{get_context, get_logger, log_event, require_login};
use crate::output;

#[derive(Subcommand)]
pub enum ProposalCommands {
    /// List all proposals, including hidden and closed ones
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a proposal
    ///
    /// Either pass --option at least twice, or pass --topic to draft the
    /// title, description, and options from a free-text topic.
    New {
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Voting deadline as YYYY-MM-DD (defaults to 7 days out)
        #[arg(long)]
        deadline: Option<String>,
        /// Option label, repeat for each option
        #[arg(long = "option")]
        options: Vec<String>,
        /// Draft the proposal from this topic instead of explicit fields
        #[arg(long, conflicts_with_all = ["title", "options"])]
        topic: Option<String>,
    },

    /// Close a proposal, freezing its results
    Close {
        /// Proposal id
        id: String,
    },

    /// Edit a proposal's title, description, or deadline
    Edit {
        /// Proposal id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// New deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
    },

    /// Relabel one voting option
    EditOption {
        /// Proposal id
        id: String,
        /// Option id (e.g., opt1)
        option_id: String,
        /// New label
        label: String,
    },

    /// Flip a proposal's visibility in the public feed
    Toggle {
        /// Proposal id
        id: String,
    },

    /// Reorder the feed; listed proposals get positions 0, 1, 2, ...
    Reorder {
        /// Proposal ids in the desired display order
        ids: Vec<String>,
    },
}

fn parse_deadline(input: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .with_context(|| format!("Invalid deadline {:?}, expected YYYY-MM-DD", input))?;
    let naive = date
        .and_hms_opt(23, 59, 59)
        .context("Invalid deadline time")?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
}

pub fn run(command: ProposalCommands) -> Result<()> {
    let ctx = get_context()?;
    let logger = get_logger();
    let actor = require_login(&ctx)?;

    match command {
        ProposalCommands::List { json } => {
            let proposals = ctx.proposal_service.all_proposals()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&proposals)?);
            } else {
                print_proposals(&proposals);
            }
        }
        ProposalCommands::New {
            title,
            description,
            deadline,
            options,
            topic,
        } => {
            let deadline = match deadline {
                Some(d) => parse_deadline(&d)?,
                None => Utc::now() + Duration::days(7),
            };

            let request = match topic {
                Some(topic) => {
                    let draft = ctx.suggestion_service.suggest(&topic);
                    output::info(&format!("Drafted from topic: {}", draft.title));
                    NewProposal {
                        title: draft.title,
                        description: draft.description,
                        deadline,
                        options: draft.options,
                    }
                }
                None => NewProposal {
                    title: title.context("Pass --title (or --topic to draft one)")?,
                    description,
                    deadline,
                    options,
                },
            };

            let proposal = ctx.proposal_service.create_proposal(&actor, &request)?;
            log_event(&logger, LogEvent::new("proposal_created"));
            output::success(&format!("Created {} ({})", proposal.title, proposal.id));
        }
        ProposalCommands::Close { id } => {
            let closed = ctx.proposal_service.close_proposal(&actor, &id)?;
            log_event(&logger, LogEvent::new("proposal_closed"));
            output::success(&format!(
                "Closed {} with {} votes",
                closed.title, closed.total_votes
            ));
        }
        ProposalCommands::Edit {
            id,
            title,
            description,
            deadline,
        } => {
            let update = ProposalUpdate {
                title,
                description,
                deadline: deadline.as_deref().map(parse_deadline).transpose()?,
            };
            let edited = ctx.proposal_service.edit_proposal(&actor, &id, &update)?;
            output::success(&format!("Updated {}", edited.title));
        }
        ProposalCommands::EditOption {
            id,
            option_id,
            label,
        } => {
            let edited = ctx
                .proposal_service
                .edit_option_label(&actor, &id, &option_id, &label)?;
            output::success(&format!("Relabeled {} on {}", option_id, edited.title));
        }
        ProposalCommands::Toggle { id } => {
            let toggled = ctx.proposal_service.toggle_visibility(&actor, &id)?;
            if toggled.is_visible {
                output::success(&format!("{} is now visible", toggled.title));
            } else {
                output::success(&format!("{} is now hidden", toggled.title));
            }
        }
        ProposalCommands::Reorder { ids } => {
            ctx.proposal_service.reorder_proposals(&actor, &ids)?;
            output::success("Feed reordered");
        }
    }

    Ok(())
}

fn print_proposals(proposals: &[Proposal]) {
    if proposals.is_empty() {
        output::info("No proposals");
        return;
    }

    let mut table = output::table(&[
        "Id", "Title", "Status", "Votes", "Deadline", "Visible", "Order",
    ]);
    for p in proposals {
        table.add_row(vec![
            p.id.clone(),
            p.title.clone(),
            format!("{:?}", p.status).to_lowercase(),
            p.total_votes.to_string(),
            p.deadline.format("%Y-%m-%d").to_string(),
            if p.is_visible { "yes" } else { "no" }.to_string(),
            p.order.to_string(),
        ]);
    }
    println!("{}", table);
}
