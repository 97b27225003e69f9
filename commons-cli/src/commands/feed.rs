//! Feed command - proposal feeds per viewer role

use anyhow::Result;

use commons_core::services::OwnerFeedItem;
use commons_core::{Proposal, ProposalStatus, UserRole};

use super::{current_user, get_context};
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    match current_user(&ctx)? {
        Some(user) if user.role == UserRole::SuperAdmin => {
            let feed = ctx.feed_service.admin_feed()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                print_proposals(&feed, true);
            }
        }
        Some(user) if user.role == UserRole::Owner => {
            let feed = ctx.feed_service.owner_feed(&user)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                print_owner_feed(&feed);
            }
        }
        // Stewards and visitors see the public feed
        _ => {
            let feed = ctx.feed_service.public_feed()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&feed)?);
            } else {
                print_proposals(&feed, false);
            }
        }
    }

    Ok(())
}

fn status_label(p: &Proposal) -> &'static str {
    match p.status {
        ProposalStatus::Active => "active",
        ProposalStatus::Closed => "closed",
    }
}

fn print_proposals(proposals: &[Proposal], show_hidden_flag: bool) {
    if proposals.is_empty() {
        output::info("No proposals");
        return;
    }

    let mut header = vec!["Id", "Title", "Status", "Votes", "Deadline"];
    if show_hidden_flag {
        header.push("Visible");
    }
    let mut table = output::table(&header);

    for p in proposals {
        let mut row = vec![
            p.id.clone(),
            p.title.clone(),
            status_label(p).to_string(),
            p.total_votes.to_string(),
            p.deadline.format("%Y-%m-%d").to_string(),
        ];
        if show_hidden_flag {
            row.push(if p.is_visible { "yes" } else { "no" }.to_string());
        }
        table.add_row(row);
    }
    println!("{}", table);
}

fn print_owner_feed(feed: &[OwnerFeedItem]) {
    if feed.is_empty() {
        output::info("No proposals");
        return;
    }

    for item in feed {
        let p = &item.proposal;
        println!();
        println!("{}  [{}] {}", p.id, status_label(p), p.title);
        println!("  {}", p.description);
        for option in &p.options {
            if item.has_voted {
                println!("  {}: {} ({})", option.id, option.label, option.count);
            } else {
                println!("  {}: {}", option.id, option.label);
            }
        }
        if item.has_voted {
            let names: Vec<&str> = item.voters.iter().map(|v| v.name.as_str()).collect();
            println!("  Voted ({}): {}", item.voters.len(), names.join(", "));
        }
    }
}
