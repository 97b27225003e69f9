//! Proposal suggestion model

use serde::{Deserialize, Serialize};

/// A drafted proposal returned by the text-suggestion collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalSuggestion {
    pub title: String,
    pub description: String,
    /// 2 to 4 option labels, in display order
    pub options: Vec<String>,
}

impl ProposalSuggestion {
    /// True when the option count is within the contract range
    pub fn is_well_formed(&self) -> bool {
        !self.title.trim().is_empty() && (2..=4).contains(&self.options.len())
    }
}
