//! Suggestion provider port
//!
//! Defines the interface to the text-suggestion collaborator that drafts a
//! proposal (title, description, 2-4 options) from a free-text topic.

use crate::domain::result::Result;
use crate::domain::ProposalSuggestion;

/// Text-suggestion collaborator
///
/// Implementations are called once per topic and never retried; the
/// suggestion service substitutes a fixed fallback draft on any failure.
pub trait SuggestionProvider: Send + Sync {
    /// Provider name (e.g., "http", "fallback")
    fn name(&self) -> &str;

    /// Draft a proposal for the given topic
    fn suggest(&self, topic: &str) -> Result<ProposalSuggestion>;
}
