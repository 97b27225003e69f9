//! Suggestion service - AI-assisted proposal drafting with fixed fallback
//!
//! Wraps the suggestion provider port. The provider is called exactly once
//! per topic, never retried; any failure yields the fixed fallback draft so
//! callers always get a usable suggestion.

use std::sync::Arc;

use crate::domain::ProposalSuggestion;
use crate::ports::SuggestionProvider;

/// Placeholder description used when the provider fails
const FALLBACK_DESCRIPTION: &str = "请针对此事项进行投票表决。";

/// Default option set used when the provider fails
const FALLBACK_OPTIONS: [&str; 3] = ["同意", "反对", "弃权"];

/// Proposal drafting service
pub struct SuggestionService {
    provider: Option<Arc<dyn SuggestionProvider>>,
}

impl SuggestionService {
    pub fn new(provider: Option<Arc<dyn SuggestionProvider>>) -> Self {
        Self { provider }
    }

    /// The fixed draft used when no provider is configured or it fails
    pub fn fallback(topic: &str) -> ProposalSuggestion {
        ProposalSuggestion {
            title: topic.to_string(),
            description: FALLBACK_DESCRIPTION.to_string(),
            options: FALLBACK_OPTIONS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Draft a proposal for the given topic
    ///
    /// Infallible from the caller's perspective: provider errors collapse
    /// into the fallback draft.
    pub fn suggest(&self, topic: &str) -> ProposalSuggestion {
        match &self.provider {
            Some(provider) => provider.suggest(topic).unwrap_or_else(|_| Self::fallback(topic)),
            None => Self::fallback(topic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::result::{Error, Result};

    struct FailingProvider;

    impl SuggestionProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        fn suggest(&self, _topic: &str) -> Result<ProposalSuggestion> {
            Err(Error::Suggestion("connection timed out".to_string()))
        }
    }

    struct CannedProvider;

    impl SuggestionProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        fn suggest(&self, topic: &str) -> Result<ProposalSuggestion> {
            Ok(ProposalSuggestion {
                title: format!("关于{}的议案", topic),
                description: "详细说明。".to_string(),
                options: vec!["同意".to_string(), "反对".to_string()],
            })
        }
    }

    #[test]
    fn test_provider_failure_falls_back() {
        let service = SuggestionService::new(Some(Arc::new(FailingProvider)));
        let draft = service.suggest("电梯广告收益");
        assert_eq!(draft.title, "电梯广告收益");
        assert_eq!(draft.options.len(), 3);
    }

    #[test]
    fn test_missing_provider_falls_back() {
        let service = SuggestionService::new(None);
        let draft = service.suggest("电梯广告收益");
        assert_eq!(draft.description, FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_healthy_provider_passes_through() {
        let service = SuggestionService::new(Some(Arc::new(CannedProvider)));
        let draft = service.suggest("电梯广告收益");
        assert_eq!(draft.title, "关于电梯广告收益的议案");
        assert_eq!(draft.options.len(), 2);
    }
}
