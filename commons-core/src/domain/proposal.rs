//! Proposal domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state of a proposal: active → closed, closed is terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Active,
    Closed,
}

/// One voting option of a proposal
///
/// The option set is fixed at creation: ids and counts are immutable from
/// the outside, only labels may be edited and counts change only through
/// `cast_vote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalOption {
    pub id: String,
    pub label: String,
    pub count: u64,
}

fn default_visible() -> bool {
    true
}

/// A community decision item with a fixed option set and a deadline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub deadline: DateTime<Utc>,
    pub options: Vec<ProposalOption>,
    pub status: ProposalStatus,
    pub total_votes: u64,
    /// Ids of users who have voted; membership checks keep voting idempotent
    pub voted_user_ids: Vec<String>,
    #[serde(default = "default_visible")]
    pub is_visible: bool,
    /// Display sort key, ascending; ties broken by insertion order
    #[serde(default)]
    pub order: i64,
}

impl Proposal {
    /// Create an active proposal with zeroed counts
    ///
    /// Option ids are assigned positionally (`opt1`, `opt2`, ...), matching
    /// the stored layout of the legacy web portal.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        deadline: DateTime<Utc>,
        option_labels: &[String],
        order: i64,
    ) -> Self {
        let options = option_labels
            .iter()
            .enumerate()
            .map(|(i, label)| ProposalOption {
                id: format!("opt{}", i + 1),
                label: label.clone(),
                count: 0,
            })
            .collect();

        Self {
            id: format!("v-{}", Uuid::new_v4()),
            title: title.into(),
            description: description.into(),
            created_at: Utc::now(),
            deadline,
            options,
            status: ProposalStatus::Active,
            total_votes: 0,
            voted_user_ids: Vec::new(),
            is_visible: true,
            order,
        }
    }

    /// True once the given user has voted on this proposal
    pub fn has_voted(&self, user_id: &str) -> bool {
        self.voted_user_ids.iter().any(|id| id == user_id)
    }

    /// Check the counting invariant: totalVotes equals the voted-set size
    /// equals the sum of option counts
    pub fn counts_consistent(&self) -> bool {
        let option_sum: u64 = self.options.iter().map(|o| o.count).sum();
        self.total_votes == option_sum && self.total_votes == self.voted_user_ids.len() as u64
    }
}

/// Partial update for proposal administration
///
/// Touches only title/description/deadline; status, counts, and the voted
/// set are never affected by an edit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

impl ProposalUpdate {
    /// Apply the update in place, leaving unset fields untouched
    pub fn apply(&self, proposal: &mut Proposal) {
        if let Some(title) = &self.title {
            proposal.title = title.clone();
        }
        if let Some(description) = &self.description {
            proposal.description = description.clone();
        }
        if let Some(deadline) = self.deadline {
            proposal.deadline = deadline;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Proposal {
        Proposal::new(
            "地下车库增加新能源汽车充电桩",
            "计划在B2层F区增设20个快充桩。",
            Utc::now() + Duration::days(7),
            &["同意".to_string(), "反对".to_string()],
            0,
        )
    }

    #[test]
    fn test_new_proposal_starts_clean() {
        let p = sample();
        assert_eq!(p.status, ProposalStatus::Active);
        assert_eq!(p.total_votes, 0);
        assert!(p.voted_user_ids.is_empty());
        assert!(p.is_visible);
        assert_eq!(p.options.len(), 2);
        assert_eq!(p.options[0].id, "opt1");
        assert!(p.counts_consistent());
    }

    #[test]
    fn test_update_never_touches_counts() {
        let mut p = sample();
        p.total_votes = 3;
        p.voted_user_ids = vec!["a".into(), "b".into(), "c".into()];
        p.options[0].count = 3;

        let update = ProposalUpdate {
            title: Some("修订后的标题".to_string()),
            ..ProposalUpdate::default()
        };
        update.apply(&mut p);

        assert_eq!(p.title, "修订后的标题");
        assert_eq!(p.total_votes, 3);
        assert_eq!(p.voted_user_ids.len(), 3);
        assert!(p.counts_consistent());
    }

    #[test]
    fn test_visibility_defaults_on_legacy_records() {
        // Records persisted before the visibility flag existed omit it
        let json = r#"{
            "id": "v-mock-0",
            "title": "t",
            "description": "d",
            "createdAt": "2024-01-01T00:00:00Z",
            "deadline": "2024-02-01T00:00:00Z",
            "options": [{"id": "opt1", "label": "同意", "count": 0}],
            "status": "active",
            "totalVotes": 0,
            "votedUserIds": []
        }"#;
        let p: Proposal = serde_json::from_str(json).unwrap();
        assert!(p.is_visible);
        assert_eq!(p.order, 0);
    }
}
