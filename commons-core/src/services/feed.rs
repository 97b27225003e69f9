//! Feed service - derived views and public statistics
//!
//! Every view here is a pure function over fresh snapshots of the two
//! collections, recomputed on each read and never cached. Feeds sort by the
//! display order key ascending; the stable sort preserves insertion order
//! between equal keys.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::result::Result;
use crate::domain::{Proposal, ProposalStatus, User, UserRole, UserStatus};
use crate::ports::Store;

/// One entry of the authenticated owner feed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerFeedItem {
    pub proposal: Proposal,
    pub has_voted: bool,
    /// Residents who voted on this proposal, revealed only once the viewer
    /// has voted themselves
    pub voters: Vec<VoterSummary>,
}

/// Projection of a voting resident shown to other voters
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterSummary {
    pub id: String,
    pub name: String,
    pub building: String,
    pub unit: String,
}

/// Aggregate numbers shown on the public landing page
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStats {
    /// Verified owners only; admins are excluded
    pub verified_owner_count: usize,
    pub total_votes_cast: u64,
    pub proposal_count: usize,
    /// Whole percentage, 0 when there is nothing to participate in
    pub participation_rate: u64,
}

/// Read-only views over the two collections
pub struct FeedService {
    store: Arc<dyn Store>,
}

impl FeedService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Active, visible proposals for the unauthenticated landing page
    pub fn public_feed(&self) -> Result<Vec<Proposal>> {
        let mut proposals: Vec<Proposal> = self
            .store
            .load_proposals()?
            .into_iter()
            .filter(|p| p.is_visible && p.status == ProposalStatus::Active)
            .collect();
        proposals.sort_by_key(|p| p.order);
        Ok(proposals)
    }

    /// Visible proposals, active and closed, annotated for one viewer
    pub fn owner_feed(&self, viewer: &User) -> Result<Vec<OwnerFeedItem>> {
        let users = self.store.load_users()?;
        let mut proposals: Vec<Proposal> = self
            .store
            .load_proposals()?
            .into_iter()
            .filter(|p| p.is_visible)
            .collect();
        proposals.sort_by_key(|p| p.order);

        Ok(proposals
            .into_iter()
            .map(|proposal| {
                let has_voted = proposal.has_voted(&viewer.id);
                let voters = if has_voted {
                    users
                        .iter()
                        .filter(|u| proposal.has_voted(&u.id))
                        .map(|u| VoterSummary {
                            id: u.id.clone(),
                            name: u.name.clone(),
                            building: u.building.clone(),
                            unit: u.unit.clone(),
                        })
                        .collect()
                } else {
                    Vec::new()
                };
                OwnerFeedItem {
                    proposal,
                    has_voted,
                    voters,
                }
            })
            .collect())
    }

    /// Every proposal including hidden ones, for the super admin
    pub fn admin_feed(&self) -> Result<Vec<Proposal>> {
        let mut proposals = self.store.load_proposals()?;
        proposals.sort_by_key(|p| p.order);
        Ok(proposals)
    }

    /// Aggregate public statistics
    pub fn stats(&self) -> Result<PublicStats> {
        let users = self.store.load_users()?;
        let proposals = self.store.load_proposals()?;

        let verified_owner_count = users
            .iter()
            .filter(|u| u.role == UserRole::Owner && u.status == UserStatus::Verified)
            .count();
        let total_votes_cast: u64 = proposals.iter().map(|p| p.total_votes).sum();
        let proposal_count = proposals.len();

        let denominator = verified_owner_count as u64 * proposal_count as u64;
        let participation_rate = if denominator == 0 {
            0
        } else {
            (total_votes_cast as f64 / denominator as f64 * 100.0).round() as u64
        };

        Ok(PublicStats {
            verified_owner_count,
            total_votes_cast,
            proposal_count,
            participation_rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::seed::{bootstrap_admin, demo_proposals, demo_users};
    use crate::adapters::MemoryStore;

    fn store_with_demo() -> Arc<MemoryStore> {
        let mut users = vec![bootstrap_admin("18688835658", "895600")];
        users.extend(demo_users());
        Arc::new(MemoryStore::with_data(users, demo_proposals()))
    }

    #[test]
    fn test_public_feed_excludes_closed_and_hidden() {
        let store = store_with_demo();
        let mut proposals = store.load_proposals().unwrap();
        proposals[0].status = ProposalStatus::Closed;
        proposals[1].is_visible = false;
        store.save_proposals(&proposals).unwrap();

        let service = FeedService::new(store);
        let feed = service.public_feed().unwrap();
        assert_eq!(feed.len(), proposals.len() - 2);
        assert!(feed
            .iter()
            .all(|p| p.is_visible && p.status == ProposalStatus::Active));
    }

    #[test]
    fn test_owner_feed_reveals_voters_only_after_voting() {
        let store = store_with_demo();
        let mut proposals = store.load_proposals().unwrap();
        proposals[0].voted_user_ids = vec!["u-b1-owner1".to_string()];
        proposals[0].total_votes = 1;
        proposals[0].options[0].count = 1;
        store.save_proposals(&proposals).unwrap();

        let users = store.load_users().unwrap();
        let service = FeedService::new(store);

        let voted = users.iter().find(|u| u.id == "u-b1-owner1").unwrap();
        let feed = service.owner_feed(voted).unwrap();
        let item = feed.iter().find(|i| i.has_voted).unwrap();
        assert_eq!(item.voters.len(), 1);
        assert_eq!(item.voters[0].name, "张伟");

        let not_voted = users.iter().find(|u| u.id == "u-b1-owner2").unwrap();
        let feed = service.owner_feed(not_voted).unwrap();
        assert!(feed.iter().all(|i| !i.has_voted && i.voters.is_empty()));
    }

    #[test]
    fn test_admin_feed_keeps_hidden_proposals() {
        let store = store_with_demo();
        let mut proposals = store.load_proposals().unwrap();
        proposals[2].is_visible = false;
        store.save_proposals(&proposals).unwrap();

        let service = FeedService::new(store);
        assert_eq!(service.admin_feed().unwrap().len(), proposals.len());
    }

    #[test]
    fn test_feeds_sort_by_order_ascending() {
        let store = store_with_demo();
        let service = FeedService::new(store);
        let feed = service.public_feed().unwrap();
        assert!(feed.windows(2).all(|w| w[0].order <= w[1].order));
    }

    #[test]
    fn test_participation_rate_with_zero_denominator() {
        // Demo data has no verified owners yet, only pending ones
        let service = FeedService::new(store_with_demo());
        let stats = service.stats().unwrap();
        assert_eq!(stats.verified_owner_count, 0);
        assert_eq!(stats.participation_rate, 0);
    }

    #[test]
    fn test_stats_count_verified_owners_only() {
        let store = store_with_demo();
        let mut users = store.load_users().unwrap();
        for u in users.iter_mut() {
            if u.id == "u-b1-owner1" || u.id == "u-b2-owner1" {
                u.status = UserStatus::Verified;
            }
        }
        store.save_users(&users).unwrap();

        let mut proposals = store.load_proposals().unwrap();
        let count = proposals.len() as u64;
        proposals[0].total_votes = 2;
        store.save_proposals(&proposals).unwrap();

        let service = FeedService::new(store);
        let stats = service.stats().unwrap();
        // Admins and the steward accounts never count
        assert_eq!(stats.verified_owner_count, 2);
        assert_eq!(stats.total_votes_cast, 2);
        let expected = (2.0 / (2 * count) as f64 * 100.0).round() as u64;
        assert_eq!(stats.participation_rate, expected);
    }
}
