//! Proposal service - lifecycle and voting
//!
//! Proposals move from active to closed and are never physically deleted.
//! All lifecycle operations belong to the SUPER_ADMIN; casting a vote is the
//! one operation reserved to verified owners.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::result::{Error, Result};
use crate::domain::{Proposal, ProposalStatus, ProposalUpdate, User, UserRole};
use crate::ports::Store;

/// A proposal creation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    pub deadline: DateTime<Utc>,
    /// 2 or more option labels, in display order
    pub options: Vec<String>,
}

/// Proposal lifecycle and voting service
pub struct ProposalService {
    store: Arc<dyn Store>,
}

impl ProposalService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// List all proposals in stored order
    pub fn all_proposals(&self) -> Result<Vec<Proposal>> {
        self.store.load_proposals()
    }

    fn require_super_admin(actor: &User) -> Result<()> {
        if actor.role != UserRole::SuperAdmin {
            return Err(Error::forbidden(
                "only the super admin may manage proposals",
            ));
        }
        Ok(())
    }

    fn find_proposal<'a>(
        proposals: &'a mut [Proposal],
        id: &str,
    ) -> Result<&'a mut Proposal> {
        proposals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(format!("proposal {}", id)))
    }

    /// Create an active proposal surfacing ahead of all existing ones
    ///
    /// The new proposal receives an order value strictly below the current
    /// minimum and is inserted at the front of the collection, so insertion
    /// order breaks ties in its favor.
    pub fn create_proposal(&self, actor: &User, request: &NewProposal) -> Result<Proposal> {
        Self::require_super_admin(actor)?;

        if request.title.trim().is_empty() {
            return Err(Error::validation("missing required field: title"));
        }
        if request.options.len() < 2 {
            return Err(Error::validation("a proposal needs at least 2 options"));
        }

        let mut proposals = self.store.load_proposals()?;
        let min_order = proposals.iter().map(|p| p.order).min().unwrap_or(0);

        let proposal = Proposal::new(
            &request.title,
            &request.description,
            request.deadline,
            &request.options,
            min_order - 1,
        );
        proposals.insert(0, proposal.clone());
        self.store.save_proposals(&proposals)?;
        Ok(proposal)
    }

    /// Cast a vote as a verified owner
    ///
    /// A repeat vote by the same user is a silent no-op, so the operation is
    /// idempotent per (proposal, voter) pair. Voting on a closed proposal is
    /// an invalid-state error; an unknown option id is rejected outright.
    pub fn cast_vote(&self, actor: &User, proposal_id: &str, option_id: &str) -> Result<Proposal> {
        if !actor.can_vote() {
            return Err(Error::forbidden("only verified owners may vote"));
        }

        let mut proposals = self.store.load_proposals()?;
        let proposal = Self::find_proposal(&mut proposals, proposal_id)?;

        if proposal.status != ProposalStatus::Active {
            return Err(Error::invalid_state(format!(
                "proposal {} is closed",
                proposal_id
            )));
        }

        if proposal.has_voted(&actor.id) {
            return Ok(proposal.clone());
        }

        let option = proposal
            .options
            .iter_mut()
            .find(|o| o.id == option_id)
            .ok_or_else(|| Error::not_found(format!("option {}", option_id)))?;

        option.count += 1;
        proposal.total_votes += 1;
        proposal.voted_user_ids.push(actor.id.clone());
        let updated = proposal.clone();
        self.store.save_proposals(&proposals)?;
        Ok(updated)
    }

    /// Close a proposal; closed is terminal
    pub fn close_proposal(&self, actor: &User, proposal_id: &str) -> Result<Proposal> {
        Self::require_super_admin(actor)?;

        let mut proposals = self.store.load_proposals()?;
        let proposal = Self::find_proposal(&mut proposals, proposal_id)?;

        if proposal.status == ProposalStatus::Closed {
            return Err(Error::invalid_state(format!(
                "proposal {} is already closed",
                proposal_id
            )));
        }

        proposal.status = ProposalStatus::Closed;
        let closed = proposal.clone();
        self.store.save_proposals(&proposals)?;
        Ok(closed)
    }

    /// Partially update title, description, or deadline
    pub fn edit_proposal(
        &self,
        actor: &User,
        proposal_id: &str,
        update: &ProposalUpdate,
    ) -> Result<Proposal> {
        Self::require_super_admin(actor)?;

        let mut proposals = self.store.load_proposals()?;
        let proposal = Self::find_proposal(&mut proposals, proposal_id)?;

        update.apply(proposal);
        let edited = proposal.clone();
        self.store.save_proposals(&proposals)?;
        Ok(edited)
    }

    /// Edit one option's label; ids and counts stay immutable
    pub fn edit_option_label(
        &self,
        actor: &User,
        proposal_id: &str,
        option_id: &str,
        label: &str,
    ) -> Result<Proposal> {
        Self::require_super_admin(actor)?;

        let mut proposals = self.store.load_proposals()?;
        let proposal = Self::find_proposal(&mut proposals, proposal_id)?;

        let option = proposal
            .options
            .iter_mut()
            .find(|o| o.id == option_id)
            .ok_or_else(|| Error::not_found(format!("option {}", option_id)))?;

        option.label = label.to_string();
        let edited = proposal.clone();
        self.store.save_proposals(&proposals)?;
        Ok(edited)
    }

    /// Flip a proposal's visibility
    ///
    /// Hidden proposals drop out of the public and owner feeds but stay
    /// visible to the super admin.
    pub fn toggle_visibility(&self, actor: &User, proposal_id: &str) -> Result<Proposal> {
        Self::require_super_admin(actor)?;

        let mut proposals = self.store.load_proposals()?;
        let proposal = Self::find_proposal(&mut proposals, proposal_id)?;

        proposal.is_visible = !proposal.is_visible;
        let toggled = proposal.clone();
        self.store.save_proposals(&proposals)?;
        Ok(toggled)
    }

    /// Reassign display order from the given sequence
    ///
    /// Full replacement: each listed proposal gets order = its index. Unknown
    /// ids fail the whole call before any mutation.
    pub fn reorder_proposals(&self, actor: &User, sequence: &[String]) -> Result<()> {
        Self::require_super_admin(actor)?;

        let mut proposals = self.store.load_proposals()?;
        for id in sequence {
            if !proposals.iter().any(|p| &p.id == id) {
                return Err(Error::not_found(format!("proposal {}", id)));
            }
        }

        for (index, id) in sequence.iter().enumerate() {
            if let Some(p) = proposals.iter_mut().find(|p| &p.id == id) {
                p.order = index as i64;
            }
        }
        self.store.save_proposals(&proposals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::seed::bootstrap_admin;
    use crate::adapters::MemoryStore;
    use crate::domain::UserStatus;
    use chrono::Duration;

    fn admin() -> User {
        bootstrap_admin("18688835658", "895600")
    }

    fn voter(id: &str) -> User {
        let mut u = User::new_owner("张伟", "13900000002", "password", "1号楼", "305");
        u.id = id.to_string();
        u.status = UserStatus::Verified;
        u
    }

    fn request(options: &[&str]) -> NewProposal {
        NewProposal {
            title: "小区门禁系统升级人脸识别".to_string(),
            description: "建议全面升级为人脸识别系统。".to_string(),
            deadline: Utc::now() + Duration::days(7),
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn service() -> ProposalService {
        ProposalService::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_create_requires_two_options() {
        let service = service();
        let err = service.create_proposal(&admin(), &request(&["同意"])).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_new_proposals_surface_first() {
        let service = service();
        let first = service.create_proposal(&admin(), &request(&["同意", "反对"])).unwrap();
        let second = service.create_proposal(&admin(), &request(&["同意", "反对"])).unwrap();

        assert!(second.order < first.order);
        let stored = service.all_proposals().unwrap();
        assert_eq!(stored[0].id, second.id);
    }

    #[test]
    fn test_vote_is_idempotent_per_voter() {
        let service = service();
        let p = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();
        let u = voter("u-1");

        let after_first = service.cast_vote(&u, &p.id, "opt2").unwrap();
        assert_eq!(after_first.total_votes, 1);
        assert_eq!(after_first.options[1].count, 1);
        assert_eq!(after_first.options[0].count, 0);

        // Second vote, even for a different option, changes nothing
        let after_second = service.cast_vote(&u, &p.id, "opt1").unwrap();
        assert_eq!(after_second, after_first);
        assert!(after_second.counts_consistent());
    }

    #[test]
    fn test_vote_requires_verified_owner() {
        let service = service();
        let p = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();

        let mut pending = voter("u-2");
        pending.status = UserStatus::Pending;
        assert!(matches!(
            service.cast_vote(&pending, &p.id, "opt1"),
            Err(Error::Forbidden(_))
        ));

        assert!(matches!(
            service.cast_vote(&admin(), &p.id, "opt1"),
            Err(Error::Forbidden(_))
        ));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let service = service();
        let p = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();

        let err = service.cast_vote(&voter("u-1"), &p.id, "opt9").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // The rejected vote left no trace
        let stored = service.all_proposals().unwrap();
        assert_eq!(stored[0].total_votes, 0);
    }

    #[test]
    fn test_closing_is_terminal() {
        let service = service();
        let p = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();

        service.close_proposal(&admin(), &p.id).unwrap();
        assert!(matches!(
            service.close_proposal(&admin(), &p.id),
            Err(Error::InvalidState(_))
        ));
        assert!(matches!(
            service.cast_vote(&voter("u-1"), &p.id, "opt1"),
            Err(Error::InvalidState(_))
        ));
    }

    #[test]
    fn test_reorder_is_total_replacement() {
        let service = service();
        let a = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();
        let b = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();
        let c = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();

        let sequence = vec![a.id.clone(), c.id.clone(), b.id.clone()];
        service.reorder_proposals(&admin(), &sequence).unwrap();

        let stored = service.all_proposals().unwrap();
        let order_of = |id: &str| stored.iter().find(|p| p.id == id).unwrap().order;
        assert_eq!(order_of(&a.id), 0);
        assert_eq!(order_of(&c.id), 1);
        assert_eq!(order_of(&b.id), 2);
    }

    #[test]
    fn test_reorder_rejects_unknown_ids_without_mutating() {
        let service = service();
        let a = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();

        let err = service
            .reorder_proposals(&admin(), &[a.id.clone(), "v-missing".to_string()])
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let stored = service.all_proposals().unwrap();
        assert_eq!(stored[0].order, a.order);
    }

    #[test]
    fn test_option_label_edit_keeps_counts() {
        let service = service();
        let p = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();
        service.cast_vote(&voter("u-1"), &p.id, "opt1").unwrap();

        let edited = service
            .edit_option_label(&admin(), &p.id, "opt1", "同意（修订）")
            .unwrap();
        assert_eq!(edited.options[0].label, "同意（修订）");
        assert_eq!(edited.options[0].count, 1);
        assert!(edited.counts_consistent());
    }

    #[test]
    fn test_toggle_visibility_flips() {
        let service = service();
        let p = service.create_proposal(&admin(), &request(&["A", "B"])).unwrap();

        let hidden = service.toggle_visibility(&admin(), &p.id).unwrap();
        assert!(!hidden.is_visible);
        let shown = service.toggle_visibility(&admin(), &p.id).unwrap();
        assert!(shown.is_visible);
    }
}
