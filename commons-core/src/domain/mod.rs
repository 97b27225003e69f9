//! Domain models for the community governance core

pub mod proposal;
pub mod result;
pub mod suggestion;
pub mod user;

pub use proposal::{Proposal, ProposalOption, ProposalStatus, ProposalUpdate};
pub use result::{Error, Result};
pub use suggestion::ProposalSuggestion;
pub use user::{ImportRecord, User, UserRole, UserStatus, UserUpdate};
