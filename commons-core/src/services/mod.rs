//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod backup;
mod directory;
mod feed;
pub mod logging;
mod proposal;
mod suggestion;
mod verification;

pub use auth::{AuthService, NewRegistration};
pub use backup::{BackupMetadata, BackupService};
pub use directory::{DirectoryService, ImportSummary};
pub use feed::{FeedService, OwnerFeedItem, PublicStats, VoterSummary};
pub use logging::{EntryPoint, LogEntry, LogEvent, LoggingService};
pub use proposal::{NewProposal, ProposalService};
pub use suggestion::SuggestionService;
pub use verification::{orphaned_pending_owners, VerificationService};
