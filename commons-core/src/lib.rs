//! Commons Core - Business logic for the community governance portal
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core business entities (User, Proposal, etc.)
//! - **ports**: Trait definitions for external dependencies (Store, SuggestionProvider)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (JSON file store, HTTP suggestion, etc.)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

use adapters::seed;
use adapters::{HttpSuggestionProvider, JsonFileStore, PlaintextPasswords};
use ports::{Store, SuggestionProvider};
use services::*;

// Re-export commonly used types at crate root
pub use config::Config;
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{
    ImportRecord, Proposal, ProposalStatus, ProposalSuggestion, ProposalUpdate, User, UserRole,
    UserStatus, UserUpdate,
};

/// Main context for portal operations
///
/// This is the primary entry point for all business logic. It holds the
/// store, configuration, and all services. On first use it seeds the single
/// SUPER_ADMIN account (and, in demo mode, the sample dataset).
pub struct CommonsContext {
    pub config: Config,
    pub store: Arc<dyn Store>,
    pub auth_service: AuthService,
    pub verification_service: VerificationService,
    pub directory_service: DirectoryService,
    pub proposal_service: ProposalService,
    pub feed_service: FeedService,
    pub suggestion_service: SuggestionService,
    pub backup_service: BackupService,
}

impl CommonsContext {
    /// Create a new portal context rooted at the given data directory
    pub fn new(data_dir: &Path) -> Result<Self> {
        let config = Config::load(data_dir)?;
        let store: Arc<dyn Store> = Arc::new(JsonFileStore::new(data_dir)?);

        Self::seed(&config, store.as_ref())?;

        let suggestion_provider: Option<Arc<dyn SuggestionProvider>> =
            match &config.suggestion_endpoint {
                Some(endpoint) => Some(Arc::new(HttpSuggestionProvider::new(
                    endpoint,
                    config.suggestion_timeout_secs,
                )?)),
                None => None,
            };

        let passwords = Arc::new(PlaintextPasswords);
        let auth_service = AuthService::new(Arc::clone(&store), passwords);
        let verification_service = VerificationService::new(Arc::clone(&store));
        let directory_service = DirectoryService::new(Arc::clone(&store));
        let proposal_service = ProposalService::new(Arc::clone(&store));
        let feed_service = FeedService::new(Arc::clone(&store));
        let suggestion_service = SuggestionService::new(suggestion_provider);
        let backup_service = BackupService::new(data_dir.to_path_buf());

        Ok(Self {
            config,
            store,
            auth_service,
            verification_service,
            directory_service,
            proposal_service,
            feed_service,
            suggestion_service,
            backup_service,
        })
    }

    /// Populate empty collections with the bootstrap admin and demo data
    fn seed(config: &Config, store: &dyn Store) -> Result<()> {
        let mut users = store.load_users()?;
        if users.is_empty() {
            users.push(seed::bootstrap_admin(
                &config.admin_phone_number,
                &config.admin_password,
            ));
            if config.demo_mode {
                users.extend(seed::demo_users());
            }
            store.save_users(&users)?;
        }

        if config.demo_mode {
            let proposals = store.load_proposals()?;
            if proposals.is_empty() {
                store.save_proposals(&seed::demo_proposals())?;
            }
        }
        Ok(())
    }
}
