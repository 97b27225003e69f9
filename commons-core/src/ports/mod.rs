//! Port definitions for external dependencies

pub mod password;
pub mod store;
pub mod suggestion;

pub use password::PasswordVerifier;
pub use store::Store;
pub use suggestion::SuggestionProvider;
