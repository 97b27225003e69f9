//! Adapter implementations for the core ports

pub mod http_suggestion;
pub mod json_store;
pub mod memory;
pub mod plaintext;
pub mod seed;

pub use http_suggestion::HttpSuggestionProvider;
pub use json_store::JsonFileStore;
pub use memory::MemoryStore;
pub use plaintext::PlaintextPasswords;
