//! Infrastructure layer for nlp-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod config;
pub mod loader;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig, FileOutputConfig, FileVotingConfig};
pub use loader::JsonFileOutputLoader;
pub use logging::JsonlVotingLogger;
