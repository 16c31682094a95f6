//! Configuration file loading for nlp-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `NLP_QUORUM_*` environment variables (`__` separates sections)
//! 2. `--config <path>` specified file
//! 3. Project root: `./nlp-quorum.toml` or `./.nlp-quorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/nlp-quorum/config.toml`
//! 5. Fallback: `~/.config/nlp-quorum/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileOutputConfig, FileVotingConfig};
pub use loader::{ConfigLoader, ENV_PREFIX};
