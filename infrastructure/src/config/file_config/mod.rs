//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod output;
mod voting;

pub use output::FileOutputConfig;
pub use voting::FileVotingConfig;

use nlp_quorum_domain::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Quorum and merge settings
    pub voting: FileVotingConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Unparseable enum values come back as warnings (a default is used);
    /// values the engine would reject come back as errors.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let (config, mut issues) = self.voting.to_voting_config();
        if let Err(e) = config.validate() {
            let issue = ConfigIssue::from_domain_error(&e);
            if !issues.iter().any(|i| i.message == issue.message) {
                issues.push(issue);
            }
        }
        issues
    }
}
