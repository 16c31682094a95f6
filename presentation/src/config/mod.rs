//! Presentation-level configuration
//!
//! Resolves how results are rendered from file settings and CLI flags.

use crate::cli::commands::{Cli, OutputFormat};

/// Output configuration for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show progress indicators
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Summary,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// CLI flags win over file settings
    pub fn resolve(
        cli: &Cli,
        file_format: Option<nlp_quorum_domain::OutputFormat>,
        file_color: bool,
    ) -> Self {
        let format = cli
            .output
            .or(file_format.map(OutputFormat::from))
            .unwrap_or(OutputFormat::Summary);
        Self {
            format,
            color: file_color && !cli.no_color,
            show_progress: !cli.quiet,
        }
    }
}
