//! JSON file reader for processor outputs.
//!
//! A file holds either one ProcessorOutput object or an array of them.

use async_trait::async_trait;
use nlp_quorum_application::ports::output_loader::{LoadError, ProcessorOutputLoader};
use nlp_quorum_domain::ProcessorOutput;
use std::path::Path;
use tracing::debug;

/// Loads processor outputs from JSON files
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileOutputLoader;

impl JsonFileOutputLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse file contents; `path` is only used for error reporting
    pub fn parse(path: &Path, content: &str) -> Result<Vec<ProcessorOutput>, LoadError> {
        let parse_error = |e: serde_json::Error| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        };
        let value: serde_json::Value = serde_json::from_str(content).map_err(parse_error)?;
        match value {
            serde_json::Value::Array(_) => serde_json::from_value(value).map_err(parse_error),
            other => serde_json::from_value::<ProcessorOutput>(other)
                .map(|output| vec![output])
                .map_err(parse_error),
        }
    }
}

#[async_trait]
impl ProcessorOutputLoader for JsonFileOutputLoader {
    async fn load(&self, path: &Path) -> Result<Vec<ProcessorOutput>, LoadError> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LoadError::NotFound(path.to_path_buf())
            } else {
                LoadError::Io {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                }
            }
        })?;

        let outputs = Self::parse(path, &content)?;
        debug!(
            "Loaded {} processor output(s) from {}",
            outputs.len(),
            path.display()
        );
        Ok(outputs)
    }
}
