//! Processor output loader port
//!
//! Defines how serialized processor outputs reach the application layer.

use async_trait::async_trait;
use nlp_quorum_domain::ProcessorOutput;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading processor outputs
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read {path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Source of processor outputs
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ProcessorOutputLoader: Send + Sync {
    /// Load every processor output stored at `path`, in stored order
    async fn load(&self, path: &Path) -> Result<Vec<ProcessorOutput>, LoadError>;
}

/// Load `paths` one after another, concatenating the outputs in order.
///
/// Input order decides every tie-break in the engine, so files are never
/// loaded concurrently.
pub async fn load_all(
    loader: &dyn ProcessorOutputLoader,
    paths: &[PathBuf],
) -> Result<Vec<ProcessorOutput>, LoadError> {
    let mut outputs = Vec::new();
    for path in paths {
        outputs.extend(loader.load(path).await?);
    }
    Ok(outputs)
}
