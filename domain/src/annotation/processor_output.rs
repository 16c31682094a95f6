//! Output bundle of one external analysis tool

use super::{Dependency, Entity, Token};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Everything one analysis tool produced for one document.
///
/// Produced once per tool per document and treated as read-only by the
/// voting engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorOutput {
    /// Tool identifier (`spacy`, `stanza`, `udpipe`, ...)
    pub source_name: String,
    #[serde(default)]
    pub source_version: String,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default = "super::default_confidence")]
    pub overall_confidence: f64,
}

impl ProcessorOutput {
    pub fn new(source_name: impl Into<String>, source_version: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            source_version: source_version.into(),
            tokens: Vec::new(),
            dependencies: Vec::new(),
            entities: Vec::new(),
            overall_confidence: super::default_confidence(),
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Dependency>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_entities(mut self, entities: Vec<Entity>) -> Self {
        self.entities = entities;
        self
    }

    pub fn with_overall_confidence(mut self, confidence: f64) -> Self {
        self.overall_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Set of token indices this output defines
    pub fn token_indices(&self) -> HashSet<usize> {
        self.tokens.iter().map(|t| t.index).collect()
    }

    /// Whether the output carries no annotations at all
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.dependencies.is_empty() && self.entities.is_empty()
    }
}
