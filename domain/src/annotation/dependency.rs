//! Syntactic dependency annotation

use super::{Annotation, default_confidence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A head → dependent link.
///
/// Indices refer to [`Token::index`](super::Token::index) values of the
/// same processor output that produced the dependency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependency {
    pub head: usize,
    pub dependent: usize,
    /// UD relation label, possibly with a subtype (`nsubj:pass`)
    pub relation: String,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub sources: BTreeSet<String>,
}

impl Dependency {
    pub fn new(head: usize, dependent: usize, relation: impl Into<String>) -> Self {
        Self {
            head,
            dependent,
            relation: relation.into(),
            confidence: default_confidence(),
            sources: BTreeSet::new(),
        }
    }

    /// Set the confidence, clamped to `[0, 1]`
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.insert(source.into());
        self
    }

    /// Relation label without its subtype: `nsubj:pass` -> `nsubj`
    pub fn base_relation(&self) -> &str {
        self.relation
            .split(':')
            .next()
            .unwrap_or(self.relation.as_str())
    }
}

impl Annotation for Dependency {
    fn confidence(&self) -> f64 {
        self.confidence
    }

    fn sources(&self) -> &BTreeSet<String> {
        &self.sources
    }

    fn with_sources(&self, sources: BTreeSet<String>) -> Self {
        Self {
            sources,
            ..self.clone()
        }
    }
}
