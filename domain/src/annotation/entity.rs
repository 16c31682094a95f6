//! Named / domain entity annotation

use super::span::{Span, Spanned};
use super::token::Token;
use super::{Annotation, default_confidence};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An entity mention covering the token-index span `[start, end)`.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::{Entity, Token};
///
/// let entity = Entity::new("DISEASE", 0, 2)
///     .with_tokens(vec![
///         Token::new(0, "breast", 0, 6),
///         Token::new(1, "cancer", 7, 13),
///     ])
///     .with_domain("biology");
///
/// assert_eq!(entity.text(), "breast cancer");
/// assert!(entity.is_scientific);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// `PERSON`, `ORG`, `GENE`, `DISEASE`, ...
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub sources: BTreeSet<String>,
    #[serde(default)]
    pub is_scientific: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
}

impl Entity {
    pub fn new(entity_type: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            tokens: Vec::new(),
            confidence: default_confidence(),
            sources: BTreeSet::new(),
            is_scientific: false,
            domain: None,
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
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

    /// Tag the entity with a scientific domain (`biology`, `chemistry`, ...)
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self.is_scientific = true;
        self
    }

    /// Surface text of the member tokens, space-joined
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Spanned for Entity {
    fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }
}

impl Annotation for Entity {
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
