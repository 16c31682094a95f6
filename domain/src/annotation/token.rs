//! Word-level token annotation

use super::span::{Span, Spanned};
use super::{Annotation, default_confidence};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// A single token as proposed by one source, or as merged by the engine.
///
/// Part-of-speech tags follow the Universal Dependencies tag set (`NOUN`,
/// `VERB`, ...), morphological features use UD feature names.
///
/// # Example
///
/// ```
/// use nlp_quorum_domain::{Spanned, Token};
///
/// let token = Token::new(0, "Proteins", 10, 18)
///     .with_lemma("protein")
///     .with_pos("NOUN")
///     .with_morph("Number", "Plur")
///     .with_confidence(0.9)
///     .with_source("spacy");
///
/// assert_eq!(token.span().len(), 8);
/// assert!(token.sources.contains("spacy"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Position in the producing source's token sequence
    pub index: usize,
    pub text: String,
    /// Character offset (inclusive) in the shared document
    pub start_char: usize,
    /// Character offset (exclusive) in the shared document
    pub end_char: usize,
    pub lemma: String,
    /// Coarse part-of-speech tag
    pub pos: String,
    /// Fine-grained, tool-specific tag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_fine: Option<String>,
    #[serde(default)]
    pub morph: BTreeMap<String, String>,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub sources: BTreeSet<String>,
    #[serde(default)]
    pub is_stop: bool,
    #[serde(default)]
    pub is_punct: bool,
    #[serde(default)]
    pub is_space: bool,
}

impl Token {
    /// Create a token; the lemma defaults to the surface text and the tag to `X`.
    pub fn new(index: usize, text: impl Into<String>, start_char: usize, end_char: usize) -> Self {
        let text = text.into();
        Self {
            index,
            lemma: text.clone(),
            text,
            start_char,
            end_char,
            pos: "X".to_string(),
            pos_fine: None,
            morph: BTreeMap::new(),
            confidence: default_confidence(),
            sources: BTreeSet::new(),
            is_stop: false,
            is_punct: false,
            is_space: false,
        }
    }

    pub fn with_lemma(mut self, lemma: impl Into<String>) -> Self {
        self.lemma = lemma.into();
        self
    }

    pub fn with_pos(mut self, pos: impl Into<String>) -> Self {
        self.pos = pos.into();
        self
    }

    pub fn with_pos_fine(mut self, pos_fine: impl Into<String>) -> Self {
        self.pos_fine = Some(pos_fine.into());
        self
    }

    pub fn with_morph(mut self, feature: impl Into<String>, value: impl Into<String>) -> Self {
        self.morph.insert(feature.into(), value.into());
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

    pub fn with_flags(mut self, is_stop: bool, is_punct: bool, is_space: bool) -> Self {
        self.is_stop = is_stop;
        self.is_punct = is_punct;
        self.is_space = is_space;
        self
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        Span::new(self.start_char, self.end_char)
    }
}

impl Annotation for Token {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_defaults() {
        let token = Token::new(3, "cells", 20, 25);
        assert_eq!(token.lemma, "cells");
        assert_eq!(token.pos, "X");
        assert_eq!(token.confidence, 1.0);
        assert!(token.sources.is_empty());
        assert!(token.morph.is_empty());
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(Token::new(0, "a", 0, 1).with_confidence(1.7).confidence, 1.0);
        assert_eq!(Token::new(0, "a", 0, 1).with_confidence(-0.2).confidence, 0.0);
    }

    #[test]
    fn test_deserialize_minimal_json() {
        let json = r#"{
            "index": 1,
            "text": "binds",
            "start_char": 9,
            "end_char": 14,
            "lemma": "bind",
            "pos": "VERB"
        }"#;
        let token: Token = serde_json::from_str(json).unwrap();
        assert_eq!(token.pos, "VERB");
        assert_eq!(token.confidence, 1.0);
        assert_eq!(token.span(), Span::new(9, 14));
        assert!(!token.is_punct);
    }

    #[test]
    fn test_with_sources_replaces_set() {
        let token = Token::new(0, "a", 0, 1).with_source("spacy");
        let attributed = token.with_sources(BTreeSet::from(["stanza".to_string()]));
        assert!(attributed.sources.contains("stanza"));
        assert!(!attributed.sources.contains("spacy"));
        assert!(token.sources.contains("spacy"));
    }
}
